//! Speculative recursive-descent parser for definition files and C.
//!
//! This module provides a hand-written backtracking parser whose rules only
//! append to an event log. Failed alternatives roll the log back, so
//! exploration never allocates tree nodes.
//!
//! # Architecture
//!
//! The parser uses a three-phase approach:
//!
//! 1. **Lexing**: Tokenize source text (see `lexer` module)
//! 2. **Parsing**: Build a flat stream of events (start node, add token, finish node)
//! 3. **Tree Building**: Normalize the events into a [`LightTree`]
//!
//! Operator families share one precedence-climbing driver, and every rule
//! runs under a recursion guard that rejects same-position re-entry.

#![allow(clippy::module_inception)]

mod config;
mod event;
mod expected;
pub(crate) mod grammar;
mod guard;
mod parser;
mod precedence;
mod sink;
mod source;
mod token_set;

pub use config::{Cancellation, ParserConfig, DEFAULT_MAX_DEPTH, DEFAULT_MAX_ITERATIONS};
pub(crate) use parser::{CompletedMarker, Parser};

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use crate::lexer::{Lexer, Token};
use crate::syntax::{SyntaxKind, SyntaxNode};
use crate::tree::{LightNode, LightTree};
use sink::Sink;

/// Start rule of a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryPoint {
    /// Header definitions, optional `---` and C declarations. Whole unit.
    DefinitionFile,
    /// Sequence of C external declarations. Whole unit.
    TranslationUnit,
    /// One C expression. Fragment.
    Expression,
    /// One C compound statement. Fragment.
    Block,
}

impl EntryPoint {
    /// Kind of the root node produced for this entry.
    #[must_use]
    pub fn root_kind(self) -> SyntaxKind {
        match self {
            Self::DefinitionFile => SyntaxKind::DefinitionFile,
            Self::TranslationUnit => SyntaxKind::TranslationUnit,
            Self::Expression => SyntaxKind::ExpressionFragment,
            Self::Block => SyntaxKind::BlockFragment,
        }
    }

    /// Whole-unit entries report leftover tokens as an error; fragments keep
    /// them as plain tokens of the root.
    #[must_use]
    pub fn is_whole_unit(self) -> bool {
        matches!(self, Self::DefinitionFile | Self::TranslationUnit)
    }
}

/// Counters collected during one parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Markers opened, preceding markers included.
    pub markers: usize,
    /// Markers rolled back.
    pub rollbacks: usize,
    /// Rule calls rejected by the recursion guard.
    pub guard_rejections: usize,
    /// Repetition passes.
    pub iterations: usize,
    /// Deepest rule nesting reached.
    pub max_depth: usize,
}

/// Result of parsing source text.
#[derive(Debug, Clone)]
pub struct Parse {
    tree: LightTree,
    errors: Vec<ParseError>,
    consumed: TextSize,
    stats: ParseStats,
}

impl Parse {
    /// Returns the flyweight tree.
    #[must_use]
    pub fn tree(&self) -> &LightTree {
        &self.tree
    }

    /// Returns the root node.
    #[must_use]
    pub fn root(&self) -> LightNode {
        self.tree.root()
    }

    /// Builds the lossless `rowan` tree.
    #[must_use]
    pub fn syntax(&self) -> SyntaxNode {
        self.tree.to_syntax()
    }

    /// Returns the parsing errors.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Returns `true` if parsing produced no errors.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// End offset of the last token matched by the entry rule.
    #[must_use]
    pub fn consumed(&self) -> TextSize {
        self.consumed
    }

    /// Engine counters for this parse.
    #[must_use]
    pub fn stats(&self) -> ParseStats {
        self.stats
    }
}

/// A parsing error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The entry rule matched nothing.
    #[error("unexpected {found}{}", expected_suffix(.expected))]
    Unexpected {
        /// Token at the furthest failure position.
        range: TextRange,
        /// Display form of that token.
        found: SmolStr,
        /// Productions that would have been accepted there.
        expected: Vec<&'static str>,
    },
    /// The entry rule matched, but input was left over.
    #[error("unconsumed input, unexpected {found}{}", expected_suffix(.expected))]
    TrailingInput {
        /// Span of the leftover input.
        range: TextRange,
        /// Display form of the token at the furthest failure.
        found: SmolStr,
        /// Productions that would have been accepted there.
        expected: Vec<&'static str>,
    },
    /// More rule invocations were active than [`ParserConfig::max_depth`].
    #[error("nesting deeper than {limit} rules at offset {offset}")]
    NestingTooDeep {
        /// Byte offset of the token being parsed.
        offset: u32,
        /// Configured limit.
        limit: usize,
    },
    /// More repetition passes than [`ParserConfig::max_iterations`].
    #[error("parse aborted after {limit} iterations at offset {offset}")]
    IterationLimit {
        /// Byte offset of the token being parsed.
        offset: u32,
        /// Configured limit.
        limit: usize,
    },
    /// The [`Cancellation`] flag was raised.
    #[error("parse cancelled at offset {offset}")]
    Cancelled {
        /// Byte offset of the token being parsed.
        offset: u32,
    },
}

fn expected_suffix(expected: &[&'static str]) -> String {
    match expected {
        [] => String::new(),
        [single] => format!(", expected {single}"),
        many => format!(", expected one of {}", many.join(", ")),
    }
}

impl ParseError {
    /// Byte range the error points at.
    #[must_use]
    pub fn range(&self) -> TextRange {
        match self {
            Self::Unexpected { range, .. } | Self::TrailingInput { range, .. } => *range,
            Self::NestingTooDeep { offset, .. }
            | Self::IterationLimit { offset, .. }
            | Self::Cancelled { offset } => TextRange::empty(TextSize::from(*offset)),
        }
    }
}

/// Parser engine.
///
/// Holds only configuration, so one engine can run any number of parses;
/// each call builds a fresh builder and resets the expected-production set.
#[derive(Debug, Clone, Default)]
pub struct SyntaxParser {
    config: ParserConfig,
    cancellation: Option<Cancellation>,
}

impl SyntaxParser {
    /// Creates an engine with the given limits.
    #[must_use]
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            cancellation: None,
        }
    }

    /// Attaches a cancellation flag polled by every repetition loop.
    #[must_use]
    pub fn with_cancellation(mut self, cancellation: Cancellation) -> Self {
        self.cancellation = Some(cancellation);
        self
    }

    /// Returns the engine's limits.
    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Lexes `text` in the mode the entry needs and parses it.
    ///
    /// Text past 4 GiB is not lexed, since offsets are 32-bit.
    #[must_use]
    pub fn parse(&self, text: &str, entry: EntryPoint) -> Parse {
        let tokens: Vec<Token> = match entry {
            EntryPoint::DefinitionFile => Lexer::definitions(text).collect(),
            _ => Lexer::new(text).collect(),
        };
        self.parse_tokens(text, tokens, entry)
    }

    // `tokens` come from lexing `text`, so every range lies inside it.
    fn parse_tokens(&self, text: &str, tokens: Vec<Token>, entry: EntryPoint) -> Parse {
        tracing::debug!(?entry, tokens = tokens.len(), "parse started");

        let parser = Parser::new(&tokens, text, self.config, self.cancellation.clone());
        let output = parser.run(entry);
        let events = output.events.len();
        let tree = Sink::new(tokens, text, output.events).finish();

        tracing::debug!(
            ?entry,
            events,
            nodes = tree.node_count(),
            rollbacks = output.stats.rollbacks,
            errors = output.errors.len(),
            "parse finished"
        );

        Parse {
            tree,
            errors: output.errors,
            consumed: output.consumed,
            stats: output.stats,
        }
    }
}

/// Parses a definition file with default limits.
#[must_use]
pub fn parse_definitions(text: &str) -> Parse {
    SyntaxParser::default().parse(text, EntryPoint::DefinitionFile)
}

/// Parses a C translation unit with default limits.
#[must_use]
pub fn parse_translation_unit(text: &str) -> Parse {
    SyntaxParser::default().parse(text, EntryPoint::TranslationUnit)
}

/// Parses a single C expression with default limits.
#[must_use]
pub fn parse_expression(text: &str) -> Parse {
    SyntaxParser::default().parse(text, EntryPoint::Expression)
}

/// Parses a single C compound statement with default limits.
#[must_use]
pub fn parse_block(text: &str) -> Parse {
    SyntaxParser::default().parse(text, EntryPoint::Block)
}
