//! Lexer for C interop definition files.
//!
//! This module provides a lexer that tokenizes definition files and C source
//! into a stream of tokens with their positions in the source text. A
//! definition file starts in header mode; the `---` delimiter morphs the
//! underlying `logos` lexer into C mode for the rest of the input.

mod header;
mod tokens;

pub use header::{is_known_key, KNOWN_KEYS};
pub use tokens::TokenKind;

use header::{scan_value, HeaderToken};
use logos::Logos;
use std::collections::VecDeque;
use text_size::{TextRange, TextSize};

/// A token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The byte range of the token in the source text.
    pub range: TextRange,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, range: TextRange) -> Self {
        Self { kind, range }
    }

    /// Returns the length of the token in bytes.
    #[must_use]
    pub fn len(&self) -> TextSize {
        self.range.len()
    }

    /// Returns true if the token has zero length.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

enum Mode<'src> {
    Header {
        inner: logos::Lexer<'src, HeaderToken>,
        value_next: bool,
    },
    Code(logos::Lexer<'src, TokenKind>),
    Done,
}

/// Lexer for definition files and C source.
///
/// The lexer is an iterator over tokens. It handles all error recovery
/// internally - any unrecognized characters are returned as `TokenKind::ErrorToken`.
/// Offsets are 32-bit, so lexing stops before the first token that ends
/// past 4 GiB.
pub struct Lexer<'src> {
    mode: Mode<'src>,
    source: &'src str,
    pending: VecDeque<Token>,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer for plain C source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            mode: Mode::Code(TokenKind::lexer(source)),
            source,
            pending: VecDeque::new(),
        }
    }

    /// Creates a lexer for a definition file, starting in header mode.
    #[must_use]
    pub fn definitions(source: &'src str) -> Self {
        Self {
            mode: Mode::Header {
                inner: HeaderToken::lexer(source),
                value_next: false,
            },
            source,
            pending: VecDeque::new(),
        }
    }

    /// Returns the source text being lexed.
    #[must_use]
    pub fn source(&self) -> &'src str {
        self.source
    }

    fn next_header(&mut self) -> Option<Token> {
        let Mode::Header { inner, value_next } = &mut self.mode else {
            return None;
        };

        if std::mem::take(value_next) {
            let base = inner.span().end;
            let (tokens, consumed) = scan_value(inner.remainder(), base);
            inner.bump(consumed);
            self.pending.extend(tokens);
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
        }

        let raw = inner.next()?;
        let span = inner.span();
        let kind = match raw {
            Ok(raw) => raw.classify(inner.slice()),
            Err(()) => TokenKind::ErrorToken,
        };
        if kind == TokenKind::Separator {
            *value_next = true;
        }

        let Some(range) = range(span) else {
            self.mode = Mode::Done;
            return None;
        };
        let token = Token::new(kind, range);
        if kind == TokenKind::Delim {
            self.enter_code();
        }
        Some(token)
    }

    fn enter_code(&mut self) {
        if let Mode::Header { inner, .. } = std::mem::replace(&mut self.mode, Mode::Done) {
            self.mode = Mode::Code(inner.morph());
        }
    }
}

/// `None` once the span no longer fits the 32-bit offsets of [`TextSize`].
fn range(span: std::ops::Range<usize>) -> Option<TextRange> {
    let start = TextSize::try_from(span.start).ok()?;
    let end = TextSize::try_from(span.end).ok()?;
    Some(TextRange::new(start, end))
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.pop_front() {
            return Some(token);
        }

        match &mut self.mode {
            Mode::Code(inner) => {
                let kind = inner.next()?.unwrap_or(TokenKind::ErrorToken);
                let Some(range) = range(inner.span()) else {
                    self.mode = Mode::Done;
                    return None;
                };
                Some(Token::new(kind, range))
            }
            Mode::Header { .. } => self.next_header(),
            Mode::Done => None,
        }
    }
}

/// Lex C source and return all tokens.
///
/// This is a convenience function for testing and simple use cases.
/// For the parser, use the `Lexer` iterator directly.
#[must_use]
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

/// Lex a definition file (header, delimiter, C body) and return all tokens.
#[must_use]
pub fn lex_definitions(source: &str) -> Vec<Token> {
    Lexer::definitions(source).collect()
}

/// Lex source and return tokens paired with their text.
///
/// Useful for debugging and testing.
#[must_use]
pub fn lex_with_text(source: &str) -> Vec<(Token, &str)> {
    Lexer::new(source)
        .map(|token| {
            let text = &source[usize::from(token.range.start())..usize::from(token.range.end())];
            (token, text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_rejects_offsets_past_u32() {
        assert_eq!(
            range(2..5),
            Some(TextRange::new(TextSize::from(2), TextSize::from(5)))
        );
        #[cfg(target_pointer_width = "64")]
        assert_eq!(range(0..(1 << 32)), None);
    }

    fn significant(source: &str, tokens: &[Token]) -> Vec<(TokenKind, String)> {
        tokens
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .map(|t| {
                (
                    t.kind,
                    source[usize::from(t.range.start())..usize::from(t.range.end())].to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn test_lexer_basic() {
        let source = "int x = 42;";
        let tokens = lex(source);

        let non_trivia: Vec<_> = tokens.iter().filter(|t| !t.kind.is_trivia()).collect();
        assert_eq!(non_trivia.len(), 5);
        assert_eq!(non_trivia[0].kind, TokenKind::KwInt);
        assert_eq!(non_trivia[1].kind, TokenKind::Ident);
        assert_eq!(non_trivia[2].kind, TokenKind::Eq);
        assert_eq!(non_trivia[3].kind, TokenKind::IntLiteral);
        assert_eq!(non_trivia[4].kind, TokenKind::Semicolon);
    }

    #[test]
    fn test_lexer_preserves_positions() {
        let source = "abc = 123";
        let tokens = lex(source);

        assert_eq!(tokens[0].range, TextRange::new(0.into(), 3.into()));
        assert_eq!(tokens[1].range, TextRange::new(3.into(), 4.into()));
        assert_eq!(tokens[2].range, TextRange::new(4.into(), 5.into()));
    }

    #[test]
    fn test_lex_with_text() {
        let source = "x += 42";
        let tokens = lex_with_text(source);

        let non_trivia: Vec<_> = tokens.iter().filter(|(t, _)| !t.kind.is_trivia()).collect();
        assert_eq!(non_trivia[0].1, "x");
        assert_eq!(non_trivia[1].1, "+=");
        assert_eq!(non_trivia[2].1, "42");
    }

    #[test]
    fn test_header_then_code() {
        let source = "headers = stdio.h\ncompilerOpts.linux = -DLINUX\n---\nint f(void);\n";
        let tokens = lex_definitions(source);
        assert_eq!(
            significant(source, &tokens),
            vec![
                (TokenKind::KeyKnown, "headers".to_string()),
                (TokenKind::Separator, "=".to_string()),
                (TokenKind::Value, "stdio.h".to_string()),
                (TokenKind::KeyKnown, "compilerOpts".to_string()),
                (TokenKind::Platform, ".linux".to_string()),
                (TokenKind::Separator, "=".to_string()),
                (TokenKind::Value, "-DLINUX".to_string()),
                (TokenKind::Delim, "---".to_string()),
                (TokenKind::KwInt, "int".to_string()),
                (TokenKind::Ident, "f".to_string()),
                (TokenKind::LParen, "(".to_string()),
                (TokenKind::KwVoid, "void".to_string()),
                (TokenKind::RParen, ")".to_string()),
                (TokenKind::Semicolon, ";".to_string()),
            ]
        );
    }

    #[test]
    fn test_header_comments_and_unknown_keys() {
        let source = "# generated\nmyKey = 1\n";
        let tokens = lex_definitions(source);
        assert_eq!(tokens[0].kind, TokenKind::HeaderComment);
        assert_eq!(
            significant(source, &tokens),
            vec![
                (TokenKind::KeyUnknown, "myKey".to_string()),
                (TokenKind::Separator, "=".to_string()),
                (TokenKind::Value, "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_value_may_contain_code_characters() {
        let source = "excludedFunctions = foo; bar = baz\n";
        let tokens = lex_definitions(source);
        assert_eq!(
            significant(source, &tokens)[2],
            (TokenKind::Value, "foo; bar = baz".to_string())
        );
    }

    #[test]
    fn test_tokens_cover_source() {
        let source = "headers = a.h \\\n  b.h\n# c\n---\n/* x */ int y;";
        let tokens = lex_definitions(source);
        let mut offset = TextSize::from(0);
        for token in &tokens {
            assert_eq!(token.range.start(), offset, "gap before {token:?}");
            offset = token.range.end();
        }
        assert_eq!(usize::from(offset), source.len());
    }
}
