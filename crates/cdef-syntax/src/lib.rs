//! `cdef-syntax` - Lexer, speculative parser, and flyweight syntax tree for C
//! interop definition files.
//!
//! A definition file is a header of `key = value` lines, an optional `---`
//! delimiter, then C declarations. This crate provides:
//!
//! - **Lexer**: Tokenizes header lines and C source into a stream of tokens
//! - **Parser**: A backtracking recursive-descent engine that records events
//!   and rolls them back cheaply when an alternative fails
//! - **Light tree**: A flat, normalized node buffer built once per parse
//! - **AST**: Typed node wrappers created on demand from the light tree
//!
//! # Design Principles
//!
//! - **No allocation while exploring**: rules only append to an event log;
//!   node objects exist only after the parse succeeded
//! - **One driver for operators**: every left-recursive operator family is
//!   parsed by a single precedence-climbing loop
//! - **Termination**: a recursion guard rejects same-rule re-entry at the
//!   same token, and depth and iteration limits bound every parse
//! - **Lossless**: the tree keeps all tokens, trivia included, and can be
//!   exported to a `rowan` tree
//!
//! # Example
//!
//! ```
//! use cdef_syntax::ast::{AstNode, DefinitionFile};
//! use cdef_syntax::parse_definitions;
//!
//! let source = "headers = zlib.h\n---\nint crc(const char *data, int len);\n";
//! let parse = parse_definitions(source);
//! assert!(parse.ok());
//!
//! let file = DefinitionFile::cast(parse.root()).unwrap();
//! let header: Vec<_> = file.definitions().map(|d| d.key_text()).collect();
//! assert_eq!(header, vec!["headers"]);
//! assert_eq!(file.code_section().unwrap().declarations().count(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod syntax;
mod token_kinds;
pub mod tree;

pub use lexer::{lex, lex_definitions, Lexer, Token, TokenKind};
pub use parser::{
    parse_block, parse_definitions, parse_expression, parse_translation_unit, Cancellation,
    EntryPoint, Parse, ParseError, ParseStats, ParserConfig, SyntaxParser,
};
pub use syntax::{CDefLanguage, SyntaxKind, SyntaxNode, SyntaxToken};
pub use tree::{LightNode, LightTree, LightToken};
