//! Text renderings of a parse.

use std::fmt::Write;

use cdef_syntax::tree::{LightElement, LightNode};
use cdef_syntax::{Parse, ParseError};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// Indented light tree with ranges.
    Tree,
    /// One s-expression per root.
    Sexp,
    /// The exported rowan tree, trivia included.
    Syntax,
}

pub fn render(parse: &Parse, format: Format) -> String {
    let mut out = String::new();
    match format {
        Format::Tree => tree(&parse.root(), 0, &mut out),
        Format::Sexp => {
            sexp(&parse.root(), &mut out);
            out.push('\n');
        }
        Format::Syntax => {
            let _ = write!(out, "{:#?}", parse.syntax());
        }
    }
    out
}

fn tree(node: &LightNode, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let _ = writeln!(out, "{indent}{:?}@{:?}", node.kind(), node.text_range());
    for child in node.children_with_tokens() {
        match child {
            LightElement::Node(child) => tree(&child, depth + 1, out),
            LightElement::Token(token) if !token.kind().is_trivia() => {
                let _ = writeln!(
                    out,
                    "{indent}  {:?}@{:?} {:?}",
                    token.kind(),
                    token.text_range(),
                    token.text()
                );
            }
            LightElement::Token(_) => {}
        }
    }
}

fn sexp(node: &LightNode, out: &mut String) {
    let _ = write!(out, "({:?}", node.kind());
    for child in node.children_with_tokens() {
        match child {
            LightElement::Node(child) => {
                out.push(' ');
                sexp(&child, out);
            }
            LightElement::Token(token) if !token.kind().is_trivia() => {
                let _ = write!(out, " {:?}", token.text());
            }
            LightElement::Token(_) => {}
        }
    }
    out.push(')');
}

/// Formats `error` as `path:line:column: error: message`.
pub fn diagnostic(path: &str, text: &str, error: &ParseError) -> String {
    let offset = usize::from(error.range().start()).min(text.len());
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let column = before
        .rfind('\n')
        .map_or(before.chars().count(), |newline| before[newline + 1..].chars().count())
        + 1;
    format!("{path}:{line}:{column}: error: {error}")
}
