//! Shared helpers for parser snapshot tests.
#![allow(dead_code, unused_imports)]

pub use cdef_syntax::parser::{EntryPoint, Parse, SyntaxParser};
pub use cdef_syntax::syntax::{SyntaxKind, SyntaxNode};

/// Parses `source` from `entry` and formats the tree for snapshot testing.
pub fn snapshot_parse(entry: EntryPoint, source: &str) -> String {
    let parsed = SyntaxParser::default().parse(source, entry);
    let mut output = String::new();
    format_node(&parsed.syntax(), &mut output, 0);

    if !parsed.ok() {
        output.push_str("---\nErrors:\n");
        for err in parsed.errors() {
            output.push_str(&format!("  - {err}\n"));
        }
    }

    output
}

pub fn snapshot_expr(source: &str) -> String {
    snapshot_parse(EntryPoint::Expression, source)
}

pub fn snapshot_block(source: &str) -> String {
    snapshot_parse(EntryPoint::Block, source)
}

pub fn snapshot_unit(source: &str) -> String {
    snapshot_parse(EntryPoint::TranslationUnit, source)
}

pub fn snapshot_definitions(source: &str) -> String {
    snapshot_parse(EntryPoint::DefinitionFile, source)
}

fn format_node(node: &SyntaxNode, out: &mut String, depth: usize) {
    let indent = "  ".repeat(depth);
    out.push_str(&format!("{indent}{:?}\n", node.kind()));

    for child in node.children_with_tokens() {
        match child {
            rowan::NodeOrToken::Node(n) => format_node(&n, out, depth + 1),
            rowan::NodeOrToken::Token(t) => {
                // Only show non-trivial tokens
                let kind = t.kind();
                if !kind.is_trivia() {
                    out.push_str(&format!(
                        "{}{:?} {:?}\n",
                        "  ".repeat(depth + 1),
                        kind,
                        t.text()
                    ));
                }
            }
        }
    }
}

/// Kinds of the visible children of the first node below the root.
pub fn fragment_children(parse: &Parse) -> Vec<SyntaxKind> {
    parse
        .root()
        .children()
        .next()
        .map(|node| node.children().map(|child| child.kind()).collect())
        .unwrap_or_default()
}

/// Error messages of a parse.
pub fn messages(parse: &Parse) -> Vec<String> {
    parse.errors().iter().map(ToString::to_string).collect()
}
