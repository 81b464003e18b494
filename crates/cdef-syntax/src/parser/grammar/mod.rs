//! Grammar rules for definition files and C.
//!
//! This module contains the grammar rules organized by category:
//!
//! - `definitions.rs` - definition file header and code section
//! - `declarations.rs` - external definitions, declarations and declarators
//! - `statements.rs` - statements and blocks
//! - `expressions.rs` - expressions and their operator tables
//!
//! Every rule either matches and returns the completed node, or fails and
//! leaves the position where it found it. Alternatives are tried in order
//! and the first match wins.

mod declarations;
mod definitions;
mod expressions;
mod statements;

use crate::lexer::TokenKind;
use crate::parser::{CompletedMarker, EntryPoint, Parser};
use crate::syntax::SyntaxKind;

/// Runs the start rule of `entry` on the current builder.
pub(crate) fn entry(p: &mut Parser<'_, '_>, entry: EntryPoint) -> bool {
    match entry {
        EntryPoint::DefinitionFile => definitions::definition_file(p),
        EntryPoint::TranslationUnit => {
            declarations::translation_unit(p);
            true
        }
        EntryPoint::Expression => expressions::expression(p).is_some(),
        EntryPoint::Block => statements::compound_statement(p).is_some(),
    }
}

/// Runs `body` inside a fresh marker: completes it as `kind` when `body`
/// succeeds, rolls everything back otherwise.
fn node<'t, 's>(
    p: &mut Parser<'t, 's>,
    kind: SyntaxKind,
    body: impl FnOnce(&mut Parser<'t, 's>) -> bool,
) -> Option<CompletedMarker> {
    let m = p.start();
    if body(p) {
        Some(m.complete(p, kind))
    } else {
        m.rollback(p);
        None
    }
}

/// Like [`node`], but keeps the tokens without wrapping them.
fn attempt<'t, 's>(p: &mut Parser<'t, 's>, body: impl FnOnce(&mut Parser<'t, 's>) -> bool) -> bool {
    let m = p.start();
    if body(p) {
        m.abandon(p);
        true
    } else {
        m.rollback(p);
        false
    }
}

/// Wraps the current token in a node of `kind`.
fn leaf(p: &mut Parser<'_, '_>, kind: SyntaxKind) -> CompletedMarker {
    let m = p.start();
    p.bump();
    m.complete(p, kind)
}

/// `item (',' item)*`. A comma is only consumed when an item follows it.
fn comma_separated<'t, 's>(
    p: &mut Parser<'t, 's>,
    name: &'static str,
    mut item: impl FnMut(&mut Parser<'t, 's>) -> bool,
) -> bool {
    if !attempt(p, &mut item) {
        return false;
    }
    p.repeat(name, |p| {
        if !p.at(TokenKind::Comma) {
            return false;
        }
        attempt(p, |p| {
            p.bump();
            item(p)
        })
    });
    true
}
