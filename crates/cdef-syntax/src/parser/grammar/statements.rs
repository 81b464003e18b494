//! Statement parsing.
//!
//! Supported statements:
//! - Labeled: `label:`, `case expr:`, `default:`
//! - Compound: `{ ... }` with declarations and statements mixed
//! - Expression statement and empty statement: `f(x);`, `;`
//! - `if`/`else`, `switch`
//! - `while`, `do`/`while`, `for` (with a declaration as initializer)
//! - `goto`, `continue`, `break`, `return`

use crate::lexer::TokenKind;
use crate::parser::{CompletedMarker, Parser};
use crate::syntax::SyntaxKind;

use super::declarations::declaration;
use super::expressions::{constant_expression, expression};
use super::node;

/// `'{' (declaration | statement)* '}'`
pub(super) fn compound_statement(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    if !p.at(TokenKind::LBrace) {
        p.add_variant(TokenKind::LBrace.name());
        return None;
    }

    p.rule("compound_statement", |p| {
        node(p, SyntaxKind::CompoundStatement, |p| {
            p.bump();
            p.repeat("block_item", block_item);
            p.expect(TokenKind::RBrace)
        })
    })
}

fn block_item(p: &mut Parser<'_, '_>) -> bool {
    declaration(p).is_some() || statement(p).is_some()
}

pub(super) fn statement(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    p.rule("statement", |p| {
        node(p, SyntaxKind::Statement, |p| {
            let matched = match p.current() {
                TokenKind::Ident if p.nth(1) == TokenKind::Colon => labeled_statement(p),
                TokenKind::KwCase => case_statement(p),
                TokenKind::KwDefault => default_statement(p),
                TokenKind::LBrace => compound_statement(p),
                TokenKind::KwIf => if_statement(p),
                TokenKind::KwSwitch => switch_statement(p),
                TokenKind::KwWhile => while_statement(p),
                TokenKind::KwDo => do_statement(p),
                TokenKind::KwFor => for_statement(p),
                TokenKind::KwGoto => goto_statement(p),
                TokenKind::KwContinue => jump_statement(p, SyntaxKind::ContinueStatement),
                TokenKind::KwBreak => jump_statement(p, SyntaxKind::BreakStatement),
                TokenKind::KwReturn => return_statement(p),
                _ => expression_statement(p),
            };
            matched.is_some()
        })
    })
}

fn labeled_statement(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    node(p, SyntaxKind::LabeledStatement, |p| {
        p.bump();
        p.bump();
        statement(p).is_some()
    })
}

fn case_statement(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    node(p, SyntaxKind::CaseStatement, |p| {
        p.bump();
        constant_expression(p).is_some() && p.expect(TokenKind::Colon) && statement(p).is_some()
    })
}

fn default_statement(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    node(p, SyntaxKind::DefaultStatement, |p| {
        p.bump();
        p.expect(TokenKind::Colon) && statement(p).is_some()
    })
}

fn expression_statement(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    node(p, SyntaxKind::ExpressionStatement, |p| {
        optional_expression_then(p, TokenKind::Semicolon)
    })
}

/// `expression? end`
fn optional_expression_then(p: &mut Parser<'_, '_>, end: TokenKind) -> bool {
    if !p.at(end) && expression(p).is_none() {
        return false;
    }
    p.expect(end)
}

/// `'(' expression ')'`
fn condition(p: &mut Parser<'_, '_>) -> bool {
    p.expect(TokenKind::LParen) && expression(p).is_some() && p.expect(TokenKind::RParen)
}

fn if_statement(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    p.rule("if_statement", |p| {
        node(p, SyntaxKind::IfStatement, |p| {
            p.bump();
            if !condition(p) || statement(p).is_none() {
                return false;
            }
            !p.at(TokenKind::KwElse)
                || node(p, SyntaxKind::ElseBranch, |p| {
                    p.bump();
                    statement(p).is_some()
                })
                .is_some()
        })
    })
}

fn switch_statement(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    node(p, SyntaxKind::SwitchStatement, |p| {
        p.bump();
        condition(p) && statement(p).is_some()
    })
}

fn while_statement(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    node(p, SyntaxKind::WhileStatement, |p| {
        p.bump();
        condition(p) && statement(p).is_some()
    })
}

fn do_statement(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    node(p, SyntaxKind::DoStatement, |p| {
        p.bump();
        statement(p).is_some()
            && p.expect(TokenKind::KwWhile)
            && condition(p)
            && p.expect(TokenKind::Semicolon)
    })
}

/// `'for' '(' (declaration | expression? ';') expression? ';' expression? ')' statement`
fn for_statement(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    p.rule("for_statement", |p| {
        node(p, SyntaxKind::ForStatement, |p| {
            p.bump();
            if !p.expect(TokenKind::LParen) {
                return false;
            }
            let init = declaration(p).is_some() || optional_expression_then(p, TokenKind::Semicolon);
            init && optional_expression_then(p, TokenKind::Semicolon)
                && optional_expression_then(p, TokenKind::RParen)
                && statement(p).is_some()
        })
    })
}

fn goto_statement(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    node(p, SyntaxKind::GotoStatement, |p| {
        p.bump();
        p.expect(TokenKind::Ident) && p.expect(TokenKind::Semicolon)
    })
}

/// `continue ;` and `break ;`
fn jump_statement(p: &mut Parser<'_, '_>, kind: SyntaxKind) -> Option<CompletedMarker> {
    node(p, kind, |p| {
        p.bump();
        p.expect(TokenKind::Semicolon)
    })
}

fn return_statement(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    node(p, SyntaxKind::ReturnStatement, |p| {
        p.bump();
        optional_expression_then(p, TokenKind::Semicolon)
    })
}
