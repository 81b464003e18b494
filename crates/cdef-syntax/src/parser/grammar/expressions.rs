//! Expression parsing.
//!
//! Operator precedence (low to high):
//! - `,`
//! - assignment operators (right associative)
//! - `?:` (right associative)
//! - `||` (0), `&&` (1), `|` (2), `^` (3), `&` (4)
//! - `== !=` (5), `< > <= >=` (6), `<< >>` (7)
//! - `+ -` (8), `* / %` (9)
//! - casts and prefix operators
//! - postfix operators
//!
//! The left-recursive families (binary, postfix, comma) are parsed by the
//! shared precedence-climbing driver from their tables below.

use crate::lexer::TokenKind;
use crate::parser::precedence::{climb, Climb, Operator, Table};
use crate::parser::token_set::TokenSet;
use crate::parser::{CompletedMarker, Parser};
use crate::syntax::SyntaxKind;

use super::declarations::{initializer_list, starts_type_name, type_name};
use super::{attempt, comma_separated, leaf, node};

const BINARY: Table = Table {
    operators: &[
        Operator::infix(TokenKind::PipePipe, SyntaxKind::BinaryExpr, 0),
        Operator::infix(TokenKind::AmpAmp, SyntaxKind::BinaryExpr, 1),
        Operator::infix(TokenKind::Pipe, SyntaxKind::BinaryExpr, 2),
        Operator::infix(TokenKind::Caret, SyntaxKind::BinaryExpr, 3),
        Operator::infix(TokenKind::Amp, SyntaxKind::BinaryExpr, 4),
        Operator::infix(TokenKind::EqEq, SyntaxKind::BinaryExpr, 5),
        Operator::infix(TokenKind::Neq, SyntaxKind::BinaryExpr, 5),
        Operator::infix(TokenKind::Lt, SyntaxKind::BinaryExpr, 6),
        Operator::infix(TokenKind::Gt, SyntaxKind::BinaryExpr, 6),
        Operator::infix(TokenKind::LtEq, SyntaxKind::BinaryExpr, 6),
        Operator::infix(TokenKind::GtEq, SyntaxKind::BinaryExpr, 6),
        Operator::infix(TokenKind::Shl, SyntaxKind::BinaryExpr, 7),
        Operator::infix(TokenKind::Shr, SyntaxKind::BinaryExpr, 7),
        Operator::infix(TokenKind::Plus, SyntaxKind::BinaryExpr, 8),
        Operator::infix(TokenKind::Minus, SyntaxKind::BinaryExpr, 8),
        Operator::infix(TokenKind::Star, SyntaxKind::BinaryExpr, 9),
        Operator::infix(TokenKind::Slash, SyntaxKind::BinaryExpr, 9),
        Operator::infix(TokenKind::Percent, SyntaxKind::BinaryExpr, 9),
    ],
};

const POSTFIX: Table = Table {
    operators: &[
        Operator::suffix(TokenKind::LBracket, SyntaxKind::IndexExpr, 0, index_suffix),
        Operator::suffix(TokenKind::LParen, SyntaxKind::CallExpr, 0, call_suffix),
        Operator::suffix(TokenKind::Dot, SyntaxKind::MemberExpr, 0, member_suffix),
        Operator::suffix(TokenKind::Arrow, SyntaxKind::MemberExpr, 0, member_suffix),
        Operator::postfix(TokenKind::PlusPlus, SyntaxKind::PostfixExpr, 0),
        Operator::postfix(TokenKind::MinusMinus, SyntaxKind::PostfixExpr, 0),
    ],
};

const COMMA: Table = Table {
    operators: &[Operator::infix(TokenKind::Comma, SyntaxKind::CommaExpr, 0)],
};

const PRIMARY_FIRST: TokenSet = TokenSet::new(&[
    TokenKind::Ident,
    TokenKind::IntLiteral,
    TokenKind::FloatLiteral,
    TokenKind::CharLiteral,
    TokenKind::StringLiteral,
    TokenKind::LParen,
    TokenKind::KwGeneric,
]);

/// `assignment_expression (',' assignment_expression)*`
pub(super) fn expression(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    p.rule("expression", |p| {
        climb(p, &COMMA, -1, assignment_expression).map(Climb::marker)
    })
}

/// `unary_expression assignment_op assignment_expression | conditional_expression`
///
/// The left side is parsed once as a conditional expression; it is only
/// accepted as an assignment target when no operator was folded into it.
pub(super) fn assignment_expression(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    p.rule("assignment_expression", |p| {
        let target = conditional_expression(p)?;
        let lhs = target.marker();
        if !p.current().is_assignment_op()
            || !target.is_atom()
            || lhs.kind(p) == Some(SyntaxKind::CastExpr)
        {
            return Some(lhs);
        }

        let m = lhs.precede(p);
        p.bump();
        if assignment_expression(p).is_some() {
            Some(m.complete(p, SyntaxKind::AssignExpr))
        } else {
            m.rollback(p);
            Some(lhs)
        }
    })
}

fn conditional_expression(p: &mut Parser<'_, '_>) -> Option<Climb> {
    p.rule("conditional_expression", |p| {
        let condition = climb(p, &BINARY, -1, cast_expression)?;
        if !p.at(TokenKind::Question) {
            return Some(condition);
        }

        let m = condition.marker().precede(p);
        p.bump();
        if expression(p).is_some()
            && p.expect(TokenKind::Colon)
            && conditional_expression(p).is_some()
        {
            Some(Climb::Compound(m.complete(p, SyntaxKind::ConditionalExpr)))
        } else {
            m.rollback(p);
            Some(condition)
        }
    })
}

/// Conditional expression wrapped for contexts that require a constant.
pub(super) fn constant_expression(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    p.rule("constant_expression", |p| {
        node(p, SyntaxKind::ConstantExpr, |p| {
            conditional_expression(p).is_some()
        })
    })
}

fn cast_expression(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    p.rule("cast_expression", |p| {
        if p.at(TokenKind::LParen) && starts_type_name(p.nth(1)) {
            if let Some(cast) = cast(p) {
                return Some(cast);
            }
        }
        unary_expression(p)
    })
}

fn cast(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    // `(name) x` is only a cast when `x` cannot continue an expression.
    let lone_name = p.nth(1) == TokenKind::Ident && p.nth(2) == TokenKind::RParen;
    node(p, SyntaxKind::CastExpr, |p| {
        p.bump();
        if type_name(p).is_none() || !p.expect(TokenKind::RParen) {
            return false;
        }
        if p.at(TokenKind::LBrace) || (lone_name && !starts_cast_operand(p.current())) {
            return false;
        }
        cast_expression(p).is_some()
    })
}

fn starts_cast_operand(kind: TokenKind) -> bool {
    kind.is_constant()
        || matches!(
            kind,
            TokenKind::Ident
                | TokenKind::StringLiteral
                | TokenKind::KwSizeof
                | TokenKind::KwAlignof
                | TokenKind::Tilde
                | TokenKind::Bang
        )
}

fn unary_expression(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    p.rule("unary_expression", |p| match p.current() {
        TokenKind::PlusPlus | TokenKind::MinusMinus => node(p, SyntaxKind::UnaryExpr, |p| {
            p.bump();
            unary_expression(p).is_some()
        }),
        kind if kind.is_unary_op() => node(p, SyntaxKind::UnaryExpr, |p| {
            p.bump();
            cast_expression(p).is_some()
        }),
        TokenKind::KwSizeof => node(p, SyntaxKind::SizeofExpr, |p| {
            p.bump();
            parenthesized_type(p) || unary_expression(p).is_some()
        }),
        TokenKind::KwAlignof => node(p, SyntaxKind::AlignofExpr, |p| {
            p.bump();
            p.expect(TokenKind::LParen) && type_name(p).is_some() && p.expect(TokenKind::RParen)
        }),
        _ => postfix_expression(p),
    })
}

/// `'(' type_name ')'` not followed by a compound literal body.
fn parenthesized_type(p: &mut Parser<'_, '_>) -> bool {
    if !p.at(TokenKind::LParen) || !starts_type_name(p.nth(1)) {
        return false;
    }
    attempt(p, |p| {
        p.bump();
        type_name(p).is_some() && p.eat(TokenKind::RParen) && !p.at(TokenKind::LBrace)
    })
}

fn postfix_expression(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    p.rule("postfix_expression", |p| {
        climb(p, &POSTFIX, -1, primary_expression).map(Climb::marker)
    })
}

fn index_suffix(p: &mut Parser<'_, '_>) -> bool {
    expression(p).is_some() && p.expect(TokenKind::RBracket)
}

fn call_suffix(p: &mut Parser<'_, '_>) -> bool {
    if !p.at(TokenKind::RParen) && argument_list(p).is_none() {
        return false;
    }
    p.expect(TokenKind::RParen)
}

fn member_suffix(p: &mut Parser<'_, '_>) -> bool {
    if !p.at(TokenKind::Ident) {
        p.add_variant(TokenKind::Ident.name());
        return false;
    }
    leaf(p, SyntaxKind::NameRef);
    true
}

fn argument_list(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    node(p, SyntaxKind::ArgumentList, |p| {
        comma_separated(p, "argument_list", |p| assignment_expression(p).is_some())
    })
}

fn primary_expression(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    if !p.at_set(PRIMARY_FIRST) {
        p.add_variant("expression");
        return None;
    }

    p.rule("primary_expression", |p| match p.current() {
        TokenKind::Ident => Some(leaf(p, SyntaxKind::NameRef)),
        TokenKind::StringLiteral => Some(string_literal(p)),
        TokenKind::KwGeneric => generic_selection(p),
        TokenKind::LParen => compound_literal(p).or_else(|| paren_expression(p)),
        _ => Some(leaf(p, SyntaxKind::Literal)),
    })
}

/// Adjacent string literals, concatenated.
pub(super) fn string_literal(p: &mut Parser<'_, '_>) -> CompletedMarker {
    let m = p.start();
    while p.at(TokenKind::StringLiteral) {
        p.bump();
    }
    m.complete(p, SyntaxKind::StringExpr)
}

fn paren_expression(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    p.rule("paren_expression", |p| {
        node(p, SyntaxKind::ParenExpr, |p| {
            p.bump();
            expression(p).is_some() && p.expect(TokenKind::RParen)
        })
    })
}

/// `'(' type_name ')' initializer_list`
fn compound_literal(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    if !starts_type_name(p.nth(1)) {
        return None;
    }
    p.rule("compound_literal", |p| {
        node(p, SyntaxKind::CompoundLiteral, |p| {
            p.bump();
            type_name(p).is_some()
                && p.eat(TokenKind::RParen)
                && p.at(TokenKind::LBrace)
                && initializer_list(p).is_some()
        })
    })
}

/// `_Generic '(' assignment_expression ',' generic_assoc_list ')'`
fn generic_selection(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    p.rule("generic_selection", |p| {
        node(p, SyntaxKind::GenericSelection, |p| {
            p.bump();
            p.expect(TokenKind::LParen)
                && assignment_expression(p).is_some()
                && p.expect(TokenKind::Comma)
                && node(p, SyntaxKind::GenericAssocList, |p| {
                    comma_separated(p, "generic_assoc_list", |p| {
                        generic_association(p).is_some()
                    })
                })
                .is_some()
                && p.expect(TokenKind::RParen)
        })
    })
}

fn generic_association(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    node(p, SyntaxKind::GenericAssociation, |p| {
        let key = p.eat(TokenKind::KwDefault) || type_name(p).is_some();
        key && p.expect(TokenKind::Colon) && assignment_expression(p).is_some()
    })
}
