//! Precedence-climbing driver.
//!
//! Every left-recursive operator family (`E := E op T | T`) is described by
//! an operator table and parsed by [`climb`]. Operators live in integer
//! priority bands, 0 being the loosest. The loop folds the accumulated left
//! operand into a new node for each operator, so a chain of any length uses
//! constant stack depth; only a tighter band recurses, to parse the right
//! operand.

use crate::lexer::TokenKind;
use crate::parser::{CompletedMarker, Parser};
use crate::syntax::SyntaxKind;

/// Rule that parses the right-hand part of a suffix operator.
pub(crate) type SuffixRule = fn(&mut Parser<'_, '_>) -> bool;

/// Rule that parses one operand.
pub(crate) type AtomRule = fn(&mut Parser<'_, '_>) -> Option<CompletedMarker>;

#[derive(Clone, Copy)]
pub(crate) enum Shape {
    /// `left op right`, left associative.
    Infix,
    /// `left op`.
    Postfix,
    /// `left op <rule>`, e.g. `a[i]` where the rule parses `i ]`.
    Suffix(SuffixRule),
}

#[derive(Clone, Copy)]
pub(crate) struct Operator {
    pub(crate) token: TokenKind,
    pub(crate) node: SyntaxKind,
    pub(crate) priority: i32,
    pub(crate) shape: Shape,
}

impl Operator {
    pub(crate) const fn infix(token: TokenKind, node: SyntaxKind, priority: i32) -> Self {
        Self {
            token,
            node,
            priority,
            shape: Shape::Infix,
        }
    }

    pub(crate) const fn postfix(token: TokenKind, node: SyntaxKind, priority: i32) -> Self {
        Self {
            token,
            node,
            priority,
            shape: Shape::Postfix,
        }
    }

    pub(crate) const fn suffix(
        token: TokenKind,
        node: SyntaxKind,
        priority: i32,
        rule: SuffixRule,
    ) -> Self {
        Self {
            token,
            node,
            priority,
            shape: Shape::Suffix(rule),
        }
    }
}

/// Operator family.
pub(crate) struct Table {
    pub(crate) operators: &'static [Operator],
}

impl Table {
    /// Tightest operator for `token` whose band is at or above `floor`.
    fn lookup(&self, token: TokenKind, floor: i32) -> Option<Operator> {
        self.operators
            .iter()
            .filter(|op| op.token == token && op.priority >= floor)
            .max_by_key(|op| op.priority)
            .copied()
    }
}

/// What the driver matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Climb {
    /// Only the operand matched; no operator was consumed.
    Atom(CompletedMarker),
    /// At least one operator was folded.
    Compound(CompletedMarker),
}

impl Climb {
    pub(crate) fn marker(self) -> CompletedMarker {
        match self {
            Self::Atom(m) | Self::Compound(m) => m,
        }
    }

    pub(crate) fn is_atom(self) -> bool {
        matches!(self, Self::Atom(_))
    }
}

/// Parses `atom (op ...)*` for the operators of `table` at or above `floor`.
///
/// `floor = -1` accepts every band. Returns `None` only if the atom fails.
/// Right-associative families are built on top of this by callers that
/// inspect the [`Climb`] report, see `assignment_expression`.
/// When the right part of an operator fails, that operator is rolled back
/// and the loop stops with what was folded so far.
pub(crate) fn climb(
    p: &mut Parser<'_, '_>,
    table: &Table,
    floor: i32,
    atom: AtomRule,
) -> Option<Climb> {
    let mut lhs = atom(p)?;
    let mut folded = false;

    while let Some(op) = table.lookup(p.current(), floor) {
        let m = lhs.precede(p);
        p.bump();
        let matched = match op.shape {
            Shape::Infix => climb(p, table, op.priority + 1, atom).is_some(),
            Shape::Postfix => true,
            Shape::Suffix(rule) => rule(p),
        };
        if !matched {
            m.rollback(p);
            break;
        }
        lhs = m.complete(p, op.node);
        folded = true;
    }

    Some(if folded {
        Climb::Compound(lhs)
    } else {
        Climb::Atom(lhs)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use crate::parser::ParserConfig;

    const ARITH: Table = Table {
        operators: &[
            Operator::infix(TokenKind::Plus, SyntaxKind::BinaryExpr, 0),
            Operator::infix(TokenKind::Star, SyntaxKind::BinaryExpr, 1),
            Operator::postfix(TokenKind::PlusPlus, SyntaxKind::PostfixExpr, 2),
        ],
    };

    fn name(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
        if !p.at(TokenKind::Ident) {
            return None;
        }
        let m = p.start();
        p.bump();
        Some(m.complete(p, SyntaxKind::NameRef))
    }

    fn with_parser<R>(text: &str, f: impl FnOnce(&mut Parser<'_, '_>) -> R) -> R {
        let tokens = lex(text);
        let mut parser = Parser::new(&tokens, text, ParserConfig::default(), None);
        f(&mut parser)
    }

    #[test]
    fn test_lookup_respects_floor() {
        assert_eq!(ARITH.lookup(TokenKind::Star, -1).map(|op| op.priority), Some(1));
        assert!(ARITH.lookup(TokenKind::Plus, 1).is_none());
        assert!(ARITH.lookup(TokenKind::Minus, -1).is_none());
    }

    #[test]
    fn test_chain_is_folded() {
        with_parser("a + b * c ++", |p| {
            let result = climb(p, &ARITH, -1, name).unwrap();
            assert!(!result.is_atom());
            assert_eq!(result.marker().kind(p), Some(SyntaxKind::BinaryExpr));
            assert_eq!(p.position(), 6);
        });
    }

    #[test]
    fn test_floor_stops_looser_operators() {
        with_parser("a + b", |p| {
            let result = climb(p, &ARITH, 1, name).unwrap();
            assert!(result.is_atom());
            assert_eq!(p.position(), 1);
        });
    }

    #[test]
    fn test_failed_right_operand_rolls_back_operator() {
        with_parser("a * b + )", |p| {
            let result = climb(p, &ARITH, -1, name).unwrap();
            assert!(!result.is_atom());
            assert_eq!(p.position(), 3);
        });
    }

    #[test]
    fn test_missing_atom() {
        with_parser("+ a", |p| {
            assert!(climb(p, &ARITH, -1, name).is_none());
            assert_eq!(p.position(), 0);
        });
    }
}
