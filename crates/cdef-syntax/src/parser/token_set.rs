//! Small fixed token sets used by fast-fail checks.

use crate::lexer::TokenKind;

#[derive(Debug, Clone, Copy)]
pub(crate) struct TokenSet(&'static [TokenKind]);

impl TokenSet {
    pub(crate) const fn new(kinds: &'static [TokenKind]) -> Self {
        Self(kinds)
    }

    pub(crate) fn contains(self, kind: TokenKind) -> bool {
        self.0.contains(&kind)
    }
}
