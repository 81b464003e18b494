//! Token source for the parser.
//!
//! This module provides the `Source` struct that wraps a token stream
//! and provides lookahead and consumption operations. Trivia are indexed
//! out once up front, so positions are plain indices into the significant
//! tokens and a checkpoint is a single `usize`.

use text_size::{TextRange, TextSize};

use crate::lexer::{Token, TokenKind};

/// A token source that provides tokens to the parser.
pub(crate) struct Source<'t, 'src> {
    tokens: &'t [Token],
    text: &'src str,
    significant: Vec<usize>,
    cursor: usize,
}

impl<'t, 'src> Source<'t, 'src> {
    /// Creates a new source from tokens and source text.
    pub(crate) fn new(tokens: &'t [Token], text: &'src str) -> Self {
        let significant = tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| !token.kind.is_trivia())
            .map(|(index, _)| index)
            .collect();
        Self {
            tokens,
            text,
            significant,
            cursor: 0,
        }
    }

    /// Returns the current token kind, or `Eof` if at end.
    pub(crate) fn current(&self) -> TokenKind {
        self.nth(0)
    }

    /// Peeks at the nth significant token ahead (0 = current).
    pub(crate) fn nth(&self, n: usize) -> TokenKind {
        self.nth_token(n).map_or(TokenKind::Eof, |token| token.kind)
    }

    /// Returns the nth significant token ahead, or `None` past the end.
    pub(crate) fn nth_token(&self, n: usize) -> Option<&'t Token> {
        let tokens = self.tokens;
        self.significant
            .get(self.cursor + n)
            .and_then(|&index| tokens.get(index))
    }

    /// Advances past the current token.
    pub(crate) fn bump(&mut self) {
        if self.cursor < self.significant.len() {
            self.cursor += 1;
        }
    }

    /// Returns `true` if at end of input.
    pub(crate) fn at_end(&self) -> bool {
        self.cursor >= self.significant.len()
    }

    /// Current position, counted in significant tokens.
    pub(crate) fn position(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor back to a position previously returned by [`Self::position`].
    pub(crate) fn reset(&mut self, position: usize) {
        debug_assert!(position <= self.significant.len());
        self.cursor = position;
    }

    /// Byte range of the token at `position`; empty at the end of input.
    pub(crate) fn range_at(&self, position: usize) -> TextRange {
        match self.significant.get(position).and_then(|&i| self.tokens.get(i)) {
            Some(token) => token.range,
            None => TextRange::empty(self.end_offset()),
        }
    }

    /// Display form of the token at `position`, for diagnostics.
    pub(crate) fn describe_at(&self, position: usize) -> smol_str::SmolStr {
        match self.significant.get(position).and_then(|&i| self.tokens.get(i)) {
            Some(token) if token.kind == TokenKind::Ident => {
                smol_str::SmolStr::new(format!("identifier `{}`", &self.text[token.range]))
            }
            Some(token) => token.kind.name().into(),
            None => TokenKind::Eof.name().into(),
        }
    }

    /// Offset one past the end of the text.
    pub(crate) fn end_offset(&self) -> TextSize {
        TextSize::of(self.text)
    }

    /// End offset of the last token consumed so far.
    pub(crate) fn consumed_offset(&self) -> TextSize {
        self.cursor
            .checked_sub(1)
            .and_then(|last| self.significant.get(last))
            .and_then(|&i| self.tokens.get(i))
            .map_or(TextSize::from(0), |token| token.range.end())
    }
}
