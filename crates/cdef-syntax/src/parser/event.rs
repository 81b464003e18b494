//! The parser's event log.
//!
//! Rules append to this log and never build nodes themselves. Rolling back
//! a failed alternative truncates the log to the marker's position, so a
//! rejected branch leaves nothing behind.

use crate::syntax::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    /// Opens a node.
    Start {
        kind: SyntaxKind,
        /// Distance to a later `Start` that wraps this node, set by `precede`.
        forward_parent: Option<usize>,
    },
    /// Consumes the next significant token.
    Token,
    Finish,
    /// An open marker, or a `Start` already taken by a forward-parent chain.
    Placeholder,
}

impl Event {
    pub(crate) fn start(kind: SyntaxKind) -> Self {
        Self::Start {
            kind,
            forward_parent: None,
        }
    }
}
