//! Parser limits and cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Default bound on simultaneously active rule frames.
///
/// One level of parentheses costs about eight frames and one `else if` about
/// four, so this admits a few hundred levels of either. Lower it when parsing
/// on threads with small stacks.
pub const DEFAULT_MAX_DEPTH: usize = 2048;

/// Default bound on passes through repetition loops in one parse.
pub const DEFAULT_MAX_ITERATIONS: usize = 1_000_000;

/// Limits applied to every parse run by a [`SyntaxParser`](crate::parser::SyntaxParser).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum number of rule invocations active at once.
    ///
    /// The same-position recursion guard cannot bound depth on input that
    /// keeps advancing (`((((x))))`), so this is checked separately.
    pub max_depth: usize,
    /// Maximum number of repetition passes before the parse is aborted.
    pub max_iterations: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Shared flag that aborts a running parse at its next repetition pass.
///
/// Clones share the flag, so one clone can be handed to another thread.
#[derive(Debug, Clone, Default)]
pub struct Cancellation(Arc<AtomicBool>);

impl Cancellation {
    /// Creates a flag that is not yet cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once [`Self::cancel`] has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellation_is_shared() {
        let flag = Cancellation::new();
        let clone = flag.clone();
        assert!(!flag.is_cancelled());
        clone.cancel();
        assert!(flag.is_cancelled());
    }
}
