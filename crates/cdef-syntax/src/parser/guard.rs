//! Recursion guard.
//!
//! Tracks which named rules are active at which token position within the
//! current call chain. A rule that is already active at the same position
//! would recurse without consuming input, so it is rejected instead. Entries
//! live exactly as long as the rule call that pushed them.

use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Entry {
    Entered,
    Recursive,
    TooDeep,
}

#[derive(Debug)]
pub(crate) struct RecursionGuard {
    active: FxHashSet<(&'static str, usize)>,
    depth: usize,
    max_depth: usize,
    deepest: usize,
}

impl RecursionGuard {
    pub(crate) fn new(max_depth: usize) -> Self {
        Self {
            active: FxHashSet::default(),
            depth: 0,
            max_depth,
            deepest: 0,
        }
    }

    pub(crate) fn enter(&mut self, rule: &'static str, position: usize) -> Entry {
        if self.depth >= self.max_depth {
            return Entry::TooDeep;
        }
        if !self.active.insert((rule, position)) {
            return Entry::Recursive;
        }
        self.depth += 1;
        self.deepest = self.deepest.max(self.depth);
        Entry::Entered
    }

    pub(crate) fn exit(&mut self, rule: &'static str, position: usize) {
        let removed = self.active.remove(&(rule, position));
        assert!(removed, "unbalanced recursion guard exit for `{rule}` at {position}");
        self.depth -= 1;
    }

    pub(crate) fn is_idle(&self) -> bool {
        self.depth == 0 && self.active.is_empty()
    }

    pub(crate) fn deepest(&self) -> usize {
        self.deepest
    }
}
