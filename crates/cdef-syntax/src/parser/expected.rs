//! Expected-production bookkeeping.
//!
//! Every failed `expect` or fast-fail check records the name of what was
//! missing. Only names recorded at the furthest position survive, which is
//! what the "expected one of" diagnostic reports. Rollback does not touch
//! this state.

use indexmap::IndexSet;

#[derive(Debug, Default)]
pub(crate) struct Expected {
    position: Option<usize>,
    names: IndexSet<&'static str>,
}

impl Expected {
    pub(crate) fn record(&mut self, position: usize, name: &'static str) {
        match self.position {
            Some(furthest) if position < furthest => {}
            Some(furthest) if position == furthest => {
                self.names.insert(name);
            }
            _ => {
                self.position = Some(position);
                self.names.clear();
                self.names.insert(name);
            }
        }
    }

    pub(crate) fn reset(&mut self) {
        self.position = None;
        self.names.clear();
    }

    pub(crate) fn position(&self) -> Option<usize> {
        self.position
    }

    /// Names recorded at `position`, or nothing if the furthest failure is elsewhere.
    pub(crate) fn names_at(&self, position: usize) -> Vec<&'static str> {
        if self.position == Some(position) {
            self.names.iter().copied().collect()
        } else {
            Vec::new()
        }
    }
}
