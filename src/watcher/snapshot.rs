//! Reference snapshots and the per-cycle diff

use std::collections::HashMap;

use crate::domain::{RefChange, RefState};

/// Last observed state of every reference in one repository, keyed by ref name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    refs: HashMap<String, RefState>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    pub fn get(&self, ref_name: &str) -> Option<&RefState> {
        self.refs.get(ref_name)
    }

    /// Diff a fresh listing against this snapshot, then replace the snapshot with it
    ///
    /// Events for created and changed references come first, in listing
    /// order, followed by deletions for every reference missing from
    /// `current`. Deletions are ordered by ref name. Unchanged references
    /// produce no event.
    pub fn advance(&mut self, name: &str, current: Vec<RefState>) -> Vec<RefChange> {
        let mut prev = std::mem::take(&mut self.refs);
        let mut next = HashMap::with_capacity(current.len());
        let mut changes = Vec::new();

        for state in current {
            // A ref seen earlier in this same listing was already removed from
            // prev, so a duplicate name is reported as a creation
            match prev.remove(&state.ref_name) {
                Some(old) if old.differs_from(&state) => changes.push(RefChange::changed(name, &old, &state)),
                Some(_) => {}
                None => changes.push(RefChange::created(name, &state)),
            }
            next.insert(state.ref_name.clone(), state);
        }

        let mut gone: Vec<RefState> = prev.into_values().collect();
        gone.sort_by(|a, b| a.ref_name.cmp(&b.ref_name));
        changes.extend(gone.iter().map(|old| RefChange::deleted(name, old)));

        self.refs = next;
        changes
    }
}
