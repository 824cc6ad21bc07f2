//! Reference state as reported by a lister

use serde::{Deserialize, Serialize};

/// The observed state of one named reference (branch or tag)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefState {
    /// Full reference name, e.g. `refs/heads/main`
    pub ref_name: String,

    /// Revision the reference points to; empty means "does not exist"
    pub current: String,

    /// True if this reference is the checked-out working copy pointer
    pub checked_out: bool,
}

impl RefState {
    pub fn new(ref_name: impl Into<String>, current: impl Into<String>, checked_out: bool) -> Self {
        Self {
            ref_name: ref_name.into(),
            current: current.into(),
            checked_out,
        }
    }

    /// True if `other` differs in revision or checkout status
    pub fn differs_from(&self, other: &RefState) -> bool {
        self.current != other.current || self.checked_out != other.checked_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_differs_from() {
        let a = RefState::new("refs/heads/main", "abc", false);
        assert!(!a.differs_from(&a.clone()));
        assert!(a.differs_from(&RefState::new("refs/heads/main", "def", false)));
        assert!(a.differs_from(&RefState::new("refs/heads/main", "abc", true)));
    }
}
