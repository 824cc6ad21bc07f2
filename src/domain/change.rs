//! Change events emitted by the poller

use serde::{Deserialize, Serialize};

use super::kind::ChangeKind;
use super::reference::RefState;

/// One reference's transition between two consecutive polls
///
/// `current` and `checked_out` describe the new state and are empty/false
/// when the reference was deleted. `prev` is the revision the reference
/// pointed to before the transition and is empty for newly created
/// references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefChange {
    pub ref_name: String,

    /// Display name of the watched repository that produced this event
    pub name: String,

    pub prev: String,
    pub current: String,
    pub checked_out: bool,
}

impl RefChange {
    /// A reference that was not present in the previous snapshot
    pub fn created(name: &str, state: &RefState) -> Self {
        Self {
            ref_name: state.ref_name.clone(),
            name: name.to_string(),
            prev: String::new(),
            current: state.current.clone(),
            checked_out: state.checked_out,
        }
    }

    /// A reference whose revision or checkout status moved from `old` to `new`
    pub fn changed(name: &str, old: &RefState, new: &RefState) -> Self {
        Self {
            ref_name: new.ref_name.clone(),
            name: name.to_string(),
            prev: old.current.clone(),
            current: new.current.clone(),
            checked_out: new.checked_out,
        }
    }

    /// A reference that was present in the previous snapshot but not in the current one
    pub fn deleted(name: &str, old: &RefState) -> Self {
        Self {
            ref_name: old.ref_name.clone(),
            name: name.to_string(),
            prev: old.current.clone(),
            current: String::new(),
            checked_out: false,
        }
    }

    /// Classify the event from its revisions
    ///
    /// An empty `prev` always means the reference was not known before, so
    /// it is a creation even when a lister reported the empty "does not
    /// exist" revision for it. Only an event with a previous revision and no
    /// current one is a deletion.
    pub fn kind(&self) -> ChangeKind {
        if self.prev.is_empty() {
            ChangeKind::Created
        } else if self.current.is_empty() {
            ChangeKind::Deleted
        } else {
            ChangeKind::Updated
        }
    }
}

impl std::fmt::Display for RefChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let marker = if self.checked_out { " *" } else { "" };
        match self.kind() {
            ChangeKind::Created => write!(f, "[{}] created {} at {}{}", self.name, self.ref_name, self.current, marker),
            ChangeKind::Updated => write!(
                f,
                "[{}] updated {} {} -> {}{}",
                self.name, self.ref_name, self.prev, self.current, marker
            ),
            ChangeKind::Deleted => write!(f, "[{}] deleted {} (was {})", self.name, self.ref_name, self.prev),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created() {
        let state = RefState::new("refs/heads/main", "sha1", true);
        let change = RefChange::created("repo", &state);

        assert_eq!(change.ref_name, "refs/heads/main");
        assert_eq!(change.name, "repo");
        assert_eq!(change.prev, "");
        assert_eq!(change.current, "sha1");
        assert!(change.checked_out);
        assert_eq!(change.kind(), ChangeKind::Created);
    }

    #[test]
    fn test_changed_keeps_previous_revision() {
        let old = RefState::new("refs/heads/main", "sha1", true);
        let new = RefState::new("refs/heads/main", "sha2", false);
        let change = RefChange::changed("repo", &old, &new);

        assert_eq!(change.prev, "sha1");
        assert_eq!(change.current, "sha2");
        assert!(!change.checked_out);
        assert_eq!(change.kind(), ChangeKind::Updated);
    }

    #[test]
    fn test_checkout_toggle_is_an_update() {
        let old = RefState::new("refs/heads/main", "sha1", false);
        let new = RefState::new("refs/heads/main", "sha1", true);
        let change = RefChange::changed("repo", &old, &new);

        assert_eq!(change.prev, "sha1");
        assert_eq!(change.current, "sha1");
        assert_eq!(change.kind(), ChangeKind::Updated);
    }

    #[test]
    fn test_deleted() {
        let old = RefState::new("refs/heads/old", "sha3", true);
        let change = RefChange::deleted("repo", &old);

        assert_eq!(change.prev, "sha3");
        assert_eq!(change.current, "");
        assert!(!change.checked_out);
        assert_eq!(change.kind(), ChangeKind::Deleted);
    }

    #[test]
    fn test_created_with_empty_revision_is_not_a_deletion() {
        let state = RefState::new("refs/heads/x", "", false);
        let change = RefChange::created("repo", &state);

        assert_eq!(change.kind(), ChangeKind::Created);
        assert!(change.to_string().starts_with("[repo] created refs/heads/x"));
    }

    #[test]
    fn test_display() {
        let state = RefState::new("refs/heads/main", "sha1", true);
        let created = RefChange::created("repo", &state);
        assert_eq!(created.to_string(), "[repo] created refs/heads/main at sha1 *");

        let deleted = RefChange::deleted("repo", &state);
        assert_eq!(deleted.to_string(), "[repo] deleted refs/heads/main (was sha1)");
    }

    #[test]
    fn test_json_field_names() {
        let change = RefChange::created("repo", &RefState::new("refs/tags/v1", "abc", false));
        let json = serde_json::to_value(&change).unwrap();

        assert_eq!(json["ref_name"], "refs/tags/v1");
        assert_eq!(json["name"], "repo");
        assert_eq!(json["prev"], "");
        assert_eq!(json["current"], "abc");
        assert_eq!(json["checked_out"], false);
    }
}
