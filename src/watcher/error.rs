//! Poller error types

use thiserror::Error;

use crate::lister::ListError;

/// Reasons a RefPoller stops before being asked to
#[derive(Debug, Error)]
pub enum PollError {
    #[error("Cannot get reference list for {name}: {source}")]
    Enumeration {
        name: String,
        #[source]
        source: ListError,
    },

    #[error("Event channel for {name} closed")]
    SinkClosed { name: String },
}

impl PollError {
    /// Name of the watched repository that failed
    pub fn repo_name(&self) -> &str {
        match self {
            PollError::Enumeration { name, .. } => name,
            PollError::SinkClosed { name } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_enumeration_message_and_source() {
        let err = PollError::Enumeration {
            name: "mirror".to_string(),
            source: ListError::Other("boom".to_string()),
        };

        assert!(err.to_string().contains("mirror"));
        assert!(err.to_string().contains("boom"));
        assert!(err.source().is_some());
        assert_eq!(err.repo_name(), "mirror");
    }

    #[test]
    fn test_sink_closed_message() {
        let err = PollError::SinkClosed {
            name: "mirror".to_string(),
        };
        assert_eq!(err.to_string(), "Event channel for mirror closed");
        assert_eq!(err.repo_name(), "mirror");
    }
}
