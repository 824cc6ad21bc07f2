//! Reference lister trait definition

use async_trait::async_trait;

use super::error::ListError;
use crate::domain::RefState;

/// Something that can enumerate a repository's branches and tags
///
/// How the list is obtained (subprocess, library, remote API) is entirely up
/// to the implementation. The returned order is the order events for new and
/// changed references are emitted in.
#[async_trait]
pub trait RefLister: Send + Sync {
    /// List the current references
    async fn list_refs(&self) -> Result<Vec<RefState>, ListError>;

    /// Human-readable description used in log lines
    fn describe(&self) -> String;
}
