//! refwatch - stream reference changes from git repositories
//!
//! A [`RefPoller`] periodically lists a repository's branches and tags
//! through a [`RefLister`], diffs the listing against the previous poll and
//! sends a [`RefChange`] for every reference that was created, moved to a new
//! revision, toggled its checked-out status, or was deleted.
//!
//! # Modules
//!
//! - [`domain`] - `RefState` and `RefChange` value types
//! - [`watcher`] - Snapshot diffing and the polling loop
//! - [`lister`] - Reference lister trait and the `git` CLI implementation
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod lister;
pub mod watcher;

// Re-export commonly used types
pub use config::{Config, RepoConfig};
pub use domain::{ChangeKind, RefChange, RefState};
pub use lister::{GitCliLister, ListError, RefLister};
pub use watcher::{PollError, RefPoller, Snapshot, WatcherConfig, poll_repository};
