//! Repository reference watching
//!
//! A RefPoller lists one repository's references every period, diffs them
//! against the previous cycle's Snapshot and sends a RefChange for every
//! created, moved, checkout-toggled or deleted reference.

mod config;
mod error;
mod poller;
mod snapshot;

pub use config::WatcherConfig;
pub use error::PollError;
pub use poller::{RefPoller, poll_repository};
pub use snapshot::Snapshot;
