//! Reference listers
//!
//! The poller asks a `RefLister` for the current references every cycle.
//! `GitCliLister` shells out to `git for-each-ref` in a local repository.

mod error;
mod git;
mod traits;

pub use error::ListError;
pub use git::{FOR_EACH_REF_FORMAT, GitCliLister, parse_for_each_ref};
pub use traits::RefLister;
