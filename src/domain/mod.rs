//! Domain types for refwatch
//!
//! `RefState` is what a lister reports for one reference; `RefChange` is the
//! event the poller emits when a reference's state transitions between two
//! consecutive polls.

mod change;
mod kind;
mod reference;

pub use change::RefChange;
pub use kind::ChangeKind;
pub use reference::RefState;
