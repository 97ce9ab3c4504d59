//! Scheduler layer
//!
//! Drives the two poll channels (task list and worker count) on independent
//! cadences and applies their results to the reconciliation store.

mod handle;
pub mod poller;

pub use handle::MonitorHandle;
pub use poller::{Monitor, PollIntervals};
