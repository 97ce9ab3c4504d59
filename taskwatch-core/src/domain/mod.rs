//! Core domain types
//!
//! These types mirror the records served by the task backend. The client never
//! mutates them; every change is observed through polling.

pub mod task;
mod timestamp;
