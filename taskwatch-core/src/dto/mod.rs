//! Data Transfer Objects
//!
//! Request and response bodies for the task backend's REST endpoints.

pub mod task;
pub mod worker;
