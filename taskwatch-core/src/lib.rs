//! Taskwatch Core
//!
//! Core types for the Taskwatch monitoring client.
//!
//! This crate contains:
//! - Domain types: Task records and their status state machine
//! - DTOs: Request and response bodies exchanged with the task backend

pub mod domain;
pub mod dto;
