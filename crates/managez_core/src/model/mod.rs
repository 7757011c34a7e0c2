//! Checklist domain model.
//!
//! # Responsibility
//! - Define the task record and its enum fields.
//!
//! # Invariants
//! - Task identity is the numeric `TaskId`, never the list position.

pub mod task;
