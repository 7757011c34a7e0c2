//! Task list model and derived queries.
//!
//! # Responsibility
//! - Hold the single mutable checklist owned by one host session.
//! - Keep the view layer decoupled from persistence and template details.

pub mod progress;
pub mod task_list;
