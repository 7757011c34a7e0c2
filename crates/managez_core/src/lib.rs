//! Core checklist logic for the ManagEZ plugin.
//! This crate owns the task list state; hosts and views only observe and call into it.

pub mod logging;
pub mod model;
pub mod service;
pub mod state;
pub mod template;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{Category, Priority, Task, TaskId};
pub use service::progress::ProgressSummary;
pub use service::task_list::{TaskListListener, TaskListModel};
pub use state::{
    decode_blob, decode_xml, encode_blob, encode_xml, DecodedState, StateError, StateResult,
};
pub use template::{TaskTemplate, TemplateItem, TemplateLibrary};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
