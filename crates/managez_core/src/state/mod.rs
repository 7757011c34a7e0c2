//! Persisted task list state.
//!
//! # Responsibility
//! - Convert a task list to and from the host's state document.
//! - Classify decode failures so callers can treat them as "no saved state".
//!
//! # Invariants
//! - A failed decode never touches the model.
//! - A successful restore replaces the whole sequence and notifies once.
//!
//! # See also
//! - `codec` for the XML document shape.
//! - `blob` for the host chunk framing.

use crate::model::task::TaskId;
use crate::service::task_list::TaskListModel;
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod blob;
pub mod codec;

pub use blob::{decode_blob, encode_blob};
pub use codec::{decode_xml, encode_xml, DecodedState};

pub type StateResult<T> = Result<T, StateError>;

/// Decode/encode failure for persisted state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// No bytes were supplied.
    Empty,
    /// Framed blob declares more payload than is present.
    Truncated { declared: usize, available: usize },
    /// Payload is not well-formed XML or not UTF-8.
    Malformed(String),
    /// Root element is not `Tasks`.
    WrongRootTag(String),
    /// Two tasks in one document share an id.
    DuplicateTaskId(TaskId),
    /// Serializer backend failure.
    Write(String),
}

impl Display for StateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "state data is empty"),
            Self::Truncated {
                declared,
                available,
            } => write!(
                f,
                "state blob declares {declared} payload bytes but only {available} are present"
            ),
            Self::Malformed(message) => write!(f, "malformed state document: {message}"),
            Self::WrongRootTag(tag) => {
                write!(f, "unexpected state root element `{tag}`; expected `Tasks`")
            }
            Self::DuplicateTaskId(id) => write!(f, "duplicate task id in state document: {id}"),
            Self::Write(message) => write!(f, "failed to write state document: {message}"),
        }
    }
}

impl Error for StateError {}

impl StateError {
    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Truncated { .. } => "truncated",
            Self::Malformed(_) => "malformed",
            Self::WrongRootTag(_) => "wrong_root",
            Self::DuplicateTaskId(_) => "duplicate_id",
            Self::Write(_) => "write_failed",
        }
    }
}

impl TaskListModel {
    /// Serializes the full model into a host state blob.
    pub fn save_state(&self) -> StateResult<Vec<u8>> {
        let data = encode_blob(self)?;
        debug!(
            "event=state_save module=state status=ok tasks={} bytes={}",
            self.total_count(),
            data.len()
        );
        Ok(data)
    }

    /// Restores the model from a host state blob or bare XML document.
    ///
    /// Returns `false` and leaves the model untouched when `data` is absent,
    /// malformed or not a task list document. Never surfaces an error.
    pub fn restore_state(&mut self, data: &[u8]) -> bool {
        match decode_blob(data) {
            Ok(state) => {
                self.apply_decoded(state);
                true
            }
            Err(err) => {
                warn!(
                    "event=state_restore module=state status=skipped reason={}",
                    err.code()
                );
                false
            }
        }
    }

    /// Replaces the contents with an already decoded document and notifies once.
    pub fn apply_decoded(&mut self, state: DecodedState) {
        self.replace_tasks(state.tasks, state.next_task_id);
        debug!(
            "event=state_restore module=state status=ok tasks={} next_task_id={}",
            self.total_count(),
            self.next_task_id()
        );
        self.notify_listeners();
    }
}
