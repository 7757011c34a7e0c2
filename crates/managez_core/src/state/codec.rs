//! XML document form of the task list.
//!
//! ```text
//! <Tasks nextTaskId="4">
//!   <Task id="1" text="..." completed="0" priority="3" category="1"/>
//! </Tasks>
//! ```
//!
//! # Invariants
//! - Enum fields are written as raw ordinals.
//! - Out-of-range ordinals decode to `Priority::None` / `Category::General`.
//! - Decoded ids are pairwise distinct and below the decoded counter.

use crate::model::task::{Category, Priority, Task, TaskId};
use crate::service::task_list::TaskListModel;
use crate::state::{StateError, StateResult};
use log::warn;
use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::collections::BTreeSet;

const ROOT_TAG: &str = "Tasks";
const TASK_TAG: &str = "Task";
const ATTR_NEXT_TASK_ID: &str = "nextTaskId";
const ATTR_ID: &str = "id";
const ATTR_TEXT: &str = "text";
const ATTR_COMPLETED: &str = "completed";
const ATTR_PRIORITY: &str = "priority";
const ATTR_CATEGORY: &str = "category";

/// Task sequence and counter read back from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedState {
    pub tasks: Vec<Task>,
    pub next_task_id: TaskId,
}

/// Writes the model as a UTF-8 XML document.
pub fn encode_xml(model: &TaskListModel) -> StateResult<String> {
    let mut writer = Writer::new(Vec::new());
    write_event(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;

    let next_task_id = model.next_task_id().to_string();
    let mut root = BytesStart::new(ROOT_TAG);
    root.push_attribute((ATTR_NEXT_TASK_ID, next_task_id.as_str()));
    write_event(&mut writer, Event::Start(root))?;

    for task in model.tasks() {
        let id = task.id.to_string();
        let priority = task.priority.ordinal().to_string();
        let category = task.category.ordinal().to_string();
        let mut element = BytesStart::new(TASK_TAG);
        element.push_attribute((ATTR_ID, id.as_str()));
        let text = escape_text_attribute(&task.text);
        element.push_attribute(Attribute::from((ATTR_TEXT.as_bytes(), text.as_bytes())));
        element.push_attribute((ATTR_COMPLETED, if task.completed { "1" } else { "0" }));
        element.push_attribute((ATTR_PRIORITY, priority.as_str()));
        element.push_attribute((ATTR_CATEGORY, category.as_str()));
        write_event(&mut writer, Event::Empty(element))?;
    }

    write_event(&mut writer, Event::End(BytesEnd::new(ROOT_TAG)))?;

    String::from_utf8(writer.into_inner()).map_err(|err| StateError::Write(err.to_string()))
}

/// Parses a task list document.
///
/// # Errors
/// - `Malformed` when the text is not well-formed or has no root element.
/// - `WrongRootTag` when the root element is not `Tasks`.
/// - `DuplicateTaskId` when two tasks carry the same explicit id.
pub fn decode_xml(text: &str) -> StateResult<DecodedState> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stored_next_id: Option<TaskId> = None;
    let mut raw_tasks: Vec<RawTask> = Vec::new();
    let mut saw_root = false;
    let mut root_closed = false;
    let mut depth = 0usize;

    loop {
        let event = reader
            .read_event()
            .map_err(|err| StateError::Malformed(err.to_string()))?;
        match event {
            Event::Eof => break,
            // Trailing content after the root element is ignored.
            _ if root_closed => {}
            Event::Start(element) => {
                if !saw_root {
                    stored_next_id = read_root(&element)?;
                    saw_root = true;
                } else if depth == 1 && element.name().as_ref() == TASK_TAG.as_bytes() {
                    raw_tasks.push(read_task(&element)?);
                }
                depth += 1;
            }
            Event::Empty(element) => {
                if !saw_root {
                    stored_next_id = read_root(&element)?;
                    saw_root = true;
                    root_closed = true;
                } else if depth == 1 && element.name().as_ref() == TASK_TAG.as_bytes() {
                    raw_tasks.push(read_task(&element)?);
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if saw_root && depth == 0 {
                    root_closed = true;
                }
            }
            _ => {}
        }
    }

    if !saw_root {
        return Err(StateError::Malformed("document has no root element".to_string()));
    }
    if !root_closed {
        return Err(StateError::Malformed("root element is not closed".to_string()));
    }

    assemble(raw_tasks, stored_next_id.unwrap_or(1))
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> StateResult<()> {
    writer
        .write_event(event)
        .map_err(|err| StateError::Write(err.to_string()))
}

/// Escapes markup plus tab/CR/LF as character references.
///
/// Literal whitespace in attribute values is normalized to spaces by
/// conforming readers; references survive.
fn escape_text_attribute(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in escape(text).chars() {
        match ch {
            '\t' => escaped.push_str("&#9;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Attribute values of one `Task` element before defaults are applied.
#[derive(Debug, Default)]
struct RawTask {
    id: Option<TaskId>,
    text: Option<String>,
    completed: Option<bool>,
    priority: Option<i64>,
    category: Option<i64>,
}

fn read_root(element: &BytesStart<'_>) -> StateResult<Option<TaskId>> {
    let name = element.name();
    if name.as_ref() != ROOT_TAG.as_bytes() {
        return Err(StateError::WrongRootTag(
            String::from_utf8_lossy(name.as_ref()).into_owned(),
        ));
    }

    let mut next_task_id = None;
    for attribute in element.attributes() {
        let attribute = attribute.map_err(|err| StateError::Malformed(err.to_string()))?;
        if attribute.key.as_ref() == ATTR_NEXT_TASK_ID.as_bytes() {
            let value = attribute
                .unescape_value()
                .map_err(|err| StateError::Malformed(err.to_string()))?;
            next_task_id = parse_task_id(&value);
        }
    }
    Ok(next_task_id)
}

fn read_task(element: &BytesStart<'_>) -> StateResult<RawTask> {
    let mut raw = RawTask::default();
    for attribute in element.attributes() {
        let attribute = attribute.map_err(|err| StateError::Malformed(err.to_string()))?;
        let value = attribute
            .unescape_value()
            .map_err(|err| StateError::Malformed(err.to_string()))?;
        match attribute.key.as_ref() {
            key if key == ATTR_ID.as_bytes() => raw.id = parse_task_id(&value),
            key if key == ATTR_TEXT.as_bytes() => raw.text = Some(value.into_owned()),
            key if key == ATTR_COMPLETED.as_bytes() => raw.completed = Some(parse_bool(&value)),
            key if key == ATTR_PRIORITY.as_bytes() => raw.priority = Some(parse_ordinal(&value)),
            key if key == ATTR_CATEGORY.as_bytes() => raw.category = Some(parse_ordinal(&value)),
            _ => {}
        }
    }
    Ok(raw)
}

fn assemble(raw_tasks: Vec<RawTask>, stored_next_id: TaskId) -> StateResult<DecodedState> {
    let mut seen = BTreeSet::new();
    for id in raw_tasks.iter().filter_map(|raw| raw.id) {
        if !seen.insert(id) {
            return Err(StateError::DuplicateTaskId(id));
        }
    }

    let mut next_task_id = seen
        .last()
        .map(|max| max + 1)
        .unwrap_or(1)
        .max(stored_next_id)
        .max(1);

    let mut tasks = Vec::with_capacity(raw_tasks.len());
    for raw in raw_tasks {
        let id = match raw.id {
            Some(id) => id,
            None => {
                let id = next_task_id;
                next_task_id = next_task_id
                    .checked_add(1)
                    .ok_or_else(|| StateError::Malformed("task id space exhausted".to_string()))?;
                id
            }
        };
        tasks.push(Task {
            id,
            text: raw.text.unwrap_or_default(),
            completed: raw.completed.unwrap_or(false),
            priority: raw.priority.map(priority_or_default).unwrap_or_default(),
            category: raw.category.map(category_or_default).unwrap_or_default(),
        });
    }

    Ok(DecodedState {
        tasks,
        next_task_id,
    })
}

/// Ids are positive and leave room for one more counter step.
fn parse_task_id(value: &str) -> Option<TaskId> {
    value
        .trim()
        .parse::<TaskId>()
        .ok()
        .filter(|id| (1..TaskId::MAX).contains(id))
}

/// Unparsable ordinals map to `-1`, which is out of range for every enum.
fn parse_ordinal(value: &str) -> i64 {
    value.trim().parse::<i64>().unwrap_or(-1)
}

/// Accepts `1`, `true`, `yes` and friends by first character.
fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().chars().next(),
        Some('1' | 't' | 'T' | 'y' | 'Y')
    )
}

fn priority_or_default(ordinal: i64) -> Priority {
    Priority::from_ordinal(ordinal).unwrap_or_else(|| {
        warn!(
            "event=state_decode module=state status=clamped field=priority value={}",
            ordinal
        );
        Priority::None
    })
}

fn category_or_default(ordinal: i64) -> Category {
    Category::from_ordinal(ordinal).unwrap_or_else(|| {
        warn!(
            "event=state_decode module=state status=clamped field=category value={}",
            ordinal
        );
        Category::General
    })
}
