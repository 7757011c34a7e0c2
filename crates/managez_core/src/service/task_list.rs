//! Task list model and change notification.
//!
//! # Responsibility
//! - Own the ordered task sequence and the id counter.
//! - Apply view intents (add/edit/remove/toggle/reorder/...) in place.
//! - Fan out one synchronous `tasks_changed` callback per effective mutation.
//!
//! # Invariants
//! - Task ids are pairwise distinct; the counter only moves forward, except
//!   that a restored document brings its own counter.
//! - Out-of-range indices and blank input are silent no-ops: no error, no
//!   notification.
//! - Listeners run in registration order after the mutation is applied.
//!
//! # See also
//! - `crate::template` for bulk population.
//! - `crate::state` for the persisted representation.

use crate::model::task::{Category, Priority, Task, TaskId};
use log::{debug, trace, warn};
use std::collections::HashSet;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Observer capability registered by the view layer.
///
/// The callback receives the model so the observer reads post-mutation state;
/// it cannot mutate the model from inside the callback.
pub trait TaskListListener {
    fn tasks_changed(&self, model: &TaskListModel);
}

/// Ordered, observable checklist.
pub struct TaskListModel {
    tasks: Vec<Task>,
    listeners: Vec<Rc<dyn TaskListListener>>,
    next_task_id: TaskId,
}

impl Default for TaskListModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for TaskListModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskListModel")
            .field("tasks", &self.tasks)
            .field("listeners", &self.listeners.len())
            .field("next_task_id", &self.next_task_id)
            .finish()
    }
}

impl TaskListModel {
    /// Creates an empty model whose first assigned id is `1`.
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            listeners: Vec::new(),
            next_task_id: 1,
        }
    }

    /// Creates a model pre-seeded with tasks.
    ///
    /// `next_task_id` is raised above the highest seeded id when needed, so
    /// later additions never collide with seeded ids. A task whose id repeats
    /// an earlier one is dropped.
    pub fn with_tasks(mut tasks: Vec<Task>, next_task_id: TaskId) -> Self {
        let mut seen = HashSet::new();
        let seeded = tasks.len();
        tasks.retain(|task| seen.insert(task.id));
        if tasks.len() != seeded {
            warn!(
                "event=task_seed module=task_list status=dropped_duplicates dropped={}",
                seeded - tasks.len()
            );
        }
        let next_task_id = counter_floor(&tasks, next_task_id);
        Self {
            tasks,
            listeners: Vec::new(),
            next_task_id,
        }
    }

    /// Appends a new open task.
    ///
    /// Returns the assigned id, or `None` when `text` is blank after trimming
    /// or the id space is used up.
    pub fn add_task(&mut self, text: &str) -> Option<TaskId> {
        let id = self.append_task(text)?.id;
        debug!(
            "event=task_add module=task_list status=ok task_id={} total={}",
            id,
            self.tasks.len()
        );
        self.notify_listeners();
        Some(id)
    }

    /// Replaces the text of the task at `index`.
    ///
    /// The new text is stored verbatim.
    pub fn edit_task(&mut self, index: usize, new_text: &str) -> bool {
        let Some(task) = self.tasks.get_mut(index) else {
            return self.ignore("task_edit", index);
        };
        task.text = new_text.to_string();
        debug!(
            "event=task_edit module=task_list status=ok task_id={} index={}",
            task.id, index
        );
        self.notify_listeners();
        true
    }

    /// Removes the task at `index`; later positions shift down by one.
    pub fn remove_task(&mut self, index: usize) -> bool {
        if index >= self.tasks.len() {
            return self.ignore("task_remove", index);
        }
        let removed = self.tasks.remove(index);
        debug!(
            "event=task_remove module=task_list status=ok task_id={} index={} total={}",
            removed.id,
            index,
            self.tasks.len()
        );
        self.notify_listeners();
        true
    }

    /// Flips the completion flag of the task at `index`.
    pub fn toggle_task(&mut self, index: usize) -> bool {
        let Some(task) = self.tasks.get_mut(index) else {
            return self.ignore("task_toggle", index);
        };
        task.completed = !task.completed;
        debug!(
            "event=task_toggle module=task_list status=ok task_id={} completed={}",
            task.id, task.completed
        );
        self.notify_listeners();
        true
    }

    pub fn set_task_priority(&mut self, index: usize, priority: Priority) -> bool {
        let Some(task) = self.tasks.get_mut(index) else {
            return self.ignore("task_set_priority", index);
        };
        task.priority = priority;
        debug!(
            "event=task_set_priority module=task_list status=ok task_id={} priority={}",
            task.id,
            priority.ordinal()
        );
        self.notify_listeners();
        true
    }

    pub fn set_task_category(&mut self, index: usize, category: Category) -> bool {
        let Some(task) = self.tasks.get_mut(index) else {
            return self.ignore("task_set_category", index);
        };
        task.category = category;
        debug!(
            "event=task_set_category module=task_list status=ok task_id={} category={}",
            task.id,
            category.ordinal()
        );
        self.notify_listeners();
        true
    }

    /// Moves the task at `from_index` so it ends up at `to_index`.
    ///
    /// Removal happens first; `to_index` addresses the shortened sequence.
    /// Equal or out-of-range indices are a no-op.
    pub fn reorder_task(&mut self, from_index: usize, to_index: usize) -> bool {
        let len = self.tasks.len();
        if from_index >= len || to_index >= len || from_index == to_index {
            trace!(
                "event=task_reorder module=task_list status=ignored from={} to={} total={}",
                from_index,
                to_index,
                len
            );
            return false;
        }
        let task = self.tasks.remove(from_index);
        self.tasks.insert(to_index, task);
        debug!(
            "event=task_reorder module=task_list status=ok from={} to={}",
            from_index, to_index
        );
        self.notify_listeners();
        true
    }

    /// Removes every task. The id counter is kept.
    pub fn clear_all_tasks(&mut self) {
        self.tasks.clear();
        debug!(
            "event=task_clear module=task_list status=ok next_task_id={}",
            self.next_task_id
        );
        self.notify_listeners();
    }

    /// Read-only ordered view of the current tasks.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    pub fn total_count(&self) -> usize {
        self.tasks.len()
    }

    /// Id the next successful add will receive.
    pub fn next_task_id(&self) -> TaskId {
        self.next_task_id
    }

    /// Registers an observer at the end of the notification order.
    ///
    /// Registering the same observer twice yields two callbacks per change.
    pub fn add_listener(&mut self, listener: Rc<dyn TaskListListener>) {
        self.listeners.push(listener);
    }

    /// Unregisters every registration of `listener`. Unknown observers are a no-op.
    pub fn remove_listener(&mut self, listener: &Rc<dyn TaskListListener>) {
        self.listeners
            .retain(|registered| !Rc::ptr_eq(registered, listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Appends a task without notifying; used by batch paths that notify once.
    pub(crate) fn append_task(&mut self, text: &str) -> Option<&mut Task> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            trace!("event=task_add module=task_list status=ignored reason=blank_text");
            return None;
        }
        // The counter must stay strictly above every issued id, so the last
        // value of the id space is never handed out.
        let Some(following) = self.next_task_id.checked_add(1) else {
            warn!(
                "event=task_add module=task_list status=ignored reason=id_space_exhausted next_task_id={}",
                self.next_task_id
            );
            return None;
        };
        let task = Task::new(self.next_task_id, trimmed);
        self.next_task_id = following;
        self.tasks.push(task);
        self.tasks.last_mut()
    }

    /// Swaps in a restored task sequence without notifying.
    pub(crate) fn replace_tasks(&mut self, tasks: Vec<Task>, next_task_id: TaskId) {
        self.next_task_id = counter_floor(&tasks, next_task_id);
        self.tasks = tasks;
    }

    pub(crate) fn clear_silently(&mut self) {
        self.tasks.clear();
    }

    pub(crate) fn notify_listeners(&self) {
        for listener in &self.listeners {
            listener.tasks_changed(self);
        }
    }

    fn ignore(&self, event: &str, index: usize) -> bool {
        trace!(
            "event={} module=task_list status=ignored index={} total={}",
            event,
            index,
            self.tasks.len()
        );
        false
    }
}

fn counter_floor(tasks: &[Task], requested: TaskId) -> TaskId {
    let above_max = tasks
        .iter()
        .map(|task| task.id.saturating_add(1))
        .max()
        .unwrap_or(1);
    requested.max(above_max).max(1)
}
