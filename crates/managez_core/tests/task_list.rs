use managez_core::{Category, Priority, TaskListListener, TaskListModel};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Default)]
struct CountingListener {
    calls: Cell<usize>,
    seen_totals: RefCell<Vec<usize>>,
}

impl TaskListListener for CountingListener {
    fn tasks_changed(&self, model: &TaskListModel) {
        self.calls.set(self.calls.get() + 1);
        self.seen_totals.borrow_mut().push(model.total_count());
    }
}

fn observed_model() -> (TaskListModel, Rc<CountingListener>) {
    let listener = Rc::new(CountingListener::default());
    let mut model = TaskListModel::new();
    model.add_listener(listener.clone());
    (model, listener)
}

fn texts(model: &TaskListModel) -> Vec<&str> {
    model.tasks().iter().map(|task| task.text.as_str()).collect()
}

#[test]
fn add_to_empty_model_creates_default_task() {
    let mut model = TaskListModel::new();

    let id = model.add_task("Mix vocals");

    assert_eq!(id, Some(1));
    assert_eq!(model.total_count(), 1);
    assert_eq!(model.completed_count(), 0);
    let task = &model.tasks()[0];
    assert_eq!(task.id, 1);
    assert_eq!(task.text, "Mix vocals");
    assert!(!task.completed);
    assert_eq!(task.priority, Priority::None);
    assert_eq!(task.category, Category::General);
}

#[test]
fn add_trims_text() {
    let mut model = TaskListModel::new();
    model.add_task("  Tune snare \n");
    assert_eq!(model.tasks()[0].text, "Tune snare");
}

#[test]
fn reorder_first_to_last_moves_after_removal() {
    let mut model = TaskListModel::new();
    model.add_task("A");
    model.add_task("B");
    model.add_task("C");

    assert!(model.reorder_task(0, 2));

    assert_eq!(texts(&model), vec!["B", "C", "A"]);
}

#[test]
fn reorder_equal_or_out_of_range_is_silent() {
    let (mut model, listener) = observed_model();
    model.add_task("A");
    model.add_task("B");
    let before = listener.calls.get();

    assert!(!model.reorder_task(1, 1));
    assert!(!model.reorder_task(0, 2));
    assert!(!model.reorder_task(5, 0));

    assert_eq!(texts(&model), vec!["A", "B"]);
    assert_eq!(listener.calls.get(), before);
}

#[test]
fn whitespace_only_add_is_ignored_without_notification() {
    let (mut model, listener) = observed_model();

    assert_eq!(model.add_task("   "), None);

    assert_eq!(model.total_count(), 0);
    assert_eq!(listener.calls.get(), 0);
    assert_eq!(model.next_task_id(), 1);
}

#[test]
fn out_of_range_remove_is_silent() {
    let (mut model, listener) = observed_model();
    model.add_task("X");
    assert_eq!(listener.calls.get(), 1);

    assert!(!model.remove_task(5));

    assert_eq!(texts(&model), vec!["X"]);
    assert_eq!(listener.calls.get(), 1);
}

#[test]
fn every_out_of_range_mutation_is_silent() {
    let (mut model, listener) = observed_model();
    model.add_task("Only");
    let snapshot = model.tasks().to_vec();

    assert!(!model.edit_task(1, "nope"));
    assert!(!model.toggle_task(1));
    assert!(!model.set_task_priority(3, Priority::High));
    assert!(!model.set_task_category(usize::MAX, Category::Mix));
    assert!(!model.remove_task(1));

    assert_eq!(model.tasks(), snapshot.as_slice());
    assert_eq!(listener.calls.get(), 1);
}

#[test]
fn mutations_update_fields_and_notify_once_each() {
    let (mut model, listener) = observed_model();
    model.add_task("Comp vocals");

    assert!(model.edit_task(0, "  Comp lead vocal  "));
    assert!(model.toggle_task(0));
    assert!(model.set_task_priority(0, Priority::Medium));
    assert!(model.set_task_category(0, Category::Record));

    let task = &model.tasks()[0];
    assert_eq!(task.text, "  Comp lead vocal  ");
    assert!(task.completed);
    assert_eq!(task.priority, Priority::Medium);
    assert_eq!(task.category, Category::Record);
    assert_eq!(model.completed_count(), 1);
    assert_eq!(listener.calls.get(), 5);

    assert!(model.toggle_task(0));
    assert_eq!(model.completed_count(), 0);
}

#[test]
fn listeners_observe_post_mutation_state() {
    let (mut model, listener) = observed_model();

    model.add_task("one");
    model.add_task("two");
    model.remove_task(0);
    model.clear_all_tasks();

    assert_eq!(*listener.seen_totals.borrow(), vec![1, 2, 1, 0]);
}

#[test]
fn ids_increase_across_remove_and_clear() {
    let mut model = TaskListModel::new();
    let first = model.add_task("a").unwrap();
    let second = model.add_task("b").unwrap();
    model.remove_task(1);
    let third = model.add_task("c").unwrap();
    model.clear_all_tasks();
    let fourth = model.add_task("d").unwrap();

    assert!(first < second && second < third && third < fourth);
    assert_eq!(fourth, 4);
    assert_eq!(model.tasks()[0].id, 4);
}

#[test]
fn remove_shifts_later_positions_and_keeps_ids() {
    let mut model = TaskListModel::new();
    model.add_task("A");
    model.add_task("B");
    model.add_task("C");

    model.remove_task(1);

    let ids: Vec<_> = model.tasks().iter().map(|task| task.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(texts(&model), vec!["A", "C"]);
}

#[test]
fn clear_notifies_even_when_already_empty() {
    let (mut model, listener) = observed_model();
    model.clear_all_tasks();
    assert_eq!(listener.calls.get(), 1);
}

#[test]
fn counts_stay_consistent_over_mixed_operations() {
    let mut model = TaskListModel::new();
    for step in 0..40usize {
        match step % 6 {
            0 | 1 => {
                model.add_task(&format!("task {step}"));
            }
            2 => {
                model.toggle_task(step % 5);
            }
            3 => {
                model.reorder_task(step % 4, (step + 1) % 3);
            }
            4 => {
                model.remove_task(step % 7);
            }
            _ => {
                model.toggle_task(0);
            }
        }
        assert_eq!(model.total_count(), model.tasks().len());
        assert!(model.completed_count() <= model.total_count());
    }
}

#[test]
fn removing_listener_twice_is_safe() {
    let listener = Rc::new(CountingListener::default());
    let handle: Rc<dyn TaskListListener> = listener.clone();
    let mut model = TaskListModel::new();
    model.add_listener(handle.clone());

    model.remove_listener(&handle);
    model.remove_listener(&handle);
    model.add_task("after removal");

    assert_eq!(listener.calls.get(), 0);
    assert_eq!(model.listener_count(), 0);
}
