use managez_core::{Category, Priority, TaskListListener, TaskListModel, TemplateLibrary};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Default)]
struct CallCounter {
    calls: Cell<usize>,
}

impl TaskListListener for CallCounter {
    fn tasks_changed(&self, _model: &TaskListModel) {
        self.calls.set(self.calls.get() + 1);
    }
}

#[test]
fn mastering_template_populates_nine_master_tasks() {
    let mut model = TaskListModel::new();

    model.load_template("Mastering");

    assert_eq!(model.total_count(), 9);
    let first = &model.tasks()[0];
    assert_eq!(first.text, "Load reference track");
    assert_eq!(first.priority, Priority::High);
    assert_eq!(first.category, Category::Master);
    assert!(model
        .tasks()
        .iter()
        .all(|task| task.category == Category::Master && !task.completed));

    let high: Vec<_> = model
        .tasks()
        .iter()
        .filter(|task| task.priority == Priority::High)
        .map(|task| task.text.as_str())
        .collect();
    assert_eq!(
        high,
        vec![
            "Load reference track",
            "Limiting (-0.1dB peak)",
            "Check LUFS (-14 for streaming)"
        ]
    );
}

#[test]
fn load_template_replaces_existing_tasks_with_one_notification() {
    let counter = Rc::new(CallCounter::default());
    let mut model = TaskListModel::new();
    model.add_task("Old task");
    model.add_task("Another old task");
    model.add_listener(counter.clone());

    model.load_template("Recording");

    assert_eq!(counter.calls.get(), 1);
    assert_eq!(model.total_count(), 8);
    assert_eq!(model.tasks()[0].text, "Setup microphones");
    assert_eq!(model.tasks()[1].priority, Priority::High);
    assert_eq!(model.tasks()[6].text, "Do sound check");
    assert_eq!(model.tasks()[6].priority, Priority::High);
    assert_eq!(model.tasks()[7].text, "Set markers");
}

#[test]
fn template_ids_continue_from_counter() {
    let mut model = TaskListModel::new();
    model.add_task("a");
    model.add_task("b");

    model.load_template("Release");

    let ids: Vec<_> = model.tasks().iter().map(|task| task.id).collect();
    assert_eq!(ids, (3..=10).collect::<Vec<_>>());
    assert_eq!(model.next_task_id(), 11);
}

#[test]
fn mixing_template_is_all_mix_without_priority() {
    let mut model = TaskListModel::new();
    model.load_template("Mixing");

    assert_eq!(model.total_count(), 10);
    assert_eq!(model.tasks()[1].text, "Check all levels (-6dB headroom)");
    assert_eq!(model.tasks()[9].text, "Final limiter check");
    assert!(model
        .tasks()
        .iter()
        .all(|task| task.category == Category::Mix && task.priority == Priority::None));
}

#[test]
fn release_template_marks_approvals_high() {
    let mut model = TaskListModel::new();
    model.load_template("Release");

    assert_eq!(model.tasks()[0].text, "Final mix approved");
    assert_eq!(model.tasks()[0].priority, Priority::High);
    assert_eq!(model.tasks()[1].text, "Master approved");
    assert_eq!(model.tasks()[1].priority, Priority::High);
    assert_eq!(model.tasks()[2].text, "Artwork ready (3000x3000)");
    assert_eq!(model.tasks()[2].priority, Priority::None);
    assert!(model
        .tasks()
        .iter()
        .all(|task| task.category == Category::Release));
}

#[test]
fn unknown_template_clears_and_notifies_once() {
    let counter = Rc::new(CallCounter::default());
    let mut model = TaskListModel::new();
    model.add_task("Keep?");
    model.add_listener(counter.clone());

    model.load_template("Podcast");

    assert_eq!(model.total_count(), 0);
    assert_eq!(counter.calls.get(), 1);
    assert_eq!(model.next_task_id(), 2);
}

#[test]
fn library_populate_matches_model_shortcut() {
    let mut via_library = TaskListModel::new();
    TemplateLibrary::builtin().populate("Mixing", &mut via_library);

    let mut via_model = TaskListModel::new();
    via_model.load_template("Mixing");

    assert_eq!(via_library.tasks(), via_model.tasks());
}
