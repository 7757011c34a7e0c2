//! Built-in checklist presets.
//!
//! # Responsibility
//! - Declare the fixed preset table offered by the template selector.
//! - Repopulate a task list from one preset with a single notification.
//!
//! # Invariants
//! - Preset names match exactly and case-sensitively.
//! - An unknown preset behaves as an empty one: the list is cleared.

use crate::model::task::{Category, Priority};
use crate::service::task_list::TaskListModel;
use log::{debug, warn};

/// One preset entry: text plus the overrides applied after the default add.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateItem {
    pub text: &'static str,
    pub category: Category,
    pub priority: Priority,
}

/// Named, ordered preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTemplate {
    pub name: &'static str,
    pub items: &'static [TemplateItem],
}

/// Fixed table of presets.
#[derive(Debug, Clone, Copy)]
pub struct TemplateLibrary {
    templates: &'static [TaskTemplate],
}

const fn item(text: &'static str, category: Category, priority: Priority) -> TemplateItem {
    TemplateItem {
        text,
        category,
        priority,
    }
}

const MIXING_ITEMS: &[TemplateItem] = &[
    item("Set reference track", Category::Mix, Priority::None),
    item("Check all levels (-6dB headroom)", Category::Mix, Priority::None),
    item("EQ each track", Category::Mix, Priority::None),
    item("Compress where needed", Category::Mix, Priority::None),
    item("Pan placement", Category::Mix, Priority::None),
    item("Add reverb/delay", Category::Mix, Priority::None),
    item("Automation passes", Category::Mix, Priority::None),
    item("Check in mono", Category::Mix, Priority::None),
    item("Bus processing", Category::Mix, Priority::None),
    item("Final limiter check", Category::Mix, Priority::None),
];

const MASTERING_ITEMS: &[TemplateItem] = &[
    item("Load reference track", Category::Master, Priority::High),
    item("Set monitoring level", Category::Master, Priority::None),
    item("EQ adjustments", Category::Master, Priority::None),
    item("Multiband compression", Category::Master, Priority::None),
    item("Limiting (-0.1dB peak)", Category::Master, Priority::High),
    item("Check LUFS (-14 for streaming)", Category::Master, Priority::High),
    item("Export WAV 24-bit", Category::Master, Priority::None),
    item("Export MP3 320kbps", Category::Master, Priority::None),
    item("Add metadata", Category::Master, Priority::None),
];

const RECORDING_ITEMS: &[TemplateItem] = &[
    item("Setup microphones", Category::Record, Priority::None),
    item("Check input levels", Category::Record, Priority::High),
    item("Set monitoring mix", Category::Record, Priority::None),
    item("Enable click track", Category::Record, Priority::None),
    item("Create headphone mix", Category::Record, Priority::None),
    item("Arm tracks", Category::Record, Priority::None),
    item("Do sound check", Category::Record, Priority::High),
    item("Set markers", Category::Record, Priority::None),
];

const RELEASE_ITEMS: &[TemplateItem] = &[
    item("Final mix approved", Category::Release, Priority::High),
    item("Master approved", Category::Release, Priority::High),
    item("Artwork ready (3000x3000)", Category::Release, Priority::None),
    item("Metadata complete", Category::Release, Priority::None),
    item("Upload to distributor", Category::Release, Priority::None),
    item("Schedule release date", Category::Release, Priority::None),
    item("Prepare social posts", Category::Release, Priority::None),
    item("Send to playlist curators", Category::Release, Priority::None),
];

const BUILTIN_TEMPLATES: &[TaskTemplate] = &[
    TaskTemplate {
        name: "Mixing",
        items: MIXING_ITEMS,
    },
    TaskTemplate {
        name: "Mastering",
        items: MASTERING_ITEMS,
    },
    TaskTemplate {
        name: "Recording",
        items: RECORDING_ITEMS,
    },
    TaskTemplate {
        name: "Release",
        items: RELEASE_ITEMS,
    },
];

impl TemplateLibrary {
    /// The four shipped presets: Mixing, Mastering, Recording, Release.
    pub fn builtin() -> Self {
        Self {
            templates: BUILTIN_TEMPLATES,
        }
    }

    /// Preset names in selector order.
    pub fn names(&self) -> Vec<&'static str> {
        self.templates.iter().map(|template| template.name).collect()
    }

    pub fn find(&self, name: &str) -> Option<&'static TaskTemplate> {
        self.templates.iter().find(|template| template.name == name)
    }

    /// Replaces the model contents with the named preset.
    ///
    /// Clearing and appending are not observable separately: listeners get
    /// exactly one callback after the list is fully repopulated.
    pub fn populate(&self, name: &str, model: &mut TaskListModel) {
        model.clear_silently();

        let items: &[TemplateItem] = match self.find(name) {
            Some(template) => template.items,
            None => {
                warn!("event=template_load module=template status=unknown_template");
                &[]
            }
        };

        for preset in items {
            if let Some(task) = model.append_task(preset.text) {
                task.category = preset.category;
                task.priority = preset.priority;
            }
        }

        debug!(
            "event=template_load module=template status=ok total={} next_task_id={}",
            model.total_count(),
            model.next_task_id()
        );
        model.notify_listeners();
    }
}

impl TaskListModel {
    /// Replaces the contents with one of the built-in presets.
    pub fn load_template(&mut self, name: &str) {
        TemplateLibrary::builtin().populate(name, self);
    }
}
