//! Command-line host for the ManagEZ checklist.
//!
//! # Responsibility
//! - Drive one host session: restore state, apply one command, snapshot state.
//! - Print deterministic, line-oriented output for scripting.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use managez_core::{
    core_version, default_log_level, init_logging, Category, Priority, TaskListModel,
    TemplateLibrary,
};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "managez", version, about = "Production checklist for mixing sessions")]
struct Cli {
    /// State file restored before and written after the command.
    #[arg(long, env = "MANAGEZ_STATE", default_value = "managez_state.bin")]
    state: PathBuf,

    /// Absolute directory for rolling logs; logging is off when unset.
    #[arg(long, env = "MANAGEZ_LOG_DIR")]
    log_dir: Option<String>,

    #[arg(long, env = "MANAGEZ_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every task in order.
    List {
        #[arg(long)]
        json: bool,
    },
    Add {
        text: String,
    },
    Edit {
        index: usize,
        text: String,
    },
    Remove {
        index: usize,
    },
    Toggle {
        index: usize,
    },
    Priority {
        index: usize,
        level: PriorityArg,
    },
    Category {
        index: usize,
        stage: CategoryArg,
    },
    /// Move a task; `to` addresses the list after removal.
    Move {
        from: usize,
        to: usize,
    },
    /// Replace all tasks with a preset.
    Template {
        name: String,
    },
    /// Print preset names.
    Templates,
    Clear,
    Progress,
    /// Print tasks whose text contains the term.
    Search {
        term: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PriorityArg {
    None,
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(value: PriorityArg) -> Self {
        match value {
            PriorityArg::None => Priority::None,
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CategoryArg {
    General,
    Mix,
    Master,
    Record,
    Release,
}

impl From<CategoryArg> for Category {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::General => Category::General,
            CategoryArg::Mix => Category::Mix,
            CategoryArg::Master => Category::Master,
            CategoryArg::Record => Category::Record,
            CategoryArg::Release => Category::Release,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
        info!(
            "event=cli_start module=cli status=ok core_version={}",
            core_version()
        );
    }

    let mut model = load_model(&cli.state)?;
    let mutated = run(&mut model, cli.command)?;
    if mutated {
        save_model(&model, &cli.state)?;
    }
    Ok(())
}

/// Applies one command. Returns whether the state file needs rewriting.
fn run(model: &mut TaskListModel, command: Command) -> Result<bool> {
    let changed = match command {
        Command::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(model.tasks())?);
            } else {
                print_rows(model, 0..model.total_count());
            }
            return Ok(false);
        }
        Command::Templates => {
            for name in TemplateLibrary::builtin().names() {
                println!("{name}");
            }
            return Ok(false);
        }
        Command::Progress => {
            println!("{}", model.progress());
            return Ok(false);
        }
        Command::Search { term } => {
            let indices = model.matching_indices(&term);
            print_rows(model, indices);
            return Ok(false);
        }
        Command::Add { text } => match model.add_task(&text) {
            Some(id) => {
                println!("added task {id}");
                true
            }
            None => false,
        },
        Command::Edit { index, text } => model.edit_task(index, &text),
        Command::Remove { index } => model.remove_task(index),
        Command::Toggle { index } => model.toggle_task(index),
        Command::Priority { index, level } => model.set_task_priority(index, level.into()),
        Command::Category { index, stage } => model.set_task_category(index, stage.into()),
        Command::Move { from, to } => model.reorder_task(from, to),
        Command::Template { name } => {
            model.load_template(&name);
            true
        }
        Command::Clear => {
            model.clear_all_tasks();
            true
        }
    };

    if !changed {
        println!("nothing changed");
    }
    Ok(changed)
}

fn print_rows(model: &TaskListModel, indices: impl IntoIterator<Item = usize>) {
    for index in indices {
        let Some(task) = model.task(index) else {
            continue;
        };
        println!(
            "{index:>3}. [{}] {:<4} {} ({})",
            if task.completed { "x" } else { " " },
            task.category.symbol(),
            task.text,
            task.priority.as_str()
        );
    }
}

fn load_model(path: &Path) -> Result<TaskListModel> {
    let mut model = TaskListModel::new();
    match std::fs::read(path) {
        Ok(bytes) => {
            // Unreadable documents start a fresh list; the next save replaces them.
            if !model.restore_state(&bytes) {
                eprintln!(
                    "warning: `{}` is not a readable checklist state; starting empty",
                    path.display()
                );
            }
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read `{}`", path.display()))
        }
    }
    Ok(model)
}

fn save_model(model: &TaskListModel, path: &Path) -> Result<()> {
    let data = model.save_state()?;
    std::fs::write(path, data).with_context(|| format!("failed to write `{}`", path.display()))
}
