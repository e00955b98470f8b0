use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;

use tasklist_core::config;
use tasklist_core::store::TaskStore;

#[derive(Parser, Debug)]
#[command(
    name = "tasklist",
    version = tasklist_core::version(),
    about = "JSON-backed task list manager"
)]
struct Cli {
    /// Text of a task to add; multiple words are joined with spaces
    #[arg(value_name = "TEXT")]
    text: Vec<String>,

    /// Backing JSON task file (falls back to `file` in .tasklist.toml)
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Mark the task with this id as done
    #[arg(short = 'f', long, value_name = "ID")]
    finish: Option<i64>,

    /// Mark the task with this id as todo again
    #[arg(short = 'u', long, value_name = "ID")]
    undo: Option<i64>,

    /// Delete the task with this id
    #[arg(short = 'r', long, value_name = "ID")]
    remove: Option<i64>,
}

fn main() -> ExitCode {
    // Usage errors exit with 1, not clap's default 2.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(1);
        }
    };
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(1)
        }
    }
}

/// Applies the requested operations in a fixed order (add, finish, undo,
/// remove), persists only when something mutated, and always lists last.
/// A missing target id is a notice, not a failure.
fn run(cli: Cli) -> Result<()> {
    let file = match cli.file {
        Some(path) => path,
        None => {
            let cwd = std::env::current_dir().context("resolve current directory")?;
            config::resolve_default_file(&cwd)
                .context("missing --file and no `file` default in .tasklist.toml")?
        }
    };

    let mut store = TaskStore::load(&file)
        .with_context(|| format!("load task file {}", file.display()))?;

    if !cli.text.is_empty() {
        store.add(&cli.text.join(" "));
    }
    if let Some(id) = cli.finish {
        if !store.finish(id) {
            println!("Task {id} not found!");
        }
    }
    if let Some(id) = cli.undo {
        if !store.undo(id) {
            println!("Task {id} not found!");
        }
    }
    if let Some(id) = cli.remove {
        if !store.remove(id) {
            println!("Task {id} not found!");
        }
    }

    if store.is_dirty() {
        store
            .persist()
            .with_context(|| format!("write task file {}", file.display()))?;
    }

    for line in store.list_lines() {
        println!("{line}");
    }
    Ok(())
}
