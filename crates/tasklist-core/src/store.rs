use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::task::{Task, TaskState};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Task file IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse task file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Task file root is not a JSON object")]
    NotAnObject,
}

/// The task collection for one invocation, backed by exactly one JSON file.
///
/// The whole top-level object is kept around so that unknown keys beside
/// `tasks` survive a persist. Tasks live in a single id-ordered map; new ids
/// are assigned past the highest id seen on load, so listing and persisting
/// in key order also keeps loaded tasks ahead of newly added ones.
///
/// No locking: two invocations writing the same file can lose one side's
/// changes. Exclusive single-process access is assumed.
pub struct TaskStore {
    path: PathBuf,
    root: Map<String, Value>,
    tasks: BTreeMap<i64, Task>,
    next_id: i64,
    dirty: bool,
}

impl TaskStore {
    /// Loads the store from `path`, creating the file with an empty `tasks`
    /// array first when it does not exist. Malformed JSON is fatal; a
    /// missing `tasks` key means zero tasks.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            write_pretty(path, &Value::Object(empty_root()))?;
        }
        let text = fs::read_to_string(path)?;
        let root = match serde_json::from_str::<Value>(&text)? {
            Value::Object(map) => map,
            _ => return Err(StoreError::NotAnObject),
        };

        let mut tasks = BTreeMap::new();
        if let Some(Value::Array(items)) = root.get("tasks") {
            for item in items {
                let task: Task = serde_json::from_value(item.clone())?;
                tasks.insert(task.id, task);
            }
        }
        let next_id = tasks.keys().max().map_or(1, |id| id + 1);

        Ok(Self {
            path: path.to_path_buf(),
            root,
            tasks,
            next_id,
            dirty: false,
        })
    }

    /// Adds a task in Todo state and returns its assigned id. Ids are
    /// strictly increasing across adds, starting past the highest loaded id.
    pub fn add(&mut self, text: &str) -> i64 {
        let id = self.next_id;
        self.tasks.insert(id, Task::new(id, text, TaskState::Todo));
        self.next_id += 1;
        self.dirty = true;
        id
    }

    /// Marks the task as done. Returns false when the id is absent, leaving
    /// the store unchanged.
    pub fn finish(&mut self, id: i64) -> bool {
        self.replace(id, Task::done)
    }

    /// Marks the task as todo again. Returns false when the id is absent.
    pub fn undo(&mut self, id: i64) -> bool {
        self.replace(id, Task::undo)
    }

    /// Deletes the task. Returns false when the id is absent.
    pub fn remove(&mut self, id: i64) -> bool {
        if self.tasks.remove(&id).is_some() {
            self.dirty = true;
            true
        } else {
            false
        }
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// Whether any mutation happened since load. Callers persist only then.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Console listing, one line per task in ascending id order, or a single
    /// no-tasks notice when the store is empty.
    pub fn list_lines(&self) -> Vec<String> {
        if self.tasks.is_empty() {
            return vec!["No tasks on this list!".to_string()];
        }
        let mut lines = Vec::with_capacity(self.tasks.len() + 1);
        lines.push("Current tasks:".to_string());
        lines.extend(self.tasks.values().map(Task::render));
        lines
    }

    /// Rewrites the whole backing file: the preserved top-level object with
    /// its `tasks` array rebuilt from the current collection. No backup or
    /// partial-write recovery; a crash mid-write can corrupt the file.
    pub fn persist(&self) -> Result<(), StoreError> {
        let tasks = self
            .tasks
            .values()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        let mut root = self.root.clone();
        root.insert("tasks".to_string(), Value::Array(tasks));
        write_pretty(&self.path, &Value::Object(root))
    }

    fn replace(&mut self, id: i64, transition: impl Fn(&Task) -> Task) -> bool {
        match self.tasks.get(&id) {
            Some(task) => {
                let replacement = transition(task);
                self.tasks.insert(id, replacement);
                self.dirty = true;
                true
            }
            None => false,
        }
    }
}

fn empty_root() -> Map<String, Value> {
    let mut root = Map::new();
    root.insert("tasks".to_string(), Value::Array(Vec::new()));
    root
}

fn write_pretty(path: &Path, value: &Value) -> Result<(), StoreError> {
    let mut body = serde_json::to_string_pretty(value)?;
    body.push('\n');
    fs::write(path, body)?;
    Ok(())
}
