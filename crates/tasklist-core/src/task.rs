use serde::{Deserialize, Serialize};

/// State of a single task. Persisted as the exact strings "Todo", "Done"
/// and "Invalid"; anything else in a task file decodes to `Invalid` instead
/// of failing the load. No operation assigns `Invalid` on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskState {
    Todo,
    Done,
    #[serde(other)]
    Invalid,
}

impl TaskState {
    pub fn name(self) -> &'static str {
        match self {
            TaskState::Todo => "Todo",
            TaskState::Done => "Done",
            TaskState::Invalid => "Invalid",
        }
    }
}

/// One task. `id` and `text` never change after construction; state
/// transitions return a replacement value rather than mutating in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub text: String,
    pub state: TaskState,
}

impl Task {
    pub fn new(id: i64, text: impl Into<String>, state: TaskState) -> Self {
        Self {
            id,
            text: text.into(),
            state,
        }
    }

    pub fn done(&self) -> Task {
        Task {
            id: self.id,
            text: self.text.clone(),
            state: TaskState::Done,
        }
    }

    pub fn undo(&self) -> Task {
        Task {
            id: self.id,
            text: self.text.clone(),
            state: TaskState::Todo,
        }
    }

    pub fn render(&self) -> String {
        format!("[{}] {} - {}", self.id, self.text, self.state.name())
    }
}
