use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Open,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Open => "Open",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Cancelled => "Cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', ' ', '_'], "").as_str() {
            "open" | "todo" | "pending" => Some(TaskStatus::Open),
            "inprogress" => Some(TaskStatus::InProgress),
            "completed" | "done" => Some(TaskStatus::Completed),
            "cancelled" | "canceled" => Some(TaskStatus::Cancelled),
            _ => None,
        }
    }

    /// Still waiting on someone to do it
    pub fn is_pending(&self) -> bool {
        matches!(self, TaskStatus::Open | TaskStatus::InProgress)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldTask {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    pub due_date: Option<DateTime<Utc>>,
}

impl FieldTask {
    pub fn new(id: impl Into<String>, title: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status,
            due_date: None,
        }
    }

    pub fn due(mut self, at: DateTime<Utc>) -> Self {
        self.due_date = Some(at);
        self
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status.is_pending() && self.due_date.is_some_and(|due| due < now)
    }
}

/// Task-management state for a field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    pub tasks: Vec<FieldTask>,
}

impl TaskSnapshot {
    pub fn new(tasks: Vec<FieldTask>) -> Self {
        Self { tasks }
    }

    pub fn total(&self) -> usize {
        self.tasks.len()
    }

    pub fn overdue_count(&self, now: DateTime<Utc>) -> usize {
        self.tasks.iter().filter(|t| t.is_overdue(now)).count()
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.status.is_pending()).count()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .count()
    }

    /// Completed over total, including cancelled tasks in the total
    pub fn completion_rate(&self) -> Option<f64> {
        if self.tasks.is_empty() {
            None
        } else {
            Some(self.completed_count() as f64 / self.total() as f64)
        }
    }
}
