//! Task and task KPI models.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{TaskPriority, TaskStatus};

/// An actionable unit of work within an objective.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier for the task
    pub id: u64,

    /// ID of the parent objective
    pub objective_id: u64,

    /// Brief title of the task
    pub title: String,

    /// Detailed multi-line description of the task
    pub description: Option<String>,

    /// Current status of the task
    pub status: TaskStatus,

    /// Priority of the task
    #[serde(default)]
    pub priority: TaskPriority,

    /// Opaque reference to the person responsible
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    /// Single predecessor task within the same plan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<u64>,

    /// Estimated effort in abstract units
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_effort: Option<u32>,

    /// Planned start date
    pub start_date: Option<Date>,

    /// Planned due date
    pub due_date: Option<Date>,

    /// Set if and only if `status` is completed
    pub completed_at: Option<Timestamp>,

    /// Free-form metadata (always a JSON object)
    #[serde(default)]
    pub metadata: serde_json::Value,

    /// Display position within the objective (0-indexed, advisory only)
    pub order: u32,

    /// Incremented on every write, used for optimistic concurrency
    pub version: u64,

    /// Timestamp when the task was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the task was last updated (UTC)
    pub updated_at: Timestamp,
}

impl Task {
    /// Both schedule dates, when the task has them.
    pub fn schedule(&self) -> Option<(Date, Date)> {
        self.start_date.zip(self.due_date)
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

/// A measurable success criterion attached to a task.
///
/// KPIs are informational; they never feed into progress numbers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskKpi {
    /// Unique identifier for the KPI
    pub id: u64,

    /// ID of the owning task
    pub task_id: u64,

    /// KPI name
    pub name: String,

    /// Value the task should reach
    pub target_value: Option<f64>,

    /// Last recorded value
    pub current_value: Option<f64>,

    /// Unit of measurement
    pub unit: Option<String>,
}

/// Outcome of deleting a task.
///
/// Dependents of the deleted task lose their predecessor instead of blocking
/// the delete; their IDs are reported so callers can re-link them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeletedTask {
    /// The task as it was before deletion
    pub task: Task,

    /// Tasks whose `depends_on` pointed at the deleted task and was cleared
    pub cleared_dependents: Vec<u64>,
}
