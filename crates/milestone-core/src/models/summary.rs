//! Plan summary types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{percentage, Complexity, Plan, PlanStatus, PlanTree};

/// Summary information about a plan with task statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Plan ID
    pub id: u64,
    /// Title of the plan
    pub title: String,
    /// Detailed multi-line description of the plan
    pub description: Option<String>,
    /// Time horizon in months
    pub horizon_months: u32,
    /// Complexity tier
    pub complexity: Complexity,
    /// Plan status
    pub status: PlanStatus,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Last update timestamp
    pub updated_at: Timestamp,
    /// Total number of tasks across all areas
    pub total_tasks: u32,
    /// Number of completed tasks
    pub completed_tasks: u32,
    /// Rounded completion percentage
    pub overall_progress: u8,
}

impl PlanSummary {
    /// Create a PlanSummary from a Plan and task counts
    pub fn from_plan(plan: Plan, total_tasks: u32, completed_tasks: u32) -> Self {
        Self {
            id: plan.id,
            title: plan.title,
            description: plan.description,
            horizon_months: plan.horizon_months,
            complexity: plan.complexity,
            status: plan.status,
            created_at: plan.created_at,
            updated_at: plan.updated_at,
            total_tasks,
            completed_tasks,
            overall_progress: percentage(completed_tasks, total_tasks),
        }
    }
}

impl From<&PlanTree> for PlanSummary {
    fn from(tree: &PlanTree) -> Self {
        let total_tasks = tree.task_count() as u32;
        let completed_tasks = tree.tasks().filter(|task| task.is_completed()).count() as u32;
        Self::from_plan(tree.plan.clone(), total_tasks, completed_tasks)
    }
}
