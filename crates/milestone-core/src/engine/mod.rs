//! Pure planning logic.
//!
//! Nothing in this module touches storage or performs I/O. The components
//! take owned or borrowed models and return values; [`crate::planner`] loads
//! the data, calls into them and persists what they decide.
//!
//! * [`DependencyValidator`] guards the single-predecessor graph
//! * [`StatusTransition`] applies status changes under a [`TransitionPolicy`]
//! * [`ProgressAggregator`] rolls task counts up through a [`PlanTree`]
//! * [`TimelineProjector`] lays dated tasks out on a month axis
//!
//! [`PlanTree`]: crate::models::PlanTree

pub mod aggregate;
pub mod dependency;
pub mod timeline;
pub mod transition;

pub use aggregate::ProgressAggregator;
pub use dependency::{DependencyValidator, TaskLink};
pub use timeline::TimelineProjector;
pub use transition::{StatusTransition, Transition, TransitionPolicy};

#[cfg(test)]
pub(crate) mod fixtures {
    use jiff::Timestamp;

    use crate::models::{Area, Objective, Plan, Priority, Task, TaskPriority, TaskStatus};

    pub(crate) fn created() -> Timestamp {
        "2025-01-01T00:00:00Z".parse().unwrap()
    }

    pub(crate) fn plan(id: u64) -> Plan {
        Plan {
            id,
            title: format!("Plan {id}"),
            description: None,
            horizon_months: 6,
            complexity: Default::default(),
            status: Default::default(),
            created_at: created(),
            updated_at: created(),
        }
    }

    pub(crate) fn area(id: u64, plan_id: u64, order: u32, name: &str) -> Area {
        Area {
            id,
            plan_id,
            name: name.to_string(),
            description: None,
            target_score: None,
            order,
            created_at: created(),
        }
    }

    pub(crate) fn objective(id: u64, area_id: u64, order: u32) -> Objective {
        Objective {
            id,
            area_id,
            title: format!("Objective {id}"),
            description: None,
            priority: Priority::Medium,
            order,
            created_at: created(),
        }
    }

    /// A task with no dates, no predecessor and no completion stamp.
    pub(crate) fn task(id: u64, objective_id: u64, status: TaskStatus) -> Task {
        Task {
            id,
            objective_id,
            title: format!("Task {id}"),
            description: None,
            status,
            priority: TaskPriority::None,
            assignee: None,
            depends_on: None,
            estimated_effort: None,
            start_date: None,
            due_date: None,
            completed_at: None,
            metadata: serde_json::json!({}),
            order: id as u32,
            version: 0,
            created_at: created(),
            updated_at: created(),
        }
    }
}
