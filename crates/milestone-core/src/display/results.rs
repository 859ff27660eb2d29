//! Result wrapper types for displaying operation outcomes.
//!
//! Each wrapper pairs a short confirmation line with the affected resource so
//! CLI and MCP responses read the same way.

use std::fmt;

use crate::models::{
    Area, DeletedArea, DeletedObjective, DeletedTask, Objective, Plan, Task, TaskKpi,
};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use milestone_core::{display::CreateResult, models::Plan};
/// use jiff::Timestamp;
///
/// let plan = Plan {
///     id: 1,
///     title: "Growth plan".to_string(),
///     description: None,
///     horizon_months: 12,
///     complexity: Default::default(),
///     status: Default::default(),
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
///
/// let output = CreateResult::new(plan).to_string();
/// assert!(output.starts_with("Created plan with ID: 1"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

macro_rules! created {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for CreateResult<$ty> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                writeln!(f, concat!("Created ", $kind, " with ID: {}"), self.resource.id)?;
                writeln!(f)?;
                write!(f, "{}", self.resource)
            }
        }
    };
}

created!(Plan, "plan");
created!(Area, "area");
created!(Objective, "objective");
created!(Task, "task");
created!(TaskKpi, "KPI");

/// Wrapper type for displaying the result of update operations, with an
/// optional list of the changes that were applied.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }

    fn fmt_changes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.changes.is_empty() {
            writeln!(f)?;
            return writeln!(f, "No changes.");
        }
        writeln!(f)?;
        writeln!(f, "Changes made:")?;
        for change in &self.changes {
            writeln!(f, "- {change}")?;
        }
        Ok(())
    }
}

impl fmt::Display for UpdateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated plan with ID: {}", self.resource.id)?;
        self.fmt_changes(f)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated task with ID: {}", self.resource.id)?;
        self.fmt_changes(f)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<TaskKpi> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated KPI with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted plan '{}' (ID: {}) with all of its areas, objectives and tasks",
            self.resource.title, self.resource.id
        )
    }
}

/// Lists tasks that lost their predecessor in a delete.
fn write_cleared(f: &mut fmt::Formatter<'_>, cleared: &[u64]) -> fmt::Result {
    if cleared.is_empty() {
        return Ok(());
    }
    let ids: Vec<String> = cleared.iter().map(|id| format!("#{id}")).collect();
    writeln!(f)?;
    writeln!(f, "Cleared the dependency of: {}", ids.join(", "))
}

impl fmt::Display for DeleteResult<DeletedArea> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let DeletedArea {
            area,
            cleared_dependents,
        } = &self.resource;
        writeln!(
            f,
            "Deleted area '{}' (ID: {}) with its objectives and tasks",
            area.name, area.id
        )?;
        write_cleared(f, cleared_dependents)
    }
}

impl fmt::Display for DeleteResult<DeletedObjective> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let DeletedObjective {
            objective,
            cleared_dependents,
        } = &self.resource;
        writeln!(
            f,
            "Deleted objective '{}' (ID: {}) with its tasks",
            objective.title, objective.id
        )?;
        write_cleared(f, cleared_dependents)
    }
}

impl fmt::Display for DeleteResult<DeletedTask> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let DeletedTask {
            task,
            cleared_dependents,
        } = &self.resource;
        writeln!(f, "Deleted task '{}' (ID: {})", task.title, task.id)?;
        write_cleared(f, cleared_dependents)
    }
}
