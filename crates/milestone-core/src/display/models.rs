//! Display implementations for domain models.
//!
//! All output is markdown so the CLI can render it with termimad and the MCP
//! server can hand it to clients verbatim.

use std::fmt;

use super::datetime::{LocalDateTime, Schedule};
use crate::models::{
    Area, Complexity, Objective, Plan, PlanStatus, PlanSummary, PlanTree, Priority, Task,
    TaskKpi, TaskPriority, TaskStatus,
};

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        writeln!(f, "- Status: {}", self.status)?;
        writeln!(f, "- Horizon: {} months", self.horizon_months)?;
        writeln!(f, "- Complexity: {}", self.complexity)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        Ok(())
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "## {}. {}", self.id, self.name)?;
        if let Some(score) = self.target_score {
            write!(f, " (target {score})")?;
        }
        writeln!(f)?;
        writeln!(f)?;

        if let Some(desc) = &self.description {
            writeln!(f, "{desc}")?;
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}. {} ({} priority)", self.id, self.title, self.priority)?;
        writeln!(f)?;

        if let Some(desc) = &self.description {
            writeln!(f, "{desc}")?;
            writeln!(f)?;
        }

        Ok(())
    }
}

impl Task {
    /// One markdown list item, used when the task is shown inside a plan.
    fn fmt_line(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {}. {} ({})", self.id, self.title, self.status.with_icon())?;
        if let Some(pred) = self.depends_on {
            write!(f, " after #{pred}")?;
        }
        if self.start_date.is_some() || self.due_date.is_some() {
            write!(
                f,
                " `{}`",
                Schedule::new(self.start_date.as_ref(), self.due_date.as_ref())
            )?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({})",
            self.id,
            self.title,
            self.status.with_icon()
        )?;
        writeln!(f)?;

        if let Some(desc) = &self.description {
            writeln!(f, "{desc}")?;
            writeln!(f)?;
        }

        if self.priority != TaskPriority::None {
            writeln!(f, "- Priority: {}", self.priority)?;
        }
        if let Some(assignee) = &self.assignee {
            writeln!(f, "- Assignee: {assignee}")?;
        }
        if let Some(pred) = self.depends_on {
            writeln!(f, "- Depends on: #{pred}")?;
        }
        if let Some(effort) = self.estimated_effort {
            writeln!(f, "- Effort: {effort}")?;
        }
        writeln!(
            f,
            "- Schedule: {}",
            Schedule::new(self.start_date.as_ref(), self.due_date.as_ref())
        )?;
        if let Some(completed_at) = &self.completed_at {
            writeln!(f, "- Completed: {}", LocalDateTime(completed_at))?;
        }
        writeln!(f, "- Version: {}", self.version)?;
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for TaskKpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| v.to_string());
        write!(
            f,
            "- {}. **{}**: {} / {}",
            self.id,
            self.name,
            value(self.current_value),
            value(self.target_value)
        )?;
        if let Some(unit) = &self.unit {
            write!(f, " {unit}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for PlanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.plan)?;

        if self.areas.is_empty() {
            return writeln!(f, "\nNo areas in this plan.");
        }

        writeln!(f)?;
        for node in &self.areas {
            write!(f, "{}", node.area)?;
            for objective in &node.objectives {
                write!(f, "{}", objective.objective)?;
                if objective.tasks.is_empty() {
                    writeln!(f, "No tasks.")?;
                } else {
                    for task in &objective.tasks {
                        task.fmt_line(f)?;
                    }
                }
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = if self.total_tasks > 0 {
            format!(
                " ({}/{}, {}%)",
                self.completed_tasks, self.total_tasks, self.overall_progress
            )
        } else {
            String::new()
        };

        writeln!(f, "## {} (ID: {}){progress}", self.title, self.id)?;
        writeln!(f)?;

        if let Some(desc) = &self.description {
            writeln!(f, "- **Description**: {desc}")?;
        }
        writeln!(f, "- **Status**: {}", self.status)?;
        writeln!(f, "- **Horizon**: {} months", self.horizon_months)?;
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)?;

        Ok(())
    }
}
