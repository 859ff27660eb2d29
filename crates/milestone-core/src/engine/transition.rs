//! Task status transitions.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PlannerError, Result},
    models::{Task, TaskStatus},
};

/// How strictly status changes respect the predecessor of a task.
///
/// [`TransitionPolicy::Permissive`] lets any status follow any other and is
/// the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPolicy {
    /// Any status may follow any other
    #[default]
    Permissive,
    /// Starting or completing a task requires its predecessor to be completed
    Strict,
}

impl TransitionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPolicy::Permissive => "permissive",
            TransitionPolicy::Strict => "strict",
        }
    }
}

impl fmt::Display for TransitionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransitionPolicy {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "permissive" => Ok(TransitionPolicy::Permissive),
            "strict" => Ok(TransitionPolicy::Strict),
            _ => Err(PlannerError::invalid_input("transition_policy")
                .with_reason(format!("'{s}' is not one of permissive, strict"))),
        }
    }
}

/// Outcome of applying a status change to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The task already has the requested status; nothing to write
    Unchanged,
    /// The task moves to `status` with the given completion stamp
    Changed {
        status: TaskStatus,
        completed_at: Option<Timestamp>,
    },
}

/// The status transition machine.
///
/// ```text
/// pending ⇄ in_progress ⇄ completed ⇄ blocked   (every pair, both ways)
/// ```
///
/// Entering `completed` stamps `completed_at`; leaving it clears the stamp. No
/// other status carries a timestamp.
pub struct StatusTransition;

impl StatusTransition {
    /// Computes the effect of moving `task` to `to`.
    ///
    /// `predecessor_status` is the status of the task's predecessor, if it has
    /// one; it only matters under [`TransitionPolicy::Strict`].
    ///
    /// # Errors
    ///
    /// [`PlannerError::PredecessorIncomplete`] under the strict policy when
    /// the task would start or complete before its predecessor completed.
    pub fn apply(
        task: &Task,
        to: TaskStatus,
        policy: TransitionPolicy,
        predecessor_status: Option<TaskStatus>,
        now: Timestamp,
    ) -> Result<Transition> {
        if task.status == to {
            return Ok(Transition::Unchanged);
        }

        if policy == TransitionPolicy::Strict && Self::advances(to) {
            if let (Some(predecessor_id), Some(status)) = (task.depends_on, predecessor_status) {
                if status != TaskStatus::Completed {
                    return Err(PlannerError::PredecessorIncomplete {
                        task_id: task.id,
                        predecessor_id,
                        status: to.as_str().to_string(),
                    });
                }
            }
        }

        let completed_at = match to {
            TaskStatus::Completed => Some(task.completed_at.unwrap_or(now)),
            _ => None,
        };

        Ok(Transition::Changed {
            status: to,
            completed_at,
        })
    }

    /// Statuses that move work forward and are therefore gated by the
    /// strict policy.
    fn advances(status: TaskStatus) -> bool {
        matches!(status, TaskStatus::InProgress | TaskStatus::Completed)
    }
}
