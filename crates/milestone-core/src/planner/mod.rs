//! The plan engine facade.
//!
//! [`Planner`] is the only entry point callers need. Every method is async
//! and moves its SQLite work onto tokio's blocking pool, opening a fresh
//! [`Database`] connection per call:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │     Planner     │    │    Database     │    │     engine      │
//! │ (validate params│───▶│ (one transaction│───▶│ (dependency and │
//! │  log, offload)  │    │  per mutation)  │    │  transition)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Reports (progress, timeline) read a consistent [`PlanTree`] snapshot and
//! hand it to the pure aggregator and projector; nothing is cached.
//!
//! - [`builder`]: [`PlannerBuilder`] (database path, transition policy)
//! - [`plan_ops`]: plan lifecycle and listing
//! - [`structure_ops`]: areas and objectives
//! - [`task_ops`]: tasks, dependencies and KPIs
//! - [`report_ops`]: progress and timeline reports
//!
//! # Examples
//!
//! ```rust
//! use milestone_core::{params::{CreatePlan, Id}, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("/tmp/milestone-example.db"))
//!     .build()
//!     .await?;
//!
//! let plan = planner
//!     .create_plan(&CreatePlan {
//!         title: "Operations roadmap".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! let progress = planner.get_plan_progress(&Id { id: plan.id }).await?;
//! assert_eq!(progress.overall_progress, 0);
//! # Ok(())
//! # }
//! ```
//!
//! [`PlanTree`]: crate::models::PlanTree

use std::path::PathBuf;

use log::warn;
use tokio::task;

use crate::{
    db::Database,
    engine::TransitionPolicy,
    error::{PlannerError, Result},
    models::PlanTree,
};

pub mod builder;
pub mod plan_ops;
pub mod report_ops;
pub mod structure_ops;
pub mod task_ops;

#[cfg(test)]
mod tests;

pub use builder::PlannerBuilder;

/// Main planner interface for managing plans and reading their reports.
pub struct Planner {
    pub(crate) db_path: PathBuf,
    pub(crate) policy: TransitionPolicy,
}

impl Planner {
    pub(crate) fn new(db_path: PathBuf, policy: TransitionPolicy) -> Self {
        Self { db_path, policy }
    }

    /// The transition policy applied to status changes.
    pub fn transition_policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// Runs `op` on the blocking pool against a fresh connection.
    async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(PlannerError::join)?
    }

    /// Loads the hierarchy of a plan that must exist.
    async fn require_tree(&self, id: u64) -> Result<PlanTree> {
        self.with_db(move |db| db.load_plan_tree(id))
            .await?
            .ok_or(PlannerError::PlanNotFound { id })
    }
}

/// Logs rejected concurrent writes before handing the error on.
fn log_conflict(error: PlannerError) -> PlannerError {
    if let PlannerError::VersionConflict { .. } = &error {
        warn!("{error}");
    }
    error
}
