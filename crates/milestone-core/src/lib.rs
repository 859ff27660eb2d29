//! Core library for the Milestone plan engine.
//!
//! A plan is broken down into areas, objectives and tasks. This crate stores
//! that hierarchy in SQLite, rolls task statuses up into progress reports,
//! projects scheduled tasks onto a timeline and guards the single-predecessor
//! dependency graph between tasks.
//!
//! # Layout
//!
//! - **Models** ([`models`]): plain data types, including the explicit
//!   [`models::PlanTree`] hierarchy and the report shapes
//! - **Engine** ([`engine`]): pure, synchronous components (dependency
//!   validation, status transitions, progress aggregation, timeline
//!   projection)
//! - **Storage** ([`db`]): SQLite persistence, one transaction per mutation
//! - **Facade** ([`planner`]): the async [`Planner`] API used by the CLI and
//!   the MCP server
//! - **Display** ([`display`]): markdown formatting for terminal output
//!
//! # Quick Start
//!
//! ```rust
//! use milestone_core::{
//!     params::{CreateArea, CreateObjective, CreatePlan, CreateTask, Id, SetTaskStatus},
//!     PlannerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! let plan = planner
//!     .create_plan(&CreatePlan {
//!         title: "Operations roadmap".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! let area = planner
//!     .add_area(&CreateArea {
//!         plan_id: plan.id,
//!         name: "Operations".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! let objective = planner
//!     .add_objective(&CreateObjective {
//!         area_id: area.id,
//!         title: "Cut lead time".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! let task = planner
//!     .add_task(&CreateTask {
//!         objective_id: objective.id,
//!         title: "Map the order flow".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! planner
//!     .set_task_status(&SetTaskStatus {
//!         id: task.id,
//!         status: "completed".to_string(),
//!         expected_version: Some(task.version),
//!     })
//!     .await?;
//!
//! let progress = planner.get_plan_progress(&Id { id: plan.id }).await?;
//! println!("{progress}");
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod engine;
pub mod error;
pub mod models;
pub mod params;
pub mod planner;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, OperationStatus, PlanSummaries, TaskKpis, Tasks, UpdateResult,
};
pub use engine::TransitionPolicy;
pub use error::{PlannerError, Result};
pub use models::{
    Area, DeletedArea, DeletedObjective, DeletedTask, Objective, Plan, PlanProgress, PlanStatus,
    PlanSummary, PlanTree, Task, TaskKpi, TaskStatus, TimelineModel,
};
pub use planner::{Planner, PlannerBuilder};
