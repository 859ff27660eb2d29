//! Markdown presentation of models, reports and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! newtype wrappers cover collections and operation outcomes so callers never
//! build strings by hand.
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │ Models/Reports  │───▶│ Wrappers (Create │───▶│ Markdown output │
//! │ (Plan, Task, …) │    │ Result, Tasks, …)│    │ (Terminal/MCP)  │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//! ```
//!
//! - [`collections`]: [`PlanSummaries`], [`Tasks`], [`TaskKpis`]
//! - [`results`]: [`CreateResult`], [`UpdateResult`], [`DeleteResult`]
//! - [`status`]: [`OperationStatus`]
//! - [`datetime`]: [`LocalDateTime`] and [`Schedule`]
//! - [`reports`]: progress bars and the timeline chart
//!
//! # Examples
//!
//! ```rust
//! use milestone_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Plan 3 archived").with_detail("2 tasks still open");
//! assert!(status.to_string().contains("2 tasks still open"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod reports;
pub mod results;
pub mod status;

pub use collections::{PlanSummaries, TaskKpis, Tasks};
pub use datetime::{LocalDateTime, Schedule};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
