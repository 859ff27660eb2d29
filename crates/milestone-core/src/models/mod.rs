//! Data models for plans and their hierarchy.
//!
//! A plan owns an ordered set of [`Area`]s, each area owns ordered
//! [`Objective`]s, and each objective owns [`Task`]s. Tasks may carry
//! [`TaskKpi`]s, which are informational only. The whole subtree is
//! represented explicitly by [`PlanTree`].
//!
//! Report shapes produced by the engine live next to the entities:
//! [`PlanProgress`] / [`AreaProgress`] for status rollups and
//! [`TimelineModel`] for date-axis placement. Display implementations are in
//! [`crate::display`].
//!
//! # Examples
//!
//! ```rust
//! use milestone_core::models::{Plan, PlanTree};
//! use jiff::Timestamp;
//!
//! let plan = Plan {
//!     id: 1,
//!     title: "Operations roadmap".to_string(),
//!     description: None,
//! #   horizon_months: 6,
//! #   complexity: Default::default(),
//! #   status: Default::default(),
//! #   created_at: Timestamp::now(),
//! #   updated_at: Timestamp::now(),
//! };
//! let tree = PlanTree::assemble(plan, vec![], vec![], vec![]);
//! assert_eq!(tree.task_count(), 0);
//! ```

pub mod area;
pub mod plan;
pub mod progress;
pub mod status;
pub mod summary;
pub mod task;
pub mod timeline;
pub mod tree;


pub use area::{Area, DeletedArea, DeletedObjective, Objective};
pub use plan::Plan;
pub use progress::{percentage, AreaProgress, PlanProgress};
pub use status::{Complexity, PlanStatus, Priority, TaskPriority, TaskStatus};
pub use summary::PlanSummary;
pub use task::{DeletedTask, Task, TaskKpi};
pub use timeline::{MonthHeader, TimelineAxis, TimelineBar, TimelineModel};
pub use tree::{AreaNode, ObjectiveNode, PlanTree};
