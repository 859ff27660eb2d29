//! Plan model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Complexity, PlanStatus};

/// Top-level execution roadmap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Title of the plan
    pub title: String,

    /// Detailed multi-line description of the plan
    pub description: Option<String>,

    /// Time horizon in months
    pub horizon_months: u32,

    /// Complexity tier
    #[serde(default)]
    pub complexity: Complexity,

    /// Lifecycle status
    #[serde(default)]
    pub status: PlanStatus,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,
}
