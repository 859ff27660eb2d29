//! Area and objective models.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Priority;

/// A business dimension grouping within a plan (operations, finance, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Area {
    /// Unique identifier for the area
    pub id: u64,

    /// ID of the parent plan
    pub plan_id: u64,

    /// Display name
    pub name: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Score the plan aims to reach in this area
    pub target_score: Option<f64>,

    /// Display position within the plan (0-indexed, advisory only)
    pub order: u32,

    /// Timestamp when the area was created (UTC)
    pub created_at: Timestamp,
}

/// A goal within an area. Objectives only group tasks; they carry no score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Objective {
    /// Unique identifier for the objective
    pub id: u64,

    /// ID of the parent area
    pub area_id: u64,

    /// Title of the objective
    pub title: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Priority of the objective
    #[serde(default)]
    pub priority: Priority,

    /// Display position within the area (0-indexed, advisory only)
    pub order: u32,

    /// Timestamp when the objective was created (UTC)
    pub created_at: Timestamp,
}

/// Result of deleting an area with everything below it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeletedArea {
    pub area: Area,

    /// Tasks outside the area whose predecessor was deleted with it
    pub cleared_dependents: Vec<u64>,
}

/// Result of deleting an objective with its tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeletedObjective {
    pub objective: Objective,

    /// Tasks outside the objective whose predecessor was deleted with it
    pub cleared_dependents: Vec<u64>,
}
