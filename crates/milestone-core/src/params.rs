//! Parameter structures for engine operations.
//!
//! These are the interface-neutral requests accepted by [`crate::Planner`].
//! The CLI wraps them in clap `Args` structs and the MCP server deserializes
//! them directly, so enum-like fields travel as strings and are checked by the
//! `validate` methods here before anything touches storage.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! JSON schemas for the MCP tools are derived only with the `schema` feature.

use std::str::FromStr;

use jiff::civil::Date;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PlannerError, Result},
    models::{Complexity, PlanStatus, Priority, TaskPriority, TaskStatus},
};

fn default_horizon() -> u32 {
    6
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PlannerError::invalid_input(field).with_reason("must not be empty"));
    }
    Ok(())
}

fn parse_date(field: &str, value: Option<&str>) -> Result<Option<Date>> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| {
            Date::from_str(v).map_err(|e| {
                PlannerError::invalid_input(field)
                    .with_reason(format!("'{v}' is not a YYYY-MM-DD date: {e}"))
            })
        })
        .transpose()
}

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a new plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreatePlan {
    /// Title of the plan (required)
    pub title: String,
    /// Optional detailed description of the plan
    pub description: Option<String>,
    /// Time horizon in months
    #[serde(default = "default_horizon")]
    pub horizon_months: u32,
    /// Complexity tier: 'basic', 'medium' or 'advanced' (default medium)
    pub complexity: Option<String>,
}

impl Default for CreatePlan {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            horizon_months: default_horizon(),
            complexity: None,
        }
    }
}

impl CreatePlan {
    /// Checks the title and horizon and parses the complexity tier.
    ///
    /// # Errors
    ///
    /// `PlannerError::InvalidInput` for an empty title, a zero horizon or an
    /// unknown complexity.
    pub fn validate(&self) -> Result<Complexity> {
        require_text("title", &self.title)?;
        if self.horizon_months == 0 {
            return Err(PlannerError::invalid_input("horizon_months")
                .with_reason("must be at least one month"));
        }
        self.complexity
            .as_deref()
            .map(Complexity::from_str)
            .transpose()
            .map(Option::unwrap_or_default)
    }
}

/// Parameters for listing plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListPlans {
    /// Only list plans with this status ('draft', 'active', 'completed',
    /// 'archived'); all plans when omitted
    pub status: Option<String>,
}

impl ListPlans {
    pub fn validate(&self) -> Result<Option<PlanStatus>> {
        self.status.as_deref().map(PlanStatus::from_str).transpose()
    }
}

/// Parameters for changing the lifecycle status of a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetPlanStatus {
    /// Plan ID
    pub id: u64,
    /// New status: 'draft', 'active', 'completed' or 'archived'
    pub status: String,
}

impl SetPlanStatus {
    pub fn validate(&self) -> Result<PlanStatus> {
        PlanStatus::from_str(&self.status)
    }
}

/// Parameters for adding an area to a plan. The area is appended after the
/// existing ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateArea {
    /// ID of the plan that owns the area
    pub plan_id: u64,
    /// Name of the area, e.g. 'Operations' or 'Finance'
    pub name: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Optional score the plan aims to reach in this area
    pub target_score: Option<f64>,
}

impl CreateArea {
    pub fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        if let Some(score) = self.target_score {
            if !score.is_finite() {
                return Err(PlannerError::invalid_input("target_score")
                    .with_reason("must be a finite number"));
            }
        }
        Ok(())
    }
}

/// Parameters for adding an objective to an area.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateObjective {
    /// ID of the area that owns the objective
    pub area_id: u64,
    /// Title of the objective
    pub title: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Priority: 'high', 'medium' or 'low' (default medium)
    pub priority: Option<String>,
}

impl CreateObjective {
    pub fn validate(&self) -> Result<Priority> {
        require_text("title", &self.title)?;
        self.priority
            .as_deref()
            .map(Priority::from_str)
            .transpose()
            .map(Option::unwrap_or_default)
    }
}

/// Parameters for adding a task to an objective.
///
/// New tasks always start as 'pending'.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateTask {
    /// ID of the objective that owns the task
    pub objective_id: u64,
    /// Title of the task
    pub title: String,
    /// Optional detailed description
    pub description: Option<String>,
    /// Priority: 'high', 'medium', 'low' or 'none' (default none)
    pub priority: Option<String>,
    /// Opaque reference to the person responsible
    pub assignee: Option<String>,
    /// ID of a task in the same plan that must finish first
    pub depends_on: Option<u64>,
    /// Estimated effort in abstract units
    pub estimated_effort: Option<u32>,
    /// Planned start date (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Planned due date (YYYY-MM-DD)
    pub due_date: Option<String>,
    /// Free-form JSON object stored with the task
    pub metadata: Option<serde_json::Value>,
}

/// A [`CreateTask`] whose fields have been parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub objective_id: u64,
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub assignee: Option<String>,
    pub depends_on: Option<u64>,
    pub estimated_effort: Option<u32>,
    pub start_date: Option<Date>,
    pub due_date: Option<Date>,
    pub metadata: serde_json::Value,
}

impl CreateTask {
    /// Parses priority, dates and metadata.
    ///
    /// The predecessor is not checked here; that needs the plan's task graph.
    ///
    /// # Errors
    ///
    /// `PlannerError::InvalidInput` when a field cannot be parsed or the
    /// metadata is not a JSON object.
    pub fn validate(&self) -> Result<NewTask> {
        require_text("title", &self.title)?;

        let priority = self
            .priority
            .as_deref()
            .map(TaskPriority::from_str)
            .transpose()?
            .unwrap_or_default();

        let metadata = match &self.metadata {
            None | Some(serde_json::Value::Null) => serde_json::json!({}),
            Some(value @ serde_json::Value::Object(_)) => value.clone(),
            Some(_) => {
                return Err(PlannerError::invalid_input("metadata")
                    .with_reason("must be a JSON object"))
            }
        };

        Ok(NewTask {
            objective_id: self.objective_id,
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            priority,
            assignee: self.assignee.clone(),
            depends_on: self.depends_on,
            estimated_effort: self.estimated_effort,
            start_date: parse_date("start_date", self.start_date.as_deref())?,
            due_date: parse_date("due_date", self.due_date.as_deref())?,
            metadata,
        })
    }
}

/// Parameters for moving a task to a new status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetTaskStatus {
    /// Task ID
    pub id: u64,
    /// New status: 'pending', 'in_progress', 'completed' or 'blocked'
    pub status: String,
    /// Version the caller last saw; the change is rejected if the task has
    /// been modified since
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_version: Option<u64>,
}

impl SetTaskStatus {
    /// # Errors
    ///
    /// `PlannerError::InvalidState` for an unknown status token.
    pub fn validate(&self) -> Result<TaskStatus> {
        TaskStatus::from_str(&self.status)
    }
}

/// Parameters for setting or clearing the predecessor of a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetTaskDependency {
    /// Task ID
    pub id: u64,
    /// ID of the predecessor, or null to clear it
    pub depends_on: Option<u64>,
    /// Version the caller last saw
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_version: Option<u64>,
}

/// Parameters for replacing the planned dates of a task.
///
/// Both dates are written as given; an omitted date clears the stored one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetTaskSchedule {
    /// Task ID
    pub id: u64,
    /// Planned start date (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Planned due date (YYYY-MM-DD)
    pub due_date: Option<String>,
    /// Version the caller last saw
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_version: Option<u64>,
}

impl SetTaskSchedule {
    pub fn validate(&self) -> Result<(Option<Date>, Option<Date>)> {
        Ok((
            parse_date("start_date", self.start_date.as_deref())?,
            parse_date("due_date", self.due_date.as_deref())?,
        ))
    }
}

/// Parameters for attaching a KPI to a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateTaskKpi {
    /// ID of the task the KPI measures
    pub task_id: u64,
    /// KPI name
    pub name: String,
    /// Value the task should reach
    pub target_value: Option<f64>,
    /// Current value, if already known
    pub current_value: Option<f64>,
    /// Unit of measurement
    pub unit: Option<String>,
}

impl CreateTaskKpi {
    pub fn validate(&self) -> Result<()> {
        require_text("name", &self.name)
    }
}

/// Parameters for recording the current value of a KPI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateKpiValue {
    /// KPI ID
    pub id: u64,
    /// New current value, or null to clear it
    pub current_value: Option<f64>,
}
