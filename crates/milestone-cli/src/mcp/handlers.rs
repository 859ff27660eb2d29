//! MCP tool handlers implementation

use std::sync::Arc;

use log::debug;
use milestone_core::{
    display::{CreateResult, DeleteResult, OperationStatus},
    params as core, Planner,
};
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::errors::{not_found, to_mcp_error};

// ============================================================================
// Generic Parameter Wrapper
// ============================================================================
//
// Core parameter types stay free of rmcp. The transparent wrapper forwards
// deserialization and the JSON schema to the wrapped type so each tool takes
// exactly the shape of the matching core request.

/// MCP wrapper for core parameter types
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type CreatePlan = McpParams<core::CreatePlan>;
pub type ListPlans = McpParams<core::ListPlans>;
pub type CreateArea = McpParams<core::CreateArea>;
pub type CreateObjective = McpParams<core::CreateObjective>;
pub type CreateTask = McpParams<core::CreateTask>;
pub type SetTaskStatus = McpParams<core::SetTaskStatus>;
pub type SetTaskDependency = McpParams<core::SetTaskDependency>;
pub type SetTaskSchedule = McpParams<core::SetTaskSchedule>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(body: impl Into<String>) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(body)]))
}

fn json<T: Serialize>(value: &T) -> McpResult {
    let body = serde_json::to_string_pretty(value).map_err(|e| {
        ErrorData::internal_error(format!("Failed to serialize report: {e}"), None)
    })?;
    text(body)
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    planner: Arc<Planner>,
}

impl McpHandlers {
    pub fn new(planner: Arc<Planner>) -> Self {
        Self { planner }
    }

    pub async fn create_plan(&self, Parameters(params): Parameters<CreatePlan>) -> McpResult {
        debug!("create_plan: {params:?}");

        let plan = self
            .planner
            .create_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create plan", &e))?;

        text(CreateResult::new(plan).to_string())
    }

    pub async fn list_plans(&self, Parameters(params): Parameters<ListPlans>) -> McpResult {
        debug!("list_plans: {params:?}");

        let inner = params.as_ref();
        let summaries = self
            .planner
            .list_plans(inner)
            .await
            .map_err(|e| to_mcp_error("Failed to list plans", &e))?;

        let title = match &inner.status {
            Some(status) => format!("Plans ({status})"),
            None => "Plans".to_string(),
        };
        text(format!("# {title}\n\n{summaries}"))
    }

    pub async fn show_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_plan: {params:?}");

        let id = params.as_ref().id;
        let tree = self
            .planner
            .get_plan_tree(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to load plan", &e))?
            .ok_or_else(|| not_found("Plan", id))?;

        text(tree.to_string())
    }

    pub async fn get_plan_progress(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("get_plan_progress: {params:?}");

        let progress = self
            .planner
            .get_plan_progress(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to compute progress", &e))?;

        json(&progress)
    }

    pub async fn get_plan_timeline(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("get_plan_timeline: {params:?}");

        let timeline = self
            .planner
            .get_plan_timeline(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to project timeline", &e))?;

        json(&timeline)
    }

    pub async fn add_area(&self, Parameters(params): Parameters<CreateArea>) -> McpResult {
        debug!("add_area: {params:?}");

        let area = self
            .planner
            .add_area(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add area", &e))?;

        text(CreateResult::new(area).to_string())
    }

    pub async fn add_objective(
        &self,
        Parameters(params): Parameters<CreateObjective>,
    ) -> McpResult {
        debug!("add_objective: {params:?}");

        let objective = self
            .planner
            .add_objective(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add objective", &e))?;

        text(CreateResult::new(objective).to_string())
    }

    pub async fn add_task(&self, Parameters(params): Parameters<CreateTask>) -> McpResult {
        debug!("add_task: {params:?}");

        let task = self
            .planner
            .add_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add task", &e))?;

        text(CreateResult::new(task).to_string())
    }

    pub async fn show_task(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_task: {params:?}");

        let id = params.as_ref().id;
        let task = self
            .planner
            .get_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get task", &e))?
            .ok_or_else(|| not_found("Task", id))?;
        let kpis = self
            .planner
            .list_task_kpis(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list KPIs", &e))?;

        let mut body = task.to_string();
        if !kpis.is_empty() {
            body.push_str(&format!("#### KPIs\n\n{kpis}"));
        }
        text(body)
    }

    pub async fn set_task_status(
        &self,
        Parameters(params): Parameters<SetTaskStatus>,
    ) -> McpResult {
        debug!("set_task_status: {params:?}");

        let task = self
            .planner
            .set_task_status(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to set task status", &e))?;

        json(&task)
    }

    pub async fn set_task_dependency(
        &self,
        Parameters(params): Parameters<SetTaskDependency>,
    ) -> McpResult {
        debug!("set_task_dependency: {params:?}");

        let task = self
            .planner
            .set_task_dependency(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to set task dependency", &e))?;

        json(&task)
    }

    pub async fn update_task_schedule(
        &self,
        Parameters(params): Parameters<SetTaskSchedule>,
    ) -> McpResult {
        debug!("update_task_schedule: {params:?}");

        let task = self
            .planner
            .update_task_schedule(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update task schedule", &e))?;

        json(&task)
    }

    pub async fn delete_task(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("delete_task: {params:?}");

        let deleted = self
            .planner
            .delete_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete task", &e))?;

        text(DeleteResult::new(deleted).to_string())
    }

    pub async fn eligible_tasks(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("eligible_tasks: {params:?}");

        let tasks = self
            .planner
            .eligible_tasks(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list eligible tasks", &e))?;

        if tasks.is_empty() {
            let status = OperationStatus::success("No task is ready to advance")
                .with_detail("Open tasks are waiting on unfinished predecessors or all tasks are completed");
            return text(status.to_string());
        }
        text(format!("# Ready to advance\n\n{tasks}"))
    }
}
