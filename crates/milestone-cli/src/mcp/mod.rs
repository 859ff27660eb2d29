//! MCP server for Milestone
//!
//! Exposes the plan engine over the Model Context Protocol so dashboards and
//! AI assistants can read progress and timelines and drive task state. Report
//! tools answer with JSON. Everything else answers with the same markdown the
//! CLI prints.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use log::{debug, error, info};
use milestone_core::Planner;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;

pub use handlers::{
    CreateArea, CreateObjective, CreatePlan, CreateTask, Id, ListPlans, McpResult,
    SetTaskDependency, SetTaskSchedule, SetTaskStatus,
};

/// MCP server for Milestone
#[derive(Clone)]
pub struct MilestoneMcpServer {
    planner: Arc<Planner>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl MilestoneMcpServer {
    pub fn new(planner: Planner) -> Self {
        Self {
            planner: Arc::new(planner),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(Arc::clone(&self.planner))
    }

    #[tool(
        name = "create_plan",
        description = "Create a new action plan in draft status. Requires a title. Optional: description, horizon_months (default 6) and complexity ('basic', 'medium' or 'advanced'). Returns the new plan ID."
    )]
    async fn create_plan(&self, params: Parameters<CreatePlan>) -> McpResult {
        self.handlers().create_plan(params).await
    }

    #[tool(
        name = "list_plans",
        description = "List plans with their task counts and overall progress. Optionally filter by status ('draft', 'active', 'completed' or 'archived')."
    )]
    async fn list_plans(&self, params: Parameters<ListPlans>) -> McpResult {
        self.handlers().list_plans(params).await
    }

    #[tool(
        name = "show_plan",
        description = "Show a plan with all of its areas, objectives and tasks in display order, including task status, predecessor and schedule."
    )]
    async fn show_plan(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_plan(params).await
    }

    #[tool(
        name = "get_plan_progress",
        description = "Return the progress report of a plan as JSON: total_tasks, completed_tasks, in_progress_tasks, pending_tasks, blocked_tasks, overall_progress (0-100, based on all tasks) and per-area progress in display order."
    )]
    async fn get_plan_progress(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().get_plan_progress(params).await
    }

    #[tool(
        name = "get_plan_timeline",
        description = "Return the timeline of a plan as JSON: the date axis spanning all scheduled tasks, the months it covers, and one bar per scheduled task with offset and width fractions, duration, predecessor and a schedule_risk flag set when the task starts before its predecessor is due."
    )]
    async fn get_plan_timeline(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().get_plan_timeline(params).await
    }

    #[tool(
        name = "add_area",
        description = "Append an area to a plan. Requires plan_id and name. Optional: description and target_score."
    )]
    async fn add_area(&self, params: Parameters<CreateArea>) -> McpResult {
        self.handlers().add_area(params).await
    }

    #[tool(
        name = "add_objective",
        description = "Append an objective to an area. Requires area_id and title. Optional: description and priority ('high', 'medium' or 'low')."
    )]
    async fn add_objective(&self, params: Parameters<CreateObjective>) -> McpResult {
        self.handlers().add_objective(params).await
    }

    #[tool(
        name = "add_task",
        description = "Add a pending task to an objective. Requires objective_id and title. Optional: description, priority, assignee, depends_on (a task in the same plan), estimated_effort, start_date and due_date (YYYY-MM-DD) and a metadata object."
    )]
    async fn add_task(&self, params: Parameters<CreateTask>) -> McpResult {
        self.handlers().add_task(params).await
    }

    #[tool(
        name = "show_task",
        description = "Show a single task with its status, version, predecessor, schedule and KPIs."
    )]
    async fn show_task(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_task(params).await
    }

    #[tool(
        name = "set_task_status",
        description = "Move a task to 'pending', 'in_progress', 'completed' or 'blocked'. Completing a task records completed_at; leaving 'completed' clears it. Pass expected_version (from show_task) to reject the change if someone else modified the task first. Returns the updated task as JSON."
    )]
    async fn set_task_status(&self, params: Parameters<SetTaskStatus>) -> McpResult {
        self.handlers().set_task_status(params).await
    }

    #[tool(
        name = "set_task_dependency",
        description = "Set or clear (depends_on = null) the single predecessor of a task. The predecessor must exist, belong to the same plan and must not create a cycle. Supports expected_version. Returns the updated task as JSON."
    )]
    async fn set_task_dependency(&self, params: Parameters<SetTaskDependency>) -> McpResult {
        self.handlers().set_task_dependency(params).await
    }

    #[tool(
        name = "update_task_schedule",
        description = "Replace the planned start_date and due_date (YYYY-MM-DD) of a task. An omitted date is cleared. Supports expected_version. Returns the updated task as JSON."
    )]
    async fn update_task_schedule(&self, params: Parameters<SetTaskSchedule>) -> McpResult {
        self.handlers().update_task_schedule(params).await
    }

    #[tool(
        name = "delete_task",
        description = "Delete a task and its KPIs. Tasks that depended on it lose their predecessor; their IDs are listed in the response."
    )]
    async fn delete_task(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().delete_task(params).await
    }

    #[tool(
        name = "eligible_tasks",
        description = "List the open tasks of a plan whose predecessor is absent or completed, i.e. the tasks that can be started or finished right now."
    )]
    async fn eligible_tasks(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().eligible_tasks(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for MilestoneMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "milestone".to_string(),
                title: None,
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(r#"Milestone tracks action plans broken down into areas, objectives and tasks.

## Concepts
- **Plan**: a titled plan with a lifecycle status (draft, active, completed, archived)
- **Area / Objective**: ordered groups inside a plan
- **Task**: the unit of work, with a status (pending, in_progress, completed, blocked), an optional single predecessor and optional planned dates

## Reading state
- `list_plans` and `show_plan` for structure
- `get_plan_progress` and `get_plan_timeline` return JSON reports for dashboards
- `eligible_tasks` lists what can move right now

## Changing state
- `set_task_status`, `set_task_dependency` and `update_task_schedule` accept `expected_version`. Read the task first with `show_task`, then pass its version to avoid overwriting a concurrent change. A mismatch is reported as an invalid-params error and nothing is written.
- Dependencies are rejected when they point at the task itself, at a task of another plan or would close a cycle."#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: MilestoneMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Milestone MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
