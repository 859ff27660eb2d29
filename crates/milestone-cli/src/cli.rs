//! Command-line interface definitions and handlers.
//!
//! Every subcommand has a clap argument struct that converts into the core
//! parameter type with a `From` impl, so the core crate stays free of clap:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner → Display → Renderer
//! ```
//!
//! Report commands (`plan progress`, `plan timeline`) print markdown by
//! default and the raw JSON report with `--json`.

use std::fmt;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use milestone_core::{
    display::{CreateResult, DeleteResult, OperationStatus, UpdateResult},
    params::*,
    Planner, Task,
};
use serde::Serialize;

use crate::renderer::TerminalRenderer;

// ============================================================================
// Plan commands
// ============================================================================

/// Create a new plan in draft status
#[derive(Args)]
pub struct CreatePlanArgs {
    /// Title of the plan
    pub title: String,
    #[arg(short, long, help = "Optional description of the plan")]
    pub description: Option<String>,
    #[arg(long, default_value_t = 6, help = "Time horizon in months")]
    pub horizon: u32,
    #[arg(short, long, value_enum, help = "Complexity tier (default medium)")]
    pub complexity: Option<ComplexityArg>,
}

impl From<CreatePlanArgs> for CreatePlan {
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan {
            title: val.title,
            description: val.description,
            horizon_months: val.horizon,
            complexity: val.complexity.map(|c| c.to_string()),
        }
    }
}

/// List plans with their progress
#[derive(Args)]
pub struct ListPlansArgs {
    #[arg(short, long, value_enum, help = "Only list plans with this status")]
    pub status: Option<PlanStatusArg>,
}

impl From<ListPlansArgs> for ListPlans {
    fn from(val: ListPlansArgs) -> Self {
        ListPlans {
            status: val.status.map(|s| s.to_string()),
        }
    }
}

/// Select a resource by ID
#[derive(Args)]
pub struct IdArgs {
    #[arg(help = "Unique identifier of the resource")]
    pub id: u64,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Select a plan report, optionally as JSON
#[derive(Args)]
pub struct ReportArgs {
    #[arg(help = "Unique identifier of the plan")]
    pub id: u64,
    #[arg(long, help = "Print the report as JSON instead of markdown")]
    pub json: bool,
}

/// Move a plan to a new lifecycle status
#[derive(Args)]
pub struct SetPlanStatusArgs {
    #[arg(help = "Unique identifier of the plan")]
    pub id: u64,
    #[arg(value_enum, help = "New status of the plan")]
    pub status: PlanStatusArg,
}

impl From<SetPlanStatusArgs> for SetPlanStatus {
    fn from(val: SetPlanStatusArgs) -> Self {
        SetPlanStatus {
            id: val.id,
            status: val.status.to_string(),
        }
    }
}

/// Delete a plan with everything it owns
#[derive(Args)]
pub struct DeletePlanArgs {
    #[arg(help = "Unique identifier of the plan to permanently delete")]
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// List plans
    #[command(aliases = ["l", "ls"])]
    List(ListPlansArgs),
    /// Show a plan with its areas, objectives and tasks
    #[command(alias = "s")]
    Show(IdArgs),
    /// Change the lifecycle status of a plan
    Status(SetPlanStatusArgs),
    /// Delete a plan permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePlanArgs),
    /// Show task progress per area and overall
    #[command(alias = "pr")]
    Progress(ReportArgs),
    /// Show scheduled tasks on a shared date axis
    #[command(alias = "tl")]
    Timeline(ReportArgs),
}

// ============================================================================
// Area and objective commands
// ============================================================================

/// Append an area to a plan
#[derive(Args)]
pub struct AddAreaArgs {
    #[arg(help = "Unique identifier of the plan")]
    pub plan_id: u64,
    /// Name of the area
    pub name: String,
    #[arg(short, long, help = "Optional description of the area")]
    pub description: Option<String>,
    #[arg(long, help = "Score the plan aims to reach in this area")]
    pub target_score: Option<f64>,
}

impl From<AddAreaArgs> for CreateArea {
    fn from(val: AddAreaArgs) -> Self {
        CreateArea {
            plan_id: val.plan_id,
            name: val.name,
            description: val.description,
            target_score: val.target_score,
        }
    }
}

#[derive(Subcommand)]
pub enum AreaCommands {
    /// Append an area to a plan
    #[command(alias = "a")]
    Add(AddAreaArgs),
    /// Delete an area with its objectives and tasks
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
}

/// Append an objective to an area
#[derive(Args)]
pub struct AddObjectiveArgs {
    #[arg(help = "Unique identifier of the area")]
    pub area_id: u64,
    /// Title of the objective
    pub title: String,
    #[arg(short, long, help = "Optional description of the objective")]
    pub description: Option<String>,
    #[arg(short, long, value_enum, help = "Priority (default medium)")]
    pub priority: Option<PriorityArg>,
}

impl From<AddObjectiveArgs> for CreateObjective {
    fn from(val: AddObjectiveArgs) -> Self {
        CreateObjective {
            area_id: val.area_id,
            title: val.title,
            description: val.description,
            priority: val.priority.map(|p| p.to_string()),
        }
    }
}

#[derive(Subcommand)]
pub enum ObjectiveCommands {
    /// Append an objective to an area
    #[command(alias = "a")]
    Add(AddObjectiveArgs),
    /// Delete an objective with its tasks
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
}

// ============================================================================
// Task commands
// ============================================================================

/// Add a pending task to an objective
#[derive(Args)]
pub struct AddTaskArgs {
    #[arg(help = "Unique identifier of the objective")]
    pub objective_id: u64,
    /// Title of the task
    pub title: String,
    #[arg(short, long, help = "Optional description of the task")]
    pub description: Option<String>,
    #[arg(short, long, value_enum, help = "Priority (default none)")]
    pub priority: Option<PriorityArg>,
    #[arg(long, help = "Person responsible for the task")]
    pub assignee: Option<String>,
    #[arg(long, help = "ID of a task in the same plan that must finish first")]
    pub after: Option<u64>,
    #[arg(long, help = "Estimated effort in abstract units")]
    pub effort: Option<u32>,
    #[arg(long, help = "Planned start date (YYYY-MM-DD)")]
    pub start: Option<String>,
    #[arg(long, help = "Planned due date (YYYY-MM-DD)")]
    pub due: Option<String>,
    #[arg(long, help = "Free-form JSON object stored with the task")]
    pub metadata: Option<String>,
}

impl TryFrom<AddTaskArgs> for CreateTask {
    type Error = anyhow::Error;

    fn try_from(val: AddTaskArgs) -> Result<Self> {
        let metadata = val
            .metadata
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .context("--metadata must be valid JSON")?;

        Ok(CreateTask {
            objective_id: val.objective_id,
            title: val.title,
            description: val.description,
            priority: val.priority.map(|p| p.to_string()),
            assignee: val.assignee,
            depends_on: val.after,
            estimated_effort: val.effort,
            start_date: val.start,
            due_date: val.due,
            metadata,
        })
    }
}

/// Move a task to a new status
#[derive(Args)]
pub struct SetTaskStatusArgs {
    #[arg(help = "Unique identifier of the task")]
    pub id: u64,
    #[arg(value_enum, help = "New status of the task")]
    pub status: TaskStatusArg,
    #[arg(long, help = "Reject the change if the task is no longer at this version")]
    pub expected_version: Option<u64>,
}

impl From<SetTaskStatusArgs> for SetTaskStatus {
    fn from(val: SetTaskStatusArgs) -> Self {
        SetTaskStatus {
            id: val.id,
            status: val.status.to_string(),
            expected_version: val.expected_version,
        }
    }
}

/// Set or clear the predecessor of a task
#[derive(Args)]
pub struct DependArgs {
    #[arg(help = "Unique identifier of the task")]
    pub id: u64,
    #[arg(
        required_unless_present = "clear",
        conflicts_with = "clear",
        help = "ID of the task that must finish first"
    )]
    pub predecessor: Option<u64>,
    #[arg(long, help = "Remove the current predecessor")]
    pub clear: bool,
    #[arg(long, help = "Reject the change if the task is no longer at this version")]
    pub expected_version: Option<u64>,
}

impl From<DependArgs> for SetTaskDependency {
    fn from(val: DependArgs) -> Self {
        SetTaskDependency {
            id: val.id,
            depends_on: if val.clear { None } else { val.predecessor },
            expected_version: val.expected_version,
        }
    }
}

/// Replace the planned dates of a task; an omitted date is cleared
#[derive(Args)]
pub struct ScheduleArgs {
    #[arg(help = "Unique identifier of the task")]
    pub id: u64,
    #[arg(long, help = "Planned start date (YYYY-MM-DD)")]
    pub start: Option<String>,
    #[arg(long, help = "Planned due date (YYYY-MM-DD)")]
    pub due: Option<String>,
    #[arg(long, help = "Reject the change if the task is no longer at this version")]
    pub expected_version: Option<u64>,
}

impl From<ScheduleArgs> for SetTaskSchedule {
    fn from(val: ScheduleArgs) -> Self {
        SetTaskSchedule {
            id: val.id,
            start_date: val.start,
            due_date: val.due,
            expected_version: val.expected_version,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task to an objective
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// Show a task with its KPIs
    #[command(alias = "s")]
    Show(IdArgs),
    /// Move a task to a new status
    #[command(alias = "st")]
    Status(SetTaskStatusArgs),
    /// Set or clear the predecessor of a task
    Depend(DependArgs),
    /// Replace the planned dates of a task
    Schedule(ScheduleArgs),
    /// Delete a task; dependents lose their predecessor
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
    /// List the tasks of a plan that are ready to advance
    #[command(alias = "e")]
    Eligible(IdArgs),
}

// ============================================================================
// KPI commands
// ============================================================================

/// Attach a KPI to a task
#[derive(Args)]
pub struct AddKpiArgs {
    #[arg(help = "Unique identifier of the task")]
    pub task_id: u64,
    /// Name of the KPI
    pub name: String,
    #[arg(long, help = "Value the task should reach")]
    pub target: Option<f64>,
    #[arg(long, help = "Current value, if already known")]
    pub current: Option<f64>,
    #[arg(long, help = "Unit of measurement")]
    pub unit: Option<String>,
}

impl From<AddKpiArgs> for CreateTaskKpi {
    fn from(val: AddKpiArgs) -> Self {
        CreateTaskKpi {
            task_id: val.task_id,
            name: val.name,
            target_value: val.target,
            current_value: val.current,
            unit: val.unit,
        }
    }
}

/// Record the current value of a KPI
#[derive(Args)]
pub struct SetKpiArgs {
    #[arg(help = "Unique identifier of the KPI")]
    pub id: u64,
    #[arg(help = "New current value")]
    pub value: f64,
}

impl From<SetKpiArgs> for UpdateKpiValue {
    fn from(val: SetKpiArgs) -> Self {
        UpdateKpiValue {
            id: val.id,
            current_value: Some(val.value),
        }
    }
}

#[derive(Subcommand)]
pub enum KpiCommands {
    /// Attach a KPI to a task
    #[command(alias = "a")]
    Add(AddKpiArgs),
    /// List the KPIs of a task
    #[command(aliases = ["l", "ls"])]
    List(IdArgs),
    /// Record the current value of a KPI
    Set(SetKpiArgs),
}

// ============================================================================
// Value enums
// ============================================================================

/// Task status values accepted on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TaskStatusArg {
    Pending,
    InProgress,
    Completed,
    Blocked,
}

impl fmt::Display for TaskStatusArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TaskStatusArg::Pending => "pending",
            TaskStatusArg::InProgress => "in_progress",
            TaskStatusArg::Completed => "completed",
            TaskStatusArg::Blocked => "blocked",
        })
    }
}

/// Plan status values accepted on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PlanStatusArg {
    Draft,
    Active,
    Completed,
    Archived,
}

impl fmt::Display for PlanStatusArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlanStatusArg::Draft => "draft",
            PlanStatusArg::Active => "active",
            PlanStatusArg::Completed => "completed",
            PlanStatusArg::Archived => "archived",
        })
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ComplexityArg {
    Basic,
    Medium,
    Advanced,
}

impl fmt::Display for ComplexityArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ComplexityArg::Basic => "basic",
            ComplexityArg::Medium => "medium",
            ComplexityArg::Advanced => "advanced",
        })
    }
}

/// Priorities for objectives and tasks; `none` is only valid for tasks
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    High,
    Medium,
    Low,
    None,
}

impl fmt::Display for PriorityArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PriorityArg::High => "high",
            PriorityArg::Medium => "medium",
            PriorityArg::Low => "low",
            PriorityArg::None => "none",
        })
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Runs one CLI command against the planner and renders the outcome.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    fn print_json<T: Serialize>(value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => {
                let plan = self.planner.create_plan(&args.into()).await?;
                self.renderer.render(&CreateResult::new(plan).to_string())
            }
            PlanCommands::List(args) => self.list_plans(&args.into()).await,
            PlanCommands::Show(args) => {
                let id: Id = args.into();
                let Some(tree) = self.planner.get_plan_tree(&id).await? else {
                    bail!("Plan with ID {} not found", id.id);
                };
                self.renderer.render(&tree.to_string())
            }
            PlanCommands::Status(args) => {
                let id = args.id;
                let before = self
                    .planner
                    .get_plan(&Id { id })
                    .await?
                    .map(|plan| plan.status);
                let plan = self.planner.set_plan_status(&args.into()).await?;

                let changes = match before {
                    Some(old) if old != plan.status => {
                        vec![format!("Status: {old} → {}", plan.status)]
                    }
                    _ => Vec::new(),
                };
                self.renderer
                    .render(&UpdateResult::with_changes(plan, changes).to_string())
            }
            PlanCommands::Delete(args) => {
                if !args.confirm {
                    let status = OperationStatus::failure(format!(
                        "Refusing to delete plan {} without --confirm",
                        args.id
                    ))
                    .with_detail("All areas, objectives, tasks and KPIs of the plan are removed");
                    return self.renderer.render(&status.to_string());
                }
                match self.planner.delete_plan(&Id { id: args.id }).await? {
                    Some(plan) => self.renderer.render(&DeleteResult::new(plan).to_string()),
                    None => bail!("Plan with ID {} not found", args.id),
                }
            }
            PlanCommands::Progress(ReportArgs { id, json }) => {
                let progress = self.planner.get_plan_progress(&Id { id }).await?;
                if json {
                    Self::print_json(&progress)
                } else {
                    self.renderer.render(&progress.to_string())
                }
            }
            PlanCommands::Timeline(ReportArgs { id, json }) => {
                let timeline = self.planner.get_plan_timeline(&Id { id }).await?;
                if json {
                    Self::print_json(&timeline)
                } else {
                    self.renderer.render(&timeline.to_string())
                }
            }
        }
    }

    pub async fn list_plans(&self, params: &ListPlans) -> Result<()> {
        let summaries = self.planner.list_plans(params).await?;
        let title = match &params.status {
            Some(status) => format!("Plans ({status})"),
            None => "Plans".to_string(),
        };
        self.renderer.render(&format!("# {title}\n\n{summaries}"))
    }

    pub async fn handle_area_command(&self, command: AreaCommands) -> Result<()> {
        match command {
            AreaCommands::Add(args) => {
                let area = self.planner.add_area(&args.into()).await?;
                self.renderer.render(&CreateResult::new(area).to_string())
            }
            AreaCommands::Delete(args) => {
                let id = args.id;
                match self.planner.delete_area(&args.into()).await? {
                    Some(deleted) => self.renderer.render(&DeleteResult::new(deleted).to_string()),
                    None => bail!("Area with ID {id} not found"),
                }
            }
        }
    }

    pub async fn handle_objective_command(&self, command: ObjectiveCommands) -> Result<()> {
        match command {
            ObjectiveCommands::Add(args) => {
                let objective = self.planner.add_objective(&args.into()).await?;
                self.renderer
                    .render(&CreateResult::new(objective).to_string())
            }
            ObjectiveCommands::Delete(args) => {
                let id = args.id;
                match self.planner.delete_objective(&args.into()).await? {
                    Some(deleted) => self
                        .renderer
                        .render(&DeleteResult::new(deleted).to_string()),
                    None => bail!("Objective with ID {id} not found"),
                }
            }
        }
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Add(args) => {
                let params = CreateTask::try_from(args)?;
                let task = self.planner.add_task(&params).await?;
                self.renderer.render(&CreateResult::new(task).to_string())
            }
            TaskCommands::Show(args) => {
                let id: Id = args.into();
                let Some(task) = self.planner.get_task(&id).await? else {
                    bail!("Task with ID {} not found", id.id);
                };
                let kpis = self.planner.list_task_kpis(&id).await?;
                let mut output = task.to_string();
                if !kpis.is_empty() {
                    output.push_str(&format!("#### KPIs\n\n{kpis}"));
                }
                self.renderer.render(&output)
            }
            TaskCommands::Status(args) => {
                let before = self.current_task(args.id).await?;
                let task = self.planner.set_task_status(&args.into()).await?;
                self.render_task_update(&before, task)
            }
            TaskCommands::Depend(args) => {
                let before = self.current_task(args.id).await?;
                let task = self.planner.set_task_dependency(&args.into()).await?;
                self.render_task_update(&before, task)
            }
            TaskCommands::Schedule(args) => {
                let before = self.current_task(args.id).await?;
                let task = self.planner.update_task_schedule(&args.into()).await?;
                self.render_task_update(&before, task)
            }
            TaskCommands::Delete(args) => {
                let deleted = self.planner.delete_task(&args.into()).await?;
                self.renderer.render(&DeleteResult::new(deleted).to_string())
            }
            TaskCommands::Eligible(args) => {
                let tasks = self.planner.eligible_tasks(&args.into()).await?;
                self.renderer
                    .render(&format!("# Ready to advance\n\n{tasks}"))
            }
        }
    }

    pub async fn handle_kpi_command(&self, command: KpiCommands) -> Result<()> {
        match command {
            KpiCommands::Add(args) => {
                let kpi = self.planner.add_task_kpi(&args.into()).await?;
                self.renderer.render(&CreateResult::new(kpi).to_string())
            }
            KpiCommands::List(args) => {
                let kpis = self.planner.list_task_kpis(&args.into()).await?;
                self.renderer.render(&kpis.to_string())
            }
            KpiCommands::Set(args) => {
                let id = args.id;
                match self.planner.update_task_kpi_value(&args.into()).await? {
                    Some(kpi) => self.renderer.render(&UpdateResult::new(kpi).to_string()),
                    None => bail!("KPI with ID {id} not found"),
                }
            }
        }
    }

    async fn current_task(&self, id: u64) -> Result<Task> {
        self.planner
            .get_task(&Id { id })
            .await?
            .with_context(|| format!("Task with ID {id} not found"))
    }

    fn render_task_update(&self, before: &Task, after: Task) -> Result<()> {
        let changes = task_changes(before, &after);
        self.renderer
            .render(&UpdateResult::with_changes(after, changes).to_string())
    }
}

/// Describes what differs between two versions of a task.
fn task_changes(before: &Task, after: &Task) -> Vec<String> {
    let mut changes = Vec::new();
    if before.status != after.status {
        changes.push(format!("Status: {} → {}", before.status, after.status));
    }
    if before.depends_on != after.depends_on {
        let show = |pred: Option<u64>| pred.map_or_else(|| "none".to_string(), |p| format!("#{p}"));
        changes.push(format!(
            "Predecessor: {} → {}",
            show(before.depends_on),
            show(after.depends_on)
        ));
    }
    if before.start_date != after.start_date || before.due_date != after.due_date {
        changes.push("Schedule updated".to_string());
    }
    changes
}
