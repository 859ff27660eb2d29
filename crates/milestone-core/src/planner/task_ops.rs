//! Task, dependency and KPI operations.

use log::{debug, info, warn};

use super::{log_conflict, Planner};
use crate::{
    display::{TaskKpis, Tasks},
    error::{PlannerError, Result},
    models::{DeletedTask, Task, TaskKpi},
    params::{
        CreateTask, CreateTaskKpi, Id, SetTaskDependency, SetTaskSchedule, SetTaskStatus,
        UpdateKpiValue,
    },
};

impl Planner {
    /// Adds a pending task to an objective.
    ///
    /// A predecessor given in `depends_on` is checked against the plan's
    /// dependency graph in the same transaction as the insert.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::ObjectiveNotFound` if the objective does not
    /// exist, `PlannerError::TaskNotFound` if the predecessor does not exist
    /// and `PlannerError::CrossPlan` if it belongs to another plan.
    pub async fn add_task(&self, params: &CreateTask) -> Result<Task> {
        let new_task = params.validate()?;

        let task = self.with_db(move |db| db.add_task(&new_task)).await?;

        info!(
            "Added task {} '{}' to objective {}",
            task.id, task.title, task.objective_id
        );
        Ok(task)
    }

    /// Fetches a single task.
    pub async fn get_task(&self, params: &Id) -> Result<Option<Task>> {
        let id = params.id;
        debug!("Fetching task {id}");
        self.with_db(move |db| db.get_task(id)).await
    }

    /// Moves a task to a new status under the planner's transition policy.
    ///
    /// Completing a task stamps `completed_at`; leaving `completed` clears
    /// it. Requesting the current status is a no-op that returns the stored
    /// task unchanged.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidState` for an unknown status token,
    /// `PlannerError::TaskNotFound` if the task does not exist,
    /// `PlannerError::PredecessorIncomplete` when the strict policy refuses
    /// the move and `PlannerError::VersionConflict` when the task changed
    /// since `expected_version`.
    pub async fn set_task_status(&self, params: &SetTaskStatus) -> Result<Task> {
        let status = params.validate()?;
        let id = params.id;
        let expected_version = params.expected_version;
        let policy = self.policy;

        let task = self
            .with_db(move |db| db.set_task_status(id, status, expected_version, policy))
            .await
            .map_err(log_conflict)?;

        info!("Task {id} is now {} (version {})", task.status, task.version);
        Ok(task)
    }

    /// Sets or clears the predecessor of a task.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::TaskNotFound` if either task does not exist,
    /// `PlannerError::SelfReference`, `PlannerError::CrossPlan` or
    /// `PlannerError::Cycle` if the edge is not allowed, and
    /// `PlannerError::VersionConflict` when the task changed since
    /// `expected_version`.
    pub async fn set_task_dependency(&self, params: &SetTaskDependency) -> Result<Task> {
        let id = params.id;
        let depends_on = params.depends_on;
        let expected_version = params.expected_version;

        let task = self
            .with_db(move |db| db.set_task_dependency(id, depends_on, expected_version))
            .await
            .map_err(log_conflict)?;

        match task.depends_on {
            Some(pred) => info!("Task {id} now depends on task {pred}"),
            None => info!("Task {id} has no predecessor"),
        }
        Ok(task)
    }

    /// Replaces the planned start and due dates of a task.
    ///
    /// A start after the due date is stored as given; the timeline flags it.
    pub async fn update_task_schedule(&self, params: &SetTaskSchedule) -> Result<Task> {
        let (start_date, due_date) = params.validate()?;
        let id = params.id;
        let expected_version = params.expected_version;

        let task = self
            .with_db(move |db| db.set_task_schedule(id, start_date, due_date, expected_version))
            .await
            .map_err(log_conflict)?;

        info!("Rescheduled task {id}");
        Ok(task)
    }

    /// Deletes a task and its KPIs.
    ///
    /// Tasks that depended on it lose their predecessor; their IDs are
    /// reported in [`DeletedTask::cleared_dependents`].
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::TaskNotFound` if the task does not exist.
    pub async fn delete_task(&self, params: &Id) -> Result<DeletedTask> {
        let id = params.id;
        let deleted = self
            .with_db(move |db| db.delete_task(id))
            .await?
            .ok_or(PlannerError::TaskNotFound { id })?;

        if !deleted.cleared_dependents.is_empty() {
            warn!(
                "Deleting task {id} cleared the predecessor of tasks {:?}",
                deleted.cleared_dependents
            );
        }
        info!("Deleted task {id}");
        Ok(deleted)
    }

    /// Lists the tasks of a plan that are ready to advance: not completed,
    /// with no predecessor or a completed one. Tasks are in hierarchy order.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::PlanNotFound` if the plan does not exist.
    pub async fn eligible_tasks(&self, params: &Id) -> Result<Tasks> {
        let id = params.id;
        let tree = self.require_tree(id).await?;

        let ready: Vec<Task> = tree.ready_tasks().into_iter().cloned().collect();
        debug!(
            "{} of {} tasks in plan {id} are ready",
            ready.len(),
            tree.task_count()
        );
        Ok(Tasks(ready))
    }

    /// Attaches a KPI to a task.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::TaskNotFound` if the task does not exist.
    pub async fn add_task_kpi(&self, params: &CreateTaskKpi) -> Result<TaskKpi> {
        params.validate()?;
        let params = params.clone();

        let kpi = self
            .with_db(move |db| {
                db.add_task_kpi(
                    params.task_id,
                    params.name.trim(),
                    params.target_value,
                    params.current_value,
                    params.unit.as_deref(),
                )
            })
            .await?;

        info!("Added KPI {} '{}' to task {}", kpi.id, kpi.name, kpi.task_id);
        Ok(kpi)
    }

    /// Lists the KPIs of a task.
    pub async fn list_task_kpis(&self, params: &Id) -> Result<TaskKpis> {
        let id = params.id;
        debug!("Listing KPIs of task {id}");
        let kpis = self.with_db(move |db| db.list_task_kpis(id)).await?;
        Ok(TaskKpis(kpis))
    }

    /// Records the current value of a KPI. Returns `None` if the KPI does not
    /// exist.
    pub async fn update_task_kpi_value(&self, params: &UpdateKpiValue) -> Result<Option<TaskKpi>> {
        let id = params.id;
        let value = params.current_value;
        let kpi = self
            .with_db(move |db| db.update_task_kpi_value(id, value))
            .await?;

        if kpi.is_some() {
            info!("KPI {id} now reads {value:?}");
        }
        Ok(kpi)
    }
}
