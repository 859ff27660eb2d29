//! Task operations.
//!
//! Writes that follow a read are compare-and-swap on the `version` column:
//! the update only applies while the row still carries the version that was
//! read, and every successful write bumps it. A lost race surfaces as
//! [`PlannerError::VersionConflict`] instead of silently overwriting.

use std::collections::HashMap;

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, Connection, OptionalExtension};

use super::utils::{
    id_at, optional_id_at, optional_parsed_at, parsed_at, UPDATE_PLAN_TIMESTAMP_SQL,
};
use crate::{
    engine::{DependencyValidator, StatusTransition, TaskLink, Transition, TransitionPolicy},
    error::{DatabaseResultExt, PlannerError, Result},
    models::{DeletedTask, Task, TaskPriority, TaskStatus},
    params::NewTask,
};

const SELECT_TASK_BY_ID_SQL: &str = "SELECT id, objective_id, title, description, status, priority, assignee, depends_on, estimated_effort, start_date, due_date, completed_at, metadata, task_order, version, created_at, updated_at FROM tasks WHERE id = ?1";
const SELECT_OBJECTIVE_PLAN_SQL: &str = "SELECT a.plan_id FROM objectives o JOIN areas a ON a.id = o.area_id WHERE o.id = ?1";
const NEXT_TASK_ORDER_SQL: &str =
    "SELECT COALESCE(MAX(task_order), -1) + 1 FROM tasks WHERE objective_id = ?1";
const INSERT_TASK_SQL: &str = "INSERT INTO tasks (objective_id, title, description, status, priority, assignee, depends_on, estimated_effort, start_date, due_date, completed_at, metadata, task_order, version, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, NULL, ?11, ?12, 0, ?13, ?13)";
const SELECT_TASK_PLAN_SQL: &str = "SELECT plan_id FROM task_plans WHERE task_id = ?1";
const SELECT_PLAN_LINKS_SQL: &str = "SELECT t.id, t.depends_on FROM tasks t JOIN task_plans tp ON tp.task_id = t.id WHERE tp.plan_id = ?1";
const SELECT_TASK_STATUS_SQL: &str = "SELECT status FROM tasks WHERE id = ?1";
const SELECT_TASK_VERSION_SQL: &str = "SELECT version FROM tasks WHERE id = ?1";
const UPDATE_TASK_STATUS_SQL: &str = "UPDATE tasks SET status = ?1, completed_at = ?2, version = version + 1, updated_at = ?3 WHERE id = ?4 AND version = ?5";
const UPDATE_TASK_DEPENDENCY_SQL: &str = "UPDATE tasks SET depends_on = ?1, version = version + 1, updated_at = ?2 WHERE id = ?3 AND version = ?4";
const UPDATE_TASK_SCHEDULE_SQL: &str = "UPDATE tasks SET start_date = ?1, due_date = ?2, version = version + 1, updated_at = ?3 WHERE id = ?4 AND version = ?5";
const SELECT_DEPENDENTS_SQL: &str = "SELECT id FROM tasks WHERE depends_on = ?1 ORDER BY id";
const CLEAR_DEPENDENTS_SQL: &str = "UPDATE tasks SET depends_on = NULL, version = version + 1, updated_at = ?1 WHERE depends_on = ?2";
const DELETE_TASK_SQL: &str = "DELETE FROM tasks WHERE id = ?1";
const UPDATE_PLAN_TIMESTAMP_BY_TASK_SQL: &str =
    "UPDATE plans SET updated_at = ?1 WHERE id = (SELECT plan_id FROM task_plans WHERE task_id = ?2)";

impl super::Database {
    /// Helper function to construct a Task from a database row
    pub(super) fn build_task_from_row(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        Ok(Task {
            id: id_at(row, 0)?,
            objective_id: id_at(row, 1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            status: parsed_at::<TaskStatus>(row, 4)?,
            priority: parsed_at::<TaskPriority>(row, 5)?,
            assignee: row.get(6)?,
            depends_on: optional_id_at(row, 7)?,
            estimated_effort: row.get::<_, Option<i64>>(8)?.map(|v| v as u32),
            start_date: optional_parsed_at::<Date>(row, 9)?,
            due_date: optional_parsed_at::<Date>(row, 10)?,
            completed_at: optional_parsed_at::<Timestamp>(row, 11)?,
            metadata: parsed_at::<serde_json::Value>(row, 12)?,
            order: row.get::<_, i64>(13)? as u32,
            version: row.get::<_, i64>(14)? as u64,
            created_at: parsed_at::<Timestamp>(row, 15)?,
            updated_at: parsed_at::<Timestamp>(row, 16)?,
        })
    }

    fn fetch_task(conn: &Connection, id: u64) -> Result<Option<Task>> {
        conn.query_row(
            SELECT_TASK_BY_ID_SQL,
            params![id as i64],
            Self::build_task_from_row,
        )
        .optional()
        .db_context("Failed to get task")
    }

    fn require_task(conn: &Connection, id: u64) -> Result<Task> {
        Self::fetch_task(conn, id)?.ok_or(PlannerError::TaskNotFound { id })
    }

    /// Resolves the plan that owns a task.
    fn task_plan(conn: &Connection, task_id: u64) -> Result<Option<u64>> {
        conn.query_row(SELECT_TASK_PLAN_SQL, params![task_id as i64], |row| {
            id_at(row, 0)
        })
        .optional()
        .db_context("Failed to resolve task plan")
    }

    /// Maps every task of a plan to its predecessor.
    fn plan_links(conn: &Connection, plan_id: u64) -> Result<HashMap<u64, Option<u64>>> {
        let mut stmt = conn
            .prepare(SELECT_PLAN_LINKS_SQL)
            .db_context("Failed to prepare query")?;
        let rows = stmt
            .query_map(params![plan_id as i64], |row| {
                Ok((id_at(row, 0)?, optional_id_at(row, 1)?))
            })
            .db_context("Failed to load dependency links")?;
        rows.collect::<rusqlite::Result<HashMap<_, _>>>()
            .db_context("Failed to read dependency link")
    }

    /// Checks that `predecessor` may become the predecessor of `task_id`.
    fn validate_dependency(conn: &Connection, task_id: u64, predecessor: u64) -> Result<()> {
        let task_plan =
            Self::task_plan(conn, task_id)?.ok_or(PlannerError::TaskNotFound { id: task_id })?;
        let predecessor_plan = Self::task_plan(conn, predecessor)?
            .ok_or(PlannerError::TaskNotFound { id: predecessor })?;
        let links = Self::plan_links(conn, task_plan)?;

        DependencyValidator::validate(
            TaskLink {
                id: task_id,
                plan_id: task_plan,
            },
            TaskLink {
                id: predecessor,
                plan_id: predecessor_plan,
            },
            &links,
        )
    }

    fn check_version(task: &Task, expected: Option<u64>) -> Result<()> {
        match expected {
            Some(expected) if expected != task.version => Err(PlannerError::VersionConflict {
                task_id: task.id,
                expected,
                actual: task.version,
            }),
            _ => Ok(()),
        }
    }

    /// Builds the conflict error after a compare-and-swap matched no row.
    fn lost_race(conn: &Connection, task: &Task) -> PlannerError {
        let actual = conn
            .query_row(SELECT_TASK_VERSION_SQL, params![task.id as i64], |row| {
                row.get::<_, i64>(0)
            })
            .optional();
        match actual {
            Ok(Some(actual)) => PlannerError::VersionConflict {
                task_id: task.id,
                expected: task.version,
                actual: actual as u64,
            },
            Ok(None) => PlannerError::TaskNotFound { id: task.id },
            Err(e) => PlannerError::database("Failed to read task version").with_source(e),
        }
    }

    /// Adds a pending task to an objective.
    ///
    /// A requested predecessor is validated against the plan graph inside the
    /// insert transaction; a rejected edge rolls the insert back.
    pub fn add_task(&mut self, new: &NewTask) -> Result<Task> {
        let tx = self.write_transaction()?;

        let plan_id: i64 = tx
            .query_row(
                SELECT_OBJECTIVE_PLAN_SQL,
                params![new.objective_id as i64],
                |row| row.get(0),
            )
            .optional()
            .db_context("Failed to look up objective")?
            .ok_or(PlannerError::ObjectiveNotFound {
                id: new.objective_id,
            })?;

        let order: i64 = tx
            .query_row(
                NEXT_TASK_ORDER_SQL,
                params![new.objective_id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to get next task order")?;

        if let Some(predecessor) = new.depends_on {
            if Self::task_plan(&tx, predecessor)?.is_none() {
                return Err(PlannerError::TaskNotFound { id: predecessor });
            }
        }

        let now_str = Timestamp::now().to_string();
        tx.execute(
            INSERT_TASK_SQL,
            params![
                new.objective_id as i64,
                new.title,
                new.description,
                TaskStatus::Pending.as_str(),
                new.priority.as_str(),
                new.assignee,
                new.depends_on.map(|id| id as i64),
                new.estimated_effort.map(i64::from),
                new.start_date.map(|d| d.to_string()),
                new.due_date.map(|d| d.to_string()),
                new.metadata.to_string(),
                order,
                &now_str
            ],
        )
        .db_context("Failed to insert task")?;
        let id = tx.last_insert_rowid() as u64;

        if let Some(predecessor) = new.depends_on {
            Self::validate_dependency(&tx, id, predecessor)?;
        }

        tx.execute(
            UPDATE_PLAN_TIMESTAMP_SQL,
            params![&now_str, plan_id],
        )
        .db_context("Failed to update plan timestamp")?;

        let task = Self::require_task(&tx, id)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(task)
    }

    /// Retrieves a single task by its ID.
    pub fn get_task(&self, id: u64) -> Result<Option<Task>> {
        Self::fetch_task(&self.connection, id)
    }

    /// ID of the plan a task belongs to.
    pub fn get_task_plan_id(&self, task_id: u64) -> Result<Option<u64>> {
        Self::task_plan(&self.connection, task_id)
    }

    /// Moves a task to `status`.
    ///
    /// Setting the status the task already has writes nothing and returns the
    /// stored task, so repeating the call is harmless.
    pub fn set_task_status(
        &mut self,
        id: u64,
        status: TaskStatus,
        expected_version: Option<u64>,
        policy: TransitionPolicy,
    ) -> Result<Task> {
        let tx = self.write_transaction()?;

        let task = Self::require_task(&tx, id)?;
        Self::check_version(&task, expected_version)?;

        let predecessor_status = match task.depends_on {
            Some(pred) => tx
                .query_row(SELECT_TASK_STATUS_SQL, params![pred as i64], |row| {
                    parsed_at::<TaskStatus>(row, 0)
                })
                .optional()
                .db_context("Failed to read predecessor status")?,
            None => None,
        };

        let now = Timestamp::now();
        let (status, completed_at) =
            match StatusTransition::apply(&task, status, policy, predecessor_status, now)? {
                Transition::Unchanged => return Ok(task),
                Transition::Changed {
                    status,
                    completed_at,
                } => (status, completed_at),
            };

        let now_str = now.to_string();
        let changed = tx
            .execute(
                UPDATE_TASK_STATUS_SQL,
                params![
                    status.as_str(),
                    completed_at.map(|t| t.to_string()),
                    &now_str,
                    id as i64,
                    task.version as i64
                ],
            )
            .db_context("Failed to update task status")?;
        if changed == 0 {
            return Err(Self::lost_race(&tx, &task));
        }

        tx.execute(UPDATE_PLAN_TIMESTAMP_BY_TASK_SQL, params![&now_str, id as i64])
            .db_context("Failed to update plan timestamp")?;

        let updated = Self::require_task(&tx, id)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(updated)
    }

    /// Sets or clears the predecessor of a task.
    ///
    /// Assigning the predecessor the task already has writes nothing.
    pub fn set_task_dependency(
        &mut self,
        id: u64,
        depends_on: Option<u64>,
        expected_version: Option<u64>,
    ) -> Result<Task> {
        let tx = self.write_transaction()?;

        let task = Self::require_task(&tx, id)?;
        Self::check_version(&task, expected_version)?;

        if let Some(predecessor) = depends_on {
            Self::validate_dependency(&tx, id, predecessor)?;
        }
        if task.depends_on == depends_on {
            return Ok(task);
        }

        let now_str = Timestamp::now().to_string();
        let changed = tx
            .execute(
                UPDATE_TASK_DEPENDENCY_SQL,
                params![
                    depends_on.map(|p| p as i64),
                    &now_str,
                    id as i64,
                    task.version as i64
                ],
            )
            .db_context("Failed to update task dependency")?;
        if changed == 0 {
            return Err(Self::lost_race(&tx, &task));
        }

        tx.execute(UPDATE_PLAN_TIMESTAMP_BY_TASK_SQL, params![&now_str, id as i64])
            .db_context("Failed to update plan timestamp")?;

        let updated = Self::require_task(&tx, id)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(updated)
    }

    /// Replaces the planned dates of a task.
    pub fn set_task_schedule(
        &mut self,
        id: u64,
        start_date: Option<Date>,
        due_date: Option<Date>,
        expected_version: Option<u64>,
    ) -> Result<Task> {
        let tx = self.write_transaction()?;

        let task = Self::require_task(&tx, id)?;
        Self::check_version(&task, expected_version)?;
        if task.start_date == start_date && task.due_date == due_date {
            return Ok(task);
        }

        let now_str = Timestamp::now().to_string();
        let changed = tx
            .execute(
                UPDATE_TASK_SCHEDULE_SQL,
                params![
                    start_date.map(|d| d.to_string()),
                    due_date.map(|d| d.to_string()),
                    &now_str,
                    id as i64,
                    task.version as i64
                ],
            )
            .db_context("Failed to update task schedule")?;
        if changed == 0 {
            return Err(Self::lost_race(&tx, &task));
        }

        tx.execute(UPDATE_PLAN_TIMESTAMP_BY_TASK_SQL, params![&now_str, id as i64])
            .db_context("Failed to update plan timestamp")?;

        let updated = Self::require_task(&tx, id)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(updated)
    }

    /// Deletes a task.
    ///
    /// Tasks that depended on it lose their predecessor in the same
    /// transaction. Returns `None` if the task did not exist.
    pub fn delete_task(&mut self, id: u64) -> Result<Option<DeletedTask>> {
        let tx = self.write_transaction()?;

        let Some(task) = Self::fetch_task(&tx, id)? else {
            return Ok(None);
        };

        let cleared_dependents = {
            let mut stmt = tx
                .prepare(SELECT_DEPENDENTS_SQL)
                .db_context("Failed to prepare query")?;
            let rows = stmt
                .query_map(params![id as i64], |row| id_at(row, 0))
                .db_context("Failed to query dependents")?;
            rows.collect::<rusqlite::Result<Vec<u64>>>()
                .db_context("Failed to read dependent")?
        };

        let now_str = Timestamp::now().to_string();
        if !cleared_dependents.is_empty() {
            tx.execute(CLEAR_DEPENDENTS_SQL, params![&now_str, id as i64])
                .db_context("Failed to clear dependents")?;
        }

        // Resolve the plan before the row disappears from task_plans
        tx.execute(UPDATE_PLAN_TIMESTAMP_BY_TASK_SQL, params![&now_str, id as i64])
            .db_context("Failed to update plan timestamp")?;
        tx.execute(DELETE_TASK_SQL, params![id as i64])
            .db_context("Failed to delete task")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Some(DeletedTask {
            task,
            cleared_dependents,
        }))
    }
}
