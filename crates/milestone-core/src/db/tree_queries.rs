//! Whole-plan snapshot reads.

use rusqlite::{params, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result},
    models::PlanTree,
};

const SELECT_PLAN_SQL: &str = "SELECT id, title, description, horizon_months, complexity, status, created_at, updated_at FROM plans WHERE id = ?1";
const SELECT_AREAS_SQL: &str = "SELECT id, plan_id, name, description, target_score, area_order, created_at FROM areas WHERE plan_id = ?1";
const SELECT_OBJECTIVES_SQL: &str = "SELECT o.id, o.area_id, o.title, o.description, o.priority, o.objective_order, o.created_at FROM objectives o JOIN areas a ON a.id = o.area_id WHERE a.plan_id = ?1";
const SELECT_TASKS_SQL: &str = "SELECT t.id, t.objective_id, t.title, t.description, t.status, t.priority, t.assignee, t.depends_on, t.estimated_effort, t.start_date, t.due_date, t.completed_at, t.metadata, t.task_order, t.version, t.created_at, t.updated_at FROM tasks t JOIN task_plans tp ON tp.task_id = t.id WHERE tp.plan_id = ?1";

impl super::Database {
    /// Loads a plan with its complete Area → Objective → Task hierarchy.
    ///
    /// All four reads share one transaction, so the tree is a consistent
    /// snapshot even while other connections write. Returns `None` if the
    /// plan does not exist.
    pub fn load_plan_tree(&mut self, plan_id: u64) -> Result<Option<PlanTree>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        let id = plan_id as i64;

        let Some(plan) = tx
            .query_row(SELECT_PLAN_SQL, params![id], Self::build_plan_from_row)
            .optional()
            .db_context("Failed to get plan")?
        else {
            return Ok(None);
        };

        let areas = {
            let mut stmt = tx.prepare(SELECT_AREAS_SQL).db_context("Failed to prepare query")?;
            let rows = stmt
                .query_map(params![id], Self::build_area_from_row)
                .db_context("Failed to load areas")?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
                .db_context("Failed to read area")?
        };

        let objectives = {
            let mut stmt = tx
                .prepare(SELECT_OBJECTIVES_SQL)
                .db_context("Failed to prepare query")?;
            let rows = stmt
                .query_map(params![id], Self::build_objective_from_row)
                .db_context("Failed to load objectives")?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
                .db_context("Failed to read objective")?
        };

        let tasks = {
            let mut stmt = tx.prepare(SELECT_TASKS_SQL).db_context("Failed to prepare query")?;
            let rows = stmt
                .query_map(params![id], Self::build_task_from_row)
                .db_context("Failed to load tasks")?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
                .db_context("Failed to read task")?
        };

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Some(PlanTree::assemble(plan, areas, objectives, tasks)))
    }
}
