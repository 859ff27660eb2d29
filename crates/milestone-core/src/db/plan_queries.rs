//! Plan CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::utils::{id_at, parsed_at};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{Complexity, Plan, PlanStatus, PlanSummary},
};

const INSERT_PLAN_SQL: &str = "INSERT INTO plans (title, description, horizon_months, complexity, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const SELECT_PLAN_BY_ID_SQL: &str = "SELECT id, title, description, horizon_months, complexity, status, created_at, updated_at FROM plans WHERE id = ?1";
const SELECT_PLAN_SUMMARIES_SQL: &str = "SELECT id, title, description, horizon_months, complexity, status, created_at, updated_at, total_tasks, completed_tasks FROM plan_summaries WHERE (?1 IS NULL OR status = ?1) ORDER BY created_at DESC, id DESC";
const UPDATE_PLAN_STATUS_SQL: &str =
    "UPDATE plans SET status = ?1, updated_at = ?2 WHERE id = ?3";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)";

impl super::Database {
    /// Helper function to construct a Plan from a database row
    pub(super) fn build_plan_from_row(row: &rusqlite::Row) -> rusqlite::Result<Plan> {
        Ok(Plan {
            id: id_at(row, 0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            horizon_months: row.get::<_, i64>(3)? as u32,
            complexity: parsed_at::<Complexity>(row, 4)?,
            status: parsed_at::<PlanStatus>(row, 5)?,
            created_at: parsed_at::<Timestamp>(row, 6)?,
            updated_at: parsed_at::<Timestamp>(row, 7)?,
        })
    }

    fn build_summary_from_row(row: &rusqlite::Row) -> rusqlite::Result<PlanSummary> {
        let plan = Self::build_plan_from_row(row)?;
        let total: i64 = row.get(8)?;
        let completed: i64 = row.get(9)?;
        Ok(PlanSummary::from_plan(plan, total as u32, completed as u32))
    }

    pub(super) fn plan_exists(conn: &rusqlite::Connection, plan_id: u64) -> Result<bool> {
        conn.query_row(CHECK_PLAN_EXISTS_SQL, params![plan_id as i64], |row| row.get(0))
            .db_context("Failed to check plan existence")
    }

    /// Creates a new plan in `draft` status.
    pub fn create_plan(
        &self,
        title: &str,
        description: Option<&str>,
        horizon_months: u32,
        complexity: Complexity,
    ) -> Result<Plan> {
        let now = Timestamp::now();
        let now_str = now.to_string();
        let status = PlanStatus::default();

        self.connection
            .execute(
                INSERT_PLAN_SQL,
                params![
                    title,
                    description,
                    i64::from(horizon_months),
                    complexity.as_str(),
                    status.as_str(),
                    &now_str,
                    &now_str
                ],
            )
            .db_context("Failed to insert plan")?;

        Ok(Plan {
            id: self.connection.last_insert_rowid() as u64,
            title: title.to_string(),
            description: description.map(String::from),
            horizon_months,
            complexity,
            status,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a plan by ID, without its hierarchy.
    pub fn get_plan(&self, id: u64) -> Result<Option<Plan>> {
        self.connection
            .query_row(
                SELECT_PLAN_BY_ID_SQL,
                params![id as i64],
                Self::build_plan_from_row,
            )
            .optional()
            .db_context("Failed to get plan")
    }

    /// Lists plan summaries, newest first, optionally restricted to one
    /// status.
    pub fn list_plans(&self, status: Option<PlanStatus>) -> Result<Vec<PlanSummary>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PLAN_SUMMARIES_SQL)
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map(
                params![status.map(|s| s.as_str())],
                Self::build_summary_from_row,
            )
            .db_context("Failed to list plans")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read plan summary")
    }

    /// Changes the lifecycle status of a plan. Returns `None` if the plan
    /// does not exist.
    pub fn set_plan_status(&mut self, id: u64, status: PlanStatus) -> Result<Option<Plan>> {
        let tx = self.write_transaction()?;

        let now_str = Timestamp::now().to_string();
        let changed = tx
            .execute(
                UPDATE_PLAN_STATUS_SQL,
                params![status.as_str(), &now_str, id as i64],
            )
            .db_context("Failed to update plan status")?;
        if changed == 0 {
            return Ok(None);
        }

        let plan = tx
            .query_row(
                SELECT_PLAN_BY_ID_SQL,
                params![id as i64],
                Self::build_plan_from_row,
            )
            .db_context("Failed to reload plan")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(Some(plan))
    }

    /// Deletes a plan together with its areas, objectives, tasks and KPIs.
    /// Returns the deleted plan, or `None` if it did not exist.
    pub fn delete_plan(&mut self, id: u64) -> Result<Option<Plan>> {
        let tx = self.write_transaction()?;

        let plan = tx
            .query_row(
                SELECT_PLAN_BY_ID_SQL,
                params![id as i64],
                Self::build_plan_from_row,
            )
            .optional()
            .db_context("Failed to get plan")?;

        if plan.is_some() {
            tx.execute(DELETE_PLAN_SQL, params![id as i64])
                .db_context("Failed to delete plan")?;
            tx.commit().db_context("Failed to commit transaction")?;
        }

        Ok(plan)
    }
}
