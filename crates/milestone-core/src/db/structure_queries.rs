//! Area and objective operations.
//!
//! Both are appended at the end of their parent's order; order values are
//! unique per parent and only used for display.

use jiff::Timestamp;
use rusqlite::{params, Connection, OptionalExtension};

use super::utils::{id_at, parsed_at, UPDATE_PLAN_TIMESTAMP_SQL};
use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{Area, DeletedArea, DeletedObjective, Objective, Priority},
};

const NEXT_AREA_ORDER_SQL: &str =
    "SELECT COALESCE(MAX(area_order), -1) + 1 FROM areas WHERE plan_id = ?1";
const INSERT_AREA_SQL: &str = "INSERT INTO areas (plan_id, name, description, target_score, area_order, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_AREA_BY_ID_SQL: &str = "SELECT id, plan_id, name, description, target_score, area_order, created_at FROM areas WHERE id = ?1";
const DELETE_AREA_SQL: &str = "DELETE FROM areas WHERE id = ?1";

const NEXT_OBJECTIVE_ORDER_SQL: &str =
    "SELECT COALESCE(MAX(objective_order), -1) + 1 FROM objectives WHERE area_id = ?1";
const INSERT_OBJECTIVE_SQL: &str = "INSERT INTO objectives (area_id, title, description, priority, objective_order, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_OBJECTIVE_BY_ID_SQL: &str = "SELECT id, area_id, title, description, priority, objective_order, created_at FROM objectives WHERE id = ?1";
const DELETE_OBJECTIVE_SQL: &str = "DELETE FROM objectives WHERE id = ?1";
const SELECT_AREA_PLAN_SQL: &str = "SELECT plan_id FROM areas WHERE id = ?1";

// Tasks outside a deleted subtree whose predecessor lives inside it. The FK
// would null these links silently; clearing them first bumps their version.
const SELECT_AREA_OUTSIDE_DEPENDENTS_SQL: &str = "SELECT id FROM tasks WHERE objective_id NOT IN (SELECT id FROM objectives WHERE area_id = ?1) AND depends_on IN (SELECT t.id FROM tasks t JOIN objectives o ON o.id = t.objective_id WHERE o.area_id = ?1) ORDER BY id";
const CLEAR_AREA_OUTSIDE_DEPENDENTS_SQL: &str = "UPDATE tasks SET depends_on = NULL, version = version + 1, updated_at = ?1 WHERE objective_id NOT IN (SELECT id FROM objectives WHERE area_id = ?2) AND depends_on IN (SELECT t.id FROM tasks t JOIN objectives o ON o.id = t.objective_id WHERE o.area_id = ?2)";
const SELECT_OBJECTIVE_OUTSIDE_DEPENDENTS_SQL: &str = "SELECT id FROM tasks WHERE objective_id != ?1 AND depends_on IN (SELECT id FROM tasks WHERE objective_id = ?1) ORDER BY id";
const CLEAR_OBJECTIVE_OUTSIDE_DEPENDENTS_SQL: &str = "UPDATE tasks SET depends_on = NULL, version = version + 1, updated_at = ?1 WHERE objective_id != ?2 AND depends_on IN (SELECT id FROM tasks WHERE objective_id = ?2)";
const UPDATE_PLAN_TIMESTAMP_BY_AREA_SQL: &str =
    "UPDATE plans SET updated_at = ?1 WHERE id = (SELECT plan_id FROM areas WHERE id = ?2)";

impl super::Database {
    pub(super) fn build_area_from_row(row: &rusqlite::Row) -> rusqlite::Result<Area> {
        Ok(Area {
            id: id_at(row, 0)?,
            plan_id: id_at(row, 1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            target_score: row.get(4)?,
            order: row.get::<_, i64>(5)? as u32,
            created_at: parsed_at::<Timestamp>(row, 6)?,
        })
    }

    pub(super) fn build_objective_from_row(row: &rusqlite::Row) -> rusqlite::Result<Objective> {
        Ok(Objective {
            id: id_at(row, 0)?,
            area_id: id_at(row, 1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            priority: parsed_at::<Priority>(row, 4)?,
            order: row.get::<_, i64>(5)? as u32,
            created_at: parsed_at::<Timestamp>(row, 6)?,
        })
    }

    fn fetch_area(conn: &Connection, id: u64) -> Result<Option<Area>> {
        conn.query_row(
            SELECT_AREA_BY_ID_SQL,
            params![id as i64],
            Self::build_area_from_row,
        )
        .optional()
        .db_context("Failed to get area")
    }

    /// Clears the links into a subtree that is about to be deleted and
    /// returns the IDs of the tasks that lost their predecessor.
    fn clear_outside_dependents(
        conn: &Connection,
        select_sql: &str,
        clear_sql: &str,
        scope_id: u64,
        now: &str,
    ) -> Result<Vec<u64>> {
        let cleared = {
            let mut stmt = conn
                .prepare(select_sql)
                .db_context("Failed to prepare query")?;
            let rows = stmt
                .query_map(params![scope_id as i64], |row| id_at(row, 0))
                .db_context("Failed to query dependents")?;
            rows.collect::<rusqlite::Result<Vec<u64>>>()
                .db_context("Failed to read dependent")?
        };

        if !cleared.is_empty() {
            conn.execute(clear_sql, params![now, scope_id as i64])
                .db_context("Failed to clear dependents")?;
        }
        Ok(cleared)
    }

    fn fetch_objective(conn: &Connection, id: u64) -> Result<Option<Objective>> {
        conn.query_row(
            SELECT_OBJECTIVE_BY_ID_SQL,
            params![id as i64],
            Self::build_objective_from_row,
        )
        .optional()
        .db_context("Failed to get objective")
    }

    /// Appends an area to a plan.
    pub fn add_area(
        &mut self,
        plan_id: u64,
        name: &str,
        description: Option<&str>,
        target_score: Option<f64>,
    ) -> Result<Area> {
        let tx = self.write_transaction()?;

        if !Self::plan_exists(&tx, plan_id)? {
            return Err(PlannerError::PlanNotFound { id: plan_id });
        }

        let order: i64 = tx
            .query_row(NEXT_AREA_ORDER_SQL, params![plan_id as i64], |row| row.get(0))
            .db_context("Failed to get next area order")?;

        let now = Timestamp::now();
        let now_str = now.to_string();
        tx.execute(
            INSERT_AREA_SQL,
            params![plan_id as i64, name, description, target_score, order, &now_str],
        )
        .db_context("Failed to insert area")?;
        let id = tx.last_insert_rowid() as u64;

        tx.execute(UPDATE_PLAN_TIMESTAMP_SQL, params![&now_str, plan_id as i64])
            .db_context("Failed to update plan timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Area {
            id,
            plan_id,
            name: name.to_string(),
            description: description.map(String::from),
            target_score,
            order: order as u32,
            created_at: now,
        })
    }

    pub fn get_area(&self, id: u64) -> Result<Option<Area>> {
        Self::fetch_area(&self.connection, id)
    }

    /// Deletes an area and everything below it.
    ///
    /// Tasks in other areas that depended on a deleted task lose their
    /// predecessor in the same transaction.
    pub fn delete_area(&mut self, id: u64) -> Result<Option<DeletedArea>> {
        let tx = self.write_transaction()?;

        let Some(area) = Self::fetch_area(&tx, id)? else {
            return Ok(None);
        };

        let now_str = Timestamp::now().to_string();
        let cleared_dependents = Self::clear_outside_dependents(
            &tx,
            SELECT_AREA_OUTSIDE_DEPENDENTS_SQL,
            CLEAR_AREA_OUTSIDE_DEPENDENTS_SQL,
            id,
            &now_str,
        )?;

        tx.execute(DELETE_AREA_SQL, params![id as i64])
            .db_context("Failed to delete area")?;
        tx.execute(
            UPDATE_PLAN_TIMESTAMP_SQL,
            params![&now_str, area.plan_id as i64],
        )
        .db_context("Failed to update plan timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(Some(DeletedArea {
            area,
            cleared_dependents,
        }))
    }

    /// Appends an objective to an area.
    pub fn add_objective(
        &mut self,
        area_id: u64,
        title: &str,
        description: Option<&str>,
        priority: Priority,
    ) -> Result<Objective> {
        let tx = self.write_transaction()?;

        let plan_id: i64 = tx
            .query_row(SELECT_AREA_PLAN_SQL, params![area_id as i64], |row| row.get(0))
            .optional()
            .db_context("Failed to look up area")?
            .ok_or(PlannerError::AreaNotFound { id: area_id })?;

        let order: i64 = tx
            .query_row(NEXT_OBJECTIVE_ORDER_SQL, params![area_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to get next objective order")?;

        let now = Timestamp::now();
        let now_str = now.to_string();
        tx.execute(
            INSERT_OBJECTIVE_SQL,
            params![
                area_id as i64,
                title,
                description,
                priority.as_str(),
                order,
                &now_str
            ],
        )
        .db_context("Failed to insert objective")?;
        let id = tx.last_insert_rowid() as u64;

        tx.execute(UPDATE_PLAN_TIMESTAMP_SQL, params![&now_str, plan_id])
            .db_context("Failed to update plan timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Objective {
            id,
            area_id,
            title: title.to_string(),
            description: description.map(String::from),
            priority,
            order: order as u32,
            created_at: now,
        })
    }

    pub fn get_objective(&self, id: u64) -> Result<Option<Objective>> {
        Self::fetch_objective(&self.connection, id)
    }

    /// Deletes an objective and its tasks.
    ///
    /// Tasks in other objectives that depended on a deleted task lose their
    /// predecessor in the same transaction.
    pub fn delete_objective(&mut self, id: u64) -> Result<Option<DeletedObjective>> {
        let tx = self.write_transaction()?;

        let Some(objective) = Self::fetch_objective(&tx, id)? else {
            return Ok(None);
        };

        let now_str = Timestamp::now().to_string();
        let cleared_dependents = Self::clear_outside_dependents(
            &tx,
            SELECT_OBJECTIVE_OUTSIDE_DEPENDENTS_SQL,
            CLEAR_OBJECTIVE_OUTSIDE_DEPENDENTS_SQL,
            id,
            &now_str,
        )?;

        tx.execute(DELETE_OBJECTIVE_SQL, params![id as i64])
            .db_context("Failed to delete objective")?;
        tx.execute(
            UPDATE_PLAN_TIMESTAMP_BY_AREA_SQL,
            params![&now_str, objective.area_id as i64],
        )
        .db_context("Failed to update plan timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(Some(DeletedObjective {
            objective,
            cleared_dependents,
        }))
    }
}
