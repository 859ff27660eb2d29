//! Task KPI operations.

use rusqlite::{params, Connection};

use super::utils::id_at;
use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::TaskKpi,
};

const CHECK_TASK_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM tasks WHERE id = ?1)";
const INSERT_KPI_SQL: &str = "INSERT INTO task_kpis (task_id, name, target_value, current_value, unit) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_KPIS_BY_TASK_SQL: &str = "SELECT id, task_id, name, target_value, current_value, unit FROM task_kpis WHERE task_id = ?1 ORDER BY id";
const SELECT_KPI_BY_ID_SQL: &str =
    "SELECT id, task_id, name, target_value, current_value, unit FROM task_kpis WHERE id = ?1";
const UPDATE_KPI_VALUE_SQL: &str = "UPDATE task_kpis SET current_value = ?1 WHERE id = ?2";

impl super::Database {
    fn build_kpi_from_row(row: &rusqlite::Row) -> rusqlite::Result<TaskKpi> {
        Ok(TaskKpi {
            id: id_at(row, 0)?,
            task_id: id_at(row, 1)?,
            name: row.get(2)?,
            target_value: row.get(3)?,
            current_value: row.get(4)?,
            unit: row.get(5)?,
        })
    }

    fn task_exists(conn: &Connection, task_id: u64) -> Result<bool> {
        conn.query_row(CHECK_TASK_EXISTS_SQL, params![task_id as i64], |row| {
            row.get(0)
        })
        .db_context("Failed to check task existence")
    }

    /// Attaches a KPI to a task.
    pub fn add_task_kpi(
        &mut self,
        task_id: u64,
        name: &str,
        target_value: Option<f64>,
        current_value: Option<f64>,
        unit: Option<&str>,
    ) -> Result<TaskKpi> {
        let tx = self.write_transaction()?;

        if !Self::task_exists(&tx, task_id)? {
            return Err(PlannerError::TaskNotFound { id: task_id });
        }

        tx.execute(
            INSERT_KPI_SQL,
            params![task_id as i64, name, target_value, current_value, unit],
        )
        .db_context("Failed to insert KPI")?;
        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(TaskKpi {
            id,
            task_id,
            name: name.to_string(),
            target_value,
            current_value,
            unit: unit.map(String::from),
        })
    }

    /// Lists the KPIs of a task in creation order.
    pub fn list_task_kpis(&self, task_id: u64) -> Result<Vec<TaskKpi>> {
        if !Self::task_exists(&self.connection, task_id)? {
            return Err(PlannerError::TaskNotFound { id: task_id });
        }

        let mut stmt = self
            .connection
            .prepare(SELECT_KPIS_BY_TASK_SQL)
            .db_context("Failed to prepare query")?;
        let rows = stmt
            .query_map(params![task_id as i64], Self::build_kpi_from_row)
            .db_context("Failed to list KPIs")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read KPI")
    }

    /// Records the current value of a KPI. Returns `None` if the KPI does not
    /// exist.
    pub fn update_task_kpi_value(
        &mut self,
        id: u64,
        current_value: Option<f64>,
    ) -> Result<Option<TaskKpi>> {
        let tx = self.write_transaction()?;

        let changed = tx
            .execute(UPDATE_KPI_VALUE_SQL, params![current_value, id as i64])
            .db_context("Failed to update KPI value")?;
        if changed == 0 {
            return Ok(None);
        }

        let kpi = tx
            .query_row(
                SELECT_KPI_BY_ID_SQL,
                params![id as i64],
                Self::build_kpi_from_row,
            )
            .db_context("Failed to reload KPI")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(Some(kpi))
    }
}
