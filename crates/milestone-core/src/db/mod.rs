//! SQLite storage for plans and their hierarchy.
//!
//! [`Database`] owns one connection. Every mutating method runs inside a
//! single `BEGIN IMMEDIATE` transaction, and rules that need the stored graph
//! (dependency validation, status transitions) are checked inside that same
//! transaction. Writers on other connections queue on the busy timeout
//! instead of failing, and never interleave between check and write.
//!
//! Queries are grouped by entity: [`plan_queries`], [`structure_queries`]
//! (areas and objectives), [`task_queries`], [`kpi_queries`] and
//! [`tree_queries`] for whole-plan snapshots.

use std::{path::Path, time::Duration};

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::error::{DatabaseResultExt, Result};

pub mod kpi_queries;
pub mod migrations;
pub mod plan_queries;
pub mod structure_queries;
pub mod task_queries;
pub mod tree_queries;
mod utils;

/// How long a writer waits for another connection's write lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database at `path` and brings its schema up to
    /// date.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Starts a transaction that takes the write lock up front.
    ///
    /// A deferred transaction that reads first and writes later cannot wait
    /// for the lock upgrade, so SQLite fails it with `SQLITE_BUSY`.
    fn write_transaction(&mut self) -> Result<Transaction<'_>> {
        self.connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")
    }
}
