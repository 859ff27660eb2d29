//! Error types for the plan engine.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all engine operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: u64 },
    /// Area not found for the given ID
    #[error("Area with ID {id} not found")]
    AreaNotFound { id: u64 },
    /// Objective not found for the given ID
    #[error("Objective with ID {id} not found")]
    ObjectiveNotFound { id: u64 },
    /// Task not found for the given ID
    #[error("Task with ID {id} not found")]
    TaskNotFound { id: u64 },
    /// Unrecognized status token
    #[error("Invalid status '{value}'. Must be one of: {expected}")]
    InvalidState { value: String, expected: String },
    /// A task cannot depend on itself
    #[error("Task {task_id} cannot depend on itself")]
    SelfReference { task_id: u64 },
    /// The predecessor lives in a different plan
    #[error(
        "Task {task_id} (plan {task_plan_id}) cannot depend on task {predecessor_id} \
         from plan {predecessor_plan_id}"
    )]
    CrossPlan {
        task_id: u64,
        task_plan_id: u64,
        predecessor_id: u64,
        predecessor_plan_id: u64,
    },
    /// The dependency would close a cycle
    #[error("Making task {task_id} depend on task {predecessor_id} would create a cycle")]
    Cycle { task_id: u64, predecessor_id: u64 },
    /// Strict transition policy rejected the change
    #[error(
        "Task {task_id} cannot move to '{status}' while predecessor {predecessor_id} is not completed"
    )]
    PredecessorIncomplete {
        task_id: u64,
        predecessor_id: u64,
        status: String,
    },
    /// The task changed since the caller read it
    #[error("Task {task_id} was modified concurrently (expected version {expected}, found {actual})")]
    VersionConflict {
        task_id: u64,
        expected: u64,
        actual: u64,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> PlannerError {
        PlannerError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlannerError {
        PlannerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlannerError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps a `spawn_blocking` join failure.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {error}"),
        }
    }

    /// True for failures detected before any write reached storage.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidState { .. }
                | Self::SelfReference { .. }
                | Self::CrossPlan { .. }
                | Self::Cycle { .. }
                | Self::PredecessorIncomplete { .. }
                | Self::VersionConflict { .. }
                | Self::InvalidInput { .. }
        )
    }

    /// True when a referenced entity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PlanNotFound { .. }
                | Self::AreaNotFound { .. }
                | Self::ObjectiveNotFound { .. }
                | Self::TaskNotFound { .. }
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PlannerError::database(message).with_source(e))
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, PlannerError>;
