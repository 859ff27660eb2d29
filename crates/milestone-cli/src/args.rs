use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{AreaCommands, KpiCommands, ObjectiveCommands, PlanCommands, TaskCommands};

/// Command-line interface for the Milestone plan engine
///
/// Milestone breaks action plans down into areas, objectives and tasks,
/// rolls task statuses up into progress reports and lays scheduled tasks out
/// on a timeline. It can be used directly from the terminal or run as an MCP
/// (Model Context Protocol) server for dashboards and AI assistants.
#[derive(Parser)]
#[command(version, about, name = "ms")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/milestone/milestone.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Refuse to start or complete a task before its predecessor is completed
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
///
/// - `plan`: plan lifecycle and reports (progress, timeline)
/// - `area` / `objective`: the structure of a plan
/// - `task`: tasks, their status, predecessor and schedule
/// - `kpi`: indicators attached to tasks
/// - `serve`: run the MCP server on stdio
#[derive(Subcommand)]
pub enum Commands {
    /// Manage plans and read their reports
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage the areas of a plan
    #[command(alias = "a")]
    Area {
        #[command(subcommand)]
        command: AreaCommands,
    },
    /// Manage the objectives of an area
    #[command(alias = "o")]
    Objective {
        #[command(subcommand)]
        command: ObjectiveCommands,
    },
    /// Manage tasks
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Manage task KPIs
    #[command(alias = "k")]
    Kpi {
        #[command(subcommand)]
        command: KpiCommands,
    },
    /// Start the MCP server
    Serve,
}
