//! Milestone CLI Application
//!
//! Command-line and MCP front end for the milestone plan engine.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, MilestoneMcpServer};
use milestone_core::{params::ListPlans, PlannerBuilder, TransitionPolicy};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        strict,
        command,
    } = Args::parse();

    let policy = if strict {
        TransitionPolicy::Strict
    } else {
        TransitionPolicy::Permissive
    };

    let planner = PlannerBuilder::new()
        .with_database_path(database_file)
        .with_transition_policy(policy)
        .build()
        .await
        .context("Failed to initialize planner")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Milestone started");

    match command {
        Some(Plan { command }) => {
            Cli::new(planner, renderer)
                .handle_plan_command(command)
                .await
        }
        Some(Area { command }) => {
            Cli::new(planner, renderer)
                .handle_area_command(command)
                .await
        }
        Some(Objective { command }) => {
            Cli::new(planner, renderer)
                .handle_objective_command(command)
                .await
        }
        Some(Task { command }) => {
            Cli::new(planner, renderer)
                .handle_task_command(command)
                .await
        }
        Some(Kpi { command }) => {
            Cli::new(planner, renderer)
                .handle_kpi_command(command)
                .await
        }
        Some(Serve) => {
            info!("Starting Milestone MCP server");
            run_stdio_server(MilestoneMcpServer::new(planner))
                .await
                .context("MCP server failed")
        }
        None => {
            Cli::new(planner, renderer)
                .list_plans(&ListPlans::default())
                .await
        }
    }
}
