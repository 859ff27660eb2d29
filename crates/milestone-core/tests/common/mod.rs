#![allow(dead_code)]

use milestone_core::{
    params::{CreateArea, CreateObjective, CreatePlan, CreateTask, SetTaskStatus},
    Planner, PlannerBuilder, Task, TransitionPolicy,
};
use tempfile::TempDir;

/// Helper function to create a test planner
pub async fn create_test_planner() -> (TempDir, Planner) {
    create_planner_with(TransitionPolicy::Permissive).await
}

pub async fn create_planner_with(policy: TransitionPolicy) -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_transition_policy(policy)
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

pub async fn create_plan(planner: &Planner, title: &str) -> u64 {
    planner
        .create_plan(&CreatePlan {
            title: title.to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to create plan")
        .id
}

pub async fn add_area(planner: &Planner, plan_id: u64, name: &str) -> u64 {
    planner
        .add_area(&CreateArea {
            plan_id,
            name: name.to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to add area")
        .id
}

pub async fn add_objective(planner: &Planner, area_id: u64, title: &str) -> u64 {
    planner
        .add_objective(&CreateObjective {
            area_id,
            title: title.to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to add objective")
        .id
}

/// Creates a plan holding a single area with a single objective and returns
/// `(plan_id, area_id, objective_id)`.
pub async fn seed_plan(planner: &Planner, title: &str) -> (u64, u64, u64) {
    let plan_id = create_plan(planner, title).await;
    let area_id = add_area(planner, plan_id, "Operations").await;
    let objective_id = add_objective(planner, area_id, "Cut lead time").await;
    (plan_id, area_id, objective_id)
}

pub async fn add_task(planner: &Planner, objective_id: u64, title: &str) -> Task {
    add_task_with(
        planner,
        CreateTask {
            objective_id,
            title: title.to_string(),
            ..Default::default()
        },
    )
    .await
}

pub async fn add_task_with(planner: &Planner, params: CreateTask) -> Task {
    planner.add_task(&params).await.expect("Failed to add task")
}

pub async fn set_status(planner: &Planner, id: u64, status: &str) -> Task {
    planner
        .set_task_status(&SetTaskStatus {
            id,
            status: status.to_string(),
            expected_version: None,
        })
        .await
        .expect("Failed to set task status")
}
