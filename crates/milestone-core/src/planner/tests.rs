//! Tests for the planner module.

use super::*;
use crate::{
    models::{PlanStatus, TaskStatus},
    params::{
        CreateArea, CreateObjective, CreatePlan, CreateTask, CreateTaskKpi, Id, ListPlans,
        SetPlanStatus, SetTaskDependency, SetTaskStatus, UpdateKpiValue,
    },
};
use tempfile::TempDir;

/// Helper function to create a test planner
async fn create_test_planner() -> (TempDir, Planner) {
    create_planner_with(TransitionPolicy::Permissive).await
}

async fn create_planner_with(policy: TransitionPolicy) -> (TempDir, Planner) {
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

/// Creates a plan with one area and one objective, returning
/// `(plan_id, objective_id)`.
async fn seed_objective(planner: &Planner) -> (u64, u64) {
    let plan = planner
        .create_plan(&CreatePlan {
            title: "Test Plan".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to create plan");
    let area = planner
        .add_area(&CreateArea {
            plan_id: plan.id,
            name: "Operations".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to add area");
    let objective = planner
        .add_objective(&CreateObjective {
            area_id: area.id,
            title: "Streamline fulfilment".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to add objective");
    (plan.id, objective.id)
}

async fn add_task(planner: &Planner, objective_id: u64, title: &str, depends_on: Option<u64>) -> u64 {
    planner
        .add_task(&CreateTask {
            objective_id,
            title: title.to_string(),
            depends_on,
            ..Default::default()
        })
        .await
        .expect("Failed to add task")
        .id
}

async fn set_status(planner: &Planner, id: u64, status: &str) -> crate::error::Result<crate::models::Task> {
    planner
        .set_task_status(&SetTaskStatus {
            id,
            status: status.to_string(),
            expected_version: None,
        })
        .await
}

#[tokio::test]
async fn test_create_plan_starts_as_draft() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = planner
        .create_plan(&CreatePlan {
            title: "  Growth plan  ".to_string(),
            description: Some("First year".to_string()),
            ..Default::default()
        })
        .await
        .expect("Failed to create plan");

    assert_eq!(plan.title, "Growth plan");
    assert_eq!(plan.status, PlanStatus::Draft);
    assert_eq!(plan.horizon_months, 6);

    let fetched = planner
        .get_plan(&Id { id: plan.id })
        .await
        .expect("Failed to get plan")
        .expect("Plan should exist");
    assert_eq!(fetched, plan);
}

#[tokio::test]
async fn test_create_plan_rejects_blank_title() {
    let (_temp_dir, planner) = create_test_planner().await;

    let result = planner
        .create_plan(&CreatePlan {
            title: "   ".to_string(),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(PlannerError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_list_plans_carries_progress() {
    let (_temp_dir, planner) = create_test_planner().await;
    let (plan_id, objective_id) = seed_objective(&planner).await;

    let first = add_task(&planner, objective_id, "First", None).await;
    add_task(&planner, objective_id, "Second", None).await;
    set_status(&planner, first, "completed").await.expect("Failed to complete task");

    let summaries = planner
        .list_plans(&ListPlans::default())
        .await
        .expect("Failed to list plans");

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].id, plan_id);
    assert_eq!(summaries[0].total_tasks, 2);
    assert_eq!(summaries[0].completed_tasks, 1);
    assert_eq!(summaries[0].overall_progress, 50);
}

#[tokio::test]
async fn test_list_plans_filters_by_status() {
    let (_temp_dir, planner) = create_test_planner().await;
    let (plan_id, _) = seed_objective(&planner).await;
    planner
        .create_plan(&CreatePlan {
            title: "Another".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to create plan");

    planner
        .set_plan_status(&SetPlanStatus {
            id: plan_id,
            status: "active".to_string(),
        })
        .await
        .expect("Failed to activate plan");

    let active = planner
        .list_plans(&ListPlans {
            status: Some("active".to_string()),
        })
        .await
        .expect("Failed to list plans");
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, plan_id);

    let bogus = planner
        .list_plans(&ListPlans {
            status: Some("paused".to_string()),
        })
        .await;
    assert!(matches!(bogus, Err(PlannerError::InvalidState { .. })));
}

#[tokio::test]
async fn test_set_plan_status_missing_plan() {
    let (_temp_dir, planner) = create_test_planner().await;

    let result = planner
        .set_plan_status(&SetPlanStatus {
            id: 42,
            status: "active".to_string(),
        })
        .await;

    assert!(matches!(result, Err(PlannerError::PlanNotFound { id: 42 })));
}

#[tokio::test]
async fn test_status_change_bumps_version_and_stamps_completion() {
    let (_temp_dir, planner) = create_test_planner().await;
    let (_, objective_id) = seed_objective(&planner).await;
    let id = add_task(&planner, objective_id, "Ship", None).await;

    let done = set_status(&planner, id, "completed").await.expect("Failed to complete");
    assert_eq!(done.status, TaskStatus::Completed);
    assert!(done.completed_at.is_some());
    assert_eq!(done.version, 1);

    let reopened = set_status(&planner, id, "in_progress").await.expect("Failed to reopen");
    assert_eq!(reopened.status, TaskStatus::InProgress);
    assert!(reopened.completed_at.is_none());
    assert_eq!(reopened.version, 2);
}

#[tokio::test]
async fn test_setting_same_status_is_idempotent() {
    let (_temp_dir, planner) = create_test_planner().await;
    let (_, objective_id) = seed_objective(&planner).await;
    let id = add_task(&planner, objective_id, "Ship", None).await;

    let first = set_status(&planner, id, "completed").await.expect("Failed to complete");
    let second = set_status(&planner, id, "completed").await.expect("Failed to repeat");

    assert_eq!(first, second);
    assert_eq!(second.version, 1);
}

#[tokio::test]
async fn test_stale_expected_version_is_rejected() {
    let (_temp_dir, planner) = create_test_planner().await;
    let (_, objective_id) = seed_objective(&planner).await;
    let id = add_task(&planner, objective_id, "Ship", None).await;
    set_status(&planner, id, "in_progress").await.expect("Failed to start");

    let result = planner
        .set_task_status(&SetTaskStatus {
            id,
            status: "completed".to_string(),
            expected_version: Some(0),
        })
        .await;

    assert!(matches!(
        result,
        Err(PlannerError::VersionConflict {
            task_id,
            expected: 0,
            actual: 1,
        }) if task_id == id
    ));

    let task = planner
        .get_task(&Id { id })
        .await
        .expect("Failed to get task")
        .expect("Task should exist");
    assert_eq!(task.status, TaskStatus::InProgress);
}

#[tokio::test]
async fn test_strict_policy_waits_for_predecessor() {
    let (_temp_dir, planner) = create_planner_with(TransitionPolicy::Strict).await;
    let (_, objective_id) = seed_objective(&planner).await;
    let first = add_task(&planner, objective_id, "Design", None).await;
    let second = add_task(&planner, objective_id, "Build", Some(first)).await;

    let result = set_status(&planner, second, "in_progress").await;
    assert!(matches!(
        result,
        Err(PlannerError::PredecessorIncomplete { predecessor_id, .. }) if predecessor_id == first
    ));

    // Blocking is never gated
    set_status(&planner, second, "blocked").await.expect("Failed to block");

    set_status(&planner, first, "completed").await.expect("Failed to complete");
    let started = set_status(&planner, second, "in_progress").await.expect("Failed to start");
    assert_eq!(started.status, TaskStatus::InProgress);
}

#[tokio::test]
async fn test_permissive_policy_allows_any_order() {
    let (_temp_dir, planner) = create_test_planner().await;
    let (_, objective_id) = seed_objective(&planner).await;
    let first = add_task(&planner, objective_id, "Design", None).await;
    let second = add_task(&planner, objective_id, "Build", Some(first)).await;

    let done = set_status(&planner, second, "completed").await.expect("Failed to complete");
    assert_eq!(done.status, TaskStatus::Completed);
}

#[tokio::test]
async fn test_set_dependency_rejects_self_reference() {
    let (_temp_dir, planner) = create_test_planner().await;
    let (_, objective_id) = seed_objective(&planner).await;
    let id = add_task(&planner, objective_id, "Loop", None).await;

    let result = planner
        .set_task_dependency(&SetTaskDependency {
            id,
            depends_on: Some(id),
            expected_version: None,
        })
        .await;

    assert!(matches!(result, Err(PlannerError::SelfReference { .. })));
}

#[tokio::test]
async fn test_clearing_dependency() {
    let (_temp_dir, planner) = create_test_planner().await;
    let (_, objective_id) = seed_objective(&planner).await;
    let first = add_task(&planner, objective_id, "Design", None).await;
    let second = add_task(&planner, objective_id, "Build", Some(first)).await;

    let task = planner
        .set_task_dependency(&SetTaskDependency {
            id: second,
            depends_on: None,
            expected_version: None,
        })
        .await
        .expect("Failed to clear dependency");

    assert_eq!(task.depends_on, None);
    assert_eq!(task.version, 1);
}

#[tokio::test]
async fn test_delete_task_clears_dependents() {
    let (_temp_dir, planner) = create_test_planner().await;
    let (_, objective_id) = seed_objective(&planner).await;
    let first = add_task(&planner, objective_id, "Design", None).await;
    let second = add_task(&planner, objective_id, "Build", Some(first)).await;

    let deleted = planner
        .delete_task(&Id { id: first })
        .await
        .expect("Failed to delete task");
    assert_eq!(deleted.task.id, first);
    assert_eq!(deleted.cleared_dependents, vec![second]);

    let dependent = planner
        .get_task(&Id { id: second })
        .await
        .expect("Failed to get task")
        .expect("Dependent should survive");
    assert_eq!(dependent.depends_on, None);
    assert_eq!(dependent.version, 1);

    let missing = planner.delete_task(&Id { id: first }).await;
    assert!(matches!(missing, Err(PlannerError::TaskNotFound { .. })));
}

#[tokio::test]
async fn test_eligible_tasks_follow_predecessors() {
    let (_temp_dir, planner) = create_test_planner().await;
    let (plan_id, objective_id) = seed_objective(&planner).await;
    let first = add_task(&planner, objective_id, "Design", None).await;
    let second = add_task(&planner, objective_id, "Build", Some(first)).await;
    let third = add_task(&planner, objective_id, "Market", None).await;

    let ready = planner
        .eligible_tasks(&Id { id: plan_id })
        .await
        .expect("Failed to list eligible tasks");
    let ids: Vec<u64> = ready.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![first, third]);

    set_status(&planner, first, "completed").await.expect("Failed to complete");
    let ready = planner
        .eligible_tasks(&Id { id: plan_id })
        .await
        .expect("Failed to list eligible tasks");
    let ids: Vec<u64> = ready.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![second, third]);
}

#[tokio::test]
async fn test_reports_require_existing_plan() {
    let (_temp_dir, planner) = create_test_planner().await;

    let progress = planner.get_plan_progress(&Id { id: 7 }).await;
    assert!(matches!(progress, Err(PlannerError::PlanNotFound { id: 7 })));

    let timeline = planner.get_plan_timeline(&Id { id: 7 }).await;
    assert!(matches!(timeline, Err(PlannerError::PlanNotFound { id: 7 })));

    let eligible = planner.eligible_tasks(&Id { id: 7 }).await;
    assert!(matches!(eligible, Err(PlannerError::PlanNotFound { id: 7 })));
}

#[tokio::test]
async fn test_task_kpis() {
    let (_temp_dir, planner) = create_test_planner().await;
    let (_, objective_id) = seed_objective(&planner).await;
    let task_id = add_task(&planner, objective_id, "Reduce churn", None).await;

    let kpi = planner
        .add_task_kpi(&CreateTaskKpi {
            task_id,
            name: "Churn".to_string(),
            target_value: Some(5.0),
            current_value: None,
            unit: Some("%".to_string()),
        })
        .await
        .expect("Failed to add KPI");

    let updated = planner
        .update_task_kpi_value(&UpdateKpiValue {
            id: kpi.id,
            current_value: Some(7.5),
        })
        .await
        .expect("Failed to update KPI")
        .expect("KPI should exist");
    assert_eq!(updated.current_value, Some(7.5));

    let kpis = planner
        .list_task_kpis(&Id { id: task_id })
        .await
        .expect("Failed to list KPIs");
    assert_eq!(kpis.len(), 1);
    assert_eq!(kpis[0], updated);

    let missing = planner
        .update_task_kpi_value(&UpdateKpiValue {
            id: 999,
            current_value: Some(1.0),
        })
        .await
        .expect("Update of a missing KPI should not fail");
    assert!(missing.is_none());
}
