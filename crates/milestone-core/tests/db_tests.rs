use jiff::civil::date;
use milestone_core::{
    models::{Complexity, PlanStatus, Priority},
    params::CreateTask,
    Database, PlannerError, TaskStatus, TransitionPolicy,
};
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

/// Creates a plan with one area and one objective, returning
/// `(plan_id, objective_id)`.
fn seed(db: &mut Database) -> (u64, u64) {
    let plan = db
        .create_plan("Roadmap", None, 6, Complexity::Medium)
        .expect("Failed to create plan");
    let area = db
        .add_area(plan.id, "Finance", None, Some(8.0))
        .expect("Failed to add area");
    let objective = db
        .add_objective(area.id, "Close books faster", None, Priority::High)
        .expect("Failed to add objective");
    (plan.id, objective.id)
}

fn insert_task(db: &mut Database, objective_id: u64, title: &str, depends_on: Option<u64>) -> u64 {
    let new_task = CreateTask {
        objective_id,
        title: title.to_string(),
        depends_on,
        ..Default::default()
    }
    .validate()
    .expect("Task parameters should be valid");
    db.add_task(&new_task).expect("Failed to add task").id
}

#[test]
fn test_database_initialization() {
    let (temp_file, _db) = create_test_db();
    assert!(temp_file.path().exists());

    // Opening the same file again must not fail on the existing schema
    Database::new(temp_file.path()).expect("Failed to reopen database");
}

#[test]
fn test_create_and_get_plan() {
    let (_temp_file, db) = create_test_db();

    let plan = db
        .create_plan("Growth", Some("Year one"), 12, Complexity::Advanced)
        .expect("Failed to create plan");
    assert!(plan.id > 0);
    assert_eq!(plan.status, PlanStatus::Draft);

    let fetched = db
        .get_plan(plan.id)
        .expect("Failed to get plan")
        .expect("Plan should exist");
    assert_eq!(fetched, plan);
    assert!(db.get_plan(plan.id + 1).expect("Failed to get plan").is_none());
}

#[test]
fn test_areas_and_objectives_append_in_order() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db
        .create_plan("Ordering", None, 6, Complexity::Basic)
        .expect("Failed to create plan");

    let first = db.add_area(plan.id, "First", None, None).expect("Failed to add area");
    let second = db.add_area(plan.id, "Second", None, None).expect("Failed to add area");
    assert_eq!(first.order, 0);
    assert_eq!(second.order, 1);

    let objective = db
        .add_objective(second.id, "Goal", None, Priority::Low)
        .expect("Failed to add objective");
    assert_eq!(objective.order, 0);
    assert_eq!(objective.area_id, second.id);

    let missing = db.add_area(999, "Nowhere", None, None);
    assert!(matches!(missing, Err(PlannerError::PlanNotFound { id: 999 })));
    let missing = db.add_objective(999, "Nowhere", None, Priority::Low);
    assert!(matches!(missing, Err(PlannerError::AreaNotFound { id: 999 })));
}

#[test]
fn test_new_task_defaults() {
    let (_temp_file, mut db) = create_test_db();
    let (_, objective_id) = seed(&mut db);

    let id = insert_task(&mut db, objective_id, "Reconcile accounts", None);
    let task = db
        .get_task(id)
        .expect("Failed to get task")
        .expect("Task should exist");

    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.version, 0);
    assert!(task.completed_at.is_none());
    assert_eq!(task.metadata, serde_json::json!({}));
}

#[test]
fn test_task_plan_lookup() {
    let (_temp_file, mut db) = create_test_db();
    let (plan_id, objective_id) = seed(&mut db);
    let id = insert_task(&mut db, objective_id, "Find my plan", None);

    assert_eq!(db.get_task_plan_id(id).expect("Failed to resolve plan"), Some(plan_id));
    assert_eq!(db.get_task_plan_id(id + 100).expect("Failed to resolve plan"), None);
}

#[test]
fn test_set_task_status_round_trip() {
    let (_temp_file, mut db) = create_test_db();
    let (_, objective_id) = seed(&mut db);
    let id = insert_task(&mut db, objective_id, "Close Q1", None);

    let done = db
        .set_task_status(id, TaskStatus::Completed, Some(0), TransitionPolicy::Permissive)
        .expect("Failed to complete task");
    assert!(done.completed_at.is_some());
    assert_eq!(done.version, 1);

    let again = db
        .set_task_status(id, TaskStatus::Completed, None, TransitionPolicy::Permissive)
        .expect("Repeating a status should succeed");
    assert_eq!(again, done);

    let stale = db.set_task_status(id, TaskStatus::Pending, Some(0), TransitionPolicy::Permissive);
    assert!(matches!(
        stale,
        Err(PlannerError::VersionConflict {
            expected: 0,
            actual: 1,
            ..
        })
    ));
}

#[test]
fn test_set_task_schedule() {
    let (_temp_file, mut db) = create_test_db();
    let (_, objective_id) = seed(&mut db);
    let id = insert_task(&mut db, objective_id, "Audit", None);

    let task = db
        .set_task_schedule(id, Some(date(2025, 4, 1)), Some(date(2025, 4, 30)), None)
        .expect("Failed to schedule task");
    assert_eq!(task.schedule(), Some((date(2025, 4, 1), date(2025, 4, 30))));
    assert_eq!(task.version, 1);

    let unchanged = db
        .set_task_schedule(id, Some(date(2025, 4, 1)), Some(date(2025, 4, 30)), None)
        .expect("Failed to reschedule task");
    assert_eq!(unchanged.version, 1);

    let cleared = db
        .set_task_schedule(id, None, None, Some(1))
        .expect("Failed to clear schedule");
    assert_eq!(cleared.schedule(), None);
    assert_eq!(cleared.version, 2);
}

#[test]
fn test_dependency_validation_in_store() {
    let (_temp_file, mut db) = create_test_db();
    let (_, objective_id) = seed(&mut db);
    let a = insert_task(&mut db, objective_id, "A", None);
    let b = insert_task(&mut db, objective_id, "B", Some(a));
    let c = insert_task(&mut db, objective_id, "C", Some(b));

    let cycle = db.set_task_dependency(a, Some(c), None);
    assert!(matches!(cycle, Err(PlannerError::Cycle { .. })));

    let own = db.set_task_dependency(b, Some(b), None);
    assert!(matches!(own, Err(PlannerError::SelfReference { .. })));

    // Reassigning the current predecessor writes nothing
    let same = db
        .set_task_dependency(c, Some(b), None)
        .expect("Same predecessor should be accepted");
    assert_eq!(same.version, 0);

    let moved = db
        .set_task_dependency(c, Some(a), None)
        .expect("Failed to move dependency");
    assert_eq!(moved.depends_on, Some(a));
    assert_eq!(moved.version, 1);
}

#[test]
fn test_delete_task_reports_cleared_dependents() {
    let (_temp_file, mut db) = create_test_db();
    let (_, objective_id) = seed(&mut db);
    let a = insert_task(&mut db, objective_id, "A", None);
    let b = insert_task(&mut db, objective_id, "B", Some(a));
    let c = insert_task(&mut db, objective_id, "C", Some(a));

    let deleted = db
        .delete_task(a)
        .expect("Failed to delete task")
        .expect("Task should have existed");
    assert_eq!(deleted.cleared_dependents, vec![b, c]);

    for id in [b, c] {
        let task = db
            .get_task(id)
            .expect("Failed to get task")
            .expect("Dependent should survive");
        assert_eq!(task.depends_on, None);
        assert_eq!(task.version, 1);
    }

    assert!(db.delete_task(a).expect("Failed to delete task").is_none());
}

#[test]
fn test_list_plans_with_counts() {
    let (_temp_file, mut db) = create_test_db();
    let (plan_id, objective_id) = seed(&mut db);
    let a = insert_task(&mut db, objective_id, "A", None);
    insert_task(&mut db, objective_id, "B", None);
    insert_task(&mut db, objective_id, "C", None);
    db.set_task_status(a, TaskStatus::Completed, None, TransitionPolicy::Permissive)
        .expect("Failed to complete task");

    db.create_plan("Empty", None, 3, Complexity::Basic)
        .expect("Failed to create plan");

    let summaries = db.list_plans(None).expect("Failed to list plans");
    assert_eq!(summaries.len(), 2);

    let roadmap = summaries
        .iter()
        .find(|s| s.id == plan_id)
        .expect("Roadmap should be listed");
    assert_eq!(roadmap.total_tasks, 3);
    assert_eq!(roadmap.completed_tasks, 1);
    assert_eq!(roadmap.overall_progress, 33);

    let active = db
        .list_plans(Some(PlanStatus::Active))
        .expect("Failed to list plans");
    assert!(active.is_empty());
}

#[test]
fn test_load_plan_tree() {
    let (_temp_file, mut db) = create_test_db();
    let (plan_id, objective_id) = seed(&mut db);
    insert_task(&mut db, objective_id, "A", None);
    insert_task(&mut db, objective_id, "B", None);

    let tree = db
        .load_plan_tree(plan_id)
        .expect("Failed to load tree")
        .expect("Plan should exist");
    assert_eq!(tree.areas.len(), 1);
    assert_eq!(tree.areas[0].area.target_score, Some(8.0));
    assert_eq!(tree.areas[0].objectives[0].objective.priority, Priority::High);
    let titles: Vec<&str> = tree.tasks().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B"]);

    assert!(db.load_plan_tree(plan_id + 1).expect("Failed to load tree").is_none());
}

#[test]
fn test_task_kpis() {
    let (_temp_file, mut db) = create_test_db();
    let (_, objective_id) = seed(&mut db);
    let task_id = insert_task(&mut db, objective_id, "Collect receivables", None);

    let kpi = db
        .add_task_kpi(task_id, "DSO", Some(45.0), Some(60.0), Some("days"))
        .expect("Failed to add KPI");
    let updated = db
        .update_task_kpi_value(kpi.id, Some(52.0))
        .expect("Failed to update KPI")
        .expect("KPI should exist");
    assert_eq!(updated.current_value, Some(52.0));

    let kpis = db.list_task_kpis(task_id).expect("Failed to list KPIs");
    assert_eq!(kpis, vec![updated]);

    let missing = db.add_task_kpi(task_id + 50, "Orphan", None, None, None);
    assert!(matches!(missing, Err(PlannerError::TaskNotFound { .. })));

    // KPIs go with their task
    db.delete_task(task_id).expect("Failed to delete task");
    assert!(db
        .update_task_kpi_value(kpi.id, Some(1.0))
        .expect("Failed to update KPI")
        .is_none());
}
