//! Progress rollup over the plan hierarchy.

use crate::models::{percentage, AreaNode, AreaProgress, PlanProgress, PlanTree, TaskStatus};

/// Computes status counts and completion percentages for a plan.
///
/// Objectives are not scored on their own; every area counts the tasks of
/// all of its objectives. Plan totals are the sums of the area counts, and
/// the overall percentage is computed from those sums rather than averaged
/// over areas, so small areas do not skew it.
pub struct ProgressAggregator;

impl ProgressAggregator {
    /// Aggregates the whole tree. Areas appear in tree order.
    pub fn aggregate(tree: &PlanTree) -> PlanProgress {
        let by_area: Vec<AreaProgress> = tree.areas.iter().map(Self::area).collect();

        let mut progress = PlanProgress::default();
        for area in &by_area {
            progress.total_tasks += area.total;
            progress.completed_tasks += area.completed;
            progress.in_progress_tasks += area.in_progress;
            progress.pending_tasks += area.pending;
            progress.blocked_tasks += area.blocked;
        }
        progress.overall_progress = percentage(progress.completed_tasks, progress.total_tasks);
        progress.by_area = by_area;
        progress
    }

    /// Counts the tasks of a single area.
    pub fn area(node: &AreaNode) -> AreaProgress {
        let mut progress = AreaProgress {
            area_id: node.area.id,
            area_name: node.area.name.clone(),
            ..Default::default()
        };

        for task in node.tasks() {
            progress.total += 1;
            match task.status {
                TaskStatus::Completed => progress.completed += 1,
                TaskStatus::InProgress => progress.in_progress += 1,
                TaskStatus::Pending => progress.pending += 1,
                TaskStatus::Blocked => progress.blocked += 1,
            }
        }
        progress.progress = percentage(progress.completed, progress.total);
        progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::{area, objective, plan, task};
    use crate::models::PlanTree;

    #[test]
    fn test_single_area_mixed_statuses() {
        let tree = PlanTree::assemble(
            plan(1),
            vec![area(10, 1, 0, "Operations")],
            vec![objective(100, 10, 0)],
            vec![
                task(1, 100, TaskStatus::Completed),
                task(2, 100, TaskStatus::Completed),
                task(3, 100, TaskStatus::InProgress),
                task(4, 100, TaskStatus::Blocked),
            ],
        );

        let progress = ProgressAggregator::aggregate(&tree);
        assert_eq!(progress.total_tasks, 4);
        assert_eq!(progress.completed_tasks, 2);
        assert_eq!(progress.in_progress_tasks, 1);
        assert_eq!(progress.blocked_tasks, 1);
        assert_eq!(progress.pending_tasks, 0);
        assert_eq!(progress.overall_progress, 50);
        assert_eq!(progress.by_area.len(), 1);
        assert_eq!(progress.by_area[0].progress, 50);
        assert_eq!(progress.by_area[0].area_name, "Operations");
    }

    #[test]
    fn test_empty_plan_reports_zeros() {
        let tree = PlanTree::assemble(plan(1), vec![], vec![], vec![]);
        let progress = ProgressAggregator::aggregate(&tree);
        assert_eq!(progress, PlanProgress::default());
        assert!(progress.by_area.is_empty());
    }

    #[test]
    fn test_area_without_tasks_is_zero() {
        let tree = PlanTree::assemble(
            plan(1),
            vec![area(10, 1, 0, "Finance")],
            vec![objective(100, 10, 0)],
            vec![],
        );
        let progress = ProgressAggregator::aggregate(&tree);
        assert_eq!(progress.by_area.len(), 1);
        assert_eq!(progress.by_area[0].total, 0);
        assert_eq!(progress.by_area[0].progress, 0);
        assert_eq!(progress.overall_progress, 0);
    }

    #[test]
    fn test_overall_uses_counts_not_area_average() {
        // Area A: 1 of 1 done (100%), area B: 0 of 3 done (0%).
        // Average of areas would be 50; counts give 25.
        let tree = PlanTree::assemble(
            plan(1),
            vec![area(10, 1, 0, "A"), area(20, 1, 1, "B")],
            vec![objective(100, 10, 0), objective(200, 20, 0)],
            vec![
                task(1, 100, TaskStatus::Completed),
                task(2, 200, TaskStatus::Pending),
                task(3, 200, TaskStatus::Pending),
                task(4, 200, TaskStatus::InProgress),
            ],
        );
        let progress = ProgressAggregator::aggregate(&tree);
        assert_eq!(progress.by_area[0].progress, 100);
        assert_eq!(progress.by_area[1].progress, 0);
        assert_eq!(progress.overall_progress, 25);
    }

    #[test]
    fn test_rollup_is_exact_across_objectives() {
        let tree = PlanTree::assemble(
            plan(1),
            vec![area(10, 1, 1, "Sales"), area(20, 1, 0, "Ops")],
            vec![
                objective(100, 10, 0),
                objective(101, 10, 1),
                objective(200, 20, 0),
            ],
            vec![
                task(1, 100, TaskStatus::Completed),
                task(2, 101, TaskStatus::Blocked),
                task(3, 101, TaskStatus::Pending),
                task(4, 200, TaskStatus::Completed),
                task(5, 200, TaskStatus::Completed),
                task(6, 200, TaskStatus::InProgress),
            ],
        );
        let progress = ProgressAggregator::aggregate(&tree);

        // Emitted by order index, not insertion order.
        assert_eq!(progress.by_area[0].area_name, "Ops");
        assert_eq!(progress.by_area[1].area_name, "Sales");

        let sum = |f: fn(&AreaProgress) -> u32| progress.by_area.iter().map(f).sum::<u32>();
        assert_eq!(sum(|a| a.total), progress.total_tasks);
        assert_eq!(sum(|a| a.completed), progress.completed_tasks);
        assert_eq!(sum(|a| a.in_progress), progress.in_progress_tasks);
        assert_eq!(sum(|a| a.pending), progress.pending_tasks);
        assert_eq!(sum(|a| a.blocked), progress.blocked_tasks);
        assert_eq!(progress.total_tasks, 6);
        assert_eq!(progress.overall_progress, 50);
        assert_eq!(progress.by_area[1].progress, 33);
        assert_eq!(progress.by_area[0].progress, 67);
    }
}
