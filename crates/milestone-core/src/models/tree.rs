//! Explicit plan hierarchy.
//!
//! A [`PlanTree`] owns its areas, each area owns its objectives and each
//! objective owns its tasks. Aggregation and projection are pure functions of
//! a tree, so nothing downstream performs ambient lookups.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Area, Objective, Plan, Task};

/// A plan together with its full Area → Objective → Task subtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanTree {
    pub plan: Plan,
    pub areas: Vec<AreaNode>,
}

/// An area and the objectives it owns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AreaNode {
    pub area: Area,
    pub objectives: Vec<ObjectiveNode>,
}

/// An objective and the tasks it owns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObjectiveNode {
    pub objective: Objective,
    pub tasks: Vec<Task>,
}

impl PlanTree {
    /// Assembles a tree from flat record lists.
    ///
    /// Children are grouped under their parent identifier and sorted by
    /// `(order, created_at, id)`. Records whose parent is not part of this
    /// plan are dropped.
    pub fn assemble(
        plan: Plan,
        areas: Vec<Area>,
        objectives: Vec<Objective>,
        tasks: Vec<Task>,
    ) -> Self {
        let mut tasks_by_objective: HashMap<u64, Vec<Task>> = HashMap::new();
        for task in tasks {
            tasks_by_objective
                .entry(task.objective_id)
                .or_default()
                .push(task);
        }

        let mut objectives_by_area: HashMap<u64, Vec<ObjectiveNode>> = HashMap::new();
        for objective in objectives {
            let mut tasks = tasks_by_objective.remove(&objective.id).unwrap_or_default();
            tasks.sort_by_key(|t| (t.order, t.created_at, t.id));
            objectives_by_area
                .entry(objective.area_id)
                .or_default()
                .push(ObjectiveNode { objective, tasks });
        }

        let mut areas: Vec<AreaNode> = areas
            .into_iter()
            .filter(|area| area.plan_id == plan.id)
            .map(|area| {
                let mut objectives = objectives_by_area.remove(&area.id).unwrap_or_default();
                objectives.sort_by_key(|o| {
                    (o.objective.order, o.objective.created_at, o.objective.id)
                });
                AreaNode { area, objectives }
            })
            .collect();
        areas.sort_by_key(|a| (a.area.order, a.area.created_at, a.area.id));

        Self { plan, areas }
    }

    /// All tasks of the plan in hierarchy order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> + '_ {
        self.areas.iter().flat_map(|area| area.tasks())
    }

    pub fn task_count(&self) -> usize {
        self.tasks().count()
    }

    /// Looks up a task of this plan by ID.
    pub fn task(&self, id: u64) -> Option<&Task> {
        self.tasks().find(|t| t.id == id)
    }

    /// Maps every task of the plan to its predecessor.
    pub fn dependency_links(&self) -> HashMap<u64, Option<u64>> {
        self.tasks().map(|t| (t.id, t.depends_on)).collect()
    }

    /// Open tasks whose predecessor is absent or completed, in hierarchy
    /// order.
    pub fn ready_tasks(&self) -> Vec<&Task> {
        self.tasks()
            .filter(|task| !task.is_completed())
            .filter(|task| {
                task.depends_on
                    .and_then(|pred| self.task(pred))
                    .map_or(true, Task::is_completed)
            })
            .collect()
    }
}

impl AreaNode {
    /// Tasks of all objectives of this area, flattened.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> + '_ {
        self.objectives.iter().flat_map(|o| o.tasks.iter())
    }
}
