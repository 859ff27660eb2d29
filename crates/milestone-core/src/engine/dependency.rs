//! Single-predecessor dependency validation.

use std::collections::HashMap;

use crate::error::{PlannerError, Result};

/// The identity of a task together with the plan that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskLink {
    pub id: u64,
    pub plan_id: u64,
}

/// Decides whether a `depends_on` edge may be stored.
///
/// Each task has at most one predecessor, so the predecessor graph of a plan
/// must stay a forest: no self references, no edges across plans, no paths
/// leading back to the origin.
pub struct DependencyValidator;

impl DependencyValidator {
    /// Validates making `task` depend on `candidate`.
    ///
    /// `links` maps every task of the plan to its current predecessor. The
    /// walk from the candidate is bounded by the number of tasks in the plan;
    /// running past that bound means the stored graph already loops and is
    /// reported as a cycle as well.
    ///
    /// # Errors
    ///
    /// * [`PlannerError::SelfReference`] when `candidate` is `task`
    /// * [`PlannerError::CrossPlan`] when the two tasks belong to different plans
    /// * [`PlannerError::Cycle`] when following predecessors from `candidate`
    ///   reaches `task`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use milestone_core::engine::{DependencyValidator, TaskLink};
    ///
    /// // 2 depends on 1; making 1 depend on 2 closes a loop.
    /// let links = HashMap::from([(1, None), (2, Some(1))]);
    /// let task = TaskLink { id: 1, plan_id: 7 };
    /// let candidate = TaskLink { id: 2, plan_id: 7 };
    /// assert!(DependencyValidator::validate(task, candidate, &links).is_err());
    /// ```
    pub fn validate(
        task: TaskLink,
        candidate: TaskLink,
        links: &HashMap<u64, Option<u64>>,
    ) -> Result<()> {
        if candidate.id == task.id {
            return Err(PlannerError::SelfReference { task_id: task.id });
        }

        if candidate.plan_id != task.plan_id {
            return Err(PlannerError::CrossPlan {
                task_id: task.id,
                task_plan_id: task.plan_id,
                predecessor_id: candidate.id,
                predecessor_plan_id: candidate.plan_id,
            });
        }

        let cycle = || PlannerError::Cycle {
            task_id: task.id,
            predecessor_id: candidate.id,
        };

        let bound = links.len().max(1);
        let mut current = candidate.id;
        for _ in 0..bound {
            match links.get(&current).copied().flatten() {
                Some(next) if next == task.id => return Err(cycle()),
                Some(next) => current = next,
                None => return Ok(()),
            }
        }

        Err(cycle())
    }

    /// Length of the predecessor chain starting at `start`, or `None` when
    /// the chain does not terminate within `links.len()` steps.
    pub fn chain_length(start: u64, links: &HashMap<u64, Option<u64>>) -> Option<usize> {
        let mut current = start;
        for steps in 0..=links.len() {
            match links.get(&current).copied().flatten() {
                Some(next) => current = next,
                None => return Some(steps),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(id: u64) -> TaskLink {
        TaskLink { id, plan_id: 1 }
    }

    #[test]
    fn test_accepts_independent_predecessor() {
        let links = HashMap::from([(1, None), (2, None), (3, Some(2))]);
        assert!(DependencyValidator::validate(link(1), link(3), &links).is_ok());
    }

    #[test]
    fn test_rejects_self_reference() {
        let links = HashMap::from([(1, None)]);
        let err = DependencyValidator::validate(link(1), link(1), &links).unwrap_err();
        assert!(matches!(err, PlannerError::SelfReference { task_id: 1 }));
    }

    #[test]
    fn test_rejects_cross_plan() {
        let links = HashMap::from([(1, None)]);
        let other = TaskLink { id: 9, plan_id: 2 };
        let err = DependencyValidator::validate(link(1), other, &links).unwrap_err();
        assert!(matches!(
            err,
            PlannerError::CrossPlan {
                task_plan_id: 1,
                predecessor_plan_id: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_direct_cycle() {
        // X (1) depends on Y (2); Y may not depend on X.
        let links = HashMap::from([(1, Some(2)), (2, None)]);
        let err = DependencyValidator::validate(link(2), link(1), &links).unwrap_err();
        assert!(matches!(
            err,
            PlannerError::Cycle {
                task_id: 2,
                predecessor_id: 1
            }
        ));
    }

    #[test]
    fn test_rejects_transitive_cycle() {
        // 3 -> 2 -> 1; making 1 depend on 3 loops.
        let links = HashMap::from([(1, None), (2, Some(1)), (3, Some(2))]);
        let err = DependencyValidator::validate(link(1), link(3), &links).unwrap_err();
        assert!(matches!(err, PlannerError::Cycle { .. }));
    }

    #[test]
    fn test_existing_loop_exhausts_bound() {
        // Corrupt data: 2 and 3 already point at each other.
        let links = HashMap::from([(1, None), (2, Some(3)), (3, Some(2))]);
        let err = DependencyValidator::validate(link(1), link(2), &links).unwrap_err();
        assert!(matches!(err, PlannerError::Cycle { .. }));
    }

    #[test]
    fn test_replacing_existing_edge_is_allowed() {
        // 1 currently depends on 2; re-pointing it at 3 is fine.
        let links = HashMap::from([(1, Some(2)), (2, None), (3, None)]);
        assert!(DependencyValidator::validate(link(1), link(3), &links).is_ok());
    }

    #[test]
    fn test_chain_length() {
        let links = HashMap::from([(1, None), (2, Some(1)), (3, Some(2))]);
        assert_eq!(DependencyValidator::chain_length(3, &links), Some(2));
        assert_eq!(DependencyValidator::chain_length(1, &links), Some(0));

        let looped = HashMap::from([(1, Some(2)), (2, Some(1))]);
        assert_eq!(DependencyValidator::chain_length(1, &looped), None);
    }
}
