//! Progress and timeline reports.

use log::debug;

use super::Planner;
use crate::{
    engine::{ProgressAggregator, TimelineProjector},
    error::Result,
    models::{PlanProgress, TimelineModel},
    params::Id,
};

impl Planner {
    /// Rolls task statuses up into per-area and overall progress.
    ///
    /// Overall progress counts every task of the plan equally; it is not an
    /// average of the area percentages.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::PlanNotFound` if the plan does not exist.
    pub async fn get_plan_progress(&self, params: &Id) -> Result<PlanProgress> {
        let tree = self.require_tree(params.id).await?;
        let progress = ProgressAggregator::aggregate(&tree);
        debug!(
            "Plan {} is {}% complete ({}/{} tasks)",
            params.id, progress.overall_progress, progress.completed_tasks, progress.total_tasks
        );
        Ok(progress)
    }

    /// Places the scheduled tasks of a plan on a shared date axis.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::PlanNotFound` if the plan does not exist.
    pub async fn get_plan_timeline(&self, params: &Id) -> Result<TimelineModel> {
        let tree = self.require_tree(params.id).await?;
        let timeline = TimelineProjector::project(tree.tasks());
        debug!(
            "Projected {} of {} tasks of plan {}",
            timeline.bars.len(),
            tree.task_count(),
            params.id
        );
        Ok(timeline)
    }
}
