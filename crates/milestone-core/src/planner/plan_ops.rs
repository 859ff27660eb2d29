//! Plan lifecycle operations.

use log::{debug, info};

use super::Planner;
use crate::{
    display::PlanSummaries,
    error::{PlannerError, Result},
    models::{Plan, PlanTree},
    params::{CreatePlan, Id, ListPlans, SetPlanStatus},
};

impl Planner {
    /// Creates a new plan in draft status.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` for an empty title, a zero horizon
    /// or an unknown complexity tier.
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<Plan> {
        let complexity = params.validate()?;
        let params = params.clone();

        let plan = self
            .with_db(move |db| {
                db.create_plan(
                    params.title.trim(),
                    params.description.as_deref(),
                    params.horizon_months,
                    complexity,
                )
            })
            .await?;

        info!("Created plan {} '{}'", plan.id, plan.title);
        Ok(plan)
    }

    /// Fetches a plan without its hierarchy.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<Plan>> {
        let id = params.id;
        debug!("Fetching plan {id}");
        self.with_db(move |db| db.get_plan(id)).await
    }

    /// Loads a plan with all its areas, objectives and tasks.
    pub async fn get_plan_tree(&self, params: &Id) -> Result<Option<PlanTree>> {
        let id = params.id;
        debug!("Loading tree of plan {id}");
        self.with_db(move |db| db.load_plan_tree(id)).await
    }

    /// Lists plans with their task counts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidState` for an unknown status filter.
    pub async fn list_plans(&self, params: &ListPlans) -> Result<PlanSummaries> {
        let status = params.validate()?;
        let summaries = self.with_db(move |db| db.list_plans(status)).await?;
        debug!("Listed {} plans", summaries.len());
        Ok(PlanSummaries(summaries))
    }

    /// Moves a plan to a new lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::PlanNotFound` if the plan does not exist.
    pub async fn set_plan_status(&self, params: &SetPlanStatus) -> Result<Plan> {
        let status = params.validate()?;
        let id = params.id;

        let plan = self
            .with_db(move |db| db.set_plan_status(id, status))
            .await?
            .ok_or(PlannerError::PlanNotFound { id })?;

        info!("Plan {id} is now {status}");
        Ok(plan)
    }

    /// Deletes a plan and everything it owns.
    ///
    /// Returns the deleted plan, or `None` if it did not exist.
    pub async fn delete_plan(&self, params: &Id) -> Result<Option<Plan>> {
        let id = params.id;
        let deleted = self.with_db(move |db| db.delete_plan(id)).await?;

        if deleted.is_some() {
            info!("Deleted plan {id} with its areas, objectives and tasks");
        }
        Ok(deleted)
    }
}
