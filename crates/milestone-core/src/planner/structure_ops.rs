//! Area and objective operations.

use log::{info, warn};

use super::Planner;
use crate::{
    error::Result,
    models::{Area, DeletedArea, DeletedObjective, Objective},
    params::{CreateArea, CreateObjective, Id},
};

impl Planner {
    /// Appends an area to a plan.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::PlanNotFound` if the plan does not exist.
    pub async fn add_area(&self, params: &CreateArea) -> Result<Area> {
        params.validate()?;
        let params = params.clone();

        let area = self
            .with_db(move |db| {
                db.add_area(
                    params.plan_id,
                    params.name.trim(),
                    params.description.as_deref(),
                    params.target_score,
                )
            })
            .await?;

        info!("Added area {} '{}' to plan {}", area.id, area.name, area.plan_id);
        Ok(area)
    }

    /// Appends an objective to an area.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::AreaNotFound` if the area does not exist.
    pub async fn add_objective(&self, params: &CreateObjective) -> Result<Objective> {
        let priority = params.validate()?;
        let params = params.clone();

        let objective = self
            .with_db(move |db| {
                db.add_objective(
                    params.area_id,
                    params.title.trim(),
                    params.description.as_deref(),
                    priority,
                )
            })
            .await?;

        info!(
            "Added objective {} '{}' to area {}",
            objective.id, objective.title, objective.area_id
        );
        Ok(objective)
    }

    /// Deletes an area together with its objectives and tasks.
    ///
    /// Tasks in other areas that depended on a deleted task lose their
    /// predecessor; their IDs are reported in `cleared_dependents`.
    pub async fn delete_area(&self, params: &Id) -> Result<Option<DeletedArea>> {
        let id = params.id;
        let deleted = self.with_db(move |db| db.delete_area(id)).await?;
        if let Some(deleted) = &deleted {
            if !deleted.cleared_dependents.is_empty() {
                warn!(
                    "Deleting area {id} cleared the predecessor of tasks {:?}",
                    deleted.cleared_dependents
                );
            }
            info!("Deleted area {id}");
        }
        Ok(deleted)
    }

    /// Deletes an objective together with its tasks.
    ///
    /// Tasks in other objectives that depended on a deleted task lose their
    /// predecessor; their IDs are reported in `cleared_dependents`.
    pub async fn delete_objective(&self, params: &Id) -> Result<Option<DeletedObjective>> {
        let id = params.id;
        let deleted = self.with_db(move |db| db.delete_objective(id)).await?;
        if let Some(deleted) = &deleted {
            if !deleted.cleared_dependents.is_empty() {
                warn!(
                    "Deleting objective {id} cleared the predecessor of tasks {:?}",
                    deleted.cleared_dependents
                );
            }
            info!("Deleted objective {id}");
        }
        Ok(deleted)
    }
}
