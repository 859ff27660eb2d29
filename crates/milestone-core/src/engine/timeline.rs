//! Gantt-style projection of dated tasks onto a month-aligned day axis.

use std::collections::HashMap;

use jiff::civil::Date;

use crate::models::{MonthHeader, Task, TimelineAxis, TimelineBar, TimelineModel};

/// Places tasks on a shared date axis.
///
/// Positions are taken from the stored dates as-is; the projector never
/// moves a task to satisfy its predecessor, it only marks the overlap.
pub struct TimelineProjector;

impl TimelineProjector {
    /// Projects every task that has both a start and a due date.
    ///
    /// Bars keep the iteration order of `tasks`. Undated tasks are skipped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use milestone_core::engine::TimelineProjector;
    ///
    /// let model = TimelineProjector::project(std::iter::empty());
    /// assert!(model.axis.is_none());
    /// assert!(model.bars.is_empty());
    /// ```
    pub fn project<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> TimelineModel {
        let dated: Vec<(&Task, Date, Date)> = tasks
            .into_iter()
            .filter_map(|task| task.schedule().map(|(start, due)| (task, start, due)))
            .collect();

        let Some(axis) = Self::axis(&dated) else {
            return TimelineModel::default();
        };

        let due_by_id: HashMap<u64, Date> =
            dated.iter().map(|(task, _, due)| (task.id, *due)).collect();
        let total = axis.total_days as f64;

        let mut malformed = Vec::new();
        let bars = dated
            .iter()
            .map(|&(task, start, due)| {
                let offset_days = days_between(axis.start, start);
                let duration_days = days_between(start, due) + 1;
                let is_malformed = due < start;
                if is_malformed {
                    malformed.push(task.id);
                }

                let predecessor_due = task
                    .depends_on
                    .and_then(|pred| due_by_id.get(&pred).map(|due| (pred, *due)));

                TimelineBar {
                    task_id: task.id,
                    objective_id: task.objective_id,
                    title: task.title.clone(),
                    status: task.status,
                    start_date: start,
                    due_date: due,
                    offset_days,
                    duration_days,
                    offset_fraction: offset_days as f64 / total,
                    width_fraction: duration_days.max(0) as f64 / total,
                    depends_on: predecessor_due.map(|(pred, _)| pred),
                    schedule_risk: predecessor_due.is_some_and(|(_, pred_due)| pred_due >= start),
                    malformed: is_malformed,
                }
            })
            .collect();

        TimelineModel {
            axis: Some(axis),
            bars,
            malformed,
        }
    }

    fn axis(dated: &[(&Task, Date, Date)]) -> Option<TimelineAxis> {
        let earliest = dated
            .iter()
            .flat_map(|(_, start, due)| [*start, *due])
            .min()?;
        let latest = dated
            .iter()
            .flat_map(|(_, start, due)| [*start, *due])
            .max()?;

        let start = earliest.first_of_month();
        let end = latest.last_of_month();

        let mut months = Vec::new();
        let mut cursor = start;
        while cursor <= end {
            months.push(MonthHeader {
                year: cursor.year(),
                month: cursor.month(),
                offset_days: days_between(start, cursor),
                days: i64::from(cursor.days_in_month()),
            });
            match cursor.last_of_month().tomorrow() {
                Ok(next) => cursor = next,
                Err(_) => break,
            }
        }

        Some(TimelineAxis {
            start,
            end,
            total_days: days_between(start, end) + 1,
            months,
        })
    }
}

/// Signed number of days from `from` to `to`.
fn days_between(from: Date, to: Date) -> i64 {
    i64::from((to - from).get_days())
}
