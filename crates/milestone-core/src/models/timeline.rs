//! Timeline (Gantt-style) projection shapes.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::TaskStatus;

/// Date-axis placement of every task that has both a start and a due date.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TimelineModel {
    /// Absent when no task could be placed
    pub axis: Option<TimelineAxis>,
    pub bars: Vec<TimelineBar>,
    /// Tasks whose start date falls after their due date
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub malformed: Vec<u64>,
}

impl TimelineModel {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Bars whose predecessor is still running when they are due to start.
    pub fn at_risk(&self) -> impl Iterator<Item = &TimelineBar> + '_ {
        self.bars.iter().filter(|bar| bar.schedule_risk)
    }
}

/// Inclusive day axis aligned to whole calendar months.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimelineAxis {
    /// First day of the earliest month
    pub start: Date,
    /// Last day of the latest month
    pub end: Date,
    /// Number of days covered, both ends included
    pub total_days: i64,
    pub months: Vec<MonthHeader>,
}

/// One calendar month on the axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthHeader {
    pub year: i16,
    pub month: i8,
    /// Days from the axis start to the first day of this month
    pub offset_days: i64,
    pub days: i64,
}

/// Placement of a single task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineBar {
    pub task_id: u64,
    pub objective_id: u64,
    pub title: String,
    pub status: TaskStatus,
    pub start_date: Date,
    pub due_date: Date,
    /// Days between the axis start and the task start
    pub offset_days: i64,
    /// `(due - start) + 1`; zero or negative for malformed ranges
    pub duration_days: i64,
    /// `offset_days / total_days`
    pub offset_fraction: f64,
    /// `duration_days / total_days`
    pub width_fraction: f64,
    /// Predecessor, when it is placed on the same timeline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<u64>,
    /// The predecessor is not due before this task starts
    pub schedule_risk: bool,
    pub malformed: bool,
}
