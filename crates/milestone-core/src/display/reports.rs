//! Markdown rendering of progress and timeline reports.

use std::fmt;

use crate::models::{PlanProgress, TimelineBar, TimelineModel};

/// Character width of progress and timeline bars.
const BAR_WIDTH: usize = 20;
const TIMELINE_WIDTH: usize = 40;

/// A textual progress bar for a percentage in `[0, 100]`.
fn progress_bar(percent: u8) -> String {
    let filled = (usize::from(percent.min(100)) * BAR_WIDTH + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

impl fmt::Display for PlanProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Progress: {}%", self.overall_progress)?;
        writeln!(f)?;
        writeln!(f, "`{}`", progress_bar(self.overall_progress))?;
        writeln!(f)?;
        writeln!(f, "- Total: {}", self.total_tasks)?;
        writeln!(f, "- Completed: {}", self.completed_tasks)?;
        writeln!(f, "- In progress: {}", self.in_progress_tasks)?;
        writeln!(f, "- Pending: {}", self.pending_tasks)?;
        writeln!(f, "- Blocked: {}", self.blocked_tasks)?;

        if self.by_area.is_empty() {
            return writeln!(f, "\nNo areas in this plan.");
        }

        writeln!(f)?;
        writeln!(f, "## By area")?;
        writeln!(f)?;
        for area in &self.by_area {
            writeln!(
                f,
                "- **{}** `{}` {}% ({}/{})",
                area.area_name,
                progress_bar(area.progress),
                area.progress,
                area.completed,
                area.total
            )?;
        }

        Ok(())
    }
}

impl TimelineBar {
    /// Bar drawn on a fixed-width track; at least one cell wide unless the
    /// range is malformed.
    fn track(&self) -> String {
        let cells = |fraction: f64| (fraction * TIMELINE_WIDTH as f64).round().max(0.0) as usize;
        let offset = cells(self.offset_fraction).min(TIMELINE_WIDTH);
        let width = if self.malformed {
            0
        } else {
            cells(self.width_fraction).max(1).min(TIMELINE_WIDTH - offset)
        };
        format!(
            "{}{}{}",
            "·".repeat(offset),
            "█".repeat(width),
            "·".repeat(TIMELINE_WIDTH - offset - width)
        )
    }
}

impl fmt::Display for TimelineModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(axis) = &self.axis else {
            return writeln!(f, "No scheduled tasks.");
        };

        writeln!(
            f,
            "# Timeline {} → {} ({} days)",
            axis.start, axis.end, axis.total_days
        )?;
        writeln!(f)?;

        let months: Vec<String> = axis
            .months
            .iter()
            .map(|m| format!("{}-{:02}", m.year, m.month))
            .collect();
        writeln!(f, "Months: {}", months.join(", "))?;
        writeln!(f)?;

        for bar in &self.bars {
            write!(
                f,
                "- `{}` {}. {} ({} → {}",
                bar.track(),
                bar.task_id,
                bar.title,
                bar.start_date,
                bar.due_date
            )?;
            if bar.malformed {
                write!(f, ", malformed range")?;
            } else {
                write!(f, ", {} days", bar.duration_days)?;
            }
            write!(f, ")")?;
            if let Some(pred) = bar.depends_on {
                write!(f, " after #{pred}")?;
                if bar.schedule_risk {
                    write!(f, " ⚠ overlaps predecessor")?;
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::engine::{fixtures::task, TimelineProjector};
    use crate::models::{AreaProgress, TaskStatus};

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(0), "░".repeat(BAR_WIDTH));
        assert_eq!(progress_bar(100), "█".repeat(BAR_WIDTH));
        assert_eq!(progress_bar(50).chars().filter(|c| *c == '█').count(), 10);
    }

    #[test]
    fn test_progress_display() {
        let progress = PlanProgress {
            total_tasks: 4,
            completed_tasks: 2,
            in_progress_tasks: 1,
            pending_tasks: 0,
            blocked_tasks: 1,
            overall_progress: 50,
            by_area: vec![AreaProgress {
                area_id: 1,
                area_name: "Operations".to_string(),
                total: 4,
                completed: 2,
                in_progress: 1,
                pending: 0,
                blocked: 1,
                progress: 50,
            }],
        };
        let output = progress.to_string();
        assert!(output.starts_with("# Progress: 50%"));
        assert!(output.contains("- Blocked: 1"));
        assert!(output.contains("**Operations**"));
        assert!(output.contains("50% (2/4)"));

        let empty = PlanProgress::default().to_string();
        assert!(empty.contains("No areas in this plan."));
    }

    #[test]
    fn test_timeline_display() {
        let mut first = task(1, 1, TaskStatus::Pending);
        first.start_date = Some(date(2025, 1, 1));
        first.due_date = Some(date(2025, 1, 20));
        let mut second = task(2, 1, TaskStatus::Pending);
        second.start_date = Some(date(2025, 1, 15));
        second.due_date = Some(date(2025, 1, 31));
        second.depends_on = Some(1);

        let output = TimelineProjector::project([&first, &second]).to_string();
        assert!(output.starts_with("# Timeline 2025-01-01 → 2025-01-31 (31 days)"));
        assert!(output.contains("Months: 2025-01"));
        assert!(output.contains("1. Task 1 (2025-01-01 → 2025-01-20, 20 days)"));
        assert!(output.contains("after #1 ⚠ overlaps predecessor"));
    }

    #[test]
    fn test_empty_timeline_display() {
        assert_eq!(TimelineModel::default().to_string(), "No scheduled tasks.\n");
    }

    #[test]
    fn test_malformed_bar_has_no_width() {
        let mut t = task(1, 1, TaskStatus::Pending);
        t.start_date = Some(date(2025, 1, 20));
        t.due_date = Some(date(2025, 1, 10));
        let model = TimelineProjector::project([&t]);
        assert!(!model.bars[0].track().contains('█'));
        assert!(model.to_string().contains("malformed range"));
    }
}
