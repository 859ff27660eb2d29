//! Progress report shapes.
//!
//! These are serialized as JSON for dashboard widgets; field names and nesting
//! are a compatibility contract and must not change.

use serde::{Deserialize, Serialize};

/// Plan-level progress rollup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanProgress {
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub in_progress_tasks: u32,
    pub pending_tasks: u32,
    pub blocked_tasks: u32,
    /// Percentage in `[0, 100]` computed from the plan-wide counts
    pub overall_progress: u8,
    pub by_area: Vec<AreaProgress>,
}

/// Progress of a single area, over the tasks of all its objectives.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AreaProgress {
    pub area_id: u64,
    pub area_name: String,
    pub total: u32,
    pub completed: u32,
    pub in_progress: u32,
    pub pending: u32,
    pub blocked: u32,
    /// Percentage in `[0, 100]`
    pub progress: u8,
}

/// Rounded completion percentage, `0` when there is nothing to complete.
///
/// Rounds half away from zero, so 1 of 8 tasks reports 13.
///
/// ```rust
/// use milestone_core::models::progress::percentage;
///
/// assert_eq!(percentage(2, 4), 50);
/// assert_eq!(percentage(1, 8), 13);
/// assert_eq!(percentage(0, 0), 0);
/// ```
pub fn percentage(completed: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = u64::from(completed.min(total));
    let total = u64::from(total);
    // round(100 * c / t) == floor((200 * c + t) / (2 * t))
    ((200 * completed + total) / (2 * total)) as u8
}
