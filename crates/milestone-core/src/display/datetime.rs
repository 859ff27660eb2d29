//! Date and time display utilities.

use std::fmt;

use jiff::{civil::Date, tz::TimeZone, Timestamp};

/// A wrapper around `Timestamp` that formats it in the system timezone.
///
/// The display format follows the pattern `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// An optional planned date range.
///
/// Renders `start → due` when both ends are known, a single labelled end
/// otherwise, and `unscheduled` when neither is set.
pub struct Schedule<'a> {
    pub start: Option<&'a Date>,
    pub due: Option<&'a Date>,
}

impl<'a> Schedule<'a> {
    pub fn new(start: Option<&'a Date>, due: Option<&'a Date>) -> Self {
        Self { start, due }
    }
}

impl fmt::Display for Schedule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start, self.due) {
            (Some(start), Some(due)) => write!(f, "{start} → {due}"),
            (Some(start), None) => write!(f, "from {start}"),
            (None, Some(due)) => write!(f, "due {due}"),
            (None, None) => f.write_str("unscheduled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_schedule_display() {
        let start = date(2025, 1, 10);
        let due = date(2025, 1, 15);
        assert_eq!(
            Schedule::new(Some(&start), Some(&due)).to_string(),
            "2025-01-10 → 2025-01-15"
        );
        assert_eq!(Schedule::new(Some(&start), None).to_string(), "from 2025-01-10");
        assert_eq!(Schedule::new(None, Some(&due)).to_string(), "due 2025-01-15");
        assert_eq!(Schedule::new(None, None).to_string(), "unscheduled");
    }
}
