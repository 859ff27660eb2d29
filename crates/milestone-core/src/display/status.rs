//! Confirmation messages for operations that have no resource to show.

use std::fmt;

/// A one-line outcome, optionally followed by detail bullets.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
    pub details: Vec<String>,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
            details: Vec::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
            details: Vec::new(),
        }
    }

    /// Appends a detail line shown under the message.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {}",
            if self.success { "Success:" } else { "Error:" },
            self.message
        )?;
        for detail in &self.details {
            writeln!(f, "- {detail}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("Plan archived");
        assert_eq!(format!("{success}"), "Success: Plan archived\n");

        let failure = OperationStatus::failure("Task 4 not found").with_detail("check the ID");
        let output = format!("{failure}");
        assert!(output.starts_with("Error: Task 4 not found\n"));
        assert!(output.contains("- check the ID"));
    }
}
