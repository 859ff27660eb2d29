//! Error handling utilities for MCP server

use milestone_core::PlannerError;
use rmcp::ErrorData;

/// Convert a planner error into an MCP error.
///
/// Missing entities map to `resource_not_found` and rejected input maps to
/// `invalid_params`, so clients can tell a bad request from a server fault.
pub fn to_mcp_error(message: &str, error: &PlannerError) -> ErrorData {
    let text = format!("{message}: {error}");
    if error.is_not_found() {
        ErrorData::resource_not_found(text, None)
    } else if error.is_validation() {
        ErrorData::invalid_params(text, None)
    } else {
        ErrorData::internal_error(text, None)
    }
}

/// Error for a lookup that completed but found nothing.
pub fn not_found(kind: &str, id: u64) -> ErrorData {
    ErrorData::resource_not_found(format!("{kind} with ID {id} not found"), None)
}

#[cfg(test)]
mod tests {
    use rmcp::model::ErrorCode;

    use super::*;

    #[test]
    fn test_error_codes_follow_error_kind() {
        let missing = to_mcp_error("Failed", &PlannerError::PlanNotFound { id: 4 });
        assert_eq!(missing.code, ErrorCode::RESOURCE_NOT_FOUND);
        assert_eq!(missing.message, "Failed: Plan with ID 4 not found");

        let cycle = PlannerError::Cycle {
            task_id: 1,
            predecessor_id: 2,
        };
        assert_eq!(to_mcp_error("Failed", &cycle).code, ErrorCode::INVALID_PARAMS);

        let config = PlannerError::Configuration {
            message: "broken".to_string(),
        };
        assert_eq!(to_mcp_error("Failed", &config).code, ErrorCode::INTERNAL_ERROR);
    }
}
