//! Error handling utilities for MCP server

use rmcp::ErrorData;
use tempo_core::TempoError;

/// Convert a tracker error to an MCP error. Caller mistakes become
/// `invalid_params`, everything else `internal_error`.
pub fn to_mcp_error(message: &str, error: &TempoError) -> ErrorData {
    let text = format!("{message}: {error}");
    if error.is_caller_error() {
        ErrorData::invalid_params(text, None)
    } else {
        ErrorData::internal_error(text, None)
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::ErrorCode;

    use super::*;

    #[test]
    fn test_caller_errors_map_to_invalid_params() {
        let err = TempoError::invalid_input("userId").with_reason("is required");
        assert_eq!(to_mcp_error("Failed", &err).code, ErrorCode::INVALID_PARAMS);

        let err = TempoError::Configuration {
            message: "join".to_string(),
        };
        assert_eq!(to_mcp_error("Failed", &err).code, ErrorCode::INTERNAL_ERROR);
    }
}
