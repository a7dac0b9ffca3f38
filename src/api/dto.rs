//! Shared Data Transfer Objects (DTOs) for API handlers.
//!
//! This module provides common structs used across multiple API endpoints
//! to ensure consistency in request/response formats.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Simple acknowledgement body for endpoints that have nothing else to say.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Request body for the activate/deactivate endpoints shared by
/// workstations and components.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetActiveRequest {
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // MessageResponse
    // -----------------------------------------------------------------------

    #[test]
    fn test_message_response_serialize() {
        let body = MessageResponse::new("Logged out");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["message"], "Logged out");
    }

    // -----------------------------------------------------------------------
    // SetActiveRequest
    // -----------------------------------------------------------------------

    #[test]
    fn test_set_active_deserialize() {
        let req: SetActiveRequest = serde_json::from_str(r#"{"active": false}"#).unwrap();
        assert!(!req.active);
    }

    #[test]
    fn test_set_active_rejects_missing_field() {
        assert!(serde_json::from_str::<SetActiveRequest>(r#"{}"#).is_err());
    }
}
