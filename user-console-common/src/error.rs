//! Uniform API error body.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Error body returned by every BFF route.
///
/// `errors` is present only for validation failures and maps wire field
/// names to their messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorBody {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_message_omits_errors_key() {
        let body = ErrorBody::message("User not found");
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"message":"User not found"}"#);
    }

    #[test]
    fn test_field_errors_round_trip() {
        let json = r#"{"message":"Validation failed","errors":{"email":["Email is required"]}}"#;
        let body: ErrorBody = serde_json::from_str(json).unwrap();
        let errors = body.errors.unwrap();
        assert_eq!(errors["email"], vec!["Email is required".to_string()]);
    }
}
