//! Standardized API error body (RFC 7807 Problem Details).

use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

/// RFC 7807 Problem Details for HTTP APIs.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub error_type: String,

    /// A short, human-readable summary of the problem type.
    pub title: String,

    /// The HTTP status code.
    pub status: u16,

    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Field-level validation failures.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

/// A single failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    /// Flatten validator output into a list sorted by field name.
    pub fn from_validation(errors: &ValidationErrors) -> Vec<FieldError> {
        let mut flat: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, failures)| {
                failures.iter().map(move |failure| FieldError {
                    field: field.to_string(),
                    message: failure
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| failure.code.to_string()),
                })
            })
            .collect();
        flat.sort_by(|a, b| a.field.cmp(&b.field).then(a.message.cmp(&b.message)));
        flat
    }
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: None,
            errors: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = errors;
        self
    }

    // Common error constructors
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(400, "Bad Request").with_detail(detail)
    }

    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::new(400, "Validation Failed").with_errors(errors)
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::new(409, "Conflict").with_detail(detail)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 3, message = "too short"))]
        name: String,
        #[validate(range(min = 1))]
        count: u32,
    }

    #[test]
    fn test_field_errors_are_flattened_and_sorted() {
        let probe = Probe {
            name: "ab".to_string(),
            count: 0,
        };
        let errors = probe.validate().unwrap_err();

        let flat = FieldError::from_validation(&errors);
        assert_eq!(
            flat,
            vec![
                FieldError {
                    field: "count".to_string(),
                    message: "range".to_string(),
                },
                FieldError {
                    field: "name".to_string(),
                    message: "too short".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_empty_errors_are_not_serialized() {
        let json = serde_json::to_value(ErrorResponse::bad_request("bad id")).unwrap();
        assert_eq!(json["type"], "about:blank");
        assert_eq!(json["status"], 400);
        assert_eq!(json["detail"], "bad id");
        assert!(json.get("errors").is_none());
    }
}
