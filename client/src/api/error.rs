//! Error types for the backend API

use thiserror::Error;

/// Errors that can occur when talking to the backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never completed
    #[error("Request failed: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status
    #[error("Backend rejected request (status {status}){}", suffix(.detail))]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Validation detail from the response body, if any
        detail: Option<String>,
    },

    /// A 2xx response body could not be read
    #[error("Response parsing failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// A rejection, reading the detail out of the response body
    #[must_use]
    pub fn rejected(status: u16, body: &str) -> Self {
        Self::Rejected {
            status,
            detail: detail_from_body(body),
        }
    }

    /// Message to show the user: the server's detail, or `fallback`
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Rejected {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => fallback.to_owned(),
        }
    }

    /// HTTP status, when the backend answered
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }
}

#[allow(clippy::ref_option)] // called from the derived Display
fn suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}

/// Extract `detail` from `{"detail": "…"}` or `{"detail": [{"msg": "…"}, …]}`
fn detail_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(detail) => Some(detail.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail() {
        let error = ApiError::rejected(400, r#"{"detail":"Email already registered"}"#);
        assert_eq!(error.user_message("Failed"), "Email already registered");
        assert_eq!(error.status(), Some(400));
    }

    #[test]
    fn validation_list_detail() {
        let error = ApiError::rejected(
            422,
            r#"{"detail":[{"loc":["body","password"],"msg":"too short"},{"msg":"needs a digit"}]}"#,
        );
        assert_eq!(error.user_message("Failed"), "too short; needs a digit");
    }

    #[test]
    fn fallback_without_detail() {
        assert_eq!(ApiError::rejected(500, "oops").user_message("Failed"), "Failed");
        assert_eq!(
            ApiError::Network("refused".into()).user_message("Failed"),
            "Failed"
        );
    }

    #[test]
    fn display_includes_detail() {
        assert_eq!(
            ApiError::rejected(404, r#"{"detail":"Task not found"}"#).to_string(),
            "Backend rejected request (status 404): Task not found"
        );
        assert_eq!(
            ApiError::rejected(502, "").to_string(),
            "Backend rejected request (status 502)"
        );
    }
}
