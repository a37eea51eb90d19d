//! Error types for the Worldpay client.
//!
//! Two failure families exist, mirroring the gateway's own taxonomy:
//!
//! - **Validation errors** ([`WorldpayError::Validation`]): raised locally,
//!   before any network traffic, when a resource is constructed with missing
//!   or malformed fields. Never retried.
//! - **Gateway errors** ([`WorldpayError::Gateway`]): a single unified kind
//!   covering transport failures (TLS, timeout, connection) and structured
//!   API error bodies. Callers branch on [`GatewayError::custom_code`] to
//!   distinguish expected outcomes (e.g. [`custom_code::TKN_NOT_FOUND`],
//!   [`custom_code::INVALID_PAYMENT_DETAILS`]) from hard failures.

use std::fmt;

use thiserror::Error;

/// Result type alias for Worldpay operations.
pub type Result<T> = std::result::Result<T, WorldpayError>;

/// Errors returned by this crate.
#[derive(Debug, Error)]
pub enum WorldpayError {
    /// A resource was constructed with missing or invalid fields.
    ///
    /// Raised synchronously at the point of construction, before any
    /// request is sent. The message names the offending field(s).
    #[error("invalid argument: {0}")]
    Validation(String),

    /// The gateway (or the transport to it) reported a failure.
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Structured error reported by the Worldpay gateway.
///
/// Constructed either from a decoded error body (API-level failures, which
/// always carry `message` and `httpStatusCode`) or directly from a transport
/// failure (TLS, timeout, connection), in which case only the message is set.
///
/// A typical error body:
///
/// ```json
/// {
///     "httpStatusCode": 400,
///     "customCode": "BAD_REQUEST",
///     "message": "Unsupported Payment Method",
///     "description": "Some of request parameters are invalid...",
///     "errorHelpUrl": null,
///     "originalRequest": "{\"reusable\":false}"
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct GatewayError {
    /// Human-readable description of the error.
    pub message: String,
    /// HTTP status code reported in the error body, if any.
    pub http_status_code: Option<u16>,
    /// Gateway-specific error code, e.g. `"BAD_REQUEST"`. See [`custom_code`].
    pub custom_code: Option<String>,
    /// Support information with a description of what to do next.
    pub description: Option<String>,
    /// Link to a page with more information about this error.
    pub error_help_url: Option<String>,
    /// The original request body that produced this error, as echoed back.
    pub original_request: Option<String>,
}

impl GatewayError {
    /// Creates a transport-level gateway error carrying only a message.
    pub(crate) fn transport(message: impl Into<String>) -> Self {
        Self { message: message.into(), ..Self::default() }
    }

    /// Decodes a gateway error body.
    ///
    /// The caller has already established that the body contains both
    /// `message` and `httpStatusCode`.
    pub(crate) fn from_body(body: &serde_json::Value) -> Self {
        let str_field = |key: &str| {
            body.get(key).and_then(serde_json::Value::as_str).map(str::to_owned)
        };

        Self {
            message: str_field("message").unwrap_or_default(),
            http_status_code: body
                .get("httpStatusCode")
                .and_then(serde_json::Value::as_u64)
                .and_then(|code| u16::try_from(code).ok()),
            custom_code: str_field("customCode"),
            description: str_field("description"),
            error_help_url: str_field("errorHelpUrl"),
            original_request: str_field("originalRequest"),
        }
    }

    /// Returns the HTTP status code from the error body, if present.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.http_status_code
    }

    /// Returns true if this error carries the given gateway custom code.
    ///
    /// # Examples
    ///
    /// ```
    /// use worldpay::error::{custom_code, GatewayError};
    ///
    /// let err = GatewayError {
    ///     message: "Token not found".into(),
    ///     http_status_code: Some(404),
    ///     custom_code: Some(custom_code::TKN_NOT_FOUND.into()),
    ///     ..GatewayError::default()
    /// };
    /// assert!(err.is_code(custom_code::TKN_NOT_FOUND));
    /// ```
    #[must_use]
    pub fn is_code(&self, code: &str) -> bool {
        self.custom_code.as_deref() == Some(code)
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(code) = &self.custom_code {
            write!(f, " ({code})")?;
        }
        if let Some(status) = self.http_status_code {
            write!(f, " [HTTP {status}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for GatewayError {}

/// Gateway custom codes, as documented by Worldpay.
///
/// `TKN_NOT_FOUND` and `INVALID_PAYMENT_DETAILS` are commonly treated as
/// expected, recoverable outcomes (a stale card-on-file token, a declined
/// 3-D Secure simulation) rather than hard errors.
pub mod custom_code {
    /// Invalid or incomplete request JSON (400).
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    /// The token has expired; non-reusable tokens expire after use (400).
    pub const TKN_EXPIRED: &str = "TKN_EXPIRED";
    /// The request JSON could not be parsed against the schema (400).
    pub const ERROR_PARSING_JSON: &str = "ERROR_PARSING_JSON";
    /// Unsupported card type or declined 3-D Secure authentication (400).
    pub const INVALID_PAYMENT_DETAILS: &str = "INVALID_PAYMENT_DETAILS";
    /// Recurring billing is not enabled on the account (400).
    pub const RECURRING_BILLING_NOT_ENABLED: &str = "RECURRING_BILLING_NOT_ENABLED";
    /// Invalid, missing, expired or mismatched API key (401).
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    /// The merchant account is no longer active (401).
    pub const MERCHANT_DISABLED: &str = "MERCHANT_DISABLED";
    /// Recurring billing setup is still in progress (401).
    pub const RECURRING_BILLING_NOT_SETUP: &str = "RECURRING_BILLING_NOT_SETUP";
    /// The token could not be found (404).
    pub const TKN_NOT_FOUND: &str = "TKN_NOT_FOUND";
    /// The order could not be found (404).
    pub const ORDER_NOT_FOUND: &str = "ORDER_NOT_FOUND";
    /// The token is in use by another order request (409).
    pub const TOKEN_CONFLICT: &str = "TOKEN_CONFLICT";
    /// Media type other than `application/json` (415).
    pub const MEDIA_TYPE_NOT_SUPPORTED: &str = "MEDIA_TYPE_NOT_SUPPORTED";
    /// Gateway-side failure (500).
    pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
    /// Gateway-side failure (500).
    pub const UNEXPECTED_ERROR: &str = "UNEXPECTED_ERROR";
    /// Gateway-side failure (500).
    pub const API_ERROR: &str = "API_ERROR";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = WorldpayError::Validation("currency code cannot be empty".into());
        assert_eq!(err.to_string(), "invalid argument: currency code cannot be empty");
    }

    #[test]
    fn test_gateway_error_from_body() {
        let body = serde_json::json!({
            "httpStatusCode": 400,
            "customCode": "BAD_REQUEST",
            "message": "Unsupported Payment Method",
            "description": "Some of request parameters are invalid.",
            "errorHelpUrl": null,
            "originalRequest": "{\"reusable\":false}"
        });

        let err = GatewayError::from_body(&body);
        assert_eq!(err.message, "Unsupported Payment Method");
        assert_eq!(err.status_code(), Some(400));
        assert!(err.is_code(custom_code::BAD_REQUEST));
        assert_eq!(err.description.as_deref(), Some("Some of request parameters are invalid."));
        assert_eq!(err.error_help_url, None);
        assert_eq!(err.original_request.as_deref(), Some("{\"reusable\":false}"));
    }

    #[test]
    fn test_gateway_error_display_includes_code_and_status() {
        let err = GatewayError {
            message: "Token not found".into(),
            http_status_code: Some(404),
            custom_code: Some(custom_code::TKN_NOT_FOUND.into()),
            ..GatewayError::default()
        };
        let rendered = err.to_string();
        assert!(rendered.contains("Token not found"));
        assert!(rendered.contains("TKN_NOT_FOUND"));
        assert!(rendered.contains("404"));
    }

    #[test]
    fn test_transport_error_has_no_body_fields() {
        let err = GatewayError::transport("Worldpay timeout or possible order failure");
        assert_eq!(err.status_code(), None);
        assert_eq!(err.custom_code, None);
        assert!(!err.is_code(custom_code::BAD_REQUEST));
    }
}
