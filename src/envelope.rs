//! Classification of raw gateway responses.
//!
//! Every HTTP exchange is reduced to an [`Envelope`] before any model
//! parsing happens. The classification is a pure function of the status
//! line, the content headers and the body, which keeps the error-body
//! contract testable without a socket.

use serde_json::Value;

use crate::error::{GatewayError, Result};

/// A classified gateway response.
///
/// Exactly one of `result` and `attachment` is populated for bodies the
/// gateway produced; both stay empty for bodyless responses such as a
/// token deletion.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    status_code: u16,
    reason_phrase: String,
    result: Option<Value>,
    attachment: Option<Vec<u8>>,
}

impl Envelope {
    /// Classifies a raw response.
    ///
    /// Three shapes are recognised:
    ///
    /// 1. an `attachment` content disposition with an octet-stream body is
    ///    kept as raw bytes, unparsed (CSV order exports);
    /// 2. a JSON body is decoded; a decoded object carrying both `message`
    ///    and `httpStatusCode` is the gateway's structured error shape and
    ///    is raised as [`GatewayError`];
    /// 3. anything else carries the status line only.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Gateway`](crate::WorldpayError::Gateway)
    /// for a structured error body, or for a JSON body that fails to
    /// decode.
    pub fn interpret(
        status_code: u16,
        reason_phrase: &str,
        content_type: Option<&str>,
        content_disposition: Option<&str>,
        body: &[u8],
    ) -> Result<Self> {
        let mut envelope = Self {
            status_code,
            reason_phrase: reason_phrase.to_owned(),
            result: None,
            attachment: None,
        };

        let is_attachment = content_disposition.is_some_and(|d| d.contains("attachment"))
            && content_type.is_some_and(|t| t.contains("application/octet-stream"));
        if is_attachment {
            envelope.attachment = Some(body.to_vec());
            return Ok(envelope);
        }

        let is_json = content_type.is_some_and(|t| t.contains("application/json"));
        if is_json && !body.is_empty() {
            let value: Value = serde_json::from_slice(body).map_err(|err| {
                GatewayError::transport(&format!("unable to parse gateway response: {err}"))
            })?;
            if value.get("message").is_some() && value.get("httpStatusCode").is_some() {
                tracing::debug!(status_code, "gateway returned an error body");
                return Err(GatewayError::from_body(&value).into());
            }
            envelope.result = Some(value);
        }

        Ok(envelope)
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Returns the HTTP reason phrase.
    #[must_use]
    pub fn reason_phrase(&self) -> &str {
        &self.reason_phrase
    }

    /// Returns `true` for a 200 status.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status_code == 200
    }

    /// Returns the decoded JSON body, when one was present.
    #[must_use]
    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    /// Returns the raw attachment bytes, when the response was one.
    #[must_use]
    pub fn attachment(&self) -> Option<&[u8]> {
        self.attachment.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WorldpayError;

    #[test]
    fn test_json_body_decoded() {
        let envelope = Envelope::interpret(
            200,
            "OK",
            Some("application/json"),
            None,
            br#"{"token":"TEST_RU_xxx","reusable":true}"#,
        )
        .unwrap();
        assert!(envelope.is_ok());
        assert_eq!(envelope.result().unwrap()["token"], "TEST_RU_xxx");
        assert!(envelope.attachment().is_none());
    }

    #[test]
    fn test_error_body_raised_as_gateway_error() {
        let body = br#"{
            "httpStatusCode": 404,
            "customCode": "ORDER_NOT_FOUND",
            "message": "Order with Order Code: xxx not found",
            "description": "Some description",
            "errorHelpUrl": null,
            "originalRequest": "{}"
        }"#;
        let err = Envelope::interpret(404, "Not Found", Some("application/json"), None, body)
            .unwrap_err();
        let WorldpayError::Gateway(gateway) = err else {
            panic!("expected gateway error");
        };
        assert_eq!(gateway.status_code(), Some(404));
        assert!(gateway.is_code(crate::error::custom_code::ORDER_NOT_FOUND));
        assert!(gateway.to_string().contains("not found"));
    }

    #[test]
    fn test_malformed_json_is_gateway_error() {
        let err =
            Envelope::interpret(200, "OK", Some("application/json"), None, b"{oops").unwrap_err();
        assert!(err.to_string().contains("unable to parse"));
    }

    #[test]
    fn test_attachment_kept_raw() {
        let envelope = Envelope::interpret(
            200,
            "OK",
            Some("application/octet-stream"),
            Some("attachment; filename=orders.csv"),
            b"code,amount\r\nABC,1500\r\n",
        )
        .unwrap();
        assert!(envelope.result().is_none());
        assert_eq!(envelope.attachment().unwrap(), b"code,amount\r\nABC,1500\r\n");
    }

    #[test]
    fn test_empty_json_body_is_status_only() {
        let envelope =
            Envelope::interpret(200, "OK", Some("application/json"), None, b"").unwrap();
        assert!(envelope.is_ok());
        assert!(envelope.result().is_none());
    }

    #[test]
    fn test_other_content_is_status_only() {
        let envelope =
            Envelope::interpret(503, "Service Unavailable", Some("text/html"), None, b"<html>")
                .unwrap();
        assert!(!envelope.is_ok());
        assert!(envelope.result().is_none());
        assert!(envelope.attachment().is_none());
    }
}
