//! Shopper context merged into order requests.
//!
//! The gateway uses the shopper's browser details for fraud screening and
//! for the 3-D Secure redirect flow. Details are supplied explicitly,
//! either field by field or captured from an inbound HTTP request via
//! [`RequestContext`].

use serde_json::{Map, Value};

/// Browser details captured from the request a shopper made to the
/// merchant's own server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// The shopper's IP address, preferring any forwarding header over the
    /// socket peer address.
    pub ip: Option<String>,
    /// The `User-Agent` header.
    pub user_agent: Option<String>,
    /// The `Accept` header.
    pub accept_header: Option<String>,
}

/// Shopper details attached to an order.
///
/// All fields are optional; only the set ones travel on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shopper {
    email: Option<String>,
    ip: Option<String>,
    session_id: Option<String>,
    user_agent: Option<String>,
    accept_header: Option<String>,
}

impl Shopper {
    /// Creates an empty shopper.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a shopper seeded with the browser details of an inbound
    /// request.
    #[must_use]
    pub fn from_request(context: &RequestContext) -> Self {
        Self {
            email: None,
            ip: context.ip.clone(),
            session_id: None,
            user_agent: context.user_agent.clone(),
            accept_header: context.accept_header.clone(),
        }
    }

    /// Returns a copy with the email address set.
    #[must_use]
    pub fn with_email(&self, email: &str) -> Self {
        let mut next = self.clone();
        next.email = Some(email.to_owned());
        next
    }

    /// Returns a copy with the IP address set.
    #[must_use]
    pub fn with_ip(&self, ip: &str) -> Self {
        let mut next = self.clone();
        next.ip = Some(ip.to_owned());
        next
    }

    /// Returns a copy with the merchant session identifier set.
    #[must_use]
    pub fn with_session_id(&self, session_id: &str) -> Self {
        let mut next = self.clone();
        next.session_id = Some(session_id.to_owned());
        next
    }

    /// Returns a copy with the browser user agent set.
    #[must_use]
    pub fn with_user_agent(&self, user_agent: &str) -> Self {
        let mut next = self.clone();
        next.user_agent = Some(user_agent.to_owned());
        next
    }

    /// Returns a copy with the browser accept header set.
    #[must_use]
    pub fn with_accept_header(&self, accept_header: &str) -> Self {
        let mut next = self.clone();
        next.accept_header = Some(accept_header.to_owned());
        next
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the session identifier.
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Renders the set fields under their wire names.
    #[must_use]
    pub fn parameters(&self) -> Map<String, Value> {
        let mut params = Map::new();
        let pairs = [
            ("shopperEmailAddress", &self.email),
            ("shopperIpAddress", &self.ip),
            ("shopperSessionId", &self.session_id),
            ("shopperUserAgent", &self.user_agent),
            ("shopperAcceptHeader", &self.accept_header),
        ];
        for (key, field) in pairs {
            if let Some(value) = field {
                params.insert(key.into(), value.clone().into());
            }
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_set_fields_only() {
        let shopper = Shopper::new()
            .with_email("shopper@example.com")
            .with_session_id("session-xyz");
        let params = shopper.parameters();
        assert_eq!(params["shopperEmailAddress"], "shopper@example.com");
        assert_eq!(params["shopperSessionId"], "session-xyz");
        assert!(!params.contains_key("shopperIpAddress"));
        assert!(!params.contains_key("shopperUserAgent"));
        assert!(!params.contains_key("shopperAcceptHeader"));
    }

    #[test]
    fn test_from_request_seeds_browser_fields() {
        let context = RequestContext {
            ip: Some("203.0.113.7".into()),
            user_agent: Some("Mozilla/5.0".into()),
            accept_header: Some("text/html".into()),
        };
        let shopper = Shopper::from_request(&context).with_email("shopper@example.com");
        let params = shopper.parameters();
        assert_eq!(params["shopperIpAddress"], "203.0.113.7");
        assert_eq!(params["shopperUserAgent"], "Mozilla/5.0");
        assert_eq!(params["shopperAcceptHeader"], "text/html");
        assert_eq!(params["shopperEmailAddress"], "shopper@example.com");
    }

    #[test]
    fn test_builders_do_not_mutate_original() {
        let base = Shopper::new();
        let _ = base.with_ip("198.51.100.1");
        assert!(base.parameters().is_empty());
    }
}
