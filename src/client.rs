//! The gateway client: one method per API endpoint.

use reqwest::blocking::{Client as HttpClient, Response};
use reqwest::Method;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::config::Config;
use crate::envelope::Envelope;
use crate::error::{GatewayError, Result};
use crate::model::{Evidence, Order, OrderSearch, OrderSearchResult, PaymentMethod, Shopper, Token};

/// API version segment baked into every endpoint.
pub const API_VERSION: &str = "v1";

/// A synchronous Worldpay Online Payments client.
///
/// Cheap to clone and safe to share across threads; every operation is a
/// single blocking HTTP exchange.
///
/// # Examples
///
/// ```no_run
/// use worldpay::{Client, Config};
/// use worldpay::model::{Card, Order, OrderType, Currency};
///
/// let client = Client::new(Config::new("T_S_service_key", "T_C_client_key"))?;
/// let card = Card::new("EXAMPLE CUSTOMER", "4444333322221111", "123", 2, 2029)?;
/// let token = client
///     .create_token(&card.into(), false)?
///     .ok_or("tokenisation declined")?;
/// let order = Order::new(OrderType::Ecom)
///     .with_token(token)
///     .with_amount(1523)
///     .with_currency(Currency::new("GBP")?)
///     .with_payee_name("EXAMPLE CUSTOMER")
///     .with_description("Goods and Services");
/// let placed = client.create_order(&order)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
    config: Config,
    user_agent: String,
}

impl Client {
    /// Builds a client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Validation`](crate::WorldpayError::Validation)
    /// when the configuration fails [`Config::validate`], or a gateway
    /// error when the TLS backend cannot be initialised.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|err| GatewayError::transport(format!("cannot build HTTP client: {err}")))?;
        Ok(Self { http, config, user_agent: build_user_agent() })
    }

    /// Returns the client-side API key.
    #[must_use]
    pub fn client_key(&self) -> &str {
        &self.config.client_key
    }

    /// Tokenises a payment method.
    ///
    /// Returns `Ok(None)` when the gateway answers with a non-200 status
    /// that carries no structured error body.
    ///
    /// # Errors
    ///
    /// Returns a gateway error for transport failures and structured
    /// error bodies such as `INVALID_PAYMENT_DETAILS`.
    #[instrument(skip(self, payment_method))]
    pub fn create_token(
        &self,
        payment_method: &PaymentMethod,
        reusable: bool,
    ) -> Result<Option<Token>> {
        let mut body = Map::new();
        body.insert("reusable".into(), reusable.into());
        body.insert("paymentMethod".into(), payment_method.parameters().into());
        body.insert("clientKey".into(), self.config.client_key.clone().into());
        let envelope = self.request(Method::POST, "tokens", &[], Some(body))?;
        Token::parse(&envelope, Some(self.config.client_key.as_str()))
    }

    /// Fetches the details stored against a token.
    ///
    /// # Errors
    ///
    /// Returns a gateway error for transport failures and structured
    /// error bodies such as `TKN_NOT_FOUND`.
    #[instrument(skip(self))]
    pub fn get_token(&self, token_id: &str) -> Result<Option<Token>> {
        let envelope = self.request(Method::GET, &format!("tokens/{token_id}"), &[], None)?;
        Token::parse(&envelope, None)
    }

    /// Re-arms a reusable token with a fresh CVC.
    ///
    /// Returns whether the gateway acknowledged the update.
    ///
    /// # Errors
    ///
    /// Returns a gateway error for transport failures and structured
    /// error bodies.
    #[instrument(skip(self, cvc))]
    pub fn update_token(&self, token_id: &str, cvc: &str) -> Result<bool> {
        let mut body = Map::new();
        body.insert("cvc".into(), cvc.into());
        body.insert("clientKey".into(), self.config.client_key.clone().into());
        let envelope =
            self.request(Method::PUT, &format!("tokens/{token_id}"), &[], Some(body))?;
        Ok(envelope.reason_phrase() == "OK")
    }

    /// Deletes a reusable token.
    ///
    /// Returns whether the gateway acknowledged the deletion.
    ///
    /// # Errors
    ///
    /// Returns a gateway error for transport failures and structured
    /// error bodies.
    #[instrument(skip(self))]
    pub fn delete_token(&self, token_id: &str) -> Result<bool> {
        let envelope = self.request(Method::DELETE, &format!("tokens/{token_id}"), &[], None)?;
        Ok(envelope.reason_phrase() == "OK")
    }

    /// Places an order.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the order is missing mandatory
    /// fields, or a gateway error for transport failures and structured
    /// error bodies.
    #[instrument(skip_all)]
    pub fn create_order(&self, order: &Order) -> Result<Option<Order>> {
        let body = order.parameters()?;
        let envelope = self.request(Method::POST, "orders", &[], Some(body))?;
        Order::parse(&envelope)
    }

    /// Fetches an order by its code.
    ///
    /// # Errors
    ///
    /// Returns a gateway error for transport failures and structured
    /// error bodies such as `ORDER_NOT_FOUND`.
    #[instrument(skip(self))]
    pub fn get_order(&self, order_code: &str) -> Result<Option<Order>> {
        let envelope = self.request(Method::GET, &format!("orders/{order_code}"), &[], None)?;
        Order::parse(&envelope)
    }

    /// Lists orders matching a search.
    ///
    /// A search with [`OrderSearch::with_csv`] set passes the gateway's
    /// CSV export through as raw bytes. When the gateway declines to
    /// produce a listing the result is
    /// [`OrderSearchResult::Empty`], never an error.
    ///
    /// # Errors
    ///
    /// Returns a gateway error for transport failures and structured
    /// error bodies.
    #[instrument(skip_all)]
    pub fn get_orders(&self, search: &OrderSearch) -> Result<OrderSearchResult> {
        let envelope = self.request(Method::GET, "orders", &search.query(), None)?;
        if search.is_csv() {
            if let Some(bytes) = envelope.attachment() {
                return Ok(OrderSearchResult::Csv(bytes.to_vec()));
            }
        }
        if envelope.reason_phrase() != "OK" {
            return Ok(OrderSearchResult::Empty);
        }
        Ok(match envelope.result() {
            Some(listing) => OrderSearchResult::Listing(listing.clone()),
            None => OrderSearchResult::Empty,
        })
    }

    /// Captures an authorized order, in full or for a partial amount in
    /// minor units.
    ///
    /// # Errors
    ///
    /// Returns a gateway error for transport failures and structured
    /// error bodies.
    #[instrument(skip(self))]
    pub fn capture_order(&self, order_code: &str, amount: Option<u64>) -> Result<Option<Order>> {
        let body = amount.map(|amount| {
            let mut body = Map::new();
            body.insert("captureAmount".into(), amount.into());
            body
        });
        let envelope =
            self.request(Method::POST, &format!("orders/{order_code}/capture"), &[], body)?;
        Order::parse(&envelope)
    }

    /// Cancels an authorized, uncaptured order.
    ///
    /// Returns whether the gateway acknowledged the cancellation.
    ///
    /// # Errors
    ///
    /// Returns a gateway error for transport failures and structured
    /// error bodies.
    #[instrument(skip(self))]
    pub fn cancel_order(&self, order_code: &str) -> Result<bool> {
        let envelope = self.request(Method::DELETE, &format!("orders/{order_code}"), &[], None)?;
        Ok(envelope.reason_phrase() == "OK")
    }

    /// Refunds an order, in full or for a partial amount in minor units.
    ///
    /// Returns whether the gateway acknowledged the refund.
    ///
    /// # Errors
    ///
    /// Returns a gateway error for transport failures and structured
    /// error bodies.
    #[instrument(skip(self))]
    pub fn refund_order(&self, order_code: &str, amount: Option<u64>) -> Result<bool> {
        let body = amount.map(|amount| {
            let mut body = Map::new();
            body.insert("refundAmount".into(), amount.into());
            body
        });
        let envelope =
            self.request(Method::POST, &format!("orders/{order_code}/refund"), &[], body)?;
        Ok(envelope.reason_phrase() == "OK")
    }

    /// Completes a 3-D Secure order with the issuer's response code.
    ///
    /// The shopper fields must match the ones the order was created with;
    /// the gateway correlates the session.
    ///
    /// # Errors
    ///
    /// Returns a gateway error for transport failures and structured
    /// error bodies.
    #[instrument(skip(self, shopper))]
    pub fn authorize_3ds_order(
        &self,
        order_code: &str,
        response_code: &str,
        shopper: &Shopper,
    ) -> Result<Option<Order>> {
        let mut body = shopper.parameters();
        body.insert("threeDSResponseCode".into(), response_code.into());
        let envelope =
            self.request(Method::PUT, &format!("orders/{order_code}"), &[], Some(body))?;
        Order::parse(&envelope)
    }

    /// Submits evidence in defence of a disputed order.
    ///
    /// Returns whether the gateway accepted the document. The gateway
    /// throttles uploads per dispute; see
    /// [`MIN_UPLOAD_INTERVAL`](crate::model::MIN_UPLOAD_INTERVAL).
    ///
    /// # Errors
    ///
    /// Returns a gateway error for transport failures and structured
    /// error bodies.
    #[instrument(skip(self, evidence))]
    pub fn defend_dispute(&self, order_code: &str, evidence: &Evidence) -> Result<bool> {
        let body = evidence.parameters();
        let envelope =
            self.request(Method::POST, &format!("orders/{order_code}/disputes"), &[], Some(body))?;
        Ok(envelope.reason_phrase() == "OK")
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    #[instrument(skip(self, query, body))]
    fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Map<String, Value>>,
    ) -> Result<Envelope> {
        let mut request = self
            .http
            .request(method, self.endpoint(path))
            .header("Authorization", &self.config.service_key)
            .header("Content-Type", "application/json")
            .header("X-WP-Client-User-Agent", &self.user_agent);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(&Value::Object(body));
        }

        let response = request.send().map_err(|err| transport_error(&err))?;
        let envelope = classify(response)?;
        debug!(
            status_code = envelope.status_code(),
            reason = envelope.reason_phrase(),
            "gateway response"
        );
        Ok(envelope)
    }
}

fn classify(response: Response) -> Result<Envelope> {
    let status = response.status();
    let reason = status.canonical_reason().unwrap_or_default().to_owned();
    let header = |name: &str| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    };
    let content_type = header("content-type");
    let content_disposition = header("content-disposition");
    let body = response
        .bytes()
        .map_err(|err| transport_error(&err))?;
    Envelope::interpret(
        status.as_u16(),
        &reason,
        content_type.as_deref(),
        content_disposition.as_deref(),
        &body,
    )
}

fn transport_error(err: &reqwest::Error) -> GatewayError {
    let detail = error_chain(err);
    if err.is_timeout() {
        GatewayError::transport(format!("Worldpay timeout or possible order failure; {detail}"))
    } else if detail.contains("certificate") || detail.contains("tls") || detail.contains("ssl") {
        GatewayError::transport(format!(
            "Worldpay SSL certificate could not be validated; {detail}"
        ))
    } else {
        GatewayError::transport(format!(
            "Worldpay is currently unavailable, please try again later; {detail}"
        ))
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut detail = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        detail.push_str(": ");
        detail.push_str(&inner.to_string());
        source = inner.source();
    }
    detail
}

fn build_user_agent() -> String {
    let pairs = [
        ("os.name", std::env::consts::OS),
        ("os.arch", std::env::consts::ARCH),
        ("lang", "rust"),
        ("lib.version", env!("CARGO_PKG_VERSION")),
        ("api.version", API_VERSION),
        ("owner", env!("CARGO_PKG_NAME")),
    ];
    pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(";")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_shape() {
        let agent = build_user_agent();
        assert!(agent.contains("lang=rust"), "{agent}");
        assert!(agent.contains("api.version=v1"), "{agent}");
        assert!(agent.contains(&format!("lib.version={}", env!("CARGO_PKG_VERSION"))), "{agent}");
        assert_eq!(agent.matches('=').count(), agent.matches(';').count() + 1);
    }

    #[test]
    fn test_endpoint_building() {
        let client = Client::new(Config::new("T_S_xxx", "T_C_yyy")).unwrap();
        assert_eq!(
            client.endpoint("orders/abc/capture"),
            "https://api.worldpay.com/v1/orders/abc/capture"
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(Client::new(Config::new("", "T_C_yyy")).is_err());
    }
}
