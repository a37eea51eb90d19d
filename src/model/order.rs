//! Orders: the payment itself, from request assembly to response state.
//!
//! An order spends a [`Token`] against an amount in a [`Currency`]. The
//! builder methods return copies, so a partially-filled order can be used
//! as a template.
//!
//! # 3-D Secure
//!
//! An order created with 3-D Secure enabled comes back as
//! `PRE_AUTHORIZED` together with a one-time 3DS token and a redirect
//! URL. The caller redirects the shopper there, collects the issuer's
//! response code, and resubmits it via
//! [`Client::authorize_3ds_order`](crate::Client::authorize_3ds_order).

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::envelope::Envelope;
use crate::error::{Result, WorldpayError};
use crate::model::{Address, Currency, PaymentMethod, PaymentStatus, Shopper, Token};

/// Customer identifier keys the gateway requires for MCC 6012 merchants.
pub const CUSTOMER_IDENTIFIER_KEYS: &[&str] =
    &["accountReference", "dateOfBirth", "familyName", "postalCode"];

/// Properties an order search may sort by.
pub const SORT_PROPERTIES: &[&str] = &[
    "ADMIN_CODE",
    "CONTACT_EMAIL",
    "CREATE_DATE",
    "MERCHANT_NAME",
    "MODIFICATION_DATE",
    "ONBOARDING_MESSAGE",
    "ONBOARDING_PARTNER_COMPANY_NAME",
    "ONBOARDING_STATUS",
    "PARTNER_COMPANY_NAME",
    "PARTNER_NAME",
    "PRICE_CODE",
    "TIME_ELAPSED",
    "USERNAME",
];

/// How an order was taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderType {
    /// E-commerce: shopper present in a browser session.
    #[default]
    Ecom,
    /// Mail or telephone order.
    Moto,
    /// Recurring billing against a reusable token.
    Recurring,
}

impl OrderType {
    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ecom => "ECOM",
            Self::Moto => "MOTO",
            Self::Recurring => "RECURRING",
        }
    }
}

impl FromStr for OrderType {
    type Err = WorldpayError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ECOM" => Ok(Self::Ecom),
            "MOTO" => Ok(Self::Moto),
            "RECURRING" => Ok(Self::Recurring),
            other => Err(WorldpayError::Validation(format!("invalid order type: {other}"))),
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Redirect URLs for the alternative-payment-method flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackUrls {
    /// Where the shopper lands after a completed payment.
    pub success: Option<String>,
    /// Where the shopper lands after a failed payment.
    pub failure: Option<String>,
    /// Where the shopper lands while the payment is pending.
    pub pending: Option<String>,
    /// Where the shopper lands after cancelling.
    pub cancel: Option<String>,
}

/// A payment order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Order {
    order_type: OrderType,
    token: Option<Token>,
    description: Option<String>,
    amount: Option<u64>,
    authorized_amount: Option<u64>,
    currency: Option<Currency>,
    settlement_currency: Option<Currency>,
    authorize_only: Option<bool>,
    three_d_secure: Option<bool>,
    code: Option<String>,
    code_prefix: Option<String>,
    code_suffix: Option<String>,
    customer_reference: Option<String>,
    payment_status: Option<PaymentStatus>,
    payment_status_reason: Option<String>,
    payment_response: Option<PaymentMethod>,
    payee_name: Option<String>,
    billing_address: Option<Address>,
    delivery_address: Option<Address>,
    shopper: Option<Shopper>,
    redirect_url: Option<String>,
    three_ds_token: Option<String>,
    three_ds_response_code: Option<String>,
    callback_urls: CallbackUrls,
    customer_identifiers: Option<Map<String, Value>>,
    environment: Option<String>,
    risk_score: Option<Value>,
    history: Option<Value>,
    disputes: Option<Value>,
}

impl Order {
    /// Creates an empty order of the given type.
    #[must_use]
    pub fn new(order_type: OrderType) -> Self {
        Self { order_type, ..Self::default() }
    }

    /// Validates an amount string as a whole number of minor units.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Validation`] for a decimal point, a
    /// negative sign, or anything that is not an unsigned integer.
    /// Convert decimal amounts with
    /// [`Currency::to_minor`](crate::model::Currency::to_minor) first.
    pub fn parse_amount(amount: &str) -> Result<u64> {
        if amount.contains('.') {
            return Err(WorldpayError::Validation(
                "amount cannot contain a point, it must be a whole number of minor units".into(),
            ));
        }
        if amount.starts_with('-') {
            return Err(WorldpayError::Validation("amount cannot be negative".into()));
        }
        amount
            .parse()
            .map_err(|_| WorldpayError::Validation(format!("invalid amount: {amount:?}")))
    }

    /// Returns a copy with the token to spend.
    #[must_use]
    pub fn with_token(&self, token: Token) -> Self {
        let mut next = self.clone();
        next.token = Some(token);
        next
    }

    /// Returns a copy with the amount set, in minor units.
    #[must_use]
    pub fn with_amount(&self, amount: u64) -> Self {
        let mut next = self.clone();
        next.amount = Some(amount);
        next
    }

    /// Returns a copy with the order currency set.
    #[must_use]
    pub fn with_currency(&self, currency: Currency) -> Self {
        let mut next = self.clone();
        next.currency = Some(currency);
        next
    }

    /// Returns a copy with the settlement currency set.
    #[must_use]
    pub fn with_settlement_currency(&self, currency: Currency) -> Self {
        let mut next = self.clone();
        next.settlement_currency = Some(currency);
        next
    }

    /// Returns a copy with the order description set.
    #[must_use]
    pub fn with_description(&self, description: &str) -> Self {
        let mut next = self.clone();
        next.description = Some(description.to_owned());
        next
    }

    /// Returns a copy with the payee (cardholder) name set.
    #[must_use]
    pub fn with_payee_name(&self, payee_name: &str) -> Self {
        let mut next = self.clone();
        next.payee_name = Some(payee_name.to_owned());
        next
    }

    /// Returns a copy with the billing address set.
    #[must_use]
    pub fn with_billing_address(&self, address: Address) -> Self {
        let mut next = self.clone();
        next.billing_address = Some(address);
        next
    }

    /// Returns a copy with the delivery address set.
    #[must_use]
    pub fn with_delivery_address(&self, address: Address) -> Self {
        let mut next = self.clone();
        next.delivery_address = Some(address);
        next
    }

    /// Returns a copy with the shopper details set.
    #[must_use]
    pub fn with_shopper(&self, shopper: Shopper) -> Self {
        let mut next = self.clone();
        next.shopper = Some(shopper);
        next
    }

    /// Returns a copy with the merchant's own order reference set.
    #[must_use]
    pub fn with_customer_reference(&self, customer_reference: &str) -> Self {
        let mut next = self.clone();
        next.customer_reference = Some(customer_reference.to_owned());
        next
    }

    /// Returns a copy with an order code prefix set.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Validation`] when the tag is over 20
    /// characters or contains anything besides alphanumerics, `-` and `_`.
    pub fn with_code_prefix(&self, prefix: &str) -> Result<Self> {
        parse_code_tag(prefix)?;
        let mut next = self.clone();
        next.code_prefix = Some(prefix.to_owned());
        Ok(next)
    }

    /// Returns a copy with an order code suffix set.
    ///
    /// # Errors
    ///
    /// Same validation as [`Order::with_code_prefix`].
    pub fn with_code_suffix(&self, suffix: &str) -> Result<Self> {
        parse_code_tag(suffix)?;
        let mut next = self.clone();
        next.code_suffix = Some(suffix.to_owned());
        Ok(next)
    }

    /// Returns a copy with customer identifiers set.
    ///
    /// With `required`, enforces the presence and non-emptiness of every
    /// key in [`CUSTOMER_IDENTIFIER_KEYS`], as the gateway does for
    /// MCC 6012 merchants.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Validation`] when `required` and a key is
    /// absent or empty.
    pub fn with_customer_identifiers(
        &self,
        identifiers: Map<String, Value>,
        required: bool,
    ) -> Result<Self> {
        if required {
            if identifiers.is_empty() {
                return Err(WorldpayError::Validation(
                    "customer identifiers cannot be empty".into(),
                ));
            }
            for key in CUSTOMER_IDENTIFIER_KEYS {
                let value = identifiers.get(*key).and_then(Value::as_str);
                if value.is_none() {
                    return Err(WorldpayError::Validation(format!(
                        "customer identifier {key:?} key is required"
                    )));
                }
                if value == Some("") {
                    return Err(WorldpayError::Validation(format!(
                        "customer identifier {key:?} value cannot be empty"
                    )));
                }
            }
        }
        let mut next = self.clone();
        next.customer_identifiers = Some(identifiers);
        Ok(next)
    }

    /// Returns a copy with the set callback URLs applied.
    #[must_use]
    pub fn with_callback_urls(&self, urls: &CallbackUrls) -> Self {
        let mut next = self.clone();
        let targets = [
            (&urls.success, &mut next.callback_urls.success),
            (&urls.failure, &mut next.callback_urls.failure),
            (&urls.pending, &mut next.callback_urls.pending),
            (&urls.cancel, &mut next.callback_urls.cancel),
        ];
        for (source, target) in targets {
            if source.is_some() {
                *target = source.clone();
            }
        }
        next
    }

    /// Returns a copy with the success callback URL set.
    #[must_use]
    pub fn with_success_url(&self, url: &str) -> Self {
        let mut next = self.clone();
        next.callback_urls.success = Some(url.to_owned());
        next
    }

    /// Returns a copy with the failure callback URL set.
    #[must_use]
    pub fn with_failure_url(&self, url: &str) -> Self {
        let mut next = self.clone();
        next.callback_urls.failure = Some(url.to_owned());
        next
    }

    /// Returns a copy with the pending callback URL set.
    #[must_use]
    pub fn with_pending_url(&self, url: &str) -> Self {
        let mut next = self.clone();
        next.callback_urls.pending = Some(url.to_owned());
        next
    }

    /// Returns a copy with the cancel callback URL set.
    #[must_use]
    pub fn with_cancel_url(&self, url: &str) -> Self {
        let mut next = self.clone();
        next.callback_urls.cancel = Some(url.to_owned());
        next
    }

    /// Returns a copy marked authorize-only (capture deferred).
    #[must_use]
    pub fn with_authorize_only(&self, authorize_only: bool) -> Self {
        let mut next = self.clone();
        next.authorize_only = Some(authorize_only);
        next
    }

    /// Returns a copy with 3-D Secure requested or not.
    #[must_use]
    pub fn with_three_d_secure(&self, three_d_secure: bool) -> Self {
        let mut next = self.clone();
        next.three_d_secure = Some(three_d_secure);
        next
    }

    /// Returns a copy with the issuer's 3-D Secure response code set.
    #[must_use]
    pub fn with_three_ds_response_code(&self, response_code: &str) -> Self {
        let mut next = self.clone();
        next.three_ds_response_code = Some(response_code.to_owned());
        next
    }

    /// Returns the order type.
    #[must_use]
    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Returns the gateway-assigned order code.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Returns the token attached to the order.
    #[must_use]
    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub fn amount(&self) -> Option<u64> {
        self.amount
    }

    /// Returns the amount actually authorized, in minor units.
    #[must_use]
    pub fn authorized_amount(&self) -> Option<u64> {
        self.authorized_amount
    }

    /// Returns the order currency.
    #[must_use]
    pub fn currency(&self) -> Option<&Currency> {
        self.currency.as_ref()
    }

    /// Returns the payee (cardholder) name.
    #[must_use]
    pub fn payee_name(&self) -> Option<&str> {
        self.payee_name.as_deref()
    }

    /// Returns whether the order requested 3-D Secure.
    #[must_use]
    pub fn is_three_d_secure(&self) -> bool {
        self.three_d_secure.unwrap_or(false)
    }

    /// Returns the payment status reported by the gateway.
    #[must_use]
    pub fn payment_status(&self) -> Option<&PaymentStatus> {
        self.payment_status.as_ref()
    }

    /// Returns the gateway's reason for the payment status.
    #[must_use]
    pub fn payment_status_reason(&self) -> Option<&str> {
        self.payment_status_reason.as_deref()
    }

    /// Returns the payment method echoed in the response.
    #[must_use]
    pub fn payment_response(&self) -> Option<&PaymentMethod> {
        self.payment_response.as_ref()
    }

    /// Returns the 3-D Secure redirect URL.
    #[must_use]
    pub fn redirect_url(&self) -> Option<&str> {
        self.redirect_url.as_deref()
    }

    /// Returns the one-time 3-D Secure token.
    #[must_use]
    pub fn three_ds_token(&self) -> Option<&str> {
        self.three_ds_token.as_deref()
    }

    /// Returns the merchant's own order reference.
    #[must_use]
    pub fn customer_reference(&self) -> Option<&str> {
        self.customer_reference.as_deref()
    }

    /// Returns the shopper details echoed in the response.
    #[must_use]
    pub fn shopper(&self) -> Option<&Shopper> {
        self.shopper.as_ref()
    }

    /// Returns the gateway environment the order ran in.
    #[must_use]
    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    /// Returns the raw risk score object.
    #[must_use]
    pub fn risk_score(&self) -> Option<&Value> {
        self.risk_score.as_ref()
    }

    /// Returns the raw order history entries.
    #[must_use]
    pub fn history(&self) -> Option<&Value> {
        self.history.as_ref()
    }

    /// Returns the raw dispute entries.
    #[must_use]
    pub fn disputes(&self) -> Option<&Value> {
        self.disputes.as_ref()
    }

    /// Assembles the order-creation request body.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Validation`] naming every mandatory field
    /// still unset.
    pub fn parameters(&self) -> Result<Map<String, Value>> {
        let mut missing = Vec::new();
        if self.amount.is_none() {
            missing.push("amount");
        }
        if self.currency.is_none() {
            missing.push("currencyCode");
        }
        if self.payee_name.is_none() {
            missing.push("name");
        }
        if self.description.is_none() {
            missing.push("orderDescription");
        }
        if self.token.is_none() {
            missing.push("token");
        }
        if !missing.is_empty() {
            return Err(WorldpayError::Validation(format!(
                "order is missing required fields: {}",
                missing.join(", ")
            )));
        }
        let (Some(amount), Some(currency), Some(payee_name), Some(description), Some(token)) = (
            self.amount,
            self.currency.as_ref(),
            self.payee_name.as_deref(),
            self.description.as_deref(),
            self.token.as_ref(),
        ) else {
            unreachable!("checked above");
        };

        let mut params = Map::new();
        params.insert("amount".into(), amount.into());
        params.insert("currencyCode".into(), currency.code().into());
        params.insert("currencyCodeExponent".into(), currency.exponent().into());
        params.insert("name".into(), payee_name.into());
        params.insert("orderType".into(), self.order_type.as_str().into());
        params.insert("orderDescription".into(), description.into());
        params.insert("token".into(), token.id().into());
        if let Some(three_d_secure) = self.three_d_secure {
            params.insert("is3DSOrder".into(), three_d_secure.into());
        }
        if let Some(authorize_only) = self.authorize_only {
            params.insert("authorizeOnly".into(), authorize_only.into());
        }
        if let Some(settlement) = &self.settlement_currency {
            params.insert("settlementCurrency".into(), settlement.code().into());
            params.insert("settlementCurrencyExponent".into(), settlement.exponent().into());
        }
        if let Some(shopper) = &self.shopper {
            params.extend(shopper.parameters());
        }
        if let Some(prefix) = &self.code_prefix {
            params.insert("orderCodePrefix".into(), prefix.clone().into());
        }
        if let Some(suffix) = &self.code_suffix {
            params.insert("orderCodeSuffix".into(), suffix.clone().into());
        }
        if let Some(address) = &self.billing_address {
            params.insert("billingAddress".into(), address.parameters().into());
        }
        if let Some(address) = &self.delivery_address {
            params.insert("deliveryAddress".into(), address.parameters().into());
        }
        if let Some(reference) = &self.customer_reference {
            params.insert("customerOrderCode".into(), reference.clone().into());
        }
        if let Some(identifiers) = self.customer_identifiers.clone().filter(|m| !m.is_empty()) {
            params.insert("customerIdentifiers".into(), identifiers.into());
        }
        let urls = [
            ("successUrl", &self.callback_urls.success),
            ("failureUrl", &self.callback_urls.failure),
            ("pendingUrl", &self.callback_urls.pending),
            ("cancelUrl", &self.callback_urls.cancel),
        ];
        for (key, url) in urls {
            if let Some(url) = url {
                params.insert(key.into(), url.clone().into());
            }
        }
        Ok(params)
    }

    /// Reads an order out of a gateway response.
    ///
    /// Returns `Ok(None)` when the envelope status is not 200.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Validation`] when a 200 response does not
    /// carry the expected order shape.
    pub fn parse(envelope: &Envelope) -> Result<Option<Self>> {
        if !envelope.is_ok() {
            return Ok(None);
        }
        let result = envelope.result().ok_or_else(|| {
            WorldpayError::Validation("order response carried no body".into())
        })?;
        let text = |key: &str| {
            result.get(key).and_then(Value::as_str).map(str::to_owned)
        };

        let token = text("token").ok_or_else(|| {
            WorldpayError::Validation("order response is missing \"token\"".into())
        })?;
        let currency_code = text("currencyCode").ok_or_else(|| {
            WorldpayError::Validation("order response is missing \"currencyCode\"".into())
        })?;
        let order_type = match text("orderType") {
            Some(raw) => raw.parse()?,
            None => OrderType::default(),
        };

        let mut order = Self::new(order_type);
        order.token = Some(Token::new(&token, false));
        order.currency = Some(Currency::new(&currency_code)?);
        if let Some(code) = text("settlementCurrency") {
            order.settlement_currency = Some(Currency::new(&code)?);
        }
        order.description = text("orderDescription");
        order.amount = result.get("amount").and_then(Value::as_u64);
        order.authorized_amount = result.get("authorizedAmount").and_then(Value::as_u64);
        order.authorize_only = result.get("authorizeOnly").and_then(Value::as_bool);
        order.three_d_secure = result.get("is3DSOrder").and_then(Value::as_bool);
        order.code = text("orderCode");
        order.code_prefix = text("orderCodePrefix");
        order.code_suffix = text("orderCodeSuffix");
        order.customer_reference = text("customerOrderCode");
        order.redirect_url = text("redirectURL");
        order.three_ds_token = text("oneTime3DsToken");
        order.three_ds_response_code = text("threeDSResponseCode");
        order.callback_urls = CallbackUrls {
            success: text("successUrl"),
            failure: text("failureUrl"),
            pending: text("pendingUrl"),
            cancel: text("cancelUrl"),
        };
        order.environment = text("environment");

        let shopper_fields = [
            text("shopperEmailAddress"),
            text("shopperIpAddress"),
            text("shopperSessionId"),
            text("shopperUserAgent"),
            text("shopperAcceptHeader"),
        ];
        if shopper_fields.iter().any(Option::is_some) {
            let mut shopper = Shopper::new();
            let [email, ip, session_id, user_agent, accept_header] = shopper_fields;
            if let Some(email) = email {
                shopper = shopper.with_email(&email);
            }
            if let Some(ip) = ip {
                shopper = shopper.with_ip(&ip);
            }
            if let Some(session_id) = session_id {
                shopper = shopper.with_session_id(&session_id);
            }
            if let Some(user_agent) = user_agent {
                shopper = shopper.with_user_agent(&user_agent);
            }
            if let Some(accept_header) = accept_header {
                shopper = shopper.with_accept_header(&accept_header);
            }
            order.shopper = Some(shopper);
        }

        order.set_payment(
            text("paymentStatus").as_deref(),
            text("paymentStatusReason").as_deref(),
            result.get("paymentResponse"),
        )?;

        if let Some(address) = result.get("billingAddress") {
            order.billing_address = Some(Address::from_value(address)?);
        }
        if let Some(address) = result.get("deliveryAddress") {
            order.delivery_address = Some(Address::from_value(address)?);
        }
        if let Some(identifiers) = result.get("customerIdentifiers").and_then(Value::as_object) {
            order.customer_identifiers = Some(identifiers.clone());
        }
        order.risk_score = result.get("riskScore").cloned();
        order.history = result.get("history").cloned();
        order.disputes = result.get("disputes").cloned();

        Ok(Some(order))
    }

    fn set_payment(
        &mut self,
        status: Option<&str>,
        reason: Option<&str>,
        detail: Option<&Value>,
    ) -> Result<()> {
        if let Some(detail) = detail {
            // The payee name lives at the top level of a request but comes
            // back embedded in paymentResponse.
            self.payee_name = detail.get("name").and_then(Value::as_str).map(str::to_owned);
            let mut method = PaymentMethod::from_value(detail)?;
            if let Some(address) = detail.get("billingAddress") {
                method.set_billing_address(Address::from_value(address)?);
            }
            self.payment_response = Some(method);
        }
        self.payment_status = status.map(PaymentStatus::from);
        self.payment_status_reason = reason.map(str::to_owned);
        Ok(())
    }
}

fn parse_code_tag(tag: &str) -> Result<()> {
    if tag.len() > 20 {
        return Err(WorldpayError::Validation(
            "order code prefix/suffix must be at most 20 characters".into(),
        ));
    }
    let permitted = tag
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if !permitted {
        return Err(WorldpayError::Validation(
            "order code prefix/suffix may only include alphanumeric characters, - and _".into(),
        ));
    }
    Ok(())
}

/// Filter for listing orders.
///
/// Only the fields the gateway recognises are ever placed on the query
/// string; everything else has no way in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderSearch {
    environment: Option<String>,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
    payment_status: Option<PaymentStatus>,
    sort_direction: Option<String>,
    sort_property: Option<String>,
    page_number: Option<u32>,
    csv: bool,
}

impl OrderSearch {
    /// Creates an empty search.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy filtered to one gateway environment.
    #[must_use]
    pub fn with_environment(&self, environment: &str) -> Self {
        let mut next = self.clone();
        next.environment = Some(environment.to_owned());
        next
    }

    /// Returns a copy bounded to orders created on or after the date.
    #[must_use]
    pub fn with_from_date(&self, from_date: NaiveDate) -> Self {
        let mut next = self.clone();
        next.from_date = Some(from_date);
        next
    }

    /// Returns a copy bounded to orders created on or before the date.
    #[must_use]
    pub fn with_to_date(&self, to_date: NaiveDate) -> Self {
        let mut next = self.clone();
        next.to_date = Some(to_date);
        next
    }

    /// Returns a copy filtered to one payment status.
    #[must_use]
    pub fn with_payment_status(&self, status: PaymentStatus) -> Self {
        let mut next = self.clone();
        next.payment_status = Some(status);
        next
    }

    /// Returns a copy with the sort direction set, as the gateway spells
    /// it.
    #[must_use]
    pub fn with_sort_direction(&self, direction: &str) -> Self {
        let mut next = self.clone();
        next.sort_direction = Some(direction.to_owned());
        next
    }

    /// Returns a copy sorted by the given property.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Validation`] for a property outside
    /// [`SORT_PROPERTIES`].
    pub fn with_sort_property(&self, property: &str) -> Result<Self> {
        if !SORT_PROPERTIES.contains(&property) {
            return Err(WorldpayError::Validation(format!(
                "invalid sort property: {property}"
            )));
        }
        let mut next = self.clone();
        next.sort_property = Some(property.to_owned());
        Ok(next)
    }

    /// Returns a copy requesting the given result page.
    #[must_use]
    pub fn with_page_number(&self, page_number: u32) -> Self {
        let mut next = self.clone();
        next.page_number = Some(page_number);
        next
    }

    /// Returns a copy requesting a CSV export instead of JSON.
    #[must_use]
    pub fn with_csv(&self, csv: bool) -> Self {
        let mut next = self.clone();
        next.csv = csv;
        next
    }

    /// Returns whether a CSV export was requested.
    #[must_use]
    pub fn is_csv(&self) -> bool {
        self.csv
    }

    /// Renders the query string pairs.
    #[must_use]
    pub fn query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(environment) = &self.environment {
            pairs.push(("environment".into(), environment.clone()));
        }
        if let Some(from_date) = self.from_date {
            pairs.push(("fromDate".into(), from_date.format("%Y-%m-%d").to_string()));
        }
        if let Some(to_date) = self.to_date {
            pairs.push(("toDate".into(), to_date.format("%Y-%m-%d").to_string()));
        }
        if let Some(status) = &self.payment_status {
            pairs.push(("paymentStatus".into(), status.as_str().to_owned()));
        }
        if let Some(direction) = &self.sort_direction {
            pairs.push(("sortDirection".into(), direction.clone()));
        }
        if let Some(property) = &self.sort_property {
            pairs.push(("sortProperty".into(), property.clone()));
        }
        if let Some(page_number) = self.page_number {
            pairs.push(("pageNumber".into(), page_number.to_string()));
        }
        if self.csv {
            pairs.push(("csv".into(), "true".into()));
        }
        pairs
    }
}

/// The outcome of an order search.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderSearchResult {
    /// The decoded JSON listing.
    Listing(Value),
    /// A raw CSV export.
    Csv(Vec<u8>),
    /// The gateway declined to produce a listing.
    Empty,
}
