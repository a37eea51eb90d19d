//! Reusable and single-use payment tokens.

use serde_json::{Map, Value};

use crate::envelope::Envelope;
use crate::error::{Result, WorldpayError};
use crate::model::PaymentMethod;

/// A token standing in for stored payment details.
///
/// Single-use tokens expire and are consumed by the order that spends
/// them; reusable tokens persist until deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    id: String,
    reusable: bool,
    payment_method: Option<PaymentMethod>,
    client_key: Option<String>,
}

impl Token {
    /// Creates a token handle from its identifier.
    #[must_use]
    pub fn new(id: &str, reusable: bool) -> Self {
        Self {
            id: id.to_owned(),
            reusable,
            payment_method: None,
            client_key: None,
        }
    }

    /// Returns a copy with the payment method attached.
    #[must_use]
    pub fn with_payment_method(&self, payment_method: PaymentMethod) -> Self {
        let mut next = self.clone();
        next.payment_method = Some(payment_method);
        next
    }

    /// Returns a copy with the client key attached.
    #[must_use]
    pub fn with_client_key(&self, client_key: &str) -> Self {
        let mut next = self.clone();
        next.client_key = Some(client_key.to_owned());
        next
    }

    /// Returns the token identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns whether the token survives its first order.
    #[must_use]
    pub fn is_reusable(&self) -> bool {
        self.reusable
    }

    /// Returns the attached payment method.
    #[must_use]
    pub fn payment_method(&self) -> Option<&PaymentMethod> {
        self.payment_method.as_ref()
    }

    /// Reads a token out of a gateway response.
    ///
    /// Returns `Ok(None)` when the envelope status is not 200.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Validation`] when a 200 response does not
    /// carry the expected token shape.
    pub fn parse(envelope: &Envelope, client_key: Option<&str>) -> Result<Option<Self>> {
        if !envelope.is_ok() {
            return Ok(None);
        }
        let result = envelope.result().ok_or_else(|| {
            WorldpayError::Validation("token response carried no body".into())
        })?;
        let id = result.get("token").and_then(Value::as_str).ok_or_else(|| {
            WorldpayError::Validation("token response is missing \"token\"".into())
        })?;
        let reusable = result
            .get("reusable")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let detail = result.get("paymentMethod").ok_or_else(|| {
            WorldpayError::Validation("token response is missing \"paymentMethod\"".into())
        })?;

        let mut token = Self::new(id, reusable).with_payment_method(PaymentMethod::from_value(detail)?);
        token.client_key = client_key.map(str::to_owned);
        Ok(Some(token))
    }

    /// Renders the token as a tokenisation request body.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Validation`] when no payment method is
    /// attached.
    pub fn parameters(&self) -> Result<Map<String, Value>> {
        let payment_method = self.payment_method.as_ref().ok_or_else(|| {
            WorldpayError::Validation("token has no payment method to tokenise".into())
        })?;

        let mut params = Map::new();
        params.insert("reusable".into(), self.reusable.into());
        params.insert("paymentMethod".into(), payment_method.parameters().into());
        params.insert(
            "clientKey".into(),
            self.client_key.clone().map_or(Value::Null, Value::String),
        );
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Apm, Card};
    use serde_json::json;

    fn envelope(status: u16, reason: &str, body: &Value) -> Envelope {
        Envelope::interpret(
            status,
            reason,
            Some("application/json"),
            None,
            body.to_string().as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_obfuscated_card_token() {
        let body = json!({
            "token": "TEST_RU_f6a3e71f-af41-4b2a-b47a-bef0a8752adc",
            "reusable": true,
            "paymentMethod": {
                "type": "ObfuscatedCard",
                "name": "EXAMPLE CUSTOMER",
                "expiryMonth": 2,
                "expiryYear": 2029,
                "cardType": "VISA_CREDIT",
                "maskedCardNumber": "**** **** **** 1111",
                "cardSchemeType": "consumer",
                "cardSchemeName": "VISA CREDIT",
                "cardIssuer": "LLOYDS BANK PLC",
                "countryCode": "GB",
                "cardClass": "credit",
                "cardProductTypeDescNonContactless": "Visa Credit Personal",
                "cardProductTypeDescContactless": "CL Visa Credit Pers",
                "prepaid": false,
            },
        });
        let token = Token::parse(&envelope(200, "OK", &body), Some("T_C_client_key"))
            .unwrap()
            .unwrap();
        assert_eq!(token.id(), "TEST_RU_f6a3e71f-af41-4b2a-b47a-bef0a8752adc");
        assert!(token.is_reusable());
        assert_eq!(token.payment_method().unwrap().method_type(), "ObfuscatedCard");
    }

    #[test]
    fn test_parse_apm_token() {
        let body = json!({
            "token": "TEST_SU_abc",
            "reusable": false,
            "paymentMethod": {
                "type": "APM",
                "apmName": "paypal",
                "shopperCountryCode": "GB",
            },
        });
        let token = Token::parse(&envelope(200, "OK", &body), None).unwrap().unwrap();
        assert!(!token.is_reusable());
        assert_eq!(token.payment_method().unwrap().method_type(), "APM");
    }

    #[test]
    fn test_parse_non_200_is_none() {
        let body = json!({});
        let parsed = Token::parse(&envelope(204, "No Content", &body), None).unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn test_parameters_require_payment_method() {
        let bare = Token::new("TEST_RU_x", true);
        assert!(bare.parameters().is_err());

        let card = Card::new("EXAMPLE CUSTOMER", "4444333322221111", "123", 2, 2029).unwrap();
        let token = bare
            .with_payment_method(card.into())
            .with_client_key("T_C_client_key");
        let params = token.parameters().unwrap();
        assert_eq!(params["reusable"], true);
        assert_eq!(params["clientKey"], "T_C_client_key");
        assert_eq!(params["paymentMethod"]["type"], "Card");
    }

    #[test]
    fn test_builders_do_not_mutate_original() {
        let base = Token::new("TEST_RU_x", false);
        let apm = Apm::new("paypal", "GB").unwrap();
        let _ = base.with_payment_method(apm.into());
        assert!(base.payment_method().is_none());
    }
}
