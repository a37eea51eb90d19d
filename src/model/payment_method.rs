//! Payment methods: full card details, obfuscated cards, and alternative
//! payment methods.
//!
//! Requests carry a [`Card`] or an [`Apm`]; responses always come back with
//! an [`ObfuscatedCard`] (the gateway never echoes a PAN or CVC) or an
//! [`Apm`]. The `type` tag on the wire object selects the shape.

use serde_json::{Map, Value};

use crate::error::{Result, WorldpayError};
use crate::model::Address;

/// Card type identifiers reported on obfuscated cards.
pub mod card_type {
    /// Visa consumer credit.
    pub const VISA_CREDIT: &str = "VISA_CREDIT";
    /// Visa consumer debit.
    pub const VISA_DEBIT: &str = "VISA_DEBIT";
    /// Visa corporate credit.
    pub const VISA_CORPORATE_CREDIT: &str = "VISA_CORPORATE_CREDIT";
    /// Visa corporate debit.
    pub const VISA_CORPORATE_DEBIT: &str = "VISA_CORPORATE_DEBIT";
    /// Mastercard consumer credit.
    pub const MASTERCARD_CREDIT: &str = "MASTERCARD_CREDIT";
    /// Mastercard consumer debit.
    pub const MASTERCARD_DEBIT: &str = "MASTERCARD_DEBIT";
    /// Mastercard corporate credit.
    pub const MASTERCARD_CORPORATE_CREDIT: &str = "MASTERCARD_CORPORATE_CREDIT";
    /// Mastercard corporate debit.
    pub const MASTERCARD_CORPORATE_DEBIT: &str = "MASTERCARD_CORPORATE_DEBIT";
    /// Maestro.
    pub const MAESTRO: &str = "MAESTRO";
    /// American Express.
    pub const AMEX: &str = "AMEX";
    /// Carte Bleue.
    pub const CARTEBLEUE: &str = "CARTEBLEUE";
    /// JCB.
    pub const JCB: &str = "JCB";
    /// Diners Club.
    pub const DINERS: &str = "DINERS";
}

/// Card scheme vocabularies reported on obfuscated cards.
pub mod card_scheme {
    /// Consumer scheme type.
    pub const TYPE_CONSUMER: &str = "consumer";
    /// Corporate scheme type.
    pub const TYPE_CORPORATE: &str = "corporate";
    /// Visa credit scheme name.
    pub const NAME_VISA_CREDIT: &str = "VISA CREDIT";
    /// Visa debit scheme name.
    pub const NAME_VISA_DEBIT: &str = "VISA DEBIT";
    /// Mastercard credit scheme name.
    pub const NAME_MCI_CREDIT: &str = "MASTERCARD CREDIT";
    /// Mastercard debit scheme name.
    pub const NAME_MCI_DEBIT: &str = "MASTERCARD DEBIT";
    /// Maestro scheme name.
    pub const NAME_MAESTRO: &str = "MAESTRO";
    /// Visa Electron scheme name.
    pub const NAME_ELECTRON: &str = "ELECTRON";
}

/// Card class identifiers reported on obfuscated cards.
pub mod card_class {
    /// Credit card.
    pub const CREDIT: &str = "credit";
    /// Debit card.
    pub const DEBIT: &str = "debit";
}

/// Alternative payment method names accepted by the gateway.
pub mod apm_name {
    /// PayPal.
    pub const PAYPAL: &str = "paypal";
}

/// Full card details for an initial tokenisation request.
///
/// Never returned by the gateway; responses carry an [`ObfuscatedCard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    name: String,
    card_number: String,
    cvc: String,
    expiry_month: u32,
    expiry_year: u32,
    issue_number: Option<u32>,
    start_month: Option<u32>,
    start_year: Option<u32>,
    billing_address: Option<Address>,
}

impl Card {
    /// Builds a card from the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Validation`] naming every blank required
    /// field.
    pub fn new(
        name: &str,
        card_number: &str,
        cvc: &str,
        expiry_month: u32,
        expiry_year: u32,
    ) -> Result<Self> {
        let mut missing = Vec::new();
        if name.is_empty() {
            missing.push("name");
        }
        if expiry_month == 0 {
            missing.push("expiryMonth");
        }
        if expiry_year == 0 {
            missing.push("expiryYear");
        }
        if card_number.is_empty() {
            missing.push("cardNumber");
        }
        if cvc.is_empty() {
            missing.push("cvc");
        }
        if !missing.is_empty() {
            return Err(WorldpayError::Validation(format!(
                "card is missing required fields: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            name: name.to_owned(),
            card_number: card_number.to_owned(),
            cvc: cvc.to_owned(),
            expiry_month,
            expiry_year,
            issue_number: None,
            start_month: None,
            start_year: None,
            billing_address: None,
        })
    }

    /// Returns a copy with the issue number set (Maestro and similar).
    #[must_use]
    pub fn with_issue_number(&self, issue_number: u32) -> Self {
        let mut next = self.clone();
        next.issue_number = Some(issue_number);
        next
    }

    /// Returns a copy with the card start date set.
    #[must_use]
    pub fn with_start_date(&self, start_month: u32, start_year: u32) -> Self {
        let mut next = self.clone();
        next.start_month = Some(start_month);
        next.start_year = Some(start_year);
        next
    }

    /// Returns the cardholder name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("type".into(), "Card".into());
        params.insert("name".into(), self.name.clone().into());
        params.insert("expiryMonth".into(), self.expiry_month.into());
        params.insert("expiryYear".into(), self.expiry_year.into());
        // Optional components; a zero value is dropped along with an
        // unset one.
        if let Some(n) = self.issue_number.filter(|&n| n != 0) {
            params.insert("issueNumber".into(), n.into());
        }
        if let Some(n) = self.start_month.filter(|&n| n != 0) {
            params.insert("startMonth".into(), n.into());
        }
        if let Some(n) = self.start_year.filter(|&n| n != 0) {
            params.insert("startYear".into(), n.into());
        }
        params.insert("cardNumber".into(), self.card_number.clone().into());
        params.insert("cvc".into(), self.cvc.clone().into());
        params
    }
}

/// Masked card details returned by the gateway.
///
/// Carries scheme and issuer metadata instead of the PAN and CVC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObfuscatedCard {
    name: String,
    expiry_month: u32,
    expiry_year: u32,
    card_type: String,
    masked_card_number: String,
    card_scheme_type: String,
    card_scheme_name: String,
    card_issuer: String,
    country_code: String,
    card_class: String,
    product_type_desc_non_contactless: String,
    product_type_desc_contactless: String,
    prepaid: bool,
    billing_address: Option<Address>,
}

impl ObfuscatedCard {
    /// Returns the cardholder name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the card type identifier, e.g. [`card_type::VISA_CREDIT`].
    #[must_use]
    pub fn card_type(&self) -> &str {
        &self.card_type
    }

    /// Returns the masked card number.
    #[must_use]
    pub fn masked_card_number(&self) -> &str {
        &self.masked_card_number
    }

    /// Returns the scheme type, e.g. [`card_scheme::TYPE_CONSUMER`].
    #[must_use]
    pub fn card_scheme_type(&self) -> &str {
        &self.card_scheme_type
    }

    /// Returns the scheme name, e.g. [`card_scheme::NAME_VISA_CREDIT`].
    #[must_use]
    pub fn card_scheme_name(&self) -> &str {
        &self.card_scheme_name
    }

    /// Returns the issuing bank name.
    #[must_use]
    pub fn card_issuer(&self) -> &str {
        &self.card_issuer
    }

    /// Returns the card's issuing country code.
    #[must_use]
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Returns the card class, e.g. [`card_class::DEBIT`].
    #[must_use]
    pub fn card_class(&self) -> &str {
        &self.card_class
    }

    /// Returns the product type description.
    #[must_use]
    pub fn product_type_desc(&self, contactless: bool) -> &str {
        if contactless {
            &self.product_type_desc_contactless
        } else {
            &self.product_type_desc_non_contactless
        }
    }

    /// Returns whether the card is prepaid.
    #[must_use]
    pub fn is_prepaid(&self) -> bool {
        self.prepaid
    }

    fn from_value(value: &Value) -> Result<Self> {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_owned)
                .ok_or_else(|| {
                    WorldpayError::Validation(format!("card response is missing {key:?}"))
                })
        };

        Ok(Self {
            name: text("name")?,
            expiry_month: month_or_year(value, "expiryMonth")?,
            expiry_year: month_or_year(value, "expiryYear")?,
            card_type: text("cardType")?,
            masked_card_number: text("maskedCardNumber")?,
            card_scheme_type: text("cardSchemeType")?,
            card_scheme_name: text("cardSchemeName")?,
            card_issuer: text("cardIssuer")?,
            country_code: text("countryCode")?,
            card_class: text("cardClass")?,
            product_type_desc_non_contactless: text("cardProductTypeDescNonContactless")?,
            product_type_desc_contactless: text("cardProductTypeDescContactless")?,
            prepaid: truthy(value.get("prepaid")),
            billing_address: None,
        })
    }

    fn parameters(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("type".into(), "ObfuscatedCard".into());
        params.insert("name".into(), self.name.clone().into());
        params.insert("expiryMonth".into(), self.expiry_month.into());
        params.insert("expiryYear".into(), self.expiry_year.into());
        params.insert("cardType".into(), self.card_type.clone().into());
        params.insert("maskedCardNumber".into(), self.masked_card_number.clone().into());
        params.insert("cardSchemeType".into(), self.card_scheme_type.clone().into());
        params.insert("cardSchemeName".into(), self.card_scheme_name.clone().into());
        params.insert("cardIssuer".into(), self.card_issuer.clone().into());
        params.insert("countryCode".into(), self.country_code.clone().into());
        params.insert("cardClass".into(), self.card_class.clone().into());
        params.insert(
            "cardProductTypeDescNonContactless".into(),
            self.product_type_desc_non_contactless.clone().into(),
        );
        params.insert(
            "cardProductTypeDescContactless".into(),
            self.product_type_desc_contactless.clone().into(),
        );
        params.insert("prepaid".into(), self.prepaid.into());
        params
    }
}

/// An alternative payment method such as PayPal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Apm {
    apm_name: String,
    shopper_country_code: String,
    name: Option<String>,
    billing_address: Option<Address>,
}

impl Apm {
    /// Builds an alternative payment method.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Validation`] naming every blank required
    /// field.
    pub fn new(apm_name: &str, shopper_country_code: &str) -> Result<Self> {
        let mut missing = Vec::new();
        if apm_name.is_empty() {
            missing.push("apmName");
        }
        if shopper_country_code.is_empty() {
            missing.push("shopperCountryCode");
        }
        if !missing.is_empty() {
            return Err(WorldpayError::Validation(format!(
                "payment method is missing required fields: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            apm_name: apm_name.to_owned(),
            shopper_country_code: shopper_country_code.to_owned(),
            name: None,
            billing_address: None,
        })
    }

    /// Returns a copy with the account holder name set.
    #[must_use]
    pub fn with_name(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.name = Some(name.to_owned());
        next
    }

    /// Returns the APM name, e.g. [`apm_name::PAYPAL`].
    #[must_use]
    pub fn apm_name(&self) -> &str {
        &self.apm_name
    }

    /// Returns the shopper's country code.
    #[must_use]
    pub fn shopper_country_code(&self) -> &str {
        &self.shopper_country_code
    }

    fn from_value(value: &Value) -> Result<Self> {
        let field = |key: &str| value.get(key).and_then(Value::as_str).unwrap_or_default();
        let mut apm = Self::new(field("apmName"), field("shopperCountryCode"))?;
        if let Some(name) = value.get("name").and_then(Value::as_str) {
            apm.name = Some(name.to_owned());
        }
        Ok(apm)
    }

    fn parameters(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("type".into(), "APM".into());
        params.insert("apmName".into(), self.apm_name.clone().into());
        params.insert(
            "shopperCountryCode".into(),
            self.shopper_country_code.clone().into(),
        );
        params
    }
}

/// A payment method attached to a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Full card details, request direction only.
    Card(Card),
    /// Masked card details, response direction only.
    ObfuscatedCard(ObfuscatedCard),
    /// Alternative payment method, both directions.
    Apm(Apm),
}

impl PaymentMethod {
    /// Returns the wire discriminant for this method.
    #[must_use]
    pub fn method_type(&self) -> &'static str {
        match self {
            Self::Card(_) => "Card",
            Self::ObfuscatedCard(_) => "ObfuscatedCard",
            Self::Apm(_) => "APM",
        }
    }

    /// Returns a copy with the billing address attached.
    #[must_use]
    pub fn with_billing_address(&self, address: Address) -> Self {
        let mut next = self.clone();
        next.set_billing_address(address);
        next
    }

    /// Attaches the billing address in place.
    pub fn set_billing_address(&mut self, address: Address) {
        match self {
            Self::Card(card) => card.billing_address = Some(address),
            Self::ObfuscatedCard(card) => card.billing_address = Some(address),
            Self::Apm(apm) => apm.billing_address = Some(address),
        }
    }

    /// Returns the billing address, if one is attached.
    #[must_use]
    pub fn billing_address(&self) -> Option<&Address> {
        match self {
            Self::Card(card) => card.billing_address.as_ref(),
            Self::ObfuscatedCard(card) => card.billing_address.as_ref(),
            Self::Apm(apm) => apm.billing_address.as_ref(),
        }
    }

    /// Renders the method as a wire object.
    ///
    /// Card details emit their PAN and CVC; obfuscated cards emit scheme
    /// metadata and never a PAN; APMs emit only the type, APM name and
    /// shopper country code.
    #[must_use]
    pub fn parameters(&self) -> Map<String, Value> {
        match self {
            Self::Card(card) => card.parameters(),
            Self::ObfuscatedCard(card) => card.parameters(),
            Self::Apm(apm) => apm.parameters(),
        }
    }

    /// Reconstructs a payment method from a response object.
    ///
    /// The gateway never returns full card details, so any non-APM shape
    /// is read as an obfuscated card.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Validation`] when a required field of the
    /// selected shape is absent.
    pub fn from_value(value: &Value) -> Result<Self> {
        if value.get("type").and_then(Value::as_str) == Some("APM") {
            Apm::from_value(value).map(Self::Apm)
        } else {
            ObfuscatedCard::from_value(value).map(Self::ObfuscatedCard)
        }
    }
}

impl From<Card> for PaymentMethod {
    fn from(card: Card) -> Self {
        Self::Card(card)
    }
}

impl From<Apm> for PaymentMethod {
    fn from(apm: Apm) -> Self {
        Self::Apm(apm)
    }
}

fn month_or_year(value: &Value, key: &str) -> Result<u32> {
    let parsed = match value.get(key) {
        Some(Value::Number(n)) => n.as_u64().map(|n| n as u32),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| WorldpayError::Validation(format!("card response is missing {key:?}")))
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    }
}
