//! Billing and delivery addresses.
//!
//! The gateway uses addresses for AVS checks and fraud screening. An
//! address is only valid when all four required fields are present, so
//! construction validates them up front instead of letting the gateway
//! silently ignore a partial object.

use serde_json::{Map, Value};

use crate::error::{Result, WorldpayError};
use crate::model::Country;

/// A postal address attached to an order as `billingAddress` or
/// `deliveryAddress`.
///
/// # Examples
///
/// ```
/// use worldpay::model::Address;
///
/// let address = Address::new("221B Baker Street", "London", "NW1 6XE", "GB")?
///     .with_state("Greater London");
/// assert_eq!(address.country().code(), "GB");
/// # Ok::<(), worldpay::WorldpayError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    address1: String,
    address2: Option<String>,
    address3: Option<String>,
    postal_code: String,
    city: String,
    state: Option<String>,
    country: Country,
}

impl Address {
    /// Builds an address from the four required fields.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Validation`] naming every blank required
    /// field, or when the country code is not a known ISO 3166-1 alpha-2
    /// code.
    pub fn new(address1: &str, city: &str, postal_code: &str, country_code: &str) -> Result<Self> {
        let mut missing = Vec::new();
        if address1.is_empty() {
            missing.push("address1");
        }
        if postal_code.is_empty() {
            missing.push("postalCode");
        }
        if city.is_empty() {
            missing.push("city");
        }
        if country_code.is_empty() {
            missing.push("countryCode");
        }
        if !missing.is_empty() {
            return Err(WorldpayError::Validation(format!(
                "address is missing required fields: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            address1: address1.to_owned(),
            address2: None,
            address3: None,
            postal_code: postal_code.to_owned(),
            city: city.to_owned(),
            state: None,
            country: Country::new(country_code)?,
        })
    }

    /// Returns a copy with the second address line set.
    #[must_use]
    pub fn with_address2(&self, address2: &str) -> Self {
        let mut next = self.clone();
        next.address2 = Some(address2.to_owned());
        next
    }

    /// Returns a copy with the third address line set.
    #[must_use]
    pub fn with_address3(&self, address3: &str) -> Self {
        let mut next = self.clone();
        next.address3 = Some(address3.to_owned());
        next
    }

    /// Returns a copy with the state or subdivision set.
    #[must_use]
    pub fn with_state(&self, state: &str) -> Self {
        let mut next = self.clone();
        next.state = Some(state.to_owned());
        next
    }

    /// Returns the first address line.
    #[must_use]
    pub fn address1(&self) -> &str {
        &self.address1
    }

    /// Returns the postal town or city.
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Returns the postcode or ZIP code.
    #[must_use]
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    /// Returns the resolved country.
    #[must_use]
    pub fn country(&self) -> &Country {
        &self.country
    }

    /// Renders the address as a wire object, skipping empty fields.
    #[must_use]
    pub fn parameters(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("address1".into(), self.address1.clone().into());
        if let Some(address2) = self.address2.as_deref().filter(|s| !s.is_empty()) {
            params.insert("address2".into(), address2.into());
        }
        if let Some(address3) = self.address3.as_deref().filter(|s| !s.is_empty()) {
            params.insert("address3".into(), address3.into());
        }
        params.insert("postalCode".into(), self.postal_code.clone().into());
        params.insert("city".into(), self.city.clone().into());
        if let Some(state) = self.state.as_deref().filter(|s| !s.is_empty()) {
            params.insert("state".into(), state.into());
        }
        params.insert("countryCode".into(), self.country.code().into());
        params
    }

    /// Reconstructs an address from a response object.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Validation`] when the object is missing a
    /// required field or the country code is unknown.
    pub fn from_value(value: &Value) -> Result<Self> {
        let field = |key: &str| value.get(key).and_then(Value::as_str).unwrap_or_default();

        let mut address = Self::new(
            field("address1"),
            field("city"),
            field("postalCode"),
            field("countryCode"),
        )?;
        address.address2 = optional(value, "address2");
        address.address3 = optional(value, "address3");
        address.state = optional(value, "state");
        Ok(address)
    }
}

fn optional(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_listed_in_error() {
        let err = Address::new("", "London", "", "GB").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("address1"), "{message}");
        assert!(message.contains("postalCode"), "{message}");
        assert!(!message.contains("city,"), "{message}");
    }

    #[test]
    fn test_unknown_country_rejected() {
        assert!(Address::new("1 Main St", "Springfield", "12345", "ZZ").is_err());
    }

    #[test]
    fn test_parameters_skip_empty_optionals() {
        let address = Address::new("221B Baker Street", "London", "NW1 6XE", "GB")
            .unwrap()
            .with_state("Greater London");
        let params = address.parameters();
        assert_eq!(params["address1"], "221B Baker Street");
        assert_eq!(params["postalCode"], "NW1 6XE");
        assert_eq!(params["city"], "London");
        assert_eq!(params["state"], "Greater London");
        assert_eq!(params["countryCode"], "GB");
        assert!(!params.contains_key("address2"));
        assert!(!params.contains_key("address3"));
    }

    #[test]
    fn test_from_value_round_trips_response_object() {
        let value = json!({
            "address1": "1 Infinite Loop",
            "address2": "Suite 4",
            "city": "Cupertino",
            "postalCode": "95014",
            "state": "CA",
            "countryCode": "US",
        });
        let address = Address::from_value(&value).unwrap();
        assert_eq!(address.address1(), "1 Infinite Loop");
        assert_eq!(address.country().code(), "US");
        let params = address.parameters();
        assert_eq!(params["address2"], "Suite 4");
        assert_eq!(params["state"], "CA");
    }

    #[test]
    fn test_from_value_missing_required_fails() {
        let value = json!({ "address1": "1 Main St", "countryCode": "US" });
        assert!(Address::from_value(&value).is_err());
    }

    #[test]
    fn test_builders_do_not_mutate_original() {
        let base = Address::new("1 Main St", "Leeds", "LS1 1AA", "GB").unwrap();
        let _ = base.with_address2("Flat 2");
        assert!(!base.parameters().contains_key("address2"));
    }
}
