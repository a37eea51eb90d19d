//! ISO 4217 currency registry and minor-unit conversion.
//!
//! Amounts sent to the gateway are always integers in the currency's minor
//! unit (pence for GBP, cents for USD). The exponent in the registry drives
//! the conversion between decimal amounts and minor units.

use std::fmt;

use crate::error::{Result, WorldpayError};

/// Supported currencies: ISO 4217 code, display name, exponent.
///
/// Codes with exponent 0 (CLP, JPY, KRW, VND) have no minor unit.
const CURRENCIES: &[(&str, &str, u32)] = &[
    ("ARS", "Nuevo Argentine Peso", 2),
    ("AUD", "Australian Dollar", 2),
    ("BRL", "Brazilian Real", 2),
    ("CAD", "Canadian Dollar", 2),
    ("CHF", "Swiss Franc", 2),
    ("CLP", "Chilean Peso", 0),
    ("CNY", "Yuan Renminbi", 2),
    ("COP", "Colombian Peso", 2),
    ("CZK", "Czech Koruna", 2),
    ("DKK", "Danish Krone", 2),
    ("EUR", "Euro", 2),
    ("GBP", "Pound Sterling", 2),
    ("HKD", "Hong Kong Dollar", 2),
    ("HUF", "Hungarian Forint", 2),
    ("IDR", "Indonesian Rupiah", 2),
    ("JPY", "Japanese Yen", 0),
    ("KES", "Kenyan Shilling", 2),
    ("KRW", "South-Korean Won", 0),
    ("MYR", "Malaysian Ringgit", 2),
    ("NOK", "Norwegian Krone", 2),
    ("NZD", "New Zealand Dollar", 2),
    ("PHP", "Philippine Peso", 2),
    ("PLN", "New Polish Zloty", 2),
    ("SEK", "Swedish Krone", 2),
    ("SGD", "Singapore Dollar", 2),
    ("THB", "Thai Baht", 2),
    ("TWD", "New Taiwan Dollar", 2),
    ("USD", "US Dollars", 2),
    ("VND", "Vietnamese New Dong", 0),
    ("ZAR", "South African Rand", 2),
];

/// A currency supported by the gateway.
///
/// Immutable after construction; lookup fails for codes outside the
/// supported set.
///
/// # Examples
///
/// ```
/// use worldpay::model::Currency;
///
/// let gbp = Currency::new("GBP")?;
/// assert_eq!(gbp.exponent(), 2);
/// assert_eq!(gbp.to_decimal(1500), "15.00");
/// assert_eq!(gbp.to_minor("15.00")?, 1500);
/// # Ok::<(), worldpay::WorldpayError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Currency {
    code: &'static str,
    name: &'static str,
    exponent: u32,
}

impl Currency {
    /// Looks up a currency by its ISO 4217 code.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the code is empty or not in the
    /// supported set.
    pub fn new(code: &str) -> Result<Self> {
        if code.is_empty() {
            return Err(WorldpayError::Validation("currency code cannot be empty".into()));
        }

        CURRENCIES
            .iter()
            .find(|(c, _, _)| *c == code)
            .map(|&(code, name, exponent)| Self { code, name, exponent })
            .ok_or_else(|| {
                WorldpayError::Validation(format!("unsupported currency code: \"{code}\""))
            })
    }

    /// Returns the ISO 4217 code.
    #[must_use]
    pub fn code(&self) -> &str {
        self.code
    }

    /// Returns the currency display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name
    }

    /// Returns the currency exponent (number of minor-unit digits).
    #[must_use]
    pub fn exponent(&self) -> u32 {
        self.exponent
    }

    /// Formats a minor-unit amount as a decimal string.
    ///
    /// Always renders exactly two decimal places, regardless of the
    /// currency's exponent — a zero-exponent currency like JPY renders
    /// `"1500.00"` for an amount of 1500. This matches the wire behaviour
    /// of the gateway's reference clients and is kept for compatibility.
    #[must_use]
    pub fn to_decimal(&self, minor_amount: i64) -> String {
        let divisor = 10_f64.powi(self.exponent as i32);
        format!("{:.2}", minor_amount as f64 / divisor)
    }

    /// Converts a decimal amount string into an integer minor-unit amount.
    ///
    /// Digits beyond the currency exponent are truncated rather than
    /// rounded, so `"15.229"` GBP becomes `1522`. The math is done on the
    /// decimal digits directly, never through binary floating point, which
    /// keeps `to_minor(to_decimal(n))` exact for every integer `n`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Validation`] when the string is not a plain
    /// decimal number, or when the amount overflows `i64`.
    pub fn to_minor(&self, decimal_amount: &str) -> Result<i64> {
        let invalid =
            || WorldpayError::Validation(format!("invalid decimal amount: {decimal_amount:?}"));
        let (negative, digits) = match decimal_amount.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, decimal_amount),
        };
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let exponent = self.exponent as usize;
        let mut minor: i64 = 0;
        let scaled = int_part
            .bytes()
            .chain(frac_part.bytes().take(exponent))
            .chain(std::iter::repeat(b'0').take(exponent.saturating_sub(frac_part.len())));
        for digit in scaled {
            minor = minor
                .checked_mul(10)
                .and_then(|m| m.checked_add(i64::from(digit - b'0')))
                .ok_or_else(invalid)?;
        }
        Ok(if negative { -minor } else { minor })
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_code_rejected() {
        assert!(Currency::new("").is_err());
    }

    #[test]
    fn test_unknown_code_rejected() {
        let err = Currency::new("000").unwrap_err();
        assert!(err.to_string().contains("000"));
    }

    #[test]
    fn test_gbp_exponent() {
        let gbp = Currency::new("GBP").unwrap();
        assert_eq!(gbp.code(), "GBP");
        assert_eq!(gbp.name(), "Pound Sterling");
        assert_eq!(gbp.exponent(), 2);
    }

    #[test]
    fn test_zero_exponent_currencies() {
        for code in ["CLP", "JPY", "KRW", "VND"] {
            assert_eq!(Currency::new(code).unwrap().exponent(), 0, "{code}");
        }
    }

    #[test]
    fn test_to_decimal_two_places() {
        let gbp = Currency::new("GBP").unwrap();
        assert_eq!(gbp.to_decimal(1500), "15.00");
        assert_eq!(gbp.to_decimal(1523), "15.23");
        assert_eq!(gbp.to_decimal(5), "0.05");
    }

    #[test]
    fn test_to_decimal_zero_exponent_still_two_places() {
        // Documented quirk: exponent-0 currencies still render 2 places.
        let jpy = Currency::new("JPY").unwrap();
        assert_eq!(jpy.to_decimal(1500), "1500.00");
    }

    #[test]
    fn test_to_minor_truncates() {
        let gbp = Currency::new("GBP").unwrap();
        assert_eq!(gbp.to_minor("15.00").unwrap(), 1500);
        assert_eq!(gbp.to_minor("15.23").unwrap(), 1523);
        assert_eq!(gbp.to_minor("15.229").unwrap(), 1522);
        assert_eq!(gbp.to_minor("0.29").unwrap(), 29);
        assert_eq!(gbp.to_minor("7").unwrap(), 700);
        assert_eq!(gbp.to_minor(".5").unwrap(), 50);
        assert_eq!(gbp.to_minor("-1.05").unwrap(), -105);

        let jpy = Currency::new("JPY").unwrap();
        assert_eq!(jpy.to_minor("1500").unwrap(), 1500);
        assert_eq!(jpy.to_minor("1500.99").unwrap(), 1500);
    }

    #[test]
    fn test_to_minor_rejects_malformed_amounts() {
        let gbp = Currency::new("GBP").unwrap();
        for bad in ["", ".", "-", "12a", "1.2.3", "1,50", " 1.50"] {
            assert!(gbp.to_minor(bad).is_err(), "accepted {bad:?}");
        }
        // Overflow is reported rather than wrapped.
        assert!(gbp.to_minor("99999999999999999999").is_err());
    }

    #[test]
    fn test_minor_unit_round_trip() {
        // toInteger(toDecimal(n)) == n for integer minor-unit amounts on
        // exponent-2 currencies.
        let usd = Currency::new("USD").unwrap();
        for n in [0_i64, 1, 29, 99, 100, 1500, 123_456] {
            assert_eq!(usd.to_minor(&usd.to_decimal(n)).unwrap(), n, "round trip of {n}");
        }
    }

    #[test]
    fn test_display_is_code() {
        let eur = Currency::new("EUR").unwrap();
        assert_eq!(eur.to_string(), "EUR");
    }
}
