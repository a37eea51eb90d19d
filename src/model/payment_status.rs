//! Payment lifecycle statuses reported by the gateway.

use std::fmt;

/// The gateway-reported state of a payment.
///
/// Statuses are reported, never validated locally. The gateway is the
/// authority on which transitions are legal, so an unrecognised value is
/// carried through as [`PaymentStatus::Other`] rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentStatus {
    /// Payment completed.
    Success,
    /// Payment failed.
    Failed,
    /// Refund requested, not yet processed.
    SentForRefund,
    /// Refund completed.
    Refunded,
    /// Part of the captured amount refunded.
    PartiallyRefunded,
    /// Authorisation pending 3-D Secure verification.
    PreAuthorized,
    /// Authorised but not yet captured.
    Authorized,
    /// Authorisation cancelled.
    Cancelled,
    /// Authorisation expired uncaptured.
    Expired,
    /// Funds settled to the merchant.
    Settled,
    /// Payment charged back by the issuer.
    ChargedBack,
    /// Dispute opened; the gateway is requesting evidence.
    InformationRequested,
    /// Dispute evidence submitted.
    InformationSupplied,
    /// A status this library does not know about.
    Other(String),
}

impl PaymentStatus {
    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
            Self::SentForRefund => "SENT_FOR_REFUND",
            Self::Refunded => "REFUNDED",
            Self::PartiallyRefunded => "PARTIALLY_REFUNDED",
            Self::PreAuthorized => "PRE_AUTHORIZED",
            Self::Authorized => "AUTHORIZED",
            Self::Cancelled => "CANCELLED",
            Self::Expired => "EXPIRED",
            Self::Settled => "SETTLED",
            Self::ChargedBack => "CHARGED_BACK",
            Self::InformationRequested => "INFORMATION_REQUESTED",
            Self::InformationSupplied => "INFORMATION_SUPPLIED",
            Self::Other(status) => status,
        }
    }
}

impl From<&str> for PaymentStatus {
    fn from(status: &str) -> Self {
        match status {
            "SUCCESS" => Self::Success,
            "FAILED" => Self::Failed,
            "SENT_FOR_REFUND" => Self::SentForRefund,
            "REFUNDED" => Self::Refunded,
            "PARTIALLY_REFUNDED" => Self::PartiallyRefunded,
            "PRE_AUTHORIZED" => Self::PreAuthorized,
            "AUTHORIZED" => Self::Authorized,
            "CANCELLED" => Self::Cancelled,
            "EXPIRED" => Self::Expired,
            "SETTLED" => Self::Settled,
            "CHARGED_BACK" => Self::ChargedBack,
            "INFORMATION_REQUESTED" => Self::InformationRequested,
            "INFORMATION_SUPPLIED" => Self::InformationSupplied,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_statuses_round_trip() {
        for wire in [
            "SUCCESS",
            "FAILED",
            "SENT_FOR_REFUND",
            "REFUNDED",
            "PARTIALLY_REFUNDED",
            "PRE_AUTHORIZED",
            "AUTHORIZED",
            "CANCELLED",
            "EXPIRED",
            "SETTLED",
            "CHARGED_BACK",
            "INFORMATION_REQUESTED",
            "INFORMATION_SUPPLIED",
        ] {
            let status = PaymentStatus::from(wire);
            assert!(!matches!(status, PaymentStatus::Other(_)), "{wire}");
            assert_eq!(status.as_str(), wire);
        }
    }

    #[test]
    fn test_unknown_status_carried_through() {
        let status = PaymentStatus::from("FUTURE_STATUS");
        assert_eq!(status, PaymentStatus::Other("FUTURE_STATUS".into()));
        assert_eq!(status.to_string(), "FUTURE_STATUS");
    }
}
