//! Worldpay Online Payments: a typed client for the REST API
//!
//! A Rust library covering the full order lifecycle against the Worldpay
//! Online Payments gateway: tokenising payment details, placing and
//! searching orders, capture and cancellation of authorizations, refunds,
//! 3-D Secure completion, and dispute defence.
//!
//! # How it fits together
//!
//! ```text
//! ┌──────────────┐   Card / APM details
//! │  your server │──────────────────────┐
//! └──────┬───────┘                      │
//!        │                     ┌────────▼────────┐
//!        │                     │  POST /tokens   │  create_token
//!        │                     └────────┬────────┘
//!        │       Token (id, reusable)   │
//!        │◀─────────────────────────────┘
//!        │
//!        │  Order (token + amount + currency)
//!        │                     ┌─────────────────┐
//!        └────────────────────▶│  POST /orders   │  create_order
//!                              └────────┬────────┘
//!        capture / refund / cancel ◀────┘ SUCCESS or PRE_AUTHORIZED (3DS)
//! ```
//!
//! Payment details are exchanged for a [`model::Token`] first, so card
//! numbers never need to touch the merchant's own storage. Orders spend a
//! token; everything afterwards (capture, refund, cancel, dispute) refers
//! to the gateway-assigned order code.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use worldpay::{Client, Config};
//! use worldpay::model::{Card, Currency, Order, OrderType};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_toml_path("worldpay.toml")?;
//! let client = Client::new(config)?;
//!
//! // Exchange card details for a single-use token.
//! let card = Card::new("EXAMPLE CUSTOMER", "4444333322221111", "123", 2, 2029)?;
//! let token = client
//!     .create_token(&card.into(), false)?
//!     .ok_or("tokenisation declined")?;
//!
//! // Spend it.
//! let order = Order::new(OrderType::Ecom)
//!     .with_token(token)
//!     .with_amount(1523)
//!     .with_currency(Currency::new("GBP")?)
//!     .with_payee_name("EXAMPLE CUSTOMER")
//!     .with_description("Goods and Services");
//! let placed = client.create_order(&order)?.ok_or("order declined")?;
//! println!("order code: {:?}", placed.code());
//! # Ok(())
//! # }
//! ```
//!
//! # Module organization
//!
//! - [`client`]: the [`Client`] itself, one method per endpoint
//! - [`model`]: orders, tokens, payment methods, addresses, currencies
//! - [`envelope`]: classification of raw gateway responses
//! - [`config`]: TOML-deserializable connection settings
//! - [`error`]: validation and gateway error types
//!
//! # Error handling
//!
//! All operations return [`Result<T, WorldpayError>`](error::Result).
//! Local validation problems surface before any request is made; gateway
//! rejections carry the structured error body, including the custom code
//! callers can branch on:
//!
//! ```rust,no_run
//! use worldpay::{error::custom_code, Client, WorldpayError};
//!
//! # fn example(client: &Client) {
//! match client.get_order("missing-order-code") {
//!     Ok(Some(order)) => println!("status: {:?}", order.payment_status()),
//!     Ok(None) => println!("no order body returned"),
//!     Err(WorldpayError::Gateway(err)) if err.is_code(custom_code::ORDER_NOT_FOUND) => {
//!         println!("no such order");
//!     }
//!     Err(err) => eprintln!("failed: {err}"),
//! }
//! # }
//! ```
//!
//! # Amounts
//!
//! Amounts are always whole numbers of minor units (pence, cents). Use
//! [`model::Currency::to_minor`] to convert decimal amounts safely and
//! [`model::Order::parse_amount`] to validate untrusted input.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod model;

pub use client::Client;
pub use config::Config;
pub use envelope::Envelope;
pub use error::{GatewayError, Result, WorldpayError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify public API is accessible
        let _ = std::marker::PhantomData::<WorldpayError>;
    }
}
