//! Domain types for the Worldpay Online Payments API.

mod address;
mod country;
mod currency;
mod evidence;
mod order;
mod payment_method;
mod payment_status;
mod shopper;
mod token;

pub use address::Address;
pub use country::Country;
pub use currency::Currency;
pub use evidence::{Evidence, FILE_EXTENSIONS, MAX_FILE_SIZE, MIN_UPLOAD_INTERVAL};
pub use order::{
    CallbackUrls, Order, OrderSearch, OrderSearchResult, OrderType, CUSTOMER_IDENTIFIER_KEYS,
    SORT_PROPERTIES,
};
pub use payment_method::{apm_name, card_class, card_scheme, card_type};
pub use payment_method::{Apm, Card, ObfuscatedCard, PaymentMethod};
pub use payment_status::PaymentStatus;
pub use shopper::{RequestContext, Shopper};
pub use token::Token;
