//! Integration tests for the order lifecycle.
//!
//! Exercises request assembly and response interpretation end to end
//! against canned gateway bodies, without a socket.

use serde_json::{json, Value};
use worldpay::error::custom_code;
use worldpay::model::{
    Address, Card, Currency, Evidence, Order, OrderSearch, OrderType, PaymentStatus, Shopper,
};
use worldpay::{Client, Config, Envelope, WorldpayError};

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn json_envelope(status: u16, reason: &str, body: &Value) -> Envelope {
    Envelope::interpret(
        status,
        reason,
        Some("application/json"),
        None,
        body.to_string().as_bytes(),
    )
    .expect("should classify body")
}

fn obfuscated_card() -> Value {
    json!({
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
    })
}

#[test]
fn test_full_order_request_assembly() {
    init_tracing();

    let card = Card::new("EXAMPLE CUSTOMER", "4444333322221111", "123", 2, 2029)
        .expect("valid card");
    let billing = Address::new("221B Baker Street", "London", "NW1 6XE", "GB")
        .expect("valid address");
    let shopper = Shopper::new()
        .with_email("shopper@example.com")
        .with_ip("203.0.113.7")
        .with_session_id("session-xyz")
        .with_user_agent("Mozilla/5.0")
        .with_accept_header("text/html");

    // Tokenisation body for the card.
    let token = worldpay::model::Token::new("TEST_RU_tok", true)
        .with_payment_method(card.into())
        .with_client_key("T_C_client_key");
    let token_params = token.parameters().expect("card attached");
    assert_eq!(token_params["paymentMethod"]["cardNumber"], "4444333322221111");
    assert_eq!(token_params["clientKey"], "T_C_client_key");

    // Order body spending the token.
    let order = Order::new(OrderType::Ecom)
        .with_token(worldpay::model::Token::new("TEST_RU_tok", true))
        .with_amount(1523)
        .with_currency(Currency::new("GBP").expect("known currency"))
        .with_payee_name("EXAMPLE CUSTOMER")
        .with_description("Goods and Services")
        .with_three_d_secure(true)
        .with_billing_address(billing)
        .with_shopper(shopper)
        .with_customer_reference("CUST-001");
    let params = order.parameters().expect("complete order");

    assert_eq!(params["amount"], 1523);
    assert_eq!(params["currencyCode"], "GBP");
    assert_eq!(params["currencyCodeExponent"], 2);
    assert_eq!(params["orderType"], "ECOM");
    assert_eq!(params["token"], "TEST_RU_tok");
    assert_eq!(params["is3DSOrder"], true);
    assert_eq!(params["shopperSessionId"], "session-xyz");
    assert_eq!(params["billingAddress"]["countryCode"], "GB");
    assert_eq!(params["customerOrderCode"], "CUST-001");
}

#[test]
fn test_successful_order_response_parsing() {
    let body = json!({
        "orderCode": "worldpay-order-code",
        "token": "TEST_RU_tok",
        "orderDescription": "Goods and Services",
        "amount": 1523,
        "currencyCode": "GBP",
        "orderType": "ECOM",
        "paymentStatus": "SUCCESS",
        "environment": "TEST",
        "paymentResponse": obfuscated_card(),
    });
    let order = Order::parse(&json_envelope(200, "OK", &body))
        .expect("valid shape")
        .expect("200 response");
    assert_eq!(order.code(), Some("worldpay-order-code"));
    assert_eq!(order.payment_status(), Some(&PaymentStatus::Success));
    assert_eq!(order.payee_name(), Some("EXAMPLE CUSTOMER"));
    let method = order.payment_response().expect("payment response");
    assert_eq!(method.method_type(), "ObfuscatedCard");
}

#[test]
fn test_three_d_secure_round_trip_state() {
    // Creation response: pre-authorized with redirect details.
    let body = json!({
        "orderCode": "worldpay-3ds-order",
        "token": "TEST_RU_tok",
        "currencyCode": "GBP",
        "amount": 1523,
        "is3DSOrder": true,
        "paymentStatus": "PRE_AUTHORIZED",
        "redirectURL": "https://secure-test.worldpay.com/jsp/test/shopper/ThreeDResponseSimulator.jsp",
        "oneTime3DsToken": "pareq-token",
    });
    let pending = Order::parse(&json_envelope(200, "OK", &body))
        .expect("valid shape")
        .expect("200 response");
    assert!(pending.is_three_d_secure());
    assert_eq!(pending.payment_status(), Some(&PaymentStatus::PreAuthorized));
    assert_eq!(pending.three_ds_token(), Some("pareq-token"));
    assert!(pending.redirect_url().is_some());

    // Completion response after the issuer responds.
    let body = json!({
        "orderCode": "worldpay-3ds-order",
        "token": "TEST_RU_tok",
        "currencyCode": "GBP",
        "amount": 1523,
        "is3DSOrder": true,
        "paymentStatus": "SUCCESS",
        "paymentResponse": obfuscated_card(),
    });
    let completed = Order::parse(&json_envelope(200, "OK", &body))
        .expect("valid shape")
        .expect("200 response");
    assert_eq!(completed.payment_status(), Some(&PaymentStatus::Success));
}

#[test]
fn test_gateway_error_body_surfaces_custom_code() {
    let body = br#"{
        "httpStatusCode": 404,
        "customCode": "ORDER_NOT_FOUND",
        "message": "Order with Order Code: missing not found",
        "description": "Order not found",
        "errorHelpUrl": null,
        "originalRequest": "{}"
    }"#;
    let err = Envelope::interpret(404, "Not Found", Some("application/json"), None, body)
        .expect_err("error body should raise");
    let WorldpayError::Gateway(gateway) = err else {
        panic!("expected gateway error, got {err:?}");
    };
    assert!(gateway.is_code(custom_code::ORDER_NOT_FOUND));
    assert_eq!(gateway.status_code(), Some(404));
}

#[test]
fn test_order_search_csv_attachment_passthrough() {
    let search = OrderSearch::new().with_csv(true);
    assert!(search.query().contains(&("csv".into(), "true".into())));

    let envelope = Envelope::interpret(
        200,
        "OK",
        Some("application/octet-stream"),
        Some("attachment; filename=orders.csv"),
        b"code,amount\r\nworldpay-order-code,1523\r\n",
    )
    .expect("attachment classification");
    assert_eq!(
        envelope.attachment().expect("raw csv"),
        b"code,amount\r\nworldpay-order-code,1523\r\n"
    );
}

#[test]
fn test_config_to_client_flow() {
    let config = Config::from_toml_str(
        r#"
        service_key = "T_S_f50ecb46-ca82-44a7-9c40-421818af5c4a"
        client_key = "T_C_6d103f82-76bb-4ad8-b1fb-d33d1ff93fee"
        timeout_secs = 30
        "#,
    )
    .expect("valid TOML");
    let client = Client::new(config).expect("valid config");
    assert_eq!(client.client_key(), "T_C_6d103f82-76bb-4ad8-b1fb-d33d1ff93fee");
}

#[test]
fn test_evidence_request_body() {
    let evidence = Evidence::from_file("delivery-note.pdf", b"%PDF-1.4 proof")
        .expect("valid evidence");
    let params = evidence.parameters();
    assert_eq!(params["documentName"], "delivery-note.pdf");
    assert!(params.contains_key("documentDataInBase64"));
}

#[test]
fn test_builder_chain_leaves_template_untouched() {
    let template = Order::new(OrderType::Recurring)
        .with_currency(Currency::new("USD").expect("known currency"))
        .with_description("Monthly subscription");
    let first = template
        .with_token(worldpay::model::Token::new("TEST_RU_a", true))
        .with_amount(999)
        .with_payee_name("CUSTOMER A");
    let second = template
        .with_token(worldpay::model::Token::new("TEST_RU_b", true))
        .with_amount(1999)
        .with_payee_name("CUSTOMER B");

    assert_eq!(first.amount(), Some(999));
    assert_eq!(second.amount(), Some(1999));
    assert_eq!(template.amount(), None);
    assert!(template.parameters().is_err());
}
