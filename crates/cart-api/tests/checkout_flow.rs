//! End-to-end checkout flow tests: real router, mocked rate provider and
//! Stripe API.

use axum_test::TestServer;
use cart_api::{create_router, AppConfig, AppState};
use cart_core::{CurrencyCode, DiscountTable};
use cart_fx::{FxConfig, RateClient};
use cart_stripe::{StripeCheckoutClient, StripeConfig};
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        public_dir: "public".to_string(),
        base_currency: CurrencyCode::usd(),
        success_url: "http://localhost:4400/success.html".to_string(),
        cancel_url: "http://localhost:4400/cancel.html".to_string(),
    }
}

fn test_server(fx: &MockServer, stripe: &MockServer) -> TestServer {
    let rates = RateClient::new(FxConfig::new("test_key").with_api_base_url(fx.uri()));
    let stripe_client =
        StripeCheckoutClient::new(StripeConfig::new("sk_test_abc").with_api_base_url(stripe.uri()));

    let state = AppState::with_clients(
        test_config(),
        DiscountTable::standard(),
        Arc::new(rates),
        Arc::new(stripe_client),
    );

    TestServer::new(create_router(state)).expect("failed to start test server")
}

fn mug_cart() -> serde_json::Value {
    serde_json::json!({
        "items": [{ "name": "Mug", "price": 10.00, "quantity": 2 }]
    })
}

async fn mount_session_ok(stripe: &MockServer, id: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": id })))
        .mount(stripe)
        .await;
}

#[tokio::test]
async fn same_currency_cart_skips_rate_lookup() {
    let fx = MockServer::start().await;
    let stripe = MockServer::start().await;

    // Any call to the rate provider is a failure here
    Mock::given(method("GET"))
        .and(path("/live"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&fx)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .and(body_string_contains(
            "line_items%5B0%5D%5Bprice_data%5D%5Bunit_amount%5D=1000",
        ))
        .and(body_string_contains("line_items%5B0%5D%5Bquantity%5D=2"))
        .and(body_string_contains(
            "line_items%5B0%5D%5Bprice_data%5D%5Bcurrency%5D=usd",
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "cs_usd_1" })),
        )
        .expect(1)
        .mount(&stripe)
        .await;

    let server = test_server(&fx, &stripe);
    let response = server
        .post("/create-checkout-session")
        .json(&mug_cart())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], "cs_usd_1");
}

#[tokio::test]
async fn converted_cart_rescales_line_items() {
    let fx = MockServer::start().await;
    let stripe = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "quotes": { "USDEUR": 0.90 }
        })))
        .expect(1)
        .mount(&fx)
        .await;

    // 2000 USD-minor * 0.90 = 1800; unit rescales to 900
    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .and(body_string_contains(
            "line_items%5B0%5D%5Bprice_data%5D%5Bunit_amount%5D=900",
        ))
        .and(body_string_contains(
            "line_items%5B0%5D%5Bprice_data%5D%5Bcurrency%5D=eur",
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "cs_eur_1" })),
        )
        .expect(1)
        .mount(&stripe)
        .await;

    let server = test_server(&fx, &stripe);
    let mut cart = mug_cart();
    cart["currency"] = serde_json::json!("EUR");

    let response = server.post("/create-checkout-session").json(&cart).await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], "cs_eur_1");
}

#[tokio::test]
async fn flat_promo_creates_coupon_and_references_it() {
    let fx = MockServer::start().await;
    let stripe = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/coupons"))
        .and(body_string_contains("amount_off=500"))
        .and(body_string_contains("currency=usd"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "co_flat5" })),
        )
        .expect(1)
        .mount(&stripe)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .and(body_string_contains("discounts%5B0%5D%5Bcoupon%5D=co_flat5"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "cs_promo_1" })),
        )
        .expect(1)
        .mount(&stripe)
        .await;

    let server = test_server(&fx, &stripe);
    let mut cart = mug_cart();
    cart["promoCode"] = serde_json::json!("FLAT5");
    cart["currency"] = serde_json::json!("USD");

    let response = server.post("/create-checkout-session").json(&cart).await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], "cs_promo_1");
}

#[tokio::test]
async fn unknown_promo_creates_no_coupon() {
    let fx = MockServer::start().await;
    let stripe = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/coupons"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&stripe)
        .await;

    mount_session_ok(&stripe, "cs_lenient_1").await;

    let server = test_server(&fx, &stripe);
    let mut cart = mug_cart();
    cart["promoCode"] = serde_json::json!("WELCOME20");

    let response = server.post("/create-checkout-session").json(&cart).await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], "cs_lenient_1");
}

#[tokio::test]
async fn empty_cart_is_rejected() {
    let fx = MockServer::start().await;
    let stripe = MockServer::start().await;

    let server = test_server(&fx, &stripe);
    let response = server
        .post("/create-checkout-session")
        .json(&serde_json::json!({ "items": [] }))
        .await;

    response.assert_status_bad_request();
    assert!(response.text().contains("no items"));
}

#[tokio::test]
async fn zero_total_cart_is_rejected() {
    let fx = MockServer::start().await;
    let stripe = MockServer::start().await;

    let server = test_server(&fx, &stripe);
    let response = server
        .post("/create-checkout-session")
        .json(&serde_json::json!({
            "items": [{ "name": "Freebie", "price": 0.0, "quantity": 3 }]
        }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn malformed_currency_is_rejected() {
    let fx = MockServer::start().await;
    let stripe = MockServer::start().await;

    let server = test_server(&fx, &stripe);
    let mut cart = mug_cart();
    cart["currency"] = serde_json::json!("EURO");

    let response = server.post("/create-checkout-session").json(&cart).await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn upstream_failure_yields_generic_500() {
    let fx = MockServer::start().await;
    let stripe = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error": { "message": "internal stripe detail" }
        })))
        .mount(&stripe)
        .await;

    let server = test_server(&fx, &stripe);
    let response = server
        .post("/create-checkout-session")
        .json(&mug_cart())
        .await;

    response.assert_status_internal_server_error();
    // Upstream detail must never reach the caller
    assert_eq!(response.text(), "Internal Server Error");
}

#[tokio::test]
async fn rate_provider_failure_yields_generic_500() {
    let fx = MockServer::start().await;
    let stripe = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "error": { "code": 104, "info": "usage limit reached" }
        })))
        .mount(&fx)
        .await;

    let server = test_server(&fx, &stripe);
    let mut cart = mug_cart();
    cart["currency"] = serde_json::json!("EUR");

    let response = server.post("/create-checkout-session").json(&cart).await;

    response.assert_status_internal_server_error();
    assert_eq!(response.text(), "Internal Server Error");
}
