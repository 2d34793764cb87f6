use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Duration;
use rust_decimal_macros::dec;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;
use wayfare_api::middleware::auth::issue_token;
use wayfare_api::state::{AppState, AuthConfig};
use wayfare_api::{app, demo};
use wayfare_booking::LifecycleEngine;
use wayfare_catalog::{Package, PackageType};
use wayfare_core::{Identity, LogNotifier};
use wayfare_store::app_config::RateLimitConfig;

const SECRET: &str = "api-test-secret";

const BOOKING_FORM: &str = "name=Rohan+Mehta&email=rohan@example.com&phone=9876543210\
    &travel_date=2025-03-10&number_of_adults=2&number_of_children=1";

fn setup() -> (Router, Package) {
    let package = Package::new("Spiti Valley Expedition", dec!(1000), PackageType::National, "7 Days").unwrap();
    let (stores, catalog) = demo::in_memory_stores(vec![package.clone()]);

    let state = AppState {
        engine: Arc::new(LifecycleEngine::new(stores, Arc::new(LogNotifier))),
        packages: catalog,
        redis: None,
        auth: AuthConfig {
            secret: SECRET.to_string(),
        },
        rate_limit: RateLimitConfig::default(),
    };
    (app(state), package)
}

fn token_for(identity: &Identity, role: &str) -> String {
    issue_token(identity, role, SECRET, Duration::hours(1)).unwrap()
}

fn customer() -> Identity {
    Identity::new(Uuid::new_v4(), format!("{}@example.com", Uuid::new_v4()))
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let payload = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, payload)
}

async fn book(router: &Router, package: &Package, token: Option<&str>) -> String {
    let (status, payload) = send(
        router,
        post_form(&format!("/v1/packages/{}/bookings", package.id), BOOKING_FORM, token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    payload["booking_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let (router, _) = setup();
    let (status, payload) = send(&router, get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["status"], "ok");
}

#[tokio::test]
async fn test_package_lookup() {
    let (router, package) = setup();

    let (status, payload) = send(&router, get(&format!("/v1/packages/{}", package.id), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["slug"], "spiti-valley-expedition");
    assert_eq!(payload["type"], "national");

    let (status, _) = send(&router, get(&format!("/v1/packages/{}", Uuid::new_v4()), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_guest_booking_is_priced_and_publicly_viewable() {
    let (router, package) = setup();
    let booking_id = book(&router, &package, None).await;

    let (status, payload) = send(&router, get(&format!("/v1/bookings/{}/confirmation", booking_id), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["status"], "pending");
    assert_eq!(payload["total_price"], "2500.00");
    assert_eq!(payload["number_of_adults"], 2);

    let someone = customer();
    let token = token_for(&someone, "CUSTOMER");
    let (status, _) = send(
        &router,
        get(&format!("/v1/bookings/{}/confirmation", booking_id), Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_invalid_booking_reports_fields() {
    let (router, package) = setup();
    let body = "name=Rohan&email=not-an-email&phone=123&travel_date=2025-03-10&number_of_adults=0";

    let (status, payload) = send(
        &router,
        post_form(&format!("/v1/packages/{}/bookings", package.id), body, None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let fields: Vec<&str> = payload["fields"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|f| f["field"].as_str())
        .collect();
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"number_of_adults"));
}

#[tokio::test]
async fn test_short_count_names_do_not_clash_with_form_fields() {
    let (router, package) = setup();
    let body = "name=Rohan+Mehta&email=rohan@example.com&phone=9876543210&travel_date=2025-03-10\
        &adults=5&number_of_adults=2&children=4&number_of_children=1";

    let (status, payload) = send(
        &router,
        post_form(&format!("/v1/packages/{}/bookings", package.id), body, None),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let booking_id = payload["booking_id"].as_str().unwrap();

    let (status, payload) = send(&router, get(&format!("/v1/bookings/{}/confirmation", booking_id), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["number_of_adults"], 2);
    assert_eq!(payload["number_of_children"], 1);
    assert_eq!(payload["total_price"], "2500.00");
}

#[tokio::test]
async fn test_oversized_party_is_a_field_error() {
    let (router, package) = setup();
    let body = "name=Rohan+Mehta&email=rohan@example.com&phone=9876543210&travel_date=2025-03-10\
        &number_of_adults=3000000000";

    let (status, payload) = send(
        &router,
        post_form(&format!("/v1/packages/{}/bookings", package.id), body, None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["fields"][0]["field"], "number_of_adults");
}

#[tokio::test]
async fn test_booking_unknown_package_is_not_found() {
    let (router, _) = setup();
    let (status, _) = send(
        &router,
        post_form(&format!("/v1/packages/{}/bookings", Uuid::new_v4()), BOOKING_FORM, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_owned_confirmation_visible_to_owner_only() {
    let (router, package) = setup();
    let owner = customer();
    let owner_token = token_for(&owner, "CUSTOMER");
    let booking_id = book(&router, &package, Some(&owner_token)).await;
    let uri = format!("/v1/bookings/{}/confirmation", booking_id);

    let (status, _) = send(&router, get(&uri, None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let other_token = token_for(&customer(), "CUSTOMER");
    let (status, _) = send(&router, get(&uri, Some(&other_token))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&router, get(&uri, Some(&owner_token))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_me_routes_require_identity() {
    let (router, _) = setup();

    let (status, _) = send(&router, get("/v1/me/bookings", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&router, get("/v1/me/bookings", Some("not-a-jwt"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let wrong_secret = issue_token(&customer(), "CUSTOMER", "other-secret", Duration::hours(1)).unwrap();
    let (status, _) = send(&router, get("/v1/me/bookings", Some(&wrong_secret))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_role_is_forbidden() {
    let (router, _) = setup();
    let token = token_for(&customer(), "GUEST");
    let (status, _) = send(&router, get("/v1/me/bookings", Some(&token))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_and_cancel_flow() {
    let (router, package) = setup();
    let owner = customer();
    let token = token_for(&owner, "CUSTOMER");

    let first = book(&router, &package, Some(&token)).await;
    let second = book(&router, &package, Some(&token)).await;
    book(&router, &package, None).await;

    let (status, payload) = send(&router, get("/v1/me/bookings", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = payload.as_array().unwrap().iter().filter_map(|b| b["id"].as_str()).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&first.as_str()) && ids.contains(&second.as_str()));

    let cancel_uri = format!("/v1/me/bookings/{}/cancel", first);
    let (status, payload) = send(&router, post_form(&cancel_uri, "", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["status"], "cancelled");
    assert_eq!(payload["total_price"], "2500.00");

    let (status, _) = send(&router, post_form(&cancel_uri, "", Some(&token))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, payload) = send(&router, get(&format!("/v1/me/bookings/{}", first), Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["status"], "cancelled");
}

#[tokio::test]
async fn test_foreign_booking_reported_as_missing() {
    let (router, package) = setup();
    let owner_token = token_for(&customer(), "CUSTOMER");
    let booking_id = book(&router, &package, Some(&owner_token)).await;

    let intruder = token_for(&customer(), "CUSTOMER");
    let (status, _) = send(&router, get(&format!("/v1/me/bookings/{}", booking_id), Some(&intruder))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &router,
        post_form(&format!("/v1/me/bookings/{}/cancel", booking_id), "", Some(&intruder)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_custom_tour_submission() {
    let (router, _) = setup();
    let base = "name=Meera&email=meera@example.com&phone=9000000000&destination=Iceland&budget=3+lakh";

    let ok = format!("{}&start_date=2025-06-01&end_date=2025-06-12", base);
    let (status, payload) = send(&router, post_form("/v1/custom-tours", &ok, None)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(payload["request_id"].is_string());

    let reversed = format!("{}&start_date=2025-06-12&end_date=2025-06-01", base);
    let (status, payload) = send(&router, post_form("/v1/custom-tours", &reversed, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["fields"][0]["field"], "end_date");
}

#[tokio::test]
async fn test_contact_submission() {
    let (router, _) = setup();

    let body = "name=Kabir&email=kabir@example.com&subject=Visa+help&message=Do+you+assist+with+visas";
    let (status, payload) = send(&router, post_form("/v1/contact", body, None)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(payload["inquiry_id"].is_string());

    let (status, _) = send(&router, post_form("/v1/contact", "name=Kabir", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
