//! End-to-end tests of the REST API.

use axum::{body::Body, Extension, Router};
use http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt as _;
use serde_json::{json, Value};
use service::infra::InMemory;
use tower::ServiceExt as _;

use application::{api, Service};

fn app() -> Router {
    api::router().layer(Extension(Service::new(InMemory::new())))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn payload(title: &str, price: u64, available: bool) -> Value {
    json!({
        "title": title,
        "description": "Two bedrooms, balcony, close to the subway.",
        "price": price,
        "currency": "USD",
        "area": 54,
        "address": "Av. Santa Fe 3253",
        "available": available,
    })
}

async fn create(app: &Router, body: &Value) -> Value {
    let (status, created) =
        send(app, json_request(Method::POST, "/api/listings", body)).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    created
}

#[tokio::test]
async fn creation_is_accepted_and_assigns_identifier() {
    let app = app();

    let created = create(&app, &payload("Loft in Palermo", 150_000, true)).await;

    assert!(!created["id"].as_str().unwrap().is_empty());
    assert_eq!(created["title"], "Loft in Palermo");
    assert_eq!(created["currency"], "USD");
    assert_eq!(created["available"], true);
    assert_eq!(created["createdAt"], created["updatedAt"]);

    // Timestamps travel as RFC 3339 text.
    let created_at = created["createdAt"].as_str().unwrap();
    assert!(created_at.contains('T'));
    assert!(created_at.ends_with('Z'));
}

#[tokio::test]
async fn listing_an_empty_store_returns_an_empty_array() {
    let app = app();

    let (status, body) = send(&app, get("/api/listings")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let (status, body) = send(
        &app,
        get("/api/listings?available=true&minPrice=80000&maxPrice=200000"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn listing_without_parameters_returns_everything_in_insertion_order() {
    let app = app();
    _ = create(&app, &payload("First", 100_000, true)).await;
    _ = create(&app, &payload("Second", 250_000, false)).await;

    let (status, body) = send(&app, get("/api/listings")).await;

    assert_eq!(status, StatusCode::OK);
    let found = body.as_array().unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found[0]["title"], "First");
    assert_eq!(found[1]["title"], "Second");
}

#[tokio::test]
async fn filters_by_availability_and_price_range() {
    let app = app();
    _ = create(&app, &payload("Too cheap", 75_000, true)).await;
    _ = create(&app, &payload("Just right", 120_000, true)).await;
    _ = create(&app, &payload("Unavailable", 120_000, false)).await;
    _ = create(&app, &payload("Too expensive", 300_000, true)).await;

    let (status, body) = send(
        &app,
        get("/api/listings?available=true&minPrice=80000&maxPrice=200000"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let found = body.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["title"], "Just right");
}

#[tokio::test]
async fn price_bounds_are_inclusive() {
    let app = app();
    _ = create(&app, &payload("On the edge", 80_000, true)).await;

    let (status, body) =
        send(&app, get("/api/listings?minPrice=80000&maxPrice=80000")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn blank_price_parameters_are_treated_as_absent() {
    let app = app();
    _ = create(&app, &payload("First", 100_000, true)).await;
    _ = create(&app, &payload("Second", 250_000, false)).await;

    let (status, body) =
        send(&app, get("/api/listings?minPrice=&maxPrice=%20%20")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn blank_availability_parameter_is_treated_as_absent() {
    let app = app();
    _ = create(&app, &payload("First", 100_000, true)).await;
    _ = create(&app, &payload("Second", 250_000, false)).await;

    let (status, body) = send(&app, get("/api/listings?available=")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn non_boolean_availability_parameter_is_a_validation_error() {
    let app = app();

    let (status, body) =
        send(&app, get("/api/listings?available=maybe")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation.error");
    assert_eq!(body["message"], "available must be either true or false");
    assert_eq!(body["path"], "/api/listings");
}

#[tokio::test]
async fn non_numeric_price_parameter_is_a_validation_error() {
    let app = app();

    let (status, body) = send(&app, get("/api/listings?minPrice=abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation.error");
    assert_eq!(body["status"], 400);
    assert_eq!(body["path"], "/api/listings");
    assert_eq!(
        body["message"],
        "invalid `Filter`: minimum price must be a decimal number",
    );
    assert!(!body["timestamp"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn contradictory_price_bounds_are_a_business_error() {
    let app = app();

    let (status, body) = send(
        &app,
        get("/api/listings?minPrice=200000&maxPrice=100000"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "exception.business");
    assert_eq!(
        body["message"],
        "invalid `Filter`: minimum price cannot exceed maximum price",
    );
}

#[tokio::test]
async fn single_negative_bound_is_not_an_error() {
    let app = app();
    _ = create(&app, &payload("Anything", 100_000, true)).await;

    let (status, body) = send(&app, get("/api/listings?minPrice=-5")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn update_replaces_fields_and_refreshes_update_datetime() {
    let app = app();
    let created = create(&app, &payload("Before", 100_000, true)).await;
    let id = created["id"].as_str().unwrap();

    // An identifier in the body is ignored in favor of the path one.
    let mut body = payload("After", 180_000, false);
    body["id"] = json!("99999999-9999-9999-9999-999999999999");

    let (status, updated) = send(
        &app,
        json_request(Method::PUT, &format!("/api/listings/{id}"), &body),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["title"], "After");
    assert_eq!(updated["available"], false);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_ne!(updated["updatedAt"], created["updatedAt"]);

    let (_, all) = send(&app, get("/api/listings")).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn update_of_missing_listing_is_not_found_and_writes_nothing() {
    let app = app();

    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            "/api/listings/00000000-0000-0000-0000-000000000000",
            &payload("Ghost", 100_000, true),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "exception.notFound");

    let (_, all) = send(&app, get("/api/listings")).await;
    assert!(all.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn update_with_malformed_identifier_is_a_validation_error() {
    let app = app();

    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            "/api/listings/not-a-uuid",
            &payload("Whatever", 100_000, true),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation.error");
    assert_eq!(body["message"], "id must be a valid UUID");
}

#[tokio::test]
async fn missing_title_is_a_validation_error() {
    let app = app();

    let mut body = payload("Unused", 100_000, true);
    _ = body.as_object_mut().unwrap().remove("title");

    let (status, resp) =
        send(&app, json_request(Method::POST, "/api/listings", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["code"], "validation.error");
    assert_eq!(
        resp["message"],
        "title is required and must be at most 150 characters",
    );
}

#[tokio::test]
async fn unknown_currency_is_a_validation_error() {
    let app = app();

    let mut body = payload("Unused", 100_000, true);
    body["currency"] = json!("EUR");

    let (status, resp) =
        send(&app, json_request(Method::POST, "/api/listings", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["code"], "validation.error");
    assert_eq!(
        resp["message"],
        "currency is required and must be one of: ARS, USD",
    );
}

#[tokio::test]
async fn non_positive_price_is_a_validation_error() {
    let app = app();

    let mut body = payload("Unused", 100_000, true);
    body["price"] = json!(0);

    let (status, resp) =
        send(&app, json_request(Method::POST, "/api/listings", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["code"], "validation.error");
    assert_eq!(resp["message"], "price must be a positive decimal number");
}
