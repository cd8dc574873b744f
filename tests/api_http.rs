//! HTTP-level tests for the SWIFT code REST API.
//!
//! Each test builds the router over a fresh in-memory store and drives it
//! with `oneshot`, so no listener or database file is involved.

#![cfg(feature = "server")]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use swift_registry::api::build_router;
use swift_registry::SwiftService;
use tower::ServiceExt;

// ── Helpers ───────────────────────────────────────────────────

fn hq_payload() -> Value {
    json!({
        "swiftCode": "TESTUS99XXX",
        "bankName": "Test Bank",
        "address": "123 Wall Street",
        "countryISO2": "US",
        "countryName": "UNITED STATES",
        "isHeadquarter": true
    })
}

fn branch_payload() -> Value {
    json!({
        "swiftCode": "TESTUS99001",
        "bankName": "Test Branch",
        "address": "456 Main Street",
        "countryISO2": "US",
        "countryName": "UNITED STATES",
        "isHeadquarter": false
    })
}

fn app() -> (Router, SwiftService) {
    let service = SwiftService::in_memory().unwrap();
    (build_router(service.clone()), service)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

// ── Tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_health() {
    let (app, _) = app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_create_swift_code() {
    let (app, service) = app();
    let (status, body) = send(&app, "POST", "/v1/swift-codes", Some(hq_payload())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "SWIFT code added successfully.");
    assert_eq!(service.count().unwrap(), 1);
}

#[tokio::test]
async fn test_create_example_headquarter() {
    let (app, _) = app();
    let payload = json!({
        "swiftCode": "EXAMPLUSXXX",
        "bankName": "Example Bank",
        "address": "1 Example Avenue",
        "countryISO2": "US",
        "countryName": "United States"
    });
    let (status, _) = send(&app, "POST", "/v1/swift-codes", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "GET", "/v1/swift-codes/EXAMPLUSXXX", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isHeadquarter"], true);
    assert_eq!(body["countryName"], "UNITED STATES");
}

#[tokio::test]
async fn test_create_duplicate_swift_code() {
    let (app, _) = app();
    send(&app, "POST", "/v1/swift-codes", Some(hq_payload())).await;
    let (status, body) = send(&app, "POST", "/v1/swift-codes", Some(hq_payload())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "SWIFT code already exists.");
}

#[tokio::test]
async fn test_get_headquarter_with_branches() {
    let (app, _) = app();
    send(&app, "POST", "/v1/swift-codes", Some(hq_payload())).await;
    send(&app, "POST", "/v1/swift-codes", Some(branch_payload())).await;

    let (status, body) = send(&app, "GET", "/v1/swift-codes/TESTUS99XXX", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["swiftCode"], "TESTUS99XXX");
    assert_eq!(body["bankName"], "Test Bank");
    assert_eq!(body["isHeadquarter"], true);
    let branches = body["branches"].as_array().unwrap();
    assert_eq!(branches.len(), 1);
    assert_eq!(branches[0]["swiftCode"], "TESTUS99001");

    let (status, body) = send(&app, "GET", "/v1/swift-codes/testus99001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isHeadquarter"], false);
    assert!(body.get("branches").is_none());
}

#[tokio::test]
async fn test_create_missing_field() {
    let (app, service) = app();
    let mut payload = hq_payload();
    payload.as_object_mut().unwrap().remove("bankName");

    let (status, body) = send(&app, "POST", "/v1/swift-codes", Some(payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.to_string().contains("bankName"));
    assert_eq!(service.count().unwrap(), 0);
}

#[tokio::test]
async fn test_create_empty_bank_name() {
    let (app, _) = app();
    let mut payload = hq_payload();
    payload["bankName"] = json!("");

    let (status, body) = send(&app, "POST", "/v1/swift-codes", Some(payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["field"], "bankName");
}

#[tokio::test]
async fn test_create_invalid_code_and_country() {
    let (app, _) = app();
    let payload = json!({
        "swiftCode": "123",
        "bankName": "Bad Bank",
        "address": "Nowhere",
        "countryISO2": "USA",
        "countryName": "United States",
        "isHeadquarter": true
    });

    let (status, body) = send(&app, "POST", "/v1/swift-codes", Some(payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["swiftCode", "countryISO2"]);
}

#[tokio::test]
async fn test_create_country_mismatch() {
    let (app, _) = app();
    let mut payload = hq_payload();
    payload["countryISO2"] = json!("PL");

    let (status, body) = send(&app, "POST", "/v1/swift-codes", Some(payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["field"], "countryISO2");
}

#[tokio::test]
async fn test_get_by_country() {
    let (app, _) = app();
    send(&app, "POST", "/v1/swift-codes", Some(branch_payload())).await;
    send(&app, "POST", "/v1/swift-codes", Some(hq_payload())).await;

    let (status, body) = send(&app, "GET", "/v1/swift-codes/country/US", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["countryISO2"], "US");
    assert_eq!(body["countryName"], "UNITED STATES");
    let codes: Vec<&str> = body["swiftCodes"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["swiftCode"].as_str())
        .collect();
    assert_eq!(codes, vec!["TESTUS99001", "TESTUS99XXX"]);
}

#[tokio::test]
async fn test_get_by_country_empty() {
    let (app, _) = app();
    let (status, body) = send(&app, "GET", "/v1/swift-codes/country/DE", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["countryISO2"], "DE");
    assert!(body["swiftCodes"].as_array().unwrap().is_empty());
    assert!(body.get("countryName").is_none());
}

#[tokio::test]
async fn test_get_by_country_malformed() {
    let (app, _) = app();
    let (status, _) = send(&app, "GET", "/v1/swift-codes/country/USA", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_delete_swift_code() {
    let (app, service) = app();
    send(&app, "POST", "/v1/swift-codes", Some(branch_payload())).await;

    let (status, body) = send(&app, "DELETE", "/v1/swift-codes/TESTUS99001", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "SWIFT code deleted successfully.");
    assert_eq!(service.count().unwrap(), 0);
}

#[tokio::test]
async fn test_get_nonexistent_code() {
    let (app, _) = app();
    let (status, body) = send(&app, "GET", "/v1/swift-codes/NOPENOPEXXX", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "SWIFT code not found");
}

#[tokio::test]
async fn test_delete_nonexistent_code() {
    let (app, _) = app();
    let (status, body) = send(&app, "DELETE", "/v1/swift-codes/DOESNOTEXIST", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "SWIFT code not found");
}

#[tokio::test]
async fn test_imported_records_are_served() {
    let (app, service) = app();
    let dataset = "COUNTRY ISO2 CODE,SWIFT CODE,NAME,ADDRESS,COUNTRY NAME\n\
                   PL,BPKOPLPWXXX,PKO Bank Polski,Pulawska 15 Warszawa,Poland\n\
                   PL,BPKOPLPWKRA,PKO Bank Polski,Krakow Branch,Poland\n";
    let mut file = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(&mut file, dataset.as_bytes()).unwrap();
    let report = service.import_dataset(file.path()).unwrap();
    assert_eq!(report.inserted, 2);

    let (status, body) = send(&app, "GET", "/v1/swift-codes/BPKOPLPWXXX", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bankName"], "PKO BANK POLSKI");
    assert_eq!(body["branches"][0]["swiftCode"], "BPKOPLPWKRA");

    let (_, body) = send(&app, "GET", "/v1/swift-codes/country/pl", None).await;
    assert_eq!(body["countryName"], "POLAND");
    assert_eq!(body["swiftCodes"].as_array().unwrap().len(), 2);
}
