//! Integration tests for `CatalogClient` and `load_products` using wiremock HTTP mocks.

use std::time::Duration;

use iwv_core::SourceConfig;
use iwv_source::{load_products, CatalogClient, LocalStore, ProductCache, SourceError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SHEET_PATH: &str = "/sheet-123/values/fruits!A1:D";

fn sheet_client(base_url: &str, max_attempts: u32) -> CatalogClient {
    let source = SourceConfig::Sheet {
        spreadsheet_id: "sheet-123".to_owned(),
        api_key: "test-key".to_owned(),
        sheet_name: "fruits".to_owned(),
        base_url: base_url.to_owned(),
    };
    CatalogClient::new(source, 5, max_attempts, 0).expect("client construction should not fail")
}

fn sheet_body() -> serde_json::Value {
    serde_json::json!({
        "range": "fruits!A1:D3",
        "majorDimension": "ROWS",
        "values": [
            ["Product Name", "Unit", "Price", "Indent"],
            ["Apple", "/KG", "$3.20", "FALSE"],
            ["Durian Box", "/BOX", "$45.00", "TRUE"]
        ]
    })
}

fn temp_cache(name: &str) -> ProductCache {
    let dir = std::env::temp_dir().join(format!("iwv-it-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    ProductCache::new(
        LocalStore::new(dir.join("local_storage.json")),
        Duration::from_secs(6 * 60 * 60),
    )
}

#[tokio::test]
async fn fetch_sheet_returns_normalized_products() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SHEET_PATH))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sheet_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = sheet_client(&server.uri(), 3);
    let products = client.fetch_products().await.expect("should parse sheet");

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].product_name, "Apple");
    assert_eq!(products[0].unit_of_measure, "/KG");
    assert_eq!(products[0].sales_price, "$3.20");
    assert!(!products[0].indent);
    assert!(products[1].indent);
}

#[tokio::test]
async fn transient_server_error_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SHEET_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SHEET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(sheet_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = sheet_client(&server.uri(), 3);
    let products = client
        .fetch_products()
        .await
        .expect("second attempt should succeed");
    assert_eq!(products.len(), 2);
}

#[tokio::test]
async fn persistent_server_error_gives_up_after_max_attempts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SHEET_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let client = sheet_client(&server.uri(), 3);
    let err = client.fetch_products().await.unwrap_err();
    assert!(
        matches!(err, SourceError::UnexpectedStatus { status: 500, .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn forbidden_is_not_retried_and_hides_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SHEET_PATH))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let client = sheet_client(&server.uri(), 3);
    let err = client.fetch_products().await.unwrap_err();
    match err {
        SourceError::UnexpectedStatus { status, ref url } => {
            assert_eq!(status, 403);
            assert!(!url.contains("test-key"), "key leaked into error: {url}");
        }
        other => panic!("expected UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn header_only_sheet_is_empty_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SHEET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "range": "fruits!A1:D1",
            "values": [["Product Name", "Unit", "Price", "Indent"]]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = sheet_client(&server.uri(), 3);
    let err = client.fetch_products().await.unwrap_err();
    assert!(matches!(err, SourceError::EmptyData { .. }), "got: {err:?}");
}

#[tokio::test]
async fn missing_values_is_empty_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SHEET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "range": "fruits!A1:D1"
        })))
        .mount(&server)
        .await;

    let client = sheet_client(&server.uri(), 3);
    let err = client.fetch_products().await.unwrap_err();
    assert!(matches!(err, SourceError::EmptyData { .. }), "got: {err:?}");
}

#[tokio::test]
async fn json_url_source_returns_products() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"productName": "Mango", "unitOfMeasure": "/PKT", "salesPrice": "$2.00", "indent": false},
            {"productName": "Grapes", "unitOfMeasure": "/KG", "salesPrice": ""}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let source = SourceConfig::Json {
        location: format!("{}/products.json", server.uri()),
    };
    let client = CatalogClient::new(source, 5, 3, 0).unwrap();
    let products = client.fetch_products().await.expect("should parse json");

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].product_name, "Mango");
    assert_eq!(products[1].sales_price, "");
    assert!(!products[1].indent);
}

#[tokio::test]
async fn load_products_serves_second_call_from_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SHEET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(sheet_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = sheet_client(&server.uri(), 3);
    let cache = temp_cache("cache-hit");

    let first = load_products(&client, &cache, false).await.unwrap();
    let second = load_products(&client, &cache, false).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn load_products_refresh_bypasses_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SHEET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(sheet_body()))
        .expect(2)
        .mount(&server)
        .await;

    let client = sheet_client(&server.uri(), 3);
    let cache = temp_cache("cache-refresh");

    load_products(&client, &cache, false).await.unwrap();
    let refreshed = load_products(&client, &cache, true).await.unwrap();
    assert_eq!(refreshed.len(), 2);
}

#[tokio::test]
async fn load_products_failure_leaves_cache_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SHEET_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = sheet_client(&server.uri(), 1);
    let cache = temp_cache("cache-failure");

    assert!(load_products(&client, &cache, false).await.is_err());
    assert_eq!(cache.load_fresh(chrono::Utc::now()), None);
}

#[tokio::test]
async fn transport_error_does_not_leak_api_key() {
    let source = SourceConfig::Sheet {
        spreadsheet_id: "sheet-123".to_owned(),
        api_key: "SUPERSECRET".to_owned(),
        sheet_name: "fruits".to_owned(),
        base_url: "http://127.0.0.1:1".to_owned(),
    };
    let client = CatalogClient::new(source, 5, 1, 0).expect("client construction should not fail");

    let err = client
        .fetch_products()
        .await
        .expect_err("nothing listens on port 1");

    assert!(matches!(err, SourceError::Http(_)), "unexpected error: {err:?}");
    assert!(!err.to_string().contains("SUPERSECRET"), "{err}");
    assert!(!format!("{err:?}").contains("SUPERSECRET"), "{err:?}");
}
