//! Integration tests for `InsightsClient` using wiremock HTTP mocks.

use serde_json::json;
use storelens_client::{ClientError, ClientSettings, InsightsClient};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> InsightsClient {
    InsightsClient::with_base_url(base_url, 30).expect("client construction should not fail")
}

fn insights_json(url: &str) -> serde_json::Value {
    json!({
        "url": url,
        "product_catalog": {
            "total_products": 1,
            "categories": ["Candles"],
            "price_range": {"min": 18.5, "max": 18.5},
            "products": [{"name": "Cedar Candle", "price": "$18.50"}]
        },
        "hero_products": [],
        "refund_policy": "Refunds within 14 days.",
        "faqs": [],
        "social_handles": {"instagram": "https://instagram.com/cedarco"},
        "contact_details": {"emails": ["hi@cedarco.example"], "phones": []},
        "important_links": [],
        "analysis_date": "2025-03-14T09:26:53.589793"
    })
}

// ---------------------------------------------------------------------------
// analyze-store
// ---------------------------------------------------------------------------

#[tokio::test]
async fn analyze_store_posts_url_and_decodes_insights() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze-store"))
        .and(body_json(json!({"website_url": "https://cedarco.example"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(insights_json("https://cedarco.example")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let insights = client
        .analyze_store("https://cedarco.example")
        .await
        .expect("should decode insights");

    assert_eq!(insights.url, "https://cedarco.example");
    assert_eq!(insights.product_catalog.products[0].price, "$18.50");
    assert!(insights.privacy_policy.is_none());
    assert_eq!(
        insights.refund_policy.as_deref(),
        Some("Refunds within 14 days.")
    );
    assert!(insights.social_handles.facebook.is_none());
}

#[tokio::test]
async fn analyze_store_maps_detail_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze-store"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"detail": "Invalid URL"})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.analyze_store("nope").await.unwrap_err();

    match err {
        ClientError::Http { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "Invalid URL");
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn analyze_store_joins_validation_error_messages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze-store"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{
                "loc": ["body", "website_url"],
                "msg": "invalid or missing URL scheme",
                "type": "value_error.url.scheme"
            }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.analyze_store("cedarco").await.unwrap_err();

    assert_eq!(err.status(), Some(422));
    assert!(
        err.to_string().contains("invalid or missing URL scheme"),
        "got: {err}"
    );
}

#[tokio::test]
async fn analyze_store_unparsable_error_body_uses_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze-store"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.analyze_store("https://cedarco.example").await.unwrap_err();

    match err {
        ClientError::Http { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Failed to analyze store");
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn analyze_store_empty_error_body_uses_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze-store"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.analyze_store("https://cedarco.example").await.unwrap_err();

    match err {
        ClientError::Http { message, .. } => assert!(!message.is_empty()),
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn analyze_store_rejects_incomplete_payload() {
    let server = MockServer::start().await;

    let mut body = insights_json("https://cedarco.example");
    body.as_object_mut().unwrap().remove("analysis_date");

    Mock::given(method("POST"))
        .and(path("/analyze-store"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.analyze_store("https://cedarco.example").await.unwrap_err();

    match err {
        ClientError::Validation { context, source } => {
            assert_eq!(context, "analyze-store");
            assert!(source.to_string().contains("analysis_date"));
        }
        other => panic!("expected Validation error, got: {other:?}"),
    }
}

#[tokio::test]
async fn analyze_store_rejects_non_json_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze-store"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.analyze_store("https://cedarco.example").await.unwrap_err();
    assert!(matches!(err, ClientError::Validation { .. }), "got: {err:?}");
}

#[tokio::test]
async fn analyze_store_empty_url_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.analyze_store("").await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidInput(_)), "got: {err:?}");
}

#[tokio::test]
async fn analyze_store_whitespace_url_is_forwarded() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze-store"))
        .and(body_json(json!({"website_url": "  "})))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"detail": "Invalid URL"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.analyze_store("  ").await.unwrap_err();
    assert_eq!(err.status(), Some(422));
}

#[tokio::test]
async fn concurrent_calls_resolve_independently() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze-store"))
        .and(body_json(json!({"website_url": "a.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(insights_json("a.com")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/analyze-store"))
        .and(body_json(json!({"website_url": "b.com"})))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"detail": "Scraper unavailable"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let (a, b) = tokio::join!(client.analyze_store("a.com"), client.analyze_store("b.com"));

    let a = a.expect("a.com should succeed despite b.com failing");
    assert_eq!(a.url, "a.com");

    let b = b.unwrap_err();
    assert_eq!(b.status(), Some(503));
    assert!(b.to_string().contains("Scraper unavailable"));
}

// ---------------------------------------------------------------------------
// analyze-competitors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn analyze_competitors_returns_all_fields() {
    let server = MockServer::start().await;

    let body = json!({
        "competitors": [{
            "name": "A",
            "url": "a.com",
            "products": 10,
            "avg_price": 25.5,
            "rating": 4.2,
            "category": "Apparel",
            "strengths": ["fast shipping"],
            "weaknesses": ["few reviews"]
        }],
        "total_found": 42
    });

    Mock::given(method("POST"))
        .and(path("/analyze-competitors"))
        .and(body_json(json!({"target_store_url": "shop.example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .analyze_competitors("shop.example.com")
        .await
        .expect("should decode competitors");

    assert_eq!(result.total_found, 42);
    assert_eq!(result.competitors.len(), 1);
    assert!(result.is_truncated());

    let c = &result.competitors[0];
    assert_eq!(c.name, "A");
    assert_eq!(c.url, "a.com");
    assert_eq!(c.products, 10);
    assert!((c.avg_price_f64() - 25.5).abs() < f64::EPSILON);
    assert!((c.rating_f64() - 4.2).abs() < f64::EPSILON);
    assert_eq!(c.category, "Apparel");
    assert_eq!(c.strengths, ["fast shipping"]);
    assert_eq!(c.weaknesses, ["few reviews"]);

    assert_eq!(serde_json::to_value(&result).unwrap(), body);
}

#[tokio::test]
async fn analyze_competitors_error_uses_its_own_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze-competitors"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.analyze_competitors("shop.example.com").await.unwrap_err();
    assert!(
        err.to_string().contains("Failed to analyze competitors"),
        "got: {err}"
    );
}

// ---------------------------------------------------------------------------
// export-data / download
// ---------------------------------------------------------------------------

fn receipt_json() -> serde_json::Value {
    json!({
        "export_id": "export_20250314_092653",
        "format": "csv",
        "data_types": ["products", "competitors"],
        "file_size": "2.3 MB",
        "download_url": "/download/export_20250314_092653.csv",
        "expires_at": "2025-03-14T09:26:53.589793"
    })
}

#[tokio::test]
async fn export_data_returns_raw_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/export-data/csv"))
        .and(query_param("data_types", "products,competitors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(receipt_json()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let value = client
        .export_data("csv", &["products", "competitors"])
        .await
        .expect("should return export JSON");

    assert_eq!(value, receipt_json());
}

#[tokio::test]
async fn export_receipt_defaults_data_types_to_all() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/export-data/json"))
        .and(query_param("data_types", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(receipt_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let receipt = client
        .export_receipt("json", &[])
        .await
        .expect("should decode receipt");

    assert_eq!(receipt.export_id, "export_20250314_092653");
    assert_eq!(receipt.file_name(), Some("export_20250314_092653.csv"));
}

#[tokio::test]
async fn export_data_unsupported_format_maps_detail() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/export-data/docx"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Unsupported format"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.export_data("docx", &["all"]).await.unwrap_err();

    match err {
        ClientError::Http { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Unsupported format");
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn export_data_non_json_success_body_is_validation_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/export-data/csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string("id,name\n1,Shirt"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.export_data("csv", &["products"]).await.unwrap_err();

    assert!(
        matches!(err, ClientError::Validation { ref context, .. } if context == "export-data"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn download_file_returns_raw_bytes() {
    let server = MockServer::start().await;
    let payload: Vec<u8> = vec![0x50, 0x4b, 0x03, 0x04, 0x00, 0xff, 0x10];

    Mock::given(method("GET"))
        .and(path("/download/export_1.xlsx"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(payload.clone()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let bytes = client
        .download_file("/download/export_1.xlsx")
        .await
        .expect("should download bytes");

    assert_eq!(bytes, payload);
}

#[tokio::test]
async fn download_file_keeps_json_body_as_bytes() {
    let server = MockServer::start().await;
    let raw = br#"{"detail": "not an error", "rows": [1, 2.0]}"#;

    Mock::given(method("GET"))
        .and(path("/download/export_2.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(raw.to_vec(), "application/json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let bytes = client
        .download_file("/download/export_2.json")
        .await
        .expect("JSON body should be returned undecoded");

    assert_eq!(bytes, raw.to_vec());
}

#[tokio::test]
async fn download_file_ignores_error_detail() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/download/missing.csv"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not Found"})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.download_file("/download/missing.csv").await.unwrap_err();

    match err {
        ClientError::Http { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Failed to download file");
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// service status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_and_service_info_decode() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "timestamp": "2025-03-14T09:26:53.589793"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Shopify Insights Fetcher API",
            "version": "1.0.0"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let health = client.health().await.expect("health should decode");
    assert!(health.is_healthy());

    let info = client.service_info().await.expect("info should decode");
    assert_eq!(info.version, "1.0.0");
}

// ---------------------------------------------------------------------------
// transport
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bearer_token_is_sent_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .and(header("authorization", "Bearer tok_test_123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "timestamp": "2025-03-14T09:26:53"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = InsightsClient::new(&ClientSettings {
        base_url: server.uri(),
        api_token: Some("tok_test_123".to_string()),
        ..ClientSettings::default()
    })
    .expect("client construction should not fail");

    client.health().await.expect("authorized request should pass");
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze-store"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(insights_json("https://cedarco.example"))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = InsightsClient::with_base_url(&server.uri(), 1).unwrap();
    let err = client.analyze_store("https://cedarco.example").await.unwrap_err();

    assert!(err.is_timeout(), "expected timeout, got: {err:?}");
}

#[tokio::test]
async fn unreachable_service_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = test_client(&format!("http://{addr}"));
    let err = client.analyze_store("https://cedarco.example").await.unwrap_err();

    assert!(matches!(err, ClientError::Network(_)), "got: {err:?}");
    assert!(err.status().is_none());
}
