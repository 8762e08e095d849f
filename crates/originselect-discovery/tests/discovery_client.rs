//! Integration tests for `DiscoveryClient` using wiremock HTTP mocks.

use std::time::Duration;

use originselect_core::{
    IntentField, IntentType, Market, Modification, ModificationAction, SearchIntent,
};
use originselect_discovery::{DiscoverParams, DiscoveryClient, DiscoveryError, RefineParams};
use serde_json::{json, Map, Value};
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> DiscoveryClient {
    DiscoveryClient::new(base_url).expect("client construction should not fail")
}

fn ok_body() -> Value {
    json!({"success": true, "products": [], "meta": {"totalProducts": 0, "latencyMs": 5}})
}

#[tokio::test]
async fn discover_posts_structured_intent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/ai/discover"))
        .and(header("content-type", "application/json"))
        .and(header("user-agent", "OriginSelect-MCP/1.0"))
        .and(body_json(json!({
            "query": "organic Beauty from Canada",
            "market": "all",
            "limit": 12,
            "brandsLimit": 5,
            "collectionsLimit": 3,
            "structuredIntent": {
                "intentType": "product",
                "country": "Canada",
                "category": "Beauty",
                "values": ["organic"],
                "keywords": [],
                "brand": null,
                "priceMin": null,
                "priceMax": null,
                "classification": null,
                "excludes": [],
                "subcategory": null,
                "sourceBrand": null,
                "sourceProduct": null,
                "industry": null
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let params = DiscoverParams {
        intent: SearchIntent {
            intent_type: IntentType::Product,
            country: Some("Canada".into()),
            category: Some("Beauty".into()),
            values: vec!["organic".into()],
            ..SearchIntent::default()
        },
        ..DiscoverParams::default()
    };
    let body = client.discover(&params).await.expect("discover should succeed");

    assert_eq!(body, ok_body());
}

#[tokio::test]
async fn refine_posts_intent_and_modifications() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/ai/refine"))
        .and(body_partial_json(json!({
            "intent": {"intentType": "product", "values": ["vegan"]},
            "modifications": [{"action": "modify", "field": "priceMax", "value": 30}],
            "market": "canada",
            "limit": 5
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
        .expect(1)
        .mount(&server)
        .await;

    let mut intent = Map::new();
    intent.insert("intentType".into(), json!("product"));
    intent.insert("values".into(), json!(["vegan"]));

    let client = test_client(&server.uri());
    let params = RefineParams {
        intent,
        modifications: vec![
            Modification::new(ModificationAction::Modify, IntentField::PriceMax, json!("30"))
                .coerce_numeric(),
        ],
        market: Some(Market::Canada),
        limit: Some(5),
        ..RefineParams::default()
    };
    client.refine(&params).await.expect("refine should succeed");
}

#[tokio::test]
async fn non_2xx_status_surfaces_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/ai/discover"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .discover(&DiscoverParams::default())
        .await
        .expect_err("502 should be an error");

    assert!(
        matches!(err, DiscoveryError::Api { status: 502, ref body } if body == "upstream down"),
        "expected Api(502), got: {err:?}"
    );
    assert_eq!(err.to_string(), "API returned 502: upstream down");
}

#[tokio::test]
async fn success_false_is_not_a_transport_error() {
    let server = MockServer::start().await;
    let body = json!({"success": false, "error": "Invalid intent"});

    Mock::given(method("POST"))
        .and(path("/api/ai/refine"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.refine(&RefineParams::default()).await;
    assert_eq!(result.expect("2xx should be Ok"), body);
}

#[tokio::test]
async fn non_json_success_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/ai/discover"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.discover(&DiscoverParams::default()).await.unwrap_err();
    assert!(
        matches!(err, DiscoveryError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/ai/discover"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_body())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = DiscoveryClient::with_timeout(&server.uri(), Duration::from_millis(200))
        .expect("client construction should not fail");
    let err = client.discover(&DiscoverParams::default()).await.unwrap_err();

    assert!(
        matches!(err, DiscoveryError::Timeout { ref endpoint, .. } if endpoint == "/api/ai/discover"),
        "expected Timeout, got: {err:?}"
    );
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    // Port 9 (discard) is not listening in test environments.
    let client = DiscoveryClient::with_timeout("http://127.0.0.1:9", Duration::from_secs(2))
        .expect("client construction should not fail");
    let err = client.discover(&DiscoverParams::default()).await.unwrap_err();
    assert!(
        matches!(err, DiscoveryError::Http(_) | DiscoveryError::Timeout { .. }),
        "expected transport error, got: {err:?}"
    );
}
