//! Router-level tests for the four audit endpoints.
//!
//! Each test stands up a wiremock target site, sends a JSON request through
//! the axum router via `tower::ServiceExt::oneshot`, and asserts on the
//! response envelope.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use relaunch_audit::audit::AuditContext;
use relaunch_audit::build_router;

fn test_router() -> axum::Router {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("client");
    let ctx = AuditContext::with_timeouts(
        Arc::new(client),
        Duration::from_secs(2),
        Duration::from_secs(2),
    );
    build_router(ctx)
}

async fn post_check(router: axum::Router, endpoint: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(endpoint)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    let response = router.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value: Value = serde_json::from_slice(&bytes).expect("json envelope");
    (status, value)
}

#[tokio::test]
async fn test_seo_check_both_files_present() {
    let server = MockServer::start().await;
    for p in ["/robots.txt", "/sitemap.xml"] {
        Mock::given(method("HEAD"))
            .and(path(p))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
    }
    Mock::given(method("HEAD"))
        .and(path("/sitemap_index.xml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (status, body) = post_check(
        test_router(),
        "/api/check-robots",
        json!({ "url": server.uri() }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["robots"]["exists"], json!(true));
    assert_eq!(body["data"]["sitemap"]["exists"], json!(true));
    let recommendations = body["data"]["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 2);
    assert_eq!(recommendations[0], "✅ robots.txt gefunden");
    assert_eq!(recommendations[1], "✅ Sitemap gefunden");
}

#[tokio::test]
async fn test_redirect_check_single_clean_redirect() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/start"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/final"))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/final"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let (status, body) = post_check(
        test_router(),
        "/api/check-redirects",
        json!({ "url": format!("{}/start", server.uri()) }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["redirectCount"], json!(1));
    assert!(body["data"]["finalUrl"]
        .as_str()
        .unwrap()
        .ends_with("/final"));
    let chain = body["data"]["redirectChain"].as_array().unwrap();
    assert_eq!(chain.len(), 1);
    assert_eq!(chain[0]["status"], json!(301));
    let recommendations = body["data"]["recommendations"].as_array().unwrap();
    assert!(recommendations.contains(&json!("✅ Saubere Weiterleitung (1 Redirect)")));
    // The mock target serves plain http and its redirect stays on http, so
    // the http-variant classification must flag the missing https hop.
    assert_eq!(body["data"]["httpToHttps"], json!(false));
    assert!(recommendations.contains(&json!("⚠️ HTTP Weiterleitung führt nicht zu HTTPS")));
}

#[tokio::test]
async fn test_missing_url_yields_400_envelope() {
    for endpoint in [
        "/api/check-https",
        "/api/check-robots",
        "/api/check-meta",
        "/api/check-redirects",
    ] {
        let (status, body) = post_check(test_router(), endpoint, json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "endpoint {}", endpoint);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("URL ist erforderlich"));
    }
}

#[tokio::test]
async fn test_meta_check_short_title_and_missing_description() {
    let server = MockServer::start().await;
    let title = "t".repeat(45);
    let html = format!("<html><head><title>{title}</title></head><body></body></html>");
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(&server)
        .await;

    let (status, body) = post_check(
        test_router(),
        "/api/check-meta",
        json!({ "url": server.uri() }),
    )
    .await;

    // Classification issues are recommendations, not failures
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["meta"]["title"]["length"], json!(45));
    assert_eq!(body["data"]["meta"]["title"]["optimal"], json!(false));
    let recommendations = body["data"]["recommendations"].as_array().unwrap();
    assert!(recommendations.contains(&json!("⚠️ Title zu kurz (unter 50 Zeichen)")));
    assert!(recommendations.contains(&json!("❌ Keine Meta-Description gefunden")));
}

#[tokio::test]
async fn test_https_check_reports_hsts() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("Strict-Transport-Security", "max-age=63072000"),
        )
        .mount(&server)
        .await;

    let (status, body) = post_check(
        test_router(),
        "/api/check-https",
        json!({ "url": server.uri() }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["certificate"], json!("HSTS enabled"));
    assert_eq!(body["data"]["statusCode"], json!(200));
    // wiremock serves plain http
    assert_eq!(body["data"]["https"], json!(false));
}

#[tokio::test]
async fn test_meta_check_unreachable_target_yields_500_envelope() {
    let (status, body) = post_check(
        test_router(),
        "/api/check-meta",
        // Reserved TEST-NET-1 address, nothing listens there
        json!({ "url": "http://192.0.2.1:9/" }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().starts_with("Website nicht erreichbar"));
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_invalid_url_yields_400_envelope() {
    let (status, body) = post_check(
        test_router(),
        "/api/check-https",
        json!({ "url": "not a url at all!!!" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Ungültige URL"));
}

#[tokio::test]
async fn test_body_without_json_content_type_yields_400_envelope() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/check-https")
        .body(Body::from("url=example.com"))
        .expect("request");
    let response = test_router().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).expect("json envelope");
    assert_eq!(body["error"], json!("URL ist erforderlich"));
}
