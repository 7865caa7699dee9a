//! The audit API server.
//!
//! Four independent POST endpoints, one per check module, each accepting a
//! JSON body `{ "url": string }` and answering with a
//! `{ success, data?, error?, details? }` envelope. Handlers share the probe
//! client through [`AuditContext`] and no mutable state; every request is
//! handled in isolation.

use anyhow::Context;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::audit::{
    check_https, check_meta_tags, check_redirects, check_seo_files, AuditContext,
};
use crate::config::Config;
use crate::error_handling::AuditError;
use crate::initialization::init_probe_client;

/// Shared state for all audit endpoints.
#[derive(Clone)]
pub struct AppState {
    /// Probe client plus timeout configuration
    pub ctx: AuditContext,
}

/// Inbound request body for every check endpoint.
#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    /// The URL to audit
    pub url: Option<String>,
}

/// Response envelope shared by all endpoints.
#[derive(Debug, Serialize)]
struct Envelope<T: Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

fn success_response<T: Serialize>(data: T) -> Response {
    (
        StatusCode::OK,
        Json(Envelope {
            success: true,
            data: Some(data),
            error: None,
            details: None,
        }),
    )
        .into_response()
}

fn error_response(error: &AuditError) -> Response {
    let status = if error.is_input_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (
        status,
        Json(Envelope::<()> {
            success: false,
            data: None,
            error: Some(error.to_string()),
            details: error.details(),
        }),
    )
        .into_response()
}

/// Pulls the URL out of the raw request body.
///
/// The body is parsed manually instead of through the `Json` extractor so
/// that a missing body, a non-JSON body, and a body without a `url` field all
/// collapse to `MissingUrl` - the client always gets the envelope, never a
/// bare extractor rejection.
fn extract_url(body: &[u8]) -> Result<String, AuditError> {
    let request: CheckRequest =
        serde_json::from_slice(body).map_err(|_| AuditError::MissingUrl)?;
    match request.url {
        Some(url) if !url.trim().is_empty() => Ok(url),
        _ => Err(AuditError::MissingUrl),
    }
}

async fn https_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Response {
    let url = match extract_url(&body) {
        Ok(url) => url,
        Err(e) => return error_response(&e),
    };
    log::info!("HTTPS check for {}", url);
    match check_https(&state.ctx, &url).await {
        Ok(report) => success_response(report),
        Err(e) => {
            log::warn!("HTTPS check failed for {}: {:?}", url, e);
            error_response(&e)
        }
    }
}

async fn seo_files_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Response {
    let url = match extract_url(&body) {
        Ok(url) => url,
        Err(e) => return error_response(&e),
    };
    log::info!("SEO files check for {}", url);
    match check_seo_files(&state.ctx, &url).await {
        Ok(report) => success_response(report),
        Err(e) => {
            log::warn!("SEO files check failed for {}: {:?}", url, e);
            error_response(&e)
        }
    }
}

async fn meta_tags_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Response {
    let url = match extract_url(&body) {
        Ok(url) => url,
        Err(e) => return error_response(&e),
    };
    log::info!("Meta tag check for {}", url);
    match check_meta_tags(&state.ctx, &url).await {
        Ok(report) => success_response(report),
        Err(e) => {
            log::warn!("Meta tag check failed for {}: {:?}", url, e);
            error_response(&e)
        }
    }
}

async fn redirects_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Response {
    let url = match extract_url(&body) {
        Ok(url) => url,
        Err(e) => return error_response(&e),
    };
    log::info!("Redirect check for {}", url);
    match check_redirects(&state.ctx, &url).await {
        Ok(report) => success_response(report),
        Err(e) => {
            log::warn!("Redirect check failed for {}: {:?}", url, e);
            error_response(&e)
        }
    }
}

/// Builds the audit API router.
///
/// Route names follow the checklist UI's endpoint identifiers.
pub fn build_router(ctx: AuditContext) -> Router {
    Router::new()
        .route("/api/check-https", post(https_handler))
        .route("/api/check-robots", post(seo_files_handler))
        .route("/api/check-meta", post(meta_tags_handler))
        .route("/api/check-redirects", post(redirects_handler))
        .with_state(AppState { ctx })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to install ctrl-c handler: {}", e);
        return;
    }
    log::info!("Shutdown signal received, draining connections");
}

/// Creates and starts the audit API server.
///
/// Blocks until the listener fails or a ctrl-c arrives; in-flight requests
/// (and their sub-probes) are drained on shutdown.
pub async fn run_server(config: Config) -> Result<(), anyhow::Error> {
    let client = init_probe_client(&config.user_agent).context("Failed to build probe client")?;
    let app = build_router(AuditContext::new(client));

    let addr = format!("{}:{}", config.bind, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind audit server to {}: {}", addr, e))?;

    log::info!("Audit server listening on http://{}/", addr);
    log::info!("  - HTTPS check:    POST /api/check-https");
    log::info!("  - SEO files:      POST /api/check-robots");
    log::info!("  - Meta tags:      POST /api/check-meta");
    log::info!("  - Redirects:      POST /api/check-redirects");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Audit server error: {}", e))?;

    Ok(())
}
