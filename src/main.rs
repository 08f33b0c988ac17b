mod api_docs;
mod config;
mod controllers;
mod error;
mod models;
mod routes;
mod services;
mod shared_state;

use std::net::SocketAddr;

use axum::{Json, Router, http::HeaderValue, response::Html, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_scalar::Scalar;

use crate::api_docs::ApiDoc;
use crate::config::Config;
use crate::routes::feasibility_routes::api_routes;
use crate::shared_state::{AppState, SharedState};

#[tokio::main]
async fn main() {
    // 1. Logging first, so config failures are already visible through it
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load configuration
    let config = match Config::load("config.json") {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("failed to load config.json: {e}");
            return;
        }
    };

    // 3. Proposal output directory must exist before the first request
    if let Err(e) = std::fs::create_dir_all(&config.proposals.output_dir) {
        tracing::error!(
            "cannot create proposal directory {}: {e}",
            config.proposals.output_dir
        );
        return;
    }

    let shared = SharedState {
        config: config.clone(),
        app: AppState::new(),
    };

    // 4. Assemble the HTTP surface
    let app = Router::new()
        .route(
            "/",
            get(|| async { Json(serde_json::json!({ "message": "Rooftop Solar API is live" })) }),
        )
        .nest("/api", api_routes(shared))
        .route(
            "/scalar",
            get(|| async { Html(Scalar::new(ApiDoc::openapi()).to_html()) }),
        )
        .nest_service("/proposals", ServeDir::new(&config.proposals.output_dir))
        .fallback_service(ServeDir::new("static"))
        .layer(cors_layer(&config))
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("API server listening on http://{addr}");
    tracing::info!("Scalar UI: http://{addr}/scalar");
    tracing::info!("proposals served from {}", config.proposals.output_dir);

    axum_server::bind(addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}

/// Explicit origin allow-list when configured, permissive otherwise.
/// Credentials are only allowed with named origins — the browser rejects
/// the wildcard + credentials combination anyway.
fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors.allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring malformed CORS origin: {origin}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_credentials(false)
}
