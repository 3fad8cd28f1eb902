//! Composition root: turns a [`ServerConfig`] into a running service.

use crate::api;
use crate::config::{ConfigError, ServerConfig};
use crate::imaging::{ImageHandler, handler_for};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum ServeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared by every request. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<dyn ImageHandler>,
}

impl AppState {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            handler: handler_for(config.handler.mode, config.decode_limits()),
        }
    }
}

/// Build the full application: routes plus body limit, tracing, and CORS.
pub fn build_app(config: &ServerConfig) -> Router {
    let app = api::router(AppState::from_config(config))
        .layer(DefaultBodyLimit::max(config.limits.max_upload_bytes))
        .layer(TraceLayer::new_for_http());

    if config.cors.enabled {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Bind and serve until Ctrl-C or SIGTERM.
pub async fn serve(config: ServerConfig) -> Result<(), ServeError> {
    config.validate()?;
    let addr = config.socket_addr()?;
    let app = build_app(&config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        "listening on http://{} (handler: {}, cors: {})",
        listener.local_addr()?,
        config.handler.mode,
        config.cors.enabled
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HandlerMode;
    use crate::test_helpers::{MultipartBuilder, body_json, get, png_bytes, post_multipart};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use image::ColorType;
    use tower::ServiceExt;

    fn metadata_config() -> ServerConfig {
        let mut config = ServerConfig::default();
        config.handler.mode = HandlerMode::Metadata;
        config
    }

    #[test]
    fn state_uses_configured_handler() {
        assert_eq!(
            AppState::from_config(&metadata_config()).handler.name(),
            "metadata"
        );
        assert_eq!(
            AppState::from_config(&ServerConfig::default()).handler.name(),
            "grayscale"
        );
    }

    #[tokio::test]
    async fn cors_headers_present_when_enabled() {
        let req = Request::builder()
            .uri("/")
            .header(header::ORIGIN, "https://example.com")
            .body(Body::empty())
            .unwrap();
        let resp = build_app(&ServerConfig::default()).oneshot(req).await.unwrap();
        assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn cors_headers_absent_when_disabled() {
        let mut config = ServerConfig::default();
        config.cors.enabled = false;
        let req = Request::builder()
            .uri("/")
            .header(header::ORIGIN, "https://example.com")
            .body(Body::empty())
            .unwrap();
        let resp = build_app(&config).oneshot(req).await.unwrap();
        assert!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }

    #[tokio::test]
    async fn oversized_upload_is_payload_too_large() {
        let mut config = metadata_config();
        config.limits.max_upload_bytes = 1024;
        let body = MultipartBuilder::new().file("image", "big.bin", &vec![7u8; 8 * 1024]);
        let resp = build_app(&config).oneshot(post_multipart(body)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let json = body_json(resp).await;
        assert!(
            json["error"]
                .as_str()
                .unwrap()
                .starts_with("Failed to process image: ")
        );
    }

    #[tokio::test]
    async fn oversized_image_dimensions_are_unprocessable() {
        let mut config = metadata_config();
        config.limits.max_image_dimension = 16;
        let body =
            MultipartBuilder::new().file("image", "wide.png", &png_bytes(32, 8, ColorType::L8));
        let resp = build_app(&config).oneshot(post_multipart(body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn home_still_ok_after_failed_predict() {
        let app = build_app(&metadata_config());
        let body = MultipartBuilder::new().file("image", "junk.png", b"junk");
        let resp = app.clone().oneshot(post_multipart(body)).await.unwrap();
        assert!(resp.status().is_client_error());

        let resp = app.oneshot(get("/")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
