//! HTTP endpoint layer.
//!
//! | Method | Path | View |
//! |---|---|---|
//! | GET | `/` | [`views::home`] — static HTML fragment |
//! | POST | `/predict` | [`views::predict`] — multipart upload → handler output |
//!
//! Anything else falls through to axum's default 404.

pub mod error;
pub mod upload;
pub mod views;

pub use error::PredictError;

use crate::server::AppState;
use axum::Router;
use axum::routing::{get, post};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(views::home))
        .route("/predict", post(views::predict))
        .with_state(state)
}
