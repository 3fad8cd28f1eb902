use super::error::PredictError;
use super::upload::read_image_field;
use crate::imaging::HandlerOutput;
use crate::server::AppState;
use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};
use std::sync::Arc;
use tracing::debug;

pub fn home_page() -> Markup {
    html! {
        h1 { "ML Prototype Server is Running!" }
        p { "Send a POST request to " code { "/predict" } " with an image file." }
    }
}

pub async fn home() -> Html<String> {
    Html(home_page().into_string())
}

pub async fn predict(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, PredictError> {
    // Not multipart at all: there can't be an image file in it.
    let mut multipart = multipart.map_err(|rejection| {
        debug!(%rejection, "predict request is not multipart");
        PredictError::MissingImage
    })?;

    let upload = read_image_field(&mut multipart).await?;
    debug!(
        file_name = %upload.file_name,
        bytes = upload.bytes.len(),
        handler = state.handler.name(),
        "received upload"
    );

    let handler = Arc::clone(&state.handler);
    let output = tokio::task::spawn_blocking(move || handler.handle(&upload.bytes)).await??;
    Ok(render(output))
}

fn render(output: HandlerOutput) -> Response {
    match output {
        HandlerOutput::Prediction(result) => Json(result).into_response(),
        HandlerOutput::Png(bytes) => ([(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
    }
}
