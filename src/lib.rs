//! # image-probe
//!
//! A minimal HTTP service around one endpoint: upload an image, get back
//! either a JSON description of it or the same image in grayscale.
//!
//! The "model" is a placeholder. It looks at the decoded pixel layout and
//! reports whether the image is grayscale or color. There is no inference.
//!
//! # Request Flow
//!
//! ```text
//! client ──POST /predict──▶ api::views::predict
//!                              │  validate multipart, read `image` file
//!                              ▼
//!                           ImageHandler::handle   (spawn_blocking)
//!                              │  decode → inspect | grayscale → PNG
//!                              ▼
//!                           JSON PredictionResult | image/png bytes
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`api`] | Routes, views, upload extraction, error responses |
//! | [`server`] | Composition root: state, middleware layers, bind + graceful shutdown |
//! | [`imaging`] | [`ImageHandler`](imaging::ImageHandler) trait, decode/encode, color mode classification |
//! | [`inspect`] | Run a handler on a local file (the `inspect` subcommand) |
//! | [`config`] | Layered TOML + environment configuration |
//! | [`types`] | JSON response bodies |
//!
//! # Design Decisions
//!
//! ## One Endpoint, Two Configurations
//!
//! `/predict` either describes the image (`metadata`) or converts it
//! (`grayscale`). The mode is picked once at startup from `handler.mode`; the
//! route is defined once and the handler behind it is a trait object. Real
//! inference would be a third `ImageHandler` with no changes to the HTTP
//! layer.
//!
//! ## Decode Failures Are the Client's Problem
//!
//! Bytes that don't decode as an image get a 422, in both modes. Only
//! failures on our side (PNG encoding, a panicked worker) are 500s.
//!
//! ## Decoding Off the Async Workers
//!
//! Decode and encode are CPU-bound, so each request runs its handler inside
//! `tokio::task::spawn_blocking`. Requests share nothing but the immutable
//! handler, so concurrent uploads can't see each other's data.

pub mod api;
pub mod config;
pub mod imaging;
pub mod inspect;
pub mod server;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
