//! HTTP server for the assistant page.
//!
//! # Endpoints
//!
//! - `GET  /`           — Question page
//! - `POST /`           — Form submission
//! - `POST /api/answer` — JSON submission
//! - `GET  /health`     — Liveness check

pub mod render;
pub mod routes;

pub use routes::{app_router, AppState};
