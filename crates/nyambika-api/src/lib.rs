//! Axum HTTP API server.
//!
//! This crate exposes the try-on orchestration over REST:
//! - `POST /api/try-on` — generate a try-on visualization
//! - `POST /api/fashion-analysis` — categorize a garment photo
//! - `POST /api/size-recommendation` — size advice from measurements
//! - `GET /health` — liveness probe

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
