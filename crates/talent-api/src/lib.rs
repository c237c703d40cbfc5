//! Axum HTTP API server.
//!
//! This crate provides:
//! - Language detection and translation endpoints
//! - Accounts, profiles, applications, saved jobs and postings
//! - HS256 access token verification
//! - Rate limiting, security headers and Prometheus metrics

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod security;
pub mod services;
pub mod state;

pub use auth::{AuthUser, JwtVerifier};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use services::ProfileService;
pub use state::AppState;
