//! Hosted Postgres (PostgREST) and auth (GoTrue) client.
//!
//! This crate provides:
//! - A REST client with retry, tracing spans and request metrics
//! - A small PostgREST query builder
//! - Typed repositories for users, applications, saved jobs and postings
//! - Email/password sign-up and sign-in against the auth service

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod query;
pub mod repos;
pub mod retry;

// Re-export common types
pub use auth::{AuthAccount, AuthClient, AuthSession, SignUpOutcome};
pub use client::StoreClient;
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use query::Query;
pub use repos::{
    ApplicationRepository, PostingRepository, SavedJobRepository, UserRepository, DEFAULT_LIMIT,
    MAX_LIMIT,
};
pub use retry::RetryConfig;
