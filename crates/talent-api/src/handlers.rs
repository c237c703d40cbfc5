//! Request handlers.

pub mod applications;
pub mod auth;
pub mod health;
pub mod multilingual;
pub mod postings;
pub mod saved_jobs;
pub mod users;

pub use health::{health, ready};
