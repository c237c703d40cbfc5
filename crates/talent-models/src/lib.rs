//! Shared data models for the talent platform backend.
//!
//! This crate provides Serde-serializable types for:
//! - Supported languages and translation maps
//! - User profiles and roles
//! - Applications and saved jobs
//! - Internship and freelance postings
//!
//! Field names follow the store's column names.

pub mod application;
pub mod error;
pub mod language;
pub mod posting;
pub mod saved_job;
pub mod user;

// Re-export common types
pub use application::{Application, ApplicationStatus, ApplicationUpdate, JobType, NewApplication};
pub use error::{ModelError, ModelResult};
pub use language::{ConfidenceTier, LanguageCode, TranslationMap};
pub use posting::{
    split_csv, BudgetType, FreelanceFilter, FreelanceJob, Internship, InternshipFilter,
    NewFreelanceJob, NewInternship, PostingStatus,
};
pub use saved_job::{NewSavedJob, SavedJob};
pub use user::{NewUser, SummaryTranslation, TalentFilter, UserProfile, UserRole, UserUpdate};
