//! Typed repositories over the store's tables.

mod applications;
mod postings;
mod saved_jobs;
mod users;

pub use applications::ApplicationRepository;
pub use postings::PostingRepository;
pub use saved_jobs::SavedJobRepository;
pub use users::UserRepository;

/// Default page size for list endpoints.
pub const DEFAULT_LIMIT: u32 = 50;

/// Upper bound on caller-supplied limits.
pub const MAX_LIMIT: u32 = 200;

pub(crate) fn clamp_limit(limit: Option<u32>) -> u32 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}
