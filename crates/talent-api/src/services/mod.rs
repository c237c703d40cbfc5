//! Business logic services.

pub mod profile;

pub use profile::ProfileService;
