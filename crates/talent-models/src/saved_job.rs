//! Saved (bookmarked) jobs.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::JobType;

/// A stored bookmark row.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SavedJob {
    pub id: Uuid,
    pub talent_id: Uuid,
    #[serde(default)]
    pub job_id: Option<Uuid>,
    #[serde(default)]
    pub internship_id: Option<Uuid>,
    pub job_type: JobType,
    #[serde(default)]
    pub notes: Option<String>,
    pub saved_at: DateTime<Utc>,
}

/// Insert payload for a bookmark.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NewSavedJob {
    pub talent_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internship_id: Option<Uuid>,
    pub job_type: JobType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewSavedJob {
    /// Build a bookmark, inferring the job type when the caller omitted it.
    pub fn new(
        talent_id: Uuid,
        job_id: Option<Uuid>,
        internship_id: Option<Uuid>,
        job_type: Option<JobType>,
        notes: Option<String>,
    ) -> Self {
        Self {
            talent_id,
            job_id,
            internship_id,
            job_type: job_type.unwrap_or_else(|| JobType::infer(internship_id)),
            notes,
        }
    }
}
