//! Saved job repository.

use serde::Serialize;
use talent_models::{JobType, NewSavedJob, SavedJob};
use tracing::info;
use uuid::Uuid;

use crate::client::StoreClient;
use crate::error::{StoreError, StoreResult};
use crate::query::Query;

const TABLE: &str = "saved_jobs";

#[derive(Serialize)]
struct NotesRow<'a> {
    notes: &'a str,
}

/// Repository for the `saved_jobs` table.
#[derive(Debug, Clone)]
pub struct SavedJobRepository {
    client: StoreClient,
}

impl SavedJobRepository {
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    /// Bookmarks of one talent, newest first.
    pub async fn list(&self, talent_id: Uuid, job_type: Option<JobType>) -> StoreResult<Vec<SavedJob>> {
        let mut query = Query::by("talent_id", talent_id);
        if let Some(job_type) = job_type {
            query = query.eq("job_type", job_type);
        }
        self.client
            .select(TABLE, &query.order("saved_at", false))
            .await
    }

    /// Bookmark a job or internship.
    pub async fn save(&self, saved: &NewSavedJob) -> StoreResult<SavedJob> {
        if saved.job_id.is_none() && saved.internship_id.is_none() {
            return Err(StoreError::BadRequest(
                "job_id or internship_id required".to_string(),
            ));
        }

        let created: SavedJob = self.client.insert(TABLE, saved).await?;
        info!(saved_job_id = %created.id, talent_id = %created.talent_id, "Saved job");
        Ok(created)
    }

    /// Remove bookmarks of `talent_id` for the given posting; returns the count.
    pub async fn remove(
        &self,
        talent_id: Uuid,
        job_id: Option<Uuid>,
        internship_id: Option<Uuid>,
    ) -> StoreResult<usize> {
        if job_id.is_none() && internship_id.is_none() {
            return Err(StoreError::BadRequest(
                "job_id or internship_id required".to_string(),
            ));
        }

        let mut query = Query::by("talent_id", talent_id);
        if let Some(job_id) = job_id {
            query = query.eq("job_id", job_id);
        }
        if let Some(internship_id) = internship_id {
            query = query.eq("internship_id", internship_id);
        }
        self.client.delete(TABLE, &query).await
    }

    /// Replace the notes of a bookmark owned by `talent_id`.
    ///
    /// Bookmarks of other talents are reported as missing.
    pub async fn update_notes(&self, id: Uuid, talent_id: Uuid, notes: &str) -> StoreResult<Option<SavedJob>> {
        let owned: Option<SavedJob> = self
            .client
            .select_one(TABLE, &Query::by("id", id).eq("talent_id", talent_id))
            .await?;
        if owned.is_none() {
            return Ok(None);
        }

        let rows: Vec<SavedJob> = self
            .client
            .update(
                TABLE,
                &Query::by("id", id).eq("talent_id", talent_id),
                &NotesRow { notes },
            )
            .await?;
        Ok(rows.into_iter().next())
    }
}
