//! Application repository.

use chrono::Utc;
use serde::Serialize;
use talent_models::{Application, ApplicationStatus, ApplicationUpdate, JobType, NewApplication};
use tracing::info;
use uuid::Uuid;

use super::clamp_limit;
use crate::client::StoreClient;
use crate::error::{StoreError, StoreResult};
use crate::query::Query;

const TABLE: &str = "applications";

#[derive(Serialize)]
struct ApplicationUpdateRow<'a> {
    #[serde(flatten)]
    update: &'a ApplicationUpdate,
    updated_at: chrono::DateTime<Utc>,
}

/// Repository for the `applications` table.
#[derive(Debug, Clone)]
pub struct ApplicationRepository {
    client: StoreClient,
}

impl ApplicationRepository {
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    /// Submit an application. A talent may apply to a posting only once.
    pub async fn create(&self, application: &NewApplication) -> StoreResult<Application> {
        application
            .check_target()
            .map_err(|e| StoreError::BadRequest(e.to_string()))?;

        if self.find_existing(application).await?.is_some() {
            return Err(StoreError::Conflict(
                "already applied to this posting".to_string(),
            ));
        }

        let created: Application = self.client.insert(TABLE, application).await?;
        info!(
            application_id = %created.id,
            talent_id = %created.talent_id,
            job_type = %created.job_type,
            "Application submitted"
        );
        Ok(created)
    }

    pub async fn get(&self, id: Uuid) -> StoreResult<Option<Application>> {
        self.client.select_one(TABLE, &Query::by("id", id)).await
    }

    /// Applications of one talent, newest first.
    pub async fn list_for_talent(
        &self,
        talent_id: Uuid,
        job_type: Option<JobType>,
        status: Option<ApplicationStatus>,
        limit: Option<u32>,
    ) -> StoreResult<Vec<Application>> {
        let mut query = Query::by("talent_id", talent_id);
        if let Some(job_type) = job_type {
            query = query.eq("job_type", job_type);
        }
        if let Some(status) = status {
            query = query.eq("status", status);
        }
        let query = query.order("applied_at", false).limit(clamp_limit(limit));
        self.client.select(TABLE, &query).await
    }

    /// Apply a partial update; `None` when the application does not exist.
    pub async fn update(&self, id: Uuid, update: &ApplicationUpdate) -> StoreResult<Option<Application>> {
        let row = ApplicationUpdateRow {
            update,
            updated_at: Utc::now(),
        };
        let rows: Vec<Application> = self
            .client
            .update(TABLE, &Query::by("id", id), &row)
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn find_existing(&self, application: &NewApplication) -> StoreResult<Option<Application>> {
        let mut query = Query::by("talent_id", application.talent_id);
        if let Some(job_id) = application.job_id {
            query = query.eq("job_id", job_id);
        }
        if let Some(internship_id) = application.internship_id {
            query = query.eq("internship_id", internship_id);
        }
        self.client.select_one(TABLE, &query).await
    }
}
