//! Internship and freelance job repository.

use talent_models::{
    split_csv, FreelanceFilter, FreelanceJob, Internship, InternshipFilter, NewFreelanceJob,
    NewInternship, PostingStatus,
};
use tracing::info;
use uuid::Uuid;

use super::clamp_limit;
use crate::client::StoreClient;
use crate::error::StoreResult;
use crate::query::Query;

const INTERNSHIPS: &str = "internships";
const FREELANCE_JOBS: &str = "freelance_jobs";

/// Repository for the `internships` and `freelance_jobs` tables.
#[derive(Debug, Clone)]
pub struct PostingRepository {
    client: StoreClient,
}

impl PostingRepository {
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    pub async fn create_internship(&self, internship: &NewInternship) -> StoreResult<Internship> {
        let created: Internship = self.client.insert(INTERNSHIPS, internship).await?;
        info!(internship_id = %created.id, company = %created.company, "Internship posted");
        Ok(created)
    }

    pub async fn get_internship(&self, id: Uuid) -> StoreResult<Option<Internship>> {
        self.client
            .select_one(INTERNSHIPS, &Query::by("id", id))
            .await
    }

    /// Open internships, newest first.
    pub async fn list_internships(&self, filter: &InternshipFilter) -> StoreResult<Vec<Internship>> {
        let mut query = Query::by("status", PostingStatus::Open.as_str());

        let skills = filter.skills.as_deref().map(split_csv).unwrap_or_default();
        if !skills.is_empty() {
            query = query.overlaps("required_skills", &skills);
        }
        if let Some(location) = filter.location.as_deref().filter(|v| !v.trim().is_empty()) {
            query = query.ilike("location", location);
        }
        if let Some(company) = filter.company.as_deref().filter(|v| !v.trim().is_empty()) {
            query = query.ilike("company", company);
        }

        let query = query
            .order("posted_at", false)
            .limit(clamp_limit(filter.limit));
        self.client.select(INTERNSHIPS, &query).await
    }

    /// Remove an internship; `false` when nothing was deleted.
    pub async fn delete_internship(&self, id: Uuid) -> StoreResult<bool> {
        let removed = self
            .client
            .delete(INTERNSHIPS, &Query::by("id", id))
            .await?;
        Ok(removed > 0)
    }

    pub async fn create_freelance_job(&self, job: &NewFreelanceJob) -> StoreResult<FreelanceJob> {
        let created: FreelanceJob = self.client.insert(FREELANCE_JOBS, job).await?;
        info!(job_id = %created.id, "Freelance job posted");
        Ok(created)
    }

    pub async fn get_freelance_job(&self, id: Uuid) -> StoreResult<Option<FreelanceJob>> {
        self.client
            .select_one(FREELANCE_JOBS, &Query::by("id", id))
            .await
    }

    /// Open freelance jobs, newest first.
    pub async fn list_freelance_jobs(&self, filter: &FreelanceFilter) -> StoreResult<Vec<FreelanceJob>> {
        let mut query = Query::by("status", PostingStatus::Open.as_str());

        if let Some(category) = filter.category.as_deref().filter(|v| !v.trim().is_empty()) {
            query = query.eq("category", category);
        }
        if let Some(budget_type) = filter.budget_type {
            query = query.eq("budget_type", budget_type.as_str());
        }
        if let Some(budget_min) = filter.budget_min {
            query = query.gte("budget_min", budget_min);
        }
        if let Some(budget_max) = filter.budget_max {
            query = query.lte("budget_max", budget_max);
        }
        let skills = filter.skills.as_deref().map(split_csv).unwrap_or_default();
        if !skills.is_empty() {
            query = query.overlaps("skills", &skills);
        }

        let query = query
            .order("posted_at", false)
            .limit(clamp_limit(filter.limit));
        self.client.select(FREELANCE_JOBS, &query).await
    }
}
