//! Internship and freelance job postings.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use talent_models::{
    FreelanceFilter, FreelanceJob, Internship, InternshipFilter, NewFreelanceJob, NewInternship,
    UserProfile, UserRole,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::security::{sanitize_name, sanitize_optional};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct InternshipsResponse {
    pub internships: Vec<Internship>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct InternshipResponse {
    pub internship: Internship,
}

#[derive(Debug, Serialize)]
pub struct FreelanceJobsResponse {
    pub jobs: Vec<FreelanceJob>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct FreelanceJobResponse {
    pub job: FreelanceJob,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

async fn require_poster(state: &AppState, auth: &AuthUser) -> ApiResult<UserProfile> {
    let caller = auth.profile(state).await?;
    match caller.role {
        UserRole::Recruiter | UserRole::Admin => Ok(caller),
        UserRole::Talent => Err(ApiError::forbidden("Only recruiters can manage postings")),
    }
}

/// GET /api/internships
pub async fn list_internships(
    State(state): State<AppState>,
    Query(filter): Query<InternshipFilter>,
) -> ApiResult<Json<InternshipsResponse>> {
    let internships = state.postings.list_internships(&filter).await?;
    Ok(Json(InternshipsResponse {
        count: internships.len(),
        internships,
    }))
}

/// POST /api/internships
pub async fn create_internship(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(mut internship): Json<NewInternship>,
) -> ApiResult<(StatusCode, Json<InternshipResponse>)> {
    let caller = require_poster(&state, &auth).await?;

    internship.title = sanitize_name(&internship.title);
    internship.company = sanitize_name(&internship.company);
    internship.description = sanitize_optional(internship.description.as_deref());
    internship.recruiter_id = Some(caller.id);
    internship.validate()?;

    let internship = state.postings.create_internship(&internship).await?;
    Ok((StatusCode::CREATED, Json(InternshipResponse { internship })))
}

/// GET /api/internships/:id
pub async fn get_internship(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<InternshipResponse>> {
    let internship = state
        .postings
        .get_internship(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Internship not found"))?;
    Ok(Json(InternshipResponse { internship }))
}

/// DELETE /api/internships/:id
///
/// Recruiters may delete their own postings; admins any.
pub async fn delete_internship(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let caller = require_poster(&state, &auth).await?;
    let internship = state
        .postings
        .get_internship(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Internship not found"))?;

    if caller.role != UserRole::Admin && internship.recruiter_id != Some(caller.id) {
        return Err(ApiError::forbidden("Cannot delete another recruiter's posting"));
    }

    if !state.postings.delete_internship(id).await? {
        return Err(ApiError::not_found("Internship not found"));
    }

    info!(internship_id = %id, deleted_by = %caller.id, "Internship deleted");
    Ok(Json(MessageResponse {
        message: "Internship deleted successfully",
    }))
}

/// GET /api/freelance-jobs
pub async fn list_freelance_jobs(
    State(state): State<AppState>,
    Query(filter): Query<FreelanceFilter>,
) -> ApiResult<Json<FreelanceJobsResponse>> {
    let jobs = state.postings.list_freelance_jobs(&filter).await?;
    Ok(Json(FreelanceJobsResponse {
        count: jobs.len(),
        jobs,
    }))
}

/// POST /api/freelance-jobs
pub async fn create_freelance_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(mut job): Json<NewFreelanceJob>,
) -> ApiResult<(StatusCode, Json<FreelanceJobResponse>)> {
    let caller = require_poster(&state, &auth).await?;

    job.title = sanitize_name(&job.title);
    job.description = sanitize_optional(job.description.as_deref());
    job.recruiter_id = Some(caller.id);
    job.validate()?;

    let job = state.postings.create_freelance_job(&job).await?;
    Ok((StatusCode::CREATED, Json(FreelanceJobResponse { job })))
}

/// GET /api/freelance-jobs/:id
pub async fn get_freelance_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<FreelanceJobResponse>> {
    let job = state
        .postings
        .get_freelance_job(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Freelance job not found"))?;
    Ok(Json(FreelanceJobResponse { job }))
}
