//! Job and internship application endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use talent_models::{
    Application, ApplicationStatus, ApplicationUpdate, JobType, NewApplication, UserProfile,
    UserRole,
};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::security::sanitize_optional;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ApplicationParams {
    pub job_type: Option<JobType>,
    pub status: Option<ApplicationStatus>,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    #[serde(default, alias = "jobId")]
    pub job_id: Option<Uuid>,
    #[serde(default, alias = "internshipId")]
    pub internship_id: Option<Uuid>,
    #[serde(default, alias = "jobType")]
    pub job_type: Option<JobType>,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub portfolio_url: Option<String>,
    #[serde(default)]
    pub application_data: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct ApplicationsResponse {
    pub applications: Vec<Application>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ApplicationResponse {
    pub application: Application,
}

/// Recruiters and admins see every application; talents only their own.
fn can_view(caller: &UserProfile, application: &Application) -> bool {
    application.talent_id == caller.id
        || matches!(caller.role, UserRole::Recruiter | UserRole::Admin)
}

/// GET /api/applications
pub async fn list_applications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ApplicationParams>,
) -> ApiResult<Json<ApplicationsResponse>> {
    let caller = auth.profile(&state).await?;
    let applications = state
        .applications
        .list_for_talent(caller.id, params.job_type, params.status, params.limit)
        .await?;

    Ok(Json(ApplicationsResponse {
        count: applications.len(),
        applications,
    }))
}

/// POST /api/applications
pub async fn create_application(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<ApplyRequest>,
) -> ApiResult<(StatusCode, Json<ApplicationResponse>)> {
    let caller = auth.profile(&state).await?;
    if caller.role != UserRole::Talent {
        return Err(ApiError::forbidden("Only talents can apply"));
    }

    let application = NewApplication {
        talent_id: caller.id,
        job_id: request.job_id,
        internship_id: request.internship_id,
        job_type: request
            .job_type
            .unwrap_or_else(|| JobType::infer(request.internship_id)),
        cover_letter: sanitize_optional(request.cover_letter.as_deref()),
        resume_url: request.resume_url,
        portfolio_url: request.portfolio_url,
        application_data: request
            .application_data
            .unwrap_or_else(|| serde_json::json!({})),
    };
    application.check_target()?;

    let application = state.applications.create(&application).await?;
    Ok((StatusCode::CREATED, Json(ApplicationResponse { application })))
}

/// GET /api/applications/:id
pub async fn get_application(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApplicationResponse>> {
    let caller = auth.profile(&state).await?;
    let application = state
        .applications
        .get(id)
        .await?
        .filter(|a| can_view(&caller, a))
        .ok_or_else(|| ApiError::not_found("Application not found"))?;

    Ok(Json(ApplicationResponse { application }))
}

/// PATCH /api/applications/:id
///
/// Talents may edit their own application or withdraw it; status changes
/// and recruiter notes are reserved for recruiters and admins.
pub async fn update_application(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(mut update): Json<ApplicationUpdate>,
) -> ApiResult<Json<ApplicationResponse>> {
    if update.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }

    let caller = auth.profile(&state).await?;
    let current = state
        .applications
        .get(id)
        .await?
        .filter(|a| can_view(&caller, a))
        .ok_or_else(|| ApiError::not_found("Application not found"))?;

    let is_reviewer = matches!(caller.role, UserRole::Recruiter | UserRole::Admin);
    if update.touches_recruiter_fields() && !is_reviewer {
        return Err(ApiError::forbidden("Only recruiters can change the review status"));
    }
    if !is_reviewer && current.talent_id != caller.id {
        return Err(ApiError::forbidden("Cannot update another talent's application"));
    }
    if update.status.is_some() && current.status.is_terminal() {
        return Err(ApiError::Conflict(format!(
            "Application is already {}",
            current.status
        )));
    }

    update.cover_letter = update
        .cover_letter
        .as_deref()
        .map(|c| sanitize_optional(Some(c)).unwrap_or_default());
    update.recruiter_notes = update
        .recruiter_notes
        .as_deref()
        .map(|n| sanitize_optional(Some(n)).unwrap_or_default());

    let application = state
        .applications
        .update(id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("Application not found"))?;

    info!(
        application_id = %id,
        status = %application.status,
        updated_by = %caller.id,
        "Application updated"
    );
    Ok(Json(ApplicationResponse { application }))
}
