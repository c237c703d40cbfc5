//! Saved job (bookmark) endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use talent_models::{JobType, NewSavedJob, SavedJob};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::security::sanitize_optional;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SavedJobParams {
    #[serde(default, alias = "jobType")]
    pub job_type: Option<JobType>,
}

#[derive(Debug, Deserialize)]
pub struct SaveJobRequest {
    #[serde(default, alias = "jobId")]
    pub job_id: Option<Uuid>,
    #[serde(default, alias = "internshipId")]
    pub internship_id: Option<Uuid>,
    #[serde(default, alias = "jobType")]
    pub job_type: Option<JobType>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RemoveParams {
    #[serde(default, alias = "jobId")]
    pub job_id: Option<Uuid>,
    #[serde(default, alias = "internshipId")]
    pub internship_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct NotesRequest {
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    pub items: Vec<SavedJob>,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub ok: bool,
    pub item: SavedJob,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub ok: bool,
    pub count: usize,
}

const MISSING_REFERENCE: &str = "job_id or internship_id required";

/// GET /api/saved-jobs
pub async fn list_saved_jobs(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<SavedJobParams>,
) -> ApiResult<Json<ItemsResponse>> {
    let caller = auth.profile(&state).await?;
    let items = state.saved_jobs.list(caller.id, params.job_type).await?;
    Ok(Json(ItemsResponse { items }))
}

/// POST /api/saved-jobs
pub async fn save_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<SaveJobRequest>,
) -> ApiResult<(StatusCode, Json<ItemResponse>)> {
    if request.job_id.is_none() && request.internship_id.is_none() {
        return Err(ApiError::bad_request(MISSING_REFERENCE));
    }

    let caller = auth.profile(&state).await?;
    let saved = NewSavedJob::new(
        caller.id,
        request.job_id,
        request.internship_id,
        request.job_type,
        sanitize_optional(request.notes.as_deref()),
    );
    let item = state.saved_jobs.save(&saved).await?;

    Ok((StatusCode::CREATED, Json(ItemResponse { ok: true, item })))
}

/// DELETE /api/saved-jobs
pub async fn remove_saved_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<RemoveParams>,
) -> ApiResult<Json<CountResponse>> {
    if params.job_id.is_none() && params.internship_id.is_none() {
        return Err(ApiError::bad_request(MISSING_REFERENCE));
    }

    let caller = auth.profile(&state).await?;
    let count = state
        .saved_jobs
        .remove(caller.id, params.job_id, params.internship_id)
        .await?;

    Ok(Json(CountResponse { ok: true, count }))
}

/// PUT /api/saved-jobs/:id
pub async fn update_saved_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<NotesRequest>,
) -> ApiResult<Json<ItemResponse>> {
    let notes = request
        .notes
        .ok_or_else(|| ApiError::bad_request("notes required"))?;

    let caller = auth.profile(&state).await?;
    let notes = sanitize_optional(Some(&notes)).unwrap_or_default();
    let item = state
        .saved_jobs
        .update_notes(id, caller.id, &notes)
        .await?
        .ok_or_else(|| ApiError::not_found("Saved job not found or access denied"))?;

    Ok(Json(ItemResponse { ok: true, item }))
}
