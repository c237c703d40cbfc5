//! User profile endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use talent_models::{LanguageCode, NewUser, TalentFilter, UserProfile, UserRole, UserUpdate};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProfileParams {
    /// Reader language for the localized summary.
    pub lang: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub role: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct UserMessageResponse {
    pub message: &'static str,
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: UserProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localized_summary: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TalentsResponse {
    pub talents: Vec<UserProfile>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<UserProfile>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: &'static str,
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(user): Json<NewUser>,
) -> ApiResult<(StatusCode, Json<UserMessageResponse>)> {
    let user = state.profiles.create(user, None).await?;
    Ok((
        StatusCode::CREATED,
        Json(UserMessageResponse {
            message: "User created successfully",
            user,
        }),
    ))
}

/// GET /api/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<ProfileParams>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .users
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let localized_summary = params
        .lang
        .as_deref()
        .map(LanguageCode::parse_or_english)
        .and_then(|lang| user.localized_summary(lang))
        .map(str::to_string);

    Ok(Json(UserResponse {
        user,
        localized_summary,
    }))
}

/// PUT /api/users/:id
///
/// Callers may only update their own profile unless they are admins.
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(update): Json<UserUpdate>,
) -> ApiResult<Json<UserMessageResponse>> {
    let caller = auth.profile(&state).await?;
    if caller.id != id && caller.role != UserRole::Admin {
        return Err(ApiError::forbidden("Cannot update another user's profile"));
    }

    let user = state
        .profiles
        .update(id, update)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    info!(user_id = %id, updated_by = %caller.id, "Profile updated");
    Ok(Json(UserMessageResponse {
        message: "User updated successfully",
        user,
    }))
}

/// DELETE /api/users/:id (admin only)
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeletedResponse>> {
    let caller = auth.profile(&state).await?;
    if caller.role != UserRole::Admin {
        return Err(ApiError::forbidden("Admin access required"));
    }

    if !state.users.delete(id).await? {
        return Err(ApiError::not_found("User not found"));
    }

    info!(user_id = %id, deleted_by = %caller.id, "User deleted");
    Ok(Json(DeletedResponse {
        message: "User deleted successfully",
    }))
}

/// GET /api/users/talents
pub async fn list_talents(
    State(state): State<AppState>,
    Query(filter): Query<TalentFilter>,
    Query(page): Query<PageParams>,
) -> ApiResult<Json<TalentsResponse>> {
    let talents = state.users.list_talents(&filter, page.limit).await?;
    Ok(Json(TalentsResponse {
        count: talents.len(),
        talents,
    }))
}

/// GET /api/users/search
pub async fn search_users(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<UsersResponse>> {
    let term = params.q.trim();
    if term.is_empty() {
        return Err(ApiError::bad_request("Search query required"));
    }

    let role = match params.role.as_deref().filter(|r| !r.trim().is_empty()) {
        Some(role) => role.parse::<UserRole>()?,
        None => UserRole::Talent,
    };

    let users = state.users.search(term, Some(role), params.limit).await?;
    Ok(Json(UsersResponse {
        count: users.len(),
        users,
    }))
}
