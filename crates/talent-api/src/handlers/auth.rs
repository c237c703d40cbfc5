//! Sign-up, login and current-account endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use talent_models::{NewUser, UserProfile, UserRole};
use talent_store::{AuthSession, SignUpOutcome};
use tracing::info;
use validator::Validate;

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::security::{normalize_email, sanitize_name};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 128))]
    pub password: String,
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    #[serde(default)]
    pub role: UserRole,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
    pub user: UserProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<AuthSession>,
    pub email_confirmation_required: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    pub token_type: String,
    pub user: Option<UserProfile>,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserProfile,
}

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(mut request): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<SignupResponse>)> {
    request.email = normalize_email(&request.email);
    request.full_name = sanitize_name(&request.full_name);
    request.validate()?;

    let metadata = json!({
        "full_name": request.full_name,
        "role": request.role,
    });
    let outcome = state
        .auth
        .sign_up(&request.email, &request.password, &metadata)
        .await?;

    let new_user = NewUser::new(request.role, request.full_name, request.email);
    let user = state
        .profiles
        .create(new_user, Some(&outcome.account().id))
        .await?;

    info!(user_id = %user.id, role = %user.role, "User signed up");

    let (session, email_confirmation_required) = match outcome {
        SignUpOutcome::Session(session) => (Some(session), false),
        SignUpOutcome::ConfirmationRequired(_) => (None, true),
    };

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully",
            user,
            session,
            email_confirmation_required,
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let email = normalize_email(&request.email);
    let session = state.auth.sign_in(&email, &request.password).await?;

    let user = match state.users.get_by_auth_id(&session.user.id).await? {
        Some(profile) => Some(profile),
        None => state.users.get_by_email(&email).await?,
    };

    Ok(Json(LoginResponse {
        access_token: session.access_token,
        refresh_token: session.refresh_token,
        expires_in: session.expires_in,
        token_type: session.token_type,
        user,
    }))
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, user: AuthUser) -> ApiResult<Json<MeResponse>> {
    let user = user.profile(&state).await?;
    Ok(Json(MeResponse { user }))
}
