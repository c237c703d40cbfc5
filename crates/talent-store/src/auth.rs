//! GoTrue (hosted auth) client for email/password accounts.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::client::StoreClient;
use crate::error::{StoreError, StoreResult};

/// Account as reported by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthAccount {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Value,
}

/// Tokens issued after a successful sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: AuthAccount,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Sign-up either logs the user in directly or waits for email confirmation.
#[derive(Debug, Clone)]
pub enum SignUpOutcome {
    Session(AuthSession),
    ConfirmationRequired(AuthAccount),
}

impl SignUpOutcome {
    pub fn account(&self) -> &AuthAccount {
        match self {
            SignUpOutcome::Session(session) => &session.user,
            SignUpOutcome::ConfirmationRequired(account) => account,
        }
    }
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: &'a Value,
}

/// Client for the auth service's email/password endpoints.
#[derive(Debug, Clone)]
pub struct AuthClient {
    store: StoreClient,
    auth_url: String,
}

impl AuthClient {
    pub fn new(store: StoreClient) -> Self {
        let auth_url = format!("{}/auth/v1", store.config().url);
        Self { store, auth_url }
    }

    /// Register an account; `metadata` is stored as user metadata.
    pub async fn sign_up(&self, email: &str, password: &str, metadata: &Value) -> StoreResult<SignUpOutcome> {
        let url = format!("{}/signup", self.auth_url);
        let body = SignUpRequest {
            email,
            password,
            data: metadata,
        };

        let response = self
            .store
            .authorized(self.store.http().post(&url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let err = StoreClient::handle_error_response(status, &url, response).await;
            warn!(email = %email, error = %err, "Sign-up rejected");
            return Err(match err {
                StoreError::BadRequest(msg) if msg.contains("already registered") => {
                    StoreError::Conflict("email already registered".to_string())
                }
                other => other,
            });
        }

        let payload: Value = response.json().await?;
        let outcome = if payload.get("access_token").is_some() {
            SignUpOutcome::Session(serde_json::from_value(payload)?)
        } else {
            // Without auto-confirm the account itself is returned, possibly
            // nested under "user".
            let account = payload.get("user").cloned().unwrap_or(payload);
            SignUpOutcome::ConfirmationRequired(serde_json::from_value(account)?)
        };

        info!(user_id = %outcome.account().id, "Account created");
        Ok(outcome)
    }

    /// Exchange email and password for a session.
    pub async fn sign_in(&self, email: &str, password: &str) -> StoreResult<AuthSession> {
        let url = format!("{}/token", self.auth_url);

        let response = self
            .store
            .authorized(self.store.http().post(&url))
            .query(&[("grant_type", "password")])
            .json(&Credentials { email, password })
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
                Err(StoreError::AuthError("Invalid login credentials".to_string()))
            }
            status => Err(StoreClient::handle_error_response(status, &url, response).await),
        }
    }
}
