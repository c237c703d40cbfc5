//! API routes.

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

use crate::handlers::applications::{
    create_application, get_application, list_applications, update_application,
};
use crate::handlers::auth::{login, me, signup};
use crate::handlers::multilingual::{
    batch_translate, detect_language, supported_languages, translate_text,
};
use crate::handlers::postings::{
    create_freelance_job, create_internship, delete_internship, get_freelance_job,
    get_internship, list_freelance_jobs, list_internships,
};
use crate::handlers::saved_jobs::{list_saved_jobs, remove_saved_job, save_job, update_saved_job};
use crate::handlers::users::{
    create_user, delete_user, get_user, list_talents, search_users, update_user,
};
use crate::handlers::{health, ready};
use crate::metrics::metrics_middleware;
use crate::middleware::{
    cors_layer, rate_limit_middleware, request_id, request_logging, security_headers,
    RateLimiterCache,
};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let multilingual_routes = Router::new()
        .route("/multilingual/detect", post(detect_language))
        .route("/multilingual/translate", post(translate_text))
        .route("/multilingual/batch-translate", post(batch_translate))
        .route("/multilingual/languages", get(supported_languages));

    let auth_routes = Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me));

    let user_routes = Router::new()
        .route("/users", post(create_user))
        // Static segments take precedence over /users/:id
        .route("/users/talents", get(list_talents))
        .route("/users/search", get(search_users))
        .route("/users/:id", get(get_user).put(update_user).delete(delete_user));

    let marketplace_routes = Router::new()
        .route("/applications", get(list_applications).post(create_application))
        .route("/applications/:id", get(get_application).patch(update_application))
        .route(
            "/saved-jobs",
            get(list_saved_jobs).post(save_job).delete(remove_saved_job),
        )
        .route("/saved-jobs/:id", put(update_saved_job))
        .route("/internships", get(list_internships).post(create_internship))
        .route("/internships/:id", get(get_internship).delete(delete_internship))
        .route("/freelance-jobs", get(list_freelance_jobs).post(create_freelance_job))
        .route("/freelance-jobs/:id", get(get_freelance_job));

    let rate_limiter = Arc::new(RateLimiterCache::new(
        state.config.rate_limit_rps,
        state.config.rate_limit_burst,
    ));

    let api_routes = Router::new()
        .merge(multilingual_routes)
        .merge(auth_routes)
        .merge(user_routes)
        .merge(marketplace_routes)
        .layer(middleware::from_fn_with_state(rate_limiter, rate_limit_middleware));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/ready", get(ready));

    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .layer(TimeoutLayer::new(state.config.request_timeout))
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_logging))
        .layer(middleware::from_fn(request_id))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
