pub mod admin;
pub mod application;
pub mod auth;
pub mod health;
pub mod job;
pub mod profile;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::{
    config::Config,
    middleware::{
        auth::{
            require_admin, require_auth, require_employer, require_employer_or_admin,
            require_worker,
        },
        cors::cors_layer,
        rate_limit::{rps_middleware, RateLimiter},
    },
    AppState,
};

/// Images travel inline as data URLs, so bodies are allowed to be large.
const BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Full application router. Each group carries its own gate; public routes
/// and authenticated routes are rate limited separately.
pub fn app(state: AppState, config: &Config) -> Router {
    let public_api = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/jobs", get(job::list_jobs))
        .route("/api/jobs/:id", get(job::get_job))
        .layer(from_fn_with_state(
            RateLimiter::new(config.public_rps),
            rps_middleware,
        ));

    let account_api = Router::new()
        .route("/api/auth/me", get(auth::me))
        .layer(from_fn_with_state(state.clone(), require_auth));

    let worker_api = Router::new()
        .route("/api/jobs/:id/apply", post(application::apply))
        .route("/api/worker/applications", get(application::my_applications))
        .route("/api/applications/:id", delete(application::withdraw))
        .route(
            "/api/profile/worker",
            put(profile::save_worker_profile).get(profile::get_worker_profile),
        )
        .layer(from_fn_with_state(state.clone(), require_worker));

    let employer_api = Router::new()
        .route("/api/jobs", post(job::create_job))
        .route("/api/jobs/:id", patch(job::update_job))
        .route("/api/employer/jobs", get(job::my_jobs))
        .route("/api/jobs/:id/applications", get(job::job_applications))
        .route(
            "/api/employer/applications",
            get(application::employer_applications),
        )
        .route(
            "/api/applications/:id/status",
            patch(application::update_status),
        )
        .route(
            "/api/profile/employer",
            put(profile::save_employer_profile).get(profile::get_employer_profile),
        )
        .layer(from_fn_with_state(state.clone(), require_employer));

    let owner_or_admin_api = Router::new()
        .route("/api/jobs/:id", delete(job::delete_job))
        .layer(from_fn_with_state(state.clone(), require_employer_or_admin));

    let admin_api = Router::new()
        .route("/api/admin/jobs", get(admin::list_jobs))
        .route("/api/admin/jobs/pending", get(admin::list_pending))
        .route("/api/admin/jobs/:id/approve", post(admin::approve_job))
        .route("/api/admin/jobs/:id/reject", post(admin::reject_job))
        .route("/api/admin/jobs/:id/block", post(admin::block_job))
        .route("/api/admin/jobs/:id/unblock", post(admin::unblock_job))
        .route("/api/admin/workers", get(admin::list_workers))
        .route("/api/admin/workers/:id", get(admin::get_worker))
        .route("/api/admin/employers", get(admin::list_employers))
        .route(
            "/api/admin/accounts/:id/active",
            patch(admin::set_account_active),
        )
        .layer(from_fn_with_state(state.clone(), require_admin));

    let authenticated_api = Router::new()
        .merge(account_api)
        .merge(worker_api)
        .merge(employer_api)
        .merge(owner_or_admin_api)
        .merge(admin_api)
        .layer(from_fn_with_state(
            RateLimiter::new(config.api_rps),
            rps_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .merge(public_api)
        .merge(authenticated_api)
        .with_state(state)
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
}
