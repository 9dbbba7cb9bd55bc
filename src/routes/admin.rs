use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::admin_dto::{
        AdminJobQuery, EmployerDirectoryResponse, SetAccountActivePayload,
        WorkerDirectoryResponse,
    },
    error::Result,
    models::job::{Job, JobStatus, ModerationAction},
    utils::payload::Payload,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/admin/jobs",
    params(
        ("status" = Option<String>, Query, description = "pending, active, blocked or rejected")
    ),
    responses(
        (status = 200, description = "Jobs of every status", body = Vec<Job>)
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<AdminJobQuery>,
) -> Result<impl IntoResponse> {
    let jobs = state.job_service.list_by_status(query.status).await?;
    Ok(Json(jobs))
}

#[utoipa::path(
    get,
    path = "/api/admin/jobs/pending",
    responses(
        (status = 200, description = "Jobs awaiting moderation", body = Vec<Job>)
    )
)]
#[axum::debug_handler]
pub async fn list_pending(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let jobs = state
        .job_service
        .list_by_status(Some(JobStatus::Pending))
        .await?;
    Ok(Json(jobs))
}

async fn moderate(state: &AppState, id: Uuid, action: ModerationAction) -> Result<Json<Job>> {
    let job = state.job_service.moderate(id, action).await?;
    Ok(Json(job))
}

#[utoipa::path(
    post,
    path = "/api/admin/jobs/{id}/approve",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job is active", body = Job),
        (status = 404, description = "Job not found"),
        (status = 409, description = "Job already active or blocked")
    )
)]
#[axum::debug_handler]
pub async fn approve_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    moderate(&state, id, ModerationAction::Approve).await
}

#[utoipa::path(
    post,
    path = "/api/admin/jobs/{id}/reject",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job is rejected", body = Job),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn reject_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    moderate(&state, id, ModerationAction::Reject).await
}

#[utoipa::path(
    post,
    path = "/api/admin/jobs/{id}/block",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job is blocked", body = Job),
        (status = 404, description = "Job not found"),
        (status = 409, description = "Job already blocked")
    )
)]
#[axum::debug_handler]
pub async fn block_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    moderate(&state, id, ModerationAction::Block).await
}

#[utoipa::path(
    post,
    path = "/api/admin/jobs/{id}/unblock",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job is active again", body = Job),
        (status = 404, description = "Job not found"),
        (status = 409, description = "Job is not blocked")
    )
)]
#[axum::debug_handler]
pub async fn unblock_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    moderate(&state, id, ModerationAction::Unblock).await
}

#[utoipa::path(
    get,
    path = "/api/admin/workers",
    responses(
        (status = 200, description = "Worker directory", body = WorkerDirectoryResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_workers(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = state.directory_service.list_workers().await?;
    let total = items.len();
    Ok(Json(WorkerDirectoryResponse { items, total }))
}

#[utoipa::path(
    get,
    path = "/api/admin/workers/{id}",
    params(("id" = Uuid, Path, description = "Worker account ID")),
    responses(
        (status = 200, description = "Worker found", body = WorkerDirectoryEntry),
        (status = 404, description = "Worker not found")
    )
)]
#[axum::debug_handler]
pub async fn get_worker(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let entry = state.directory_service.get_worker(id).await?;
    Ok(Json(entry))
}

#[utoipa::path(
    get,
    path = "/api/admin/employers",
    responses(
        (status = 200, description = "Employer directory", body = EmployerDirectoryResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_employers(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = state.directory_service.list_employers().await?;
    let total = items.len();
    Ok(Json(EmployerDirectoryResponse { items, total }))
}

#[utoipa::path(
    patch,
    path = "/api/admin/accounts/{id}/active",
    params(("id" = Uuid, Path, description = "Account ID")),
    request_body = SetAccountActivePayload,
    responses(
        (status = 200, description = "Account updated", body = AccountSummary),
        (status = 404, description = "Account not found")
    )
)]
#[axum::debug_handler]
pub async fn set_account_active(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Payload(payload): Payload<SetAccountActivePayload>,
) -> Result<impl IntoResponse> {
    let account = state
        .account_service
        .set_active(id, payload.is_active)
        .await?;
    Ok(Json(account))
}
