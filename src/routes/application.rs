use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::application_dto::{ApplyPayload, UpdateApplicationStatusPayload},
    error::Result,
    middleware::auth::Identity,
    utils::payload::Payload,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/jobs/{id}/apply",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    request_body = ApplyPayload,
    responses(
        (status = 201, description = "Application submitted", body = Application),
        (status = 400, description = "Contact details incomplete"),
        (status = 404, description = "Job not found"),
        (status = 409, description = "Already applied")
    )
)]
#[axum::debug_handler]
pub async fn apply(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(job_id): Path<Uuid>,
    payload: Option<Json<ApplyPayload>>,
) -> Result<impl IntoResponse> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    payload.validate()?;
    let application = state
        .application_service
        .apply(job_id, identity.account_id, payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(application)))
}

#[utoipa::path(
    get,
    path = "/api/worker/applications",
    responses(
        (status = 200, description = "Caller's applications, newest first", body = Vec<Application>)
    )
)]
#[axum::debug_handler]
pub async fn my_applications(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse> {
    let items = state
        .application_service
        .list_for_worker(identity.account_id)
        .await?;
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/employer/applications",
    responses(
        (status = 200, description = "Applications to the caller's jobs", body = Vec<Application>)
    )
)]
#[axum::debug_handler]
pub async fn employer_applications(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse> {
    let items = state
        .application_service
        .list_for_employer(identity.account_id)
        .await?;
    Ok(Json(items))
}

#[utoipa::path(
    patch,
    path = "/api/applications/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    request_body = UpdateApplicationStatusPayload,
    responses(
        (status = 200, description = "Status updated", body = Application),
        (status = 400, description = "Status must be accepted or rejected"),
        (status = 403, description = "Not the job's employer"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn update_status(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
    Payload(payload): Payload<UpdateApplicationStatusPayload>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .set_status(id, identity.account_id, payload.status)
        .await?;
    Ok(Json(application))
}

#[utoipa::path(
    delete,
    path = "/api/applications/{id}",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    responses(
        (status = 204, description = "Application withdrawn"),
        (status = 403, description = "Not the applicant"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn withdraw(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state
        .application_service
        .withdraw(id, identity.account_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
