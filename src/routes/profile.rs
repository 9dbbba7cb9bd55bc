use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::profile_dto::{SaveEmployerProfilePayload, SaveWorkerProfilePayload},
    error::Result,
    middleware::auth::Identity,
    utils::payload::Payload,
    AppState,
};

fn saved_status(created: bool) -> StatusCode {
    if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    }
}

#[utoipa::path(
    put,
    path = "/api/profile/worker",
    request_body = SaveWorkerProfilePayload,
    responses(
        (status = 201, description = "Profile created", body = WorkerProfile),
        (status = 200, description = "Profile updated", body = WorkerProfile),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn save_worker_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Payload(payload): Payload<SaveWorkerProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let saved = state
        .profile_service
        .save_worker(identity.account_id, payload)
        .await?;
    Ok((saved_status(saved.created), Json(saved.profile)))
}

#[utoipa::path(
    get,
    path = "/api/profile/worker",
    responses(
        (status = 200, description = "Caller's worker profile", body = WorkerProfile),
        (status = 404, description = "No profile yet")
    )
)]
#[axum::debug_handler]
pub async fn get_worker_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse> {
    let profile = state.profile_service.get_worker(identity.account_id).await?;
    Ok(Json(profile))
}

#[utoipa::path(
    put,
    path = "/api/profile/employer",
    request_body = SaveEmployerProfilePayload,
    responses(
        (status = 201, description = "Profile created", body = EmployerProfile),
        (status = 200, description = "Profile updated", body = EmployerProfile),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn save_employer_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Payload(payload): Payload<SaveEmployerProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let saved = state
        .profile_service
        .save_employer(identity.account_id, payload)
        .await?;
    Ok((saved_status(saved.created), Json(saved.profile)))
}

#[utoipa::path(
    get,
    path = "/api/profile/employer",
    responses(
        (status = 200, description = "Caller's employer profile", body = EmployerProfile),
        (status = 404, description = "No profile yet")
    )
)]
#[axum::debug_handler]
pub async fn get_employer_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse> {
    let profile = state
        .profile_service
        .get_employer(identity.account_id)
        .await?;
    Ok(Json(profile))
}
