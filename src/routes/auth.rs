use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::auth_dto::{AuthResponse, LoginPayload, RegisterPayload},
    error::Result,
    middleware::auth::Identity,
    models::account::{Account, AccountSummary},
    utils::payload::Payload,
    AppState,
};

fn session(state: &AppState, account: Account) -> Result<AuthResponse> {
    let token = state.tokens.issue(account.id, account.role)?;
    Ok(AuthResponse {
        token,
        account: account.into(),
    })
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid payload or role"),
        (status = 409, description = "Email already registered")
    )
)]
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Payload(payload): Payload<RegisterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let account = state.account_service.register(payload).await?;
    Ok((StatusCode::CREATED, Json(session(&state, account)?)))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 401, description = "Invalid email or password"),
        (status = 403, description = "Account deactivated")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Payload(payload): Payload<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let account = state.account_service.login(payload).await?;
    Ok(Json(session(&state, account)?))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current account", body = AccountSummary),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn me(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse> {
    let account = state.account_service.get_by_id(identity.account_id).await?;
    Ok(Json(AccountSummary::from(account)))
}
