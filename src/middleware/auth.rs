use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    error::{Error, Result},
    models::account::Role,
    utils::token::TokenService,
    AppState,
};

/// Caller identity reconstructed from the bearer token on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub account_id: Uuid,
    pub role: Role,
}

impl Identity {
    /// An empty allow-list admits every authenticated caller.
    pub fn require_role(&self, allowed: &[Role]) -> Result<()> {
        if allowed.is_empty() || allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(Error::Forbidden(format!(
                "Role '{}' is not allowed to perform this action",
                self.role
            )))
        }
    }
}

pub fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::Unauthenticated("missing_authorization".into()))?;
    let value = header
        .to_str()
        .map_err(|_| Error::Unauthenticated("bad_authorization".into()))?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::Unauthenticated("unsupported_scheme".into()))?
        .trim();
    if token.is_empty() {
        return Err(Error::Unauthenticated("missing_token".into()));
    }
    Ok(token)
}

pub fn authenticate(headers: &HeaderMap, tokens: &TokenService) -> Result<Identity> {
    let token = bearer_token(headers)?;
    let claims = tokens
        .verify(token)
        .map_err(|_| Error::InvalidToken("invalid_token".into()))?;
    let account_id = Uuid::parse_str(claims.sub.trim())
        .map_err(|_| Error::InvalidToken("token_missing_subject".into()))?;
    Ok(Identity {
        account_id,
        role: claims.role,
    })
}

/// Authenticates, applies the allow-list, then stores the [`Identity`] in
/// request extensions for handlers.
pub async fn gate(state: &AppState, mut req: Request, next: Next, allowed: &[Role]) -> Result<Response> {
    let identity = authenticate(req.headers(), &state.tokens)?;
    identity.require_role(allowed)?;
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

pub async fn require_auth(State(state): State<AppState>, req: Request, next: Next) -> Result<Response> {
    gate(&state, req, next, &[]).await
}

pub async fn require_worker(State(state): State<AppState>, req: Request, next: Next) -> Result<Response> {
    gate(&state, req, next, &[Role::Worker]).await
}

pub async fn require_employer(State(state): State<AppState>, req: Request, next: Next) -> Result<Response> {
    gate(&state, req, next, &[Role::Employer]).await
}

pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Result<Response> {
    gate(&state, req, next, &[Role::Admin]).await
}

pub async fn require_employer_or_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response> {
    gate(&state, req, next, &[Role::Employer, Role::Admin]).await
}
