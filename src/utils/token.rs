use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::account::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub iat: usize,
    pub exp: usize,
}

/// Issues and verifies HS256 session tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_days: i64) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            ttl: Duration::days(ttl_days.max(1)),
        }
    }

    pub fn issue(&self, account_id: Uuid, role: Role) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: account_id.to_string(),
            role,
            iat: now.timestamp() as usize,
            exp: (now + self.ttl).timestamp() as usize,
        };
        self.encode(&claims)
    }

    fn encode(&self, claims: &Claims) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| Error::Internal(format!("Failed to sign token: {}", e)))
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn issued_token_round_trips_subject_and_role() {
        let tokens = TokenService::new("secret", 7);
        let id = Uuid::new_v4();
        let token = assert_ok!(tokens.issue(id, Role::Worker));
        let claims = assert_ok!(tokens.verify(&token));
        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.role, Role::Worker);
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = TokenService::new("one", 7).issue(Uuid::new_v4(), Role::Admin).unwrap();
        let err = assert_err!(TokenService::new("two", 7).verify(&token));
        assert!(matches!(err, Error::InvalidToken(_)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = TokenService::new("secret", 7);
        let past = (Utc::now() - Duration::days(1)).timestamp() as usize;
        let token = tokens
            .encode(&Claims {
                sub: Uuid::new_v4().to_string(),
                role: Role::Employer,
                iat: past - 10,
                exp: past,
            })
            .unwrap();
        assert!(matches!(tokens.verify(&token), Err(Error::InvalidToken(_))));
    }
}
