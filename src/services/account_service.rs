use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AdminBootstrap;
use crate::dto::auth_dto::{LoginPayload, RegisterPayload};
use crate::error::{invalid_field, is_unique_violation, Error, Result};
use crate::models::account::{Account, AccountSummary, Role};
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::validation::normalize_email;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

const ACCOUNT_COLUMNS: &str =
    "id, name, email, password_hash, role, image, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct AccountService {
    pool: PgPool,
}

impl AccountService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn register(&self, payload: RegisterPayload) -> Result<Account> {
        let role = payload
            .role
            .parse::<Role>()
            .ok()
            .filter(Role::is_self_registrable)
            .ok_or_else(|| {
                invalid_field("role", "invalid_role", "role must be worker or employer")
            })?;

        let email = normalize_email(&payload.email);
        if self.find_by_email(&email).await?.is_some() {
            return Err(Error::Conflict("An account with this email already exists".into()));
        }

        let password_hash = hash_password(&payload.password)?;
        let account = self
            .insert(payload.name.trim(), &email, &password_hash, role)
            .await?;
        info!(account_id = %account.id, role = %account.role, "account registered");
        Ok(account)
    }

    async fn insert(&self, name: &str, email: &str, password_hash: &str, role: Role) -> Result<Account> {
        let sql = format!(
            "INSERT INTO accounts (name, email, password_hash, role) VALUES ($1, $2, $3, $4) RETURNING {}",
            ACCOUNT_COLUMNS
        );
        sqlx::query_as::<_, Account>(&sql)
            .bind(name)
            .bind(email)
            .bind(password_hash)
            .bind(role)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    Error::Conflict("An account with this email already exists".into())
                } else {
                    Error::from(e)
                }
            })
    }

    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, payload: LoginPayload) -> Result<Account> {
        let email = normalize_email(&payload.email);
        let Some(account) = self.find_by_email(&email).await? else {
            warn!("login failed: unknown email");
            return Err(Error::Unauthenticated(INVALID_CREDENTIALS.into()));
        };

        if !verify_password(&payload.password, &account.password_hash)? {
            warn!(account_id = %account.id, "login failed: wrong password");
            return Err(Error::Unauthenticated(INVALID_CREDENTIALS.into()));
        }
        if !account.is_active {
            return Err(Error::Forbidden("This account has been deactivated".into()));
        }
        Ok(account)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let sql = format!(
            "SELECT {} FROM accounts WHERE LOWER(email) = LOWER($1)",
            ACCOUNT_COLUMNS
        );
        let account = sqlx::query_as::<_, Account>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Account> {
        let sql = format!("SELECT {} FROM accounts WHERE id = $1", ACCOUNT_COLUMNS);
        sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Account not found".into()))
    }

    pub async fn set_active(&self, id: Uuid, is_active: bool) -> Result<AccountSummary> {
        let sql = format!(
            "UPDATE accounts SET is_active = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            ACCOUNT_COLUMNS
        );
        let account = sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .bind(is_active)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Account not found".into()))?;
        info!(account_id = %id, is_active, "account activation changed");
        Ok(account.into())
    }

    /// Creates the configured admin account unless the email is already taken.
    pub async fn ensure_admin(&self, admin: &AdminBootstrap) -> Result<()> {
        let email = normalize_email(&admin.email);
        if let Some(existing) = self.find_by_email(&email).await? {
            if existing.role != Role::Admin {
                warn!(email = %email, "admin bootstrap email belongs to a non-admin account");
            }
            return Ok(());
        }
        let password_hash = hash_password(&admin.password)?;
        let account = self
            .insert(&admin.name, &email, &password_hash, Role::Admin)
            .await?;
        info!(account_id = %account.id, "bootstrap admin created");
        Ok(())
    }
}
