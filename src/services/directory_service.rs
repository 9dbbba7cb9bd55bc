use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::account::{AccountSummary, Role};
use crate::models::application::{Application, APPLICATION_COLUMNS};
use crate::models::directory::{
    compose_employers, compose_workers, EmployerDirectoryEntry, WorkerDirectoryEntry,
};
use crate::models::job::{Job, JOB_COLUMNS};
use crate::models::profile::{EmployerProfile, WorkerProfile};
use crate::services::profile_service::{EMPLOYER_PROFILE_COLUMNS, WORKER_PROFILE_COLUMNS};

const SUMMARY_COLUMNS: &str = "id, name, email, role, image, is_active, created_at";

/// Admin directory views. Each part is fetched separately and composed in
/// memory; the parts may be slightly out of step with each other.
#[derive(Clone)]
pub struct DirectoryService {
    pool: PgPool,
}

impl DirectoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn accounts_with_role(&self, role: Role) -> Result<Vec<AccountSummary>> {
        let sql = format!(
            "SELECT {} FROM accounts WHERE role = $1 ORDER BY created_at DESC",
            SUMMARY_COLUMNS
        );
        let rows = sqlx::query_as::<_, AccountSummary>(&sql)
            .bind(role)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn worker_profiles(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, WorkerProfile>> {
        let sql = format!(
            "SELECT {} FROM worker_profiles WHERE account_id = ANY($1)",
            WORKER_PROFILE_COLUMNS
        );
        let rows = sqlx::query_as::<_, WorkerProfile>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|p| (p.account_id, p)).collect())
    }

    async fn latest_applications(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, Application>> {
        let sql = format!(
            "SELECT DISTINCT ON (worker_id) {} FROM applications WHERE worker_id = ANY($1) \
             ORDER BY worker_id, applied_at DESC, id DESC",
            APPLICATION_COLUMNS
        );
        let rows = sqlx::query_as::<_, Application>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|a| (a.worker_id, a)).collect())
    }

    async fn employer_profiles(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, EmployerProfile>> {
        let sql = format!(
            "SELECT {} FROM employer_profiles WHERE account_id = ANY($1)",
            EMPLOYER_PROFILE_COLUMNS
        );
        let rows = sqlx::query_as::<_, EmployerProfile>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|p| (p.account_id, p)).collect())
    }

    async fn latest_jobs(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, Job>> {
        let sql = format!(
            "SELECT DISTINCT ON (employer_id) {} FROM jobs WHERE employer_id = ANY($1) \
             ORDER BY employer_id, created_at DESC, id DESC",
            JOB_COLUMNS
        );
        let rows = sqlx::query_as::<_, Job>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|j| (j.employer_id, j)).collect())
    }

    pub async fn list_workers(&self) -> Result<Vec<WorkerDirectoryEntry>> {
        let accounts = self.accounts_with_role(Role::Worker).await?;
        let ids: Vec<Uuid> = accounts.iter().map(|a| a.id).collect();
        let profiles = self.worker_profiles(&ids).await?;
        let latest = self.latest_applications(&ids).await?;
        Ok(compose_workers(accounts, &profiles, &latest))
    }

    pub async fn get_worker(&self, id: Uuid) -> Result<WorkerDirectoryEntry> {
        let sql = format!(
            "SELECT {} FROM accounts WHERE id = $1 AND role = $2",
            SUMMARY_COLUMNS
        );
        let account = sqlx::query_as::<_, AccountSummary>(&sql)
            .bind(id)
            .bind(Role::Worker)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Worker not found".into()))?;

        let ids = [account.id];
        let profiles = self.worker_profiles(&ids).await?;
        let latest = self.latest_applications(&ids).await?;
        Ok(WorkerDirectoryEntry::resolve(
            account,
            profiles.get(&id),
            latest.get(&id),
        ))
    }

    pub async fn list_employers(&self) -> Result<Vec<EmployerDirectoryEntry>> {
        let accounts = self.accounts_with_role(Role::Employer).await?;
        let ids: Vec<Uuid> = accounts.iter().map(|a| a.id).collect();
        let profiles = self.employer_profiles(&ids).await?;
        let latest = self.latest_jobs(&ids).await?;
        Ok(compose_employers(accounts, &profiles, &latest))
    }
}
