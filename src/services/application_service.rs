use sqlx::{types::Json, PgPool};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{invalid_field, is_unique_violation, missing_fields, Error, Result};
use crate::models::account::Account;
use crate::models::application::{
    Application, ApplicationStatus, ContactOverrides, JobSnapshot, WorkerSnapshot,
    APPLICATION_COLUMNS,
};
use crate::models::job::{Job, JOB_COLUMNS};
use crate::models::profile::WorkerProfile;
use crate::services::profile_service::WORKER_PROFILE_COLUMNS;

const DUPLICATE_APPLICATION: &str = "You have already applied to this job";

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Records an application with frozen copies of the job and worker data.
    ///
    /// The job row stays locked until commit, so applicants to one job are
    /// settled in turn. The `(job_id, worker_id)` unique index decides
    /// duplicates: exactly one insert wins, the other maps to `Conflict`.
    pub async fn apply(
        &self,
        job_id: Uuid,
        worker_id: Uuid,
        overrides: ContactOverrides,
    ) -> Result<Application> {
        let mut tx = self.pool.begin().await?;

        let job_sql = format!("SELECT {} FROM jobs WHERE id = $1 FOR UPDATE", JOB_COLUMNS);
        let job = sqlx::query_as::<_, Job>(&job_sql)
            .bind(job_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".into()))?;

        let account = sqlx::query_as::<_, Account>(
            "SELECT id, name, email, password_hash, role, image, is_active, created_at, updated_at FROM accounts WHERE id = $1",
        )
        .bind(worker_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| Error::NotFound("Account not found".into()))?;

        let profile_sql = format!(
            "SELECT {} FROM worker_profiles WHERE account_id = $1",
            WORKER_PROFILE_COLUMNS
        );
        let profile = sqlx::query_as::<_, WorkerProfile>(&profile_sql)
            .bind(worker_id)
            .fetch_optional(&mut *tx)
            .await?;

        let worker_snapshot = WorkerSnapshot::capture(&account.email, profile.as_ref(), &overrides);
        let missing = worker_snapshot.missing_fields();
        if !missing.is_empty() {
            return Err(missing_fields(&missing));
        }
        let job_snapshot = JobSnapshot::from(&job);

        let insert_sql = format!(
            r#"
            INSERT INTO applications (job_id, worker_id, employer_id, worker_snapshot, job_snapshot)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            APPLICATION_COLUMNS
        );
        let application = sqlx::query_as::<_, Application>(&insert_sql)
            .bind(job.id)
            .bind(worker_id)
            .bind(job.employer_id)
            .bind(Json(&worker_snapshot))
            .bind(Json(&job_snapshot))
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    Error::Conflict(DUPLICATE_APPLICATION.into())
                } else {
                    Error::from(e)
                }
            })?;

        sqlx::query(
            "UPDATE jobs SET application_count = application_count + 1 WHERE id = $1",
        )
        .bind(job.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(application_id = %application.id, job_id = %job.id, worker_id = %worker_id, "application submitted");
        Ok(application)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Application> {
        let sql = format!("SELECT {} FROM applications WHERE id = $1", APPLICATION_COLUMNS);
        sqlx::query_as::<_, Application>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found".into()))
    }

    /// Newest first; reads only the stored snapshots.
    pub async fn list_for_worker(&self, worker_id: Uuid) -> Result<Vec<Application>> {
        let sql = format!(
            "SELECT {} FROM applications WHERE worker_id = $1 ORDER BY applied_at DESC, id DESC",
            APPLICATION_COLUMNS
        );
        let items = sqlx::query_as::<_, Application>(&sql)
            .bind(worker_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    pub async fn list_for_employer(&self, employer_id: Uuid) -> Result<Vec<Application>> {
        let sql = format!(
            "SELECT {} FROM applications WHERE employer_id = $1 ORDER BY applied_at DESC, id DESC",
            APPLICATION_COLUMNS
        );
        let items = sqlx::query_as::<_, Application>(&sql)
            .bind(employer_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    pub async fn list_for_job(&self, job_id: Uuid) -> Result<Vec<Application>> {
        let sql = format!(
            "SELECT {} FROM applications WHERE job_id = $1 ORDER BY applied_at DESC, id DESC",
            APPLICATION_COLUMNS
        );
        let items = sqlx::query_as::<_, Application>(&sql)
            .bind(job_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    /// Accept or reject; only the employer who owned the job at apply time.
    pub async fn set_status(
        &self,
        id: Uuid,
        employer_id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Application> {
        if status == ApplicationStatus::Pending {
            return Err(invalid_field(
                "status",
                "invalid_status",
                "status must be accepted or rejected",
            ));
        }

        let application = self.get_by_id(id).await?;
        if application.employer_id != employer_id {
            return Err(Error::Forbidden(
                "Only the employer who posted the job can review this application".into(),
            ));
        }

        let sql = format!(
            "UPDATE applications SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            APPLICATION_COLUMNS
        );
        let updated = sqlx::query_as::<_, Application>(&sql)
            .bind(id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found".into()))?;

        info!(application_id = %id, status = ?status, "application reviewed");
        Ok(updated)
    }

    /// Withdraws an application; only its worker may do so.
    pub async fn withdraw(&self, id: Uuid, worker_id: Uuid) -> Result<()> {
        let application = self.get_by_id(id).await?;
        if application.worker_id != worker_id {
            return Err(Error::Forbidden("You can only withdraw your own applications".into()));
        }

        let mut tx = self.pool.begin().await?;
        let job_exists: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM jobs WHERE id = $1 FOR UPDATE")
                .bind(application.job_id)
                .fetch_optional(&mut *tx)
                .await?;

        let deleted = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if deleted.rows_affected() == 0 {
            return Err(Error::NotFound("Application not found".into()));
        }

        if job_exists.is_some() {
            sqlx::query(
                "UPDATE jobs SET application_count = GREATEST(application_count - 1, 0) WHERE id = $1",
            )
            .bind(application.job_id)
            .execute(&mut *tx)
            .await?;
        } else {
            warn!(job_id = %application.job_id, "withdrawn application refers to a deleted job");
        }

        tx.commit().await?;
        info!(application_id = %id, worker_id = %worker_id, "application withdrawn");
        Ok(())
    }
}
