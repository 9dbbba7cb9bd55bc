use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::dto::job_dto::{CreateJobPayload, JobListQuery, UpdateJobPayload};
use crate::error::{invalid_field, Error, Result};
use crate::middleware::auth::Identity;
use crate::models::account::Role;
use crate::models::job::{Job, JobStatus, ModerationAction, JOB_COLUMNS};
use crate::utils::validation::tidy_list;

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
}

pub struct JobList {
    pub items: Vec<Job>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// New postings always start `pending`, whatever the payload says.
    pub async fn create(&self, employer_id: Uuid, payload: CreateJobPayload) -> Result<Job> {
        let sql = format!(
            r#"
            INSERT INTO jobs (
                employer_id, workplace_name, job_title, job_summary, responsibilities,
                required_skills, job_type, job_status, working_hours_start, working_hours_end,
                salary_min, salary_max, salary_period, city, state,
                district, country, address, latitude, longitude
            ) VALUES (
                $1,$2,$3,$4,$5,
                $6,$7,$8,$9,$10,
                $11,$12,$13,$14,$15,
                $16,$17,$18,$19,$20
            )
            RETURNING {}
            "#,
            JOB_COLUMNS
        );

        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(employer_id)
            .bind(payload.workplace_name.trim())
            .bind(payload.job_title.trim())
            .bind(payload.job_summary.trim())
            .bind(tidy_list(&payload.responsibilities))
            .bind(tidy_list(&payload.required_skills))
            .bind(payload.job_type)
            .bind(JobStatus::Pending)
            .bind(payload.working_hours_start.trim())
            .bind(payload.working_hours_end.trim())
            .bind(payload.salary_min)
            .bind(payload.salary_max)
            .bind(payload.salary_period)
            .bind(payload.city.trim())
            .bind(payload.state.trim())
            .bind(payload.district.trim())
            .bind(payload.country.trim())
            .bind(payload.address.trim())
            .bind(payload.latitude)
            .bind(payload.longitude)
            .fetch_one(&self.pool)
            .await?;

        info!(job_id = %job.id, employer_id = %employer_id, "job posted for moderation");
        Ok(job)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Job> {
        let sql = format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS);
        sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".into()))
    }

    /// Loads a posting and checks that `employer_id` owns it.
    pub async fn get_owned(&self, id: Uuid, employer_id: Uuid) -> Result<Job> {
        let job = self.get_by_id(id).await?;
        if job.employer_id != employer_id {
            return Err(Error::Forbidden("You can only manage your own jobs".into()));
        }
        Ok(job)
    }

    pub async fn update(&self, id: Uuid, employer_id: Uuid, payload: UpdateJobPayload) -> Result<Job> {
        let current = self.get_owned(id, employer_id).await?;

        let salary_min = payload.salary_min.unwrap_or(current.salary_min);
        let salary_max = payload.salary_max.unwrap_or(current.salary_max);
        if salary_min > salary_max {
            return Err(invalid_field(
                "salary_min",
                "salary_range",
                "salary_min must not exceed salary_max",
            ));
        }

        let sql = format!(
            r#"
            UPDATE jobs
            SET
                workplace_name = COALESCE($2, workplace_name),
                job_title = COALESCE($3, job_title),
                job_summary = COALESCE($4, job_summary),
                responsibilities = COALESCE($5, responsibilities),
                required_skills = COALESCE($6, required_skills),
                job_type = COALESCE($7, job_type),
                working_hours_start = COALESCE($8, working_hours_start),
                working_hours_end = COALESCE($9, working_hours_end),
                salary_min = $10,
                salary_max = $11,
                salary_period = COALESCE($12, salary_period),
                city = COALESCE($13, city),
                state = COALESCE($14, state),
                district = COALESCE($15, district),
                country = COALESCE($16, country),
                address = COALESCE($17, address),
                latitude = COALESCE($18, latitude),
                longitude = COALESCE($19, longitude),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            JOB_COLUMNS
        );

        let trimmed = |v: Option<String>| v.map(|s| s.trim().to_string());

        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .bind(trimmed(payload.workplace_name))
            .bind(trimmed(payload.job_title))
            .bind(trimmed(payload.job_summary))
            .bind(payload.responsibilities.as_deref().map(tidy_list))
            .bind(payload.required_skills.as_deref().map(tidy_list))
            .bind(payload.job_type)
            .bind(trimmed(payload.working_hours_start))
            .bind(trimmed(payload.working_hours_end))
            .bind(salary_min)
            .bind(salary_max)
            .bind(payload.salary_period)
            .bind(trimmed(payload.city))
            .bind(trimmed(payload.state))
            .bind(trimmed(payload.district))
            .bind(trimmed(payload.country))
            .bind(trimmed(payload.address))
            .bind(payload.latitude)
            .bind(payload.longitude)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".into()))?;

        Ok(job)
    }

    /// Owners delete their own postings; admins delete any.
    pub async fn delete(&self, id: Uuid, caller: &Identity) -> Result<()> {
        match caller.role {
            Role::Admin => {
                self.get_by_id(id).await?;
            }
            Role::Employer => {
                self.get_owned(id, caller.account_id).await?;
            }
            Role::Worker => {
                return Err(Error::Forbidden("Workers cannot delete jobs".into()));
            }
        }

        sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        info!(job_id = %id, by = %caller.account_id, role = %caller.role, "job deleted");
        Ok(())
    }

    /// Applies a moderation action with a compare-and-set on the status read,
    /// so a concurrent transition surfaces as `Conflict` instead of being lost.
    pub async fn moderate(&self, id: Uuid, action: ModerationAction) -> Result<Job> {
        let job = self.get_by_id(id).await?;
        let next = job.job_status.transition(action)?;
        if next == job.job_status {
            return Ok(job);
        }

        let sql = format!(
            "UPDATE jobs SET job_status = $2, updated_at = NOW() WHERE id = $1 AND job_status = $3 RETURNING {}",
            JOB_COLUMNS
        );
        let updated = sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .bind(next)
            .bind(job.job_status)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                Error::Conflict("Job status changed concurrently; reload and retry".into())
            })?;

        info!(job_id = %id, %action, from = %job.job_status, to = %next, "job moderated");
        Ok(updated)
    }

    pub async fn list_by_employer(&self, employer_id: Uuid) -> Result<Vec<Job>> {
        let sql = format!(
            "SELECT {} FROM jobs WHERE employer_id = $1 ORDER BY created_at DESC",
            JOB_COLUMNS
        );
        let items = sqlx::query_as::<_, Job>(&sql)
            .bind(employer_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    /// Admin listing; `None` returns postings of every status.
    pub async fn list_by_status(&self, status: Option<JobStatus>) -> Result<Vec<Job>> {
        let sql = format!(
            "SELECT {} FROM jobs WHERE ($1::job_status IS NULL OR job_status = $1) ORDER BY created_at DESC",
            JOB_COLUMNS
        );
        let items = sqlx::query_as::<_, Job>(&sql)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    /// Public listing: active postings only, optionally filtered.
    pub async fn list_active(&self, query: JobListQuery) -> Result<JobList> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = page_offset(page, per_page)?;

        let mut filters = vec!["job_status = 'active'".to_string(), "is_active".to_string()];
        let mut args: Vec<String> = Vec::new();

        if let Some(search) = query.search.filter(|s| !s.trim().is_empty()) {
            let n = args.len() + 1;
            filters.push(format!(
                "(job_title ILIKE ${n} OR workplace_name ILIKE ${n} OR EXISTS (SELECT 1 FROM unnest(required_skills) s WHERE s ILIKE ${n}))"
            ));
            args.push(format!("%{}%", escape_like(search.trim())));
        }
        if let Some(city) = query.city.filter(|s| !s.trim().is_empty()) {
            filters.push(format!("city ILIKE ${}", args.len() + 1));
            args.push(escape_like(city.trim()));
        }
        if let Some(state) = query.state.filter(|s| !s.trim().is_empty()) {
            filters.push(format!("state ILIKE ${}", args.len() + 1));
            args.push(escape_like(state.trim()));
        }
        let job_type_idx = query.job_type.map(|_| args.len() + 1);
        if let Some(n) = job_type_idx {
            filters.push(format!("job_type = ${}", n));
        }

        let bound = args.len() + job_type_idx.map_or(0, |_| 1);
        let where_clause = format!("WHERE {}", filters.join(" AND "));

        let items_query = format!(
            "SELECT {} FROM jobs {} ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
            JOB_COLUMNS,
            where_clause,
            bound + 1,
            bound + 2
        );
        let total_query = format!("SELECT COUNT(*) FROM jobs {}", where_clause);

        let mut items_statement = sqlx::query_as::<_, Job>(&items_query);
        for value in &args {
            items_statement = items_statement.bind(value);
        }
        if let Some(job_type) = query.job_type {
            items_statement = items_statement.bind(job_type);
        }
        let items = items_statement
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let mut total_statement = sqlx::query_scalar::<_, i64>(&total_query);
        for value in &args {
            total_statement = total_statement.bind(value);
        }
        if let Some(job_type) = query.job_type {
            total_statement = total_statement.bind(job_type);
        }
        let total = total_statement.fetch_one(&self.pool).await?;

        let total_pages = ((total as f64) / (per_page as f64)).ceil() as i64;

        Ok(JobList {
            items,
            total,
            page,
            per_page,
            total_pages,
        })
    }
}

fn page_offset(page: i64, per_page: i64) -> Result<i64> {
    (page - 1)
        .checked_mul(per_page)
        .ok_or_else(|| Error::BadRequest("page is out of range".into()))
}

/// Escapes `ILIKE` wildcards so user input matches literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_counts_whole_pages() {
        assert_eq!(page_offset(1, 20).unwrap(), 0);
        assert_eq!(page_offset(3, 20).unwrap(), 40);
    }

    #[test]
    fn huge_page_is_a_bad_request() {
        let err = page_offset(i64::MAX, 20).unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));
    }

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("Pune"), "Pune");
    }
}
