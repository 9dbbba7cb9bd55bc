use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::dto::profile_dto::{
    SaveEmployerProfilePayload, SaveWorkerProfilePayload, SavedEmployerProfile,
    SavedWorkerProfile,
};
use crate::error::{Error, Result};
use crate::models::profile::{EmployerProfile, WorkerProfile};
use crate::utils::validation::tidy_list;

pub const WORKER_PROFILE_COLUMNS: &str = "id, account_id, full_name, age, phone, education, \
    languages, skills, city, state, address, pincode, about, image, created_at, updated_at";

pub const EMPLOYER_PROFILE_COLUMNS: &str = "id, account_id, business_name, phone, district, \
    state, address, about_company, image, created_at, updated_at";

/// One profile per account, saved as find-or-create then overwrite. The
/// profile write and the account mirror share a transaction.
#[derive(Clone)]
pub struct ProfileService {
    pool: PgPool,
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn lock_existing(
        tx: &mut Transaction<'_, Postgres>,
        table: &str,
        account_id: Uuid,
    ) -> Result<bool> {
        let sql = format!("SELECT id FROM {} WHERE account_id = $1 FOR UPDATE", table);
        let existing: Option<Uuid> = sqlx::query_scalar(&sql)
            .bind(account_id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(existing.is_some())
    }

    /// Caller must have validated `payload`; nothing is written otherwise.
    pub async fn save_worker(
        &self,
        account_id: Uuid,
        payload: SaveWorkerProfilePayload,
    ) -> Result<SavedWorkerProfile> {
        let mut tx = self.pool.begin().await?;
        let exists = Self::lock_existing(&mut tx, "worker_profiles", account_id).await?;

        let sql = if exists {
            format!(
                r#"
                UPDATE worker_profiles SET
                    full_name = $2, age = $3, phone = $4, education = $5, languages = $6,
                    skills = $7, city = $8, state = $9, address = $10, pincode = $11,
                    about = $12, image = $13, updated_at = NOW()
                WHERE account_id = $1
                RETURNING {}
                "#,
                WORKER_PROFILE_COLUMNS
            )
        } else {
            format!(
                r#"
                INSERT INTO worker_profiles (
                    account_id, full_name, age, phone, education, languages,
                    skills, city, state, address, pincode, about, image
                ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13)
                ON CONFLICT (account_id) DO UPDATE SET
                    full_name = EXCLUDED.full_name, age = EXCLUDED.age, phone = EXCLUDED.phone,
                    education = EXCLUDED.education, languages = EXCLUDED.languages,
                    skills = EXCLUDED.skills, city = EXCLUDED.city, state = EXCLUDED.state,
                    address = EXCLUDED.address, pincode = EXCLUDED.pincode,
                    about = EXCLUDED.about, image = EXCLUDED.image, updated_at = NOW()
                RETURNING {}
                "#,
                WORKER_PROFILE_COLUMNS
            )
        };

        let full_name = payload.full_name.trim().to_string();
        let image = blank_to_none(payload.image);

        let profile = sqlx::query_as::<_, WorkerProfile>(&sql)
            .bind(account_id)
            .bind(&full_name)
            .bind(payload.age)
            .bind(payload.phone.trim())
            .bind(payload.education.trim())
            .bind(tidy_list(&payload.languages))
            .bind(tidy_list(&payload.skills))
            .bind(payload.city.trim())
            .bind(payload.state.trim())
            .bind(payload.address.trim())
            .bind(blank_to_none(payload.pincode))
            .bind(payload.about.trim())
            .bind(&image)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE accounts SET name = $2, image = COALESCE($3, image), updated_at = NOW() WHERE id = $1",
        )
        .bind(account_id)
        .bind(&full_name)
        .bind(&image)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(account_id = %account_id, created = !exists, "worker profile saved");
        Ok(SavedWorkerProfile {
            created: !exists,
            profile,
        })
    }

    pub async fn get_worker(&self, account_id: Uuid) -> Result<WorkerProfile> {
        let sql = format!(
            "SELECT {} FROM worker_profiles WHERE account_id = $1",
            WORKER_PROFILE_COLUMNS
        );
        sqlx::query_as::<_, WorkerProfile>(&sql)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Worker profile not found".into()))
    }

    /// Business name stays on the profile; only the image is mirrored.
    pub async fn save_employer(
        &self,
        account_id: Uuid,
        payload: SaveEmployerProfilePayload,
    ) -> Result<SavedEmployerProfile> {
        let mut tx = self.pool.begin().await?;
        let exists = Self::lock_existing(&mut tx, "employer_profiles", account_id).await?;

        let sql = if exists {
            format!(
                r#"
                UPDATE employer_profiles SET
                    business_name = $2, phone = $3, district = $4, state = $5,
                    address = $6, about_company = $7, image = $8, updated_at = NOW()
                WHERE account_id = $1
                RETURNING {}
                "#,
                EMPLOYER_PROFILE_COLUMNS
            )
        } else {
            format!(
                r#"
                INSERT INTO employer_profiles (
                    account_id, business_name, phone, district, state,
                    address, about_company, image
                ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
                ON CONFLICT (account_id) DO UPDATE SET
                    business_name = EXCLUDED.business_name, phone = EXCLUDED.phone,
                    district = EXCLUDED.district, state = EXCLUDED.state,
                    address = EXCLUDED.address, about_company = EXCLUDED.about_company,
                    image = EXCLUDED.image, updated_at = NOW()
                RETURNING {}
                "#,
                EMPLOYER_PROFILE_COLUMNS
            )
        };

        let image = blank_to_none(payload.image);

        let profile = sqlx::query_as::<_, EmployerProfile>(&sql)
            .bind(account_id)
            .bind(payload.business_name.trim())
            .bind(payload.phone.trim())
            .bind(payload.district.trim())
            .bind(payload.state.trim())
            .bind(payload.address.trim())
            .bind(blank_to_none(payload.about_company))
            .bind(&image)
            .fetch_one(&mut *tx)
            .await?;

        if image.is_some() {
            sqlx::query("UPDATE accounts SET image = $2, updated_at = NOW() WHERE id = $1")
                .bind(account_id)
                .bind(&image)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        info!(account_id = %account_id, created = !exists, "employer profile saved");
        Ok(SavedEmployerProfile {
            created: !exists,
            profile,
        })
    }

    pub async fn get_employer(&self, account_id: Uuid) -> Result<EmployerProfile> {
        let sql = format!(
            "SELECT {} FROM employer_profiles WHERE account_id = $1",
            EMPLOYER_PROFILE_COLUMNS
        );
        sqlx::query_as::<_, EmployerProfile>(&sql)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Employer profile not found".into()))
    }
}
