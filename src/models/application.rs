use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

use super::job::{Job, JobType, SalaryPeriod};
use super::profile::WorkerProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

/// Job fields frozen at the moment a worker applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub job_title: String,
    pub workplace_name: String,
    pub job_summary: String,
    pub required_skills: Vec<String>,
    pub responsibilities: Vec<String>,
    pub salary_min: Decimal,
    pub salary_max: Decimal,
    pub salary_period: SalaryPeriod,
    pub job_type: JobType,
    pub address: String,
    pub city: String,
    pub district: String,
    pub state: String,
    pub country: String,
    pub working_hours_start: String,
    pub working_hours_end: String,
}

impl From<&Job> for JobSnapshot {
    fn from(job: &Job) -> Self {
        Self {
            job_title: job.job_title.clone(),
            workplace_name: job.workplace_name.clone(),
            job_summary: job.job_summary.clone(),
            required_skills: job.required_skills.clone(),
            responsibilities: job.responsibilities.clone(),
            salary_min: job.salary_min,
            salary_max: job.salary_max,
            salary_period: job.salary_period,
            job_type: job.job_type,
            address: job.address.clone(),
            city: job.city.clone(),
            district: job.district.clone(),
            state: job.state.clone(),
            country: job.country.clone(),
            working_hours_start: job.working_hours_start.clone(),
            working_hours_end: job.working_hours_end.clone(),
        }
    }
}

/// Worker contact and profile fields frozen at the moment of applying.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkerSnapshot {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub area: String,
    pub district: String,
    pub state: String,
    pub pincode: Option<String>,
    pub education: String,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub about: String,
}

/// Contact fields a worker may re-submit with an application. Each one present
/// takes precedence over the stored profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactOverrides {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub area: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub about: Option<String>,
}

fn pick(over: &Option<String>, stored: Option<&String>) -> String {
    over.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| stored.cloned())
        .unwrap_or_default()
}

impl WorkerSnapshot {
    /// Builds the snapshot from the account email, the current profile (if
    /// any) and re-submitted contact fields.
    pub fn capture(
        email: &str,
        profile: Option<&WorkerProfile>,
        overrides: &ContactOverrides,
    ) -> Self {
        Self {
            full_name: pick(&overrides.full_name, profile.map(|p| &p.full_name)),
            email: email.to_string(),
            phone: pick(&overrides.phone, profile.map(|p| &p.phone)),
            area: pick(&overrides.area, profile.map(|p| &p.address)),
            district: pick(&overrides.district, profile.map(|p| &p.city)),
            state: pick(&overrides.state, profile.map(|p| &p.state)),
            pincode: overrides
                .pincode
                .clone()
                .filter(|s| !s.trim().is_empty())
                .or_else(|| profile.and_then(|p| p.pincode.clone())),
            education: profile.map(|p| p.education.clone()).unwrap_or_default(),
            skills: profile.map(|p| p.skills.clone()).unwrap_or_default(),
            languages: profile.map(|p| p.languages.clone()).unwrap_or_default(),
            about: pick(&overrides.about, profile.map(|p| &p.about)),
        }
    }

    /// Names of required contact fields that ended up empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.full_name.trim().is_empty() {
            missing.push("full_name");
        }
        if self.phone.trim().is_empty() {
            missing.push("phone");
        }
        missing
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub worker_id: Uuid,
    pub employer_id: Uuid,
    pub worker_snapshot: Json<WorkerSnapshot>,
    pub job_snapshot: Json<JobSnapshot>,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const APPLICATION_COLUMNS: &str = "id, job_id, worker_id, employer_id, worker_snapshot, \
    job_snapshot, status, applied_at, updated_at";
