use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_type", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    PartTime,
    Hourly,
    Weekend,
    Seasonal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "salary_period", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SalaryPeriod {
    Hourly,
    Daily,
    Monthly,
}

/// Moderation state of a posting. New postings are always `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Pending,
    Active,
    Blocked,
    Rejected,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobStatus::Pending => "pending",
            JobStatus::Active => "active",
            JobStatus::Blocked => "blocked",
            JobStatus::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    Approve,
    Reject,
    Block,
    Unblock,
}

impl fmt::Display for ModerationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModerationAction::Approve => "approve",
            ModerationAction::Reject => "reject",
            ModerationAction::Block => "block",
            ModerationAction::Unblock => "unblock",
        };
        f.write_str(s)
    }
}

impl JobStatus {
    /// Next status for `action`, or `Conflict` when the action does not apply.
    ///
    /// `reject` on an already rejected posting is a no-op and returns the
    /// current status; callers skip the write in that case.
    pub fn transition(self, action: ModerationAction) -> Result<JobStatus> {
        use JobStatus::*;
        use ModerationAction::*;

        match (action, self) {
            (Approve, Pending | Rejected) => Ok(Active),
            (Approve, Active) => Err(Error::Conflict("Job is already approved".into())),
            (Approve, Blocked) => Err(Error::Conflict(
                "Job is blocked; unblock it instead of approving".into(),
            )),
            (Reject, _) => Ok(Rejected),
            (Block, Blocked) => Err(Error::Conflict("Job is already blocked".into())),
            (Block, _) => Ok(Blocked),
            (Unblock, Blocked) => Ok(Active),
            (Unblock, other) => Err(Error::Conflict(format!(
                "Only blocked jobs can be unblocked (current status: {})",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub employer_id: Uuid,
    pub workplace_name: String,
    pub job_title: String,
    pub job_summary: String,
    pub responsibilities: Vec<String>,
    pub required_skills: Vec<String>,
    pub job_type: JobType,
    pub job_status: JobStatus,
    pub working_hours_start: String,
    pub working_hours_end: String,
    pub salary_min: Decimal,
    pub salary_max: Decimal,
    pub salary_period: SalaryPeriod,
    pub city: String,
    pub state: String,
    pub district: String,
    pub country: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub application_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const JOB_COLUMNS: &str = "id, employer_id, workplace_name, job_title, job_summary, \
    responsibilities, required_skills, job_type, job_status, working_hours_start, \
    working_hours_end, salary_min, salary_max, salary_period, city, state, district, \
    country, address, latitude, longitude, application_count, is_active, created_at, updated_at";

#[cfg(test)]
mod tests {
    use super::JobStatus::*;
    use super::ModerationAction::*;
    use super::*;

    #[test]
    fn new_postings_start_pending() {
        assert_eq!(JobStatus::default(), Pending);
    }

    #[test]
    fn approve_moves_pending_and_rejected_to_active() {
        assert_eq!(Pending.transition(Approve).unwrap(), Active);
        assert_eq!(Rejected.transition(Approve).unwrap(), Active);
    }

    #[test]
    fn approving_active_job_conflicts() {
        let err = Active.transition(Approve).unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
        assert!(matches!(Blocked.transition(Approve), Err(Error::Conflict(_))));
    }

    #[test]
    fn reject_applies_from_every_state() {
        for status in [Pending, Active, Blocked, Rejected] {
            assert_eq!(status.transition(Reject).unwrap(), Rejected);
        }
    }

    #[test]
    fn block_and_unblock_round_trip() {
        let blocked = Active.transition(Block).unwrap();
        assert_eq!(blocked, Blocked);
        assert_eq!(blocked.transition(Unblock).unwrap(), Active);
        assert!(matches!(Blocked.transition(Block), Err(Error::Conflict(_))));
    }

    #[test]
    fn unblock_requires_blocked() {
        for status in [Pending, Active, Rejected] {
            assert!(matches!(status.transition(Unblock), Err(Error::Conflict(_))));
        }
    }

    #[test]
    fn job_type_uses_kebab_case_on_the_wire() {
        let json = serde_json::to_string(&JobType::PartTime).unwrap();
        assert_eq!(json, "\"part-time\"");
    }
}
