//! Admin directory rows: an account joined with its profile and its most
//! recent job or application.
//!
//! Every fallback used by the admin screens lives here so precedence is
//! declared once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::account::AccountSummary;
use super::application::{Application, ApplicationStatus};
use super::job::{Job, JobStatus};
use super::profile::{EmployerProfile, WorkerProfile};

pub const NO_PHONE: &str = "No phone";
pub const NO_LOCATION: &str = "No location";
pub const NO_BUSINESS_NAME: &str = "No business name";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestApplication {
    pub id: Uuid,
    pub job_id: Uuid,
    pub job_title: String,
    pub workplace_name: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestJob {
    pub id: Uuid,
    pub job_title: String,
    pub job_status: JobStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerDirectoryEntry {
    pub account_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub education: Option<String>,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub age: Option<i32>,
    pub image: Option<String>,
    pub is_active: bool,
    pub has_profile: bool,
    pub joined_at: DateTime<Utc>,
    pub latest_application: Option<LatestApplication>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployerDirectoryEntry {
    pub account_id: Uuid,
    pub name: String,
    pub business_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub image: Option<String>,
    pub is_active: bool,
    pub has_profile: bool,
    pub joined_at: DateTime<Utc>,
    pub latest_job: Option<LatestJob>,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Joins non-empty parts with ", ", or the fallback when none remain.
fn location_of(parts: &[&str]) -> String {
    let parts: Vec<String> = parts.iter().filter_map(|p| non_empty(p)).collect();
    if parts.is_empty() {
        NO_LOCATION.to_string()
    } else {
        parts.join(", ")
    }
}

impl WorkerDirectoryEntry {
    pub fn resolve(
        account: AccountSummary,
        profile: Option<&WorkerProfile>,
        latest: Option<&Application>,
    ) -> Self {
        let name = profile
            .and_then(|p| non_empty(&p.full_name))
            .unwrap_or_else(|| account.name.clone());
        let phone = profile
            .and_then(|p| non_empty(&p.phone))
            .unwrap_or_else(|| NO_PHONE.to_string());
        let location = profile
            .map(|p| location_of(&[&p.city, &p.state]))
            .unwrap_or_else(|| NO_LOCATION.to_string());
        let image = profile
            .and_then(|p| p.image.clone())
            .or_else(|| account.image.clone());

        Self {
            account_id: account.id,
            name,
            email: account.email,
            phone,
            location,
            education: profile.and_then(|p| non_empty(&p.education)),
            skills: profile.map(|p| p.skills.clone()).unwrap_or_default(),
            languages: profile.map(|p| p.languages.clone()).unwrap_or_default(),
            age: profile.map(|p| p.age),
            image,
            is_active: account.is_active,
            has_profile: profile.is_some(),
            joined_at: account.created_at,
            latest_application: latest.map(|a| LatestApplication {
                id: a.id,
                job_id: a.job_id,
                job_title: a.job_snapshot.job_title.clone(),
                workplace_name: a.job_snapshot.workplace_name.clone(),
                status: a.status,
                applied_at: a.applied_at,
            }),
        }
    }
}

impl EmployerDirectoryEntry {
    pub fn resolve(
        account: AccountSummary,
        profile: Option<&EmployerProfile>,
        latest: Option<&Job>,
    ) -> Self {
        let business_name = profile
            .and_then(|p| non_empty(&p.business_name))
            .unwrap_or_else(|| NO_BUSINESS_NAME.to_string());
        let phone = profile
            .and_then(|p| non_empty(&p.phone))
            .unwrap_or_else(|| NO_PHONE.to_string());
        let location = profile
            .map(|p| location_of(&[&p.district, &p.state]))
            .unwrap_or_else(|| NO_LOCATION.to_string());
        let image = profile
            .and_then(|p| p.image.clone())
            .or_else(|| account.image.clone());

        Self {
            account_id: account.id,
            name: account.name,
            business_name,
            email: account.email,
            phone,
            location,
            image,
            is_active: account.is_active,
            has_profile: profile.is_some(),
            joined_at: account.created_at,
            latest_job: latest.map(|j| LatestJob {
                id: j.id,
                job_title: j.job_title.clone(),
                job_status: j.job_status,
                created_at: j.created_at,
            }),
        }
    }
}

/// Composes worker rows in account order from independently fetched parts.
pub fn compose_workers(
    accounts: Vec<AccountSummary>,
    profiles: &HashMap<Uuid, WorkerProfile>,
    latest: &HashMap<Uuid, Application>,
) -> Vec<WorkerDirectoryEntry> {
    accounts
        .into_iter()
        .map(|account| {
            let id = account.id;
            WorkerDirectoryEntry::resolve(account, profiles.get(&id), latest.get(&id))
        })
        .collect()
}

pub fn compose_employers(
    accounts: Vec<AccountSummary>,
    profiles: &HashMap<Uuid, EmployerProfile>,
    latest: &HashMap<Uuid, Job>,
) -> Vec<EmployerDirectoryEntry> {
    accounts
        .into_iter()
        .map(|account| {
            let id = account.id;
            EmployerDirectoryEntry::resolve(account, profiles.get(&id), latest.get(&id))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::Role;

    fn account(role: Role) -> AccountSummary {
        AccountSummary {
            id: Uuid::new_v4(),
            name: "Account Name".into(),
            email: "someone@example.com".into(),
            role,
            image: Some("data:image/png;base64,AAAA".into()),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn employer_profile(account_id: Uuid) -> EmployerProfile {
        let now = Utc::now();
        EmployerProfile {
            id: Uuid::new_v4(),
            account_id,
            business_name: "Fresh Mart".into(),
            phone: "  ".into(),
            district: "Kochi".into(),
            state: "".into(),
            address: "Market Rd".into(),
            about_company: None,
            image: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn worker_without_profile_uses_fallbacks() {
        let acc = account(Role::Worker);
        let entry = WorkerDirectoryEntry::resolve(acc.clone(), None, None);

        assert_eq!(entry.name, "Account Name");
        assert_eq!(entry.phone, NO_PHONE);
        assert_eq!(entry.location, NO_LOCATION);
        assert_eq!(entry.image, acc.image);
        assert!(!entry.has_profile);
        assert!(entry.latest_application.is_none());
        assert!(entry.skills.is_empty());
    }

    #[test]
    fn employer_profile_fields_win_and_blanks_fall_back() {
        let acc = account(Role::Employer);
        let profile = employer_profile(acc.id);
        let entry = EmployerDirectoryEntry::resolve(acc, Some(&profile), None);

        assert_eq!(entry.name, "Account Name");
        assert_eq!(entry.business_name, "Fresh Mart");
        assert_eq!(entry.phone, NO_PHONE);
        assert_eq!(entry.location, "Kochi");
        assert!(entry.image.is_some());
        assert!(entry.has_profile);
    }

    #[test]
    fn compose_keeps_account_order_and_matches_by_id() {
        let first = account(Role::Employer);
        let second = account(Role::Employer);
        let mut profiles = HashMap::new();
        profiles.insert(second.id, employer_profile(second.id));

        let entries = compose_employers(
            vec![first.clone(), second.clone()],
            &profiles,
            &HashMap::new(),
        );

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].account_id, first.id);
        assert_eq!(entries[0].business_name, NO_BUSINESS_NAME);
        assert_eq!(entries[1].business_name, "Fresh Mart");
    }
}
