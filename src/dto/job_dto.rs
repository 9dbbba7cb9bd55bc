use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::job::{Job, JobType, SalaryPeriod};
use crate::services::job_service::JobList;
use crate::utils::validation::{validate_clock_time, validate_no_blank_items, validate_not_blank};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_new_job"))]
pub struct CreateJobPayload {
    #[validate(custom(function = "validate_not_blank"))]
    pub workplace_name: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub job_title: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub job_summary: String,
    #[serde(default)]
    #[validate(custom(function = "validate_no_blank_items"))]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_no_blank_items"))]
    pub required_skills: Vec<String>,
    pub job_type: JobType,
    #[validate(custom(function = "validate_clock_time"))]
    pub working_hours_start: String,
    #[validate(custom(function = "validate_clock_time"))]
    pub working_hours_end: String,
    pub salary_min: Decimal,
    pub salary_max: Decimal,
    pub salary_period: SalaryPeriod,
    #[validate(custom(function = "validate_not_blank"))]
    pub city: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub state: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub district: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub country: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub address: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

/// Partial update of the non-status fields of a posting.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_job_patch"))]
pub struct UpdateJobPayload {
    #[validate(custom(function = "validate_not_blank"))]
    pub workplace_name: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub job_title: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub job_summary: Option<String>,
    #[validate(custom(function = "validate_no_blank_items"))]
    pub responsibilities: Option<Vec<String>>,
    #[validate(custom(function = "validate_no_blank_items"))]
    pub required_skills: Option<Vec<String>>,
    pub job_type: Option<JobType>,
    #[validate(custom(function = "validate_clock_time"))]
    pub working_hours_start: Option<String>,
    #[validate(custom(function = "validate_clock_time"))]
    pub working_hours_end: Option<String>,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    pub salary_period: Option<SalaryPeriod>,
    #[validate(custom(function = "validate_not_blank"))]
    pub city: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub state: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub district: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub country: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub address: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

fn salary_error() -> ValidationError {
    let mut err = ValidationError::new("salary_range");
    err.message = Some("salary_min must be non-negative and not exceed salary_max".into());
    err
}

fn validate_new_job(payload: &CreateJobPayload) -> Result<(), ValidationError> {
    if payload.salary_min < Decimal::ZERO || payload.salary_min > payload.salary_max {
        return Err(salary_error());
    }
    Ok(())
}

fn validate_job_patch(payload: &UpdateJobPayload) -> Result<(), ValidationError> {
    if let Some(min) = payload.salary_min {
        if min < Decimal::ZERO {
            return Err(salary_error());
        }
    }
    if let (Some(min), Some(max)) = (payload.salary_min, payload.salary_max) {
        if min > max {
            return Err(salary_error());
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub search: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub job_type: Option<JobType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListResponse {
    pub items: Vec<Job>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl From<JobList> for JobListResponse {
    fn from(value: JobList) -> Self {
        Self {
            items: value.items,
            total: value.total,
            page: value.page,
            per_page: value.per_page,
            total_pages: value.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> serde_json::Value {
        json!({
            "workplace_name": "Corner Cafe",
            "job_title": "Barista",
            "job_summary": "Weekend shifts",
            "responsibilities": ["Brew coffee"],
            "required_skills": ["Espresso"],
            "job_type": "part-time",
            "working_hours_start": "08:00",
            "working_hours_end": "14:00",
            "salary_min": "100",
            "salary_max": "150",
            "salary_period": "daily",
            "city": "Pune",
            "state": "MH",
            "district": "Pune",
            "country": "India",
            "address": "12 MG Road"
        })
    }

    #[test]
    fn well_formed_job_passes() {
        let job: CreateJobPayload = serde_json::from_value(payload()).unwrap();
        assert!(job.validate().is_ok());
        assert_eq!(job.job_type, JobType::PartTime);
    }

    #[test]
    fn inverted_salary_range_fails() {
        let mut raw = payload();
        raw["salary_min"] = json!("200");
        let job: CreateJobPayload = serde_json::from_value(raw).unwrap();
        assert!(job.validate().is_err());
    }

    #[test]
    fn bad_hours_and_blank_title_fail() {
        let mut raw = payload();
        raw["working_hours_end"] = json!("2pm");
        raw["job_title"] = json!("   ");
        let job: CreateJobPayload = serde_json::from_value(raw).unwrap();
        let errors = job.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("working_hours_end"));
        assert!(fields.contains_key("job_title"));
    }

    #[test]
    fn unknown_job_type_is_rejected_at_parse_time() {
        let mut raw = payload();
        raw["job_type"] = json!("full-time");
        assert!(serde_json::from_value::<CreateJobPayload>(raw).is_err());
    }

    #[test]
    fn patch_checks_salary_pair_only_when_both_present() {
        let patch = UpdateJobPayload {
            salary_min: Some(Decimal::new(500, 0)),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());

        let patch = UpdateJobPayload {
            salary_min: Some(Decimal::new(500, 0)),
            salary_max: Some(Decimal::new(100, 0)),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }
}
