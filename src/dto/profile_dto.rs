use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::profile::{EmployerProfile, WorkerProfile};
use crate::utils::validation::{validate_no_blank_items, validate_not_blank};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveWorkerProfilePayload {
    #[validate(custom(function = "validate_not_blank"), length(max = 120))]
    pub full_name: String,
    #[validate(range(min = 18, max = 100, message = "age must be at least 18"))]
    pub age: i32,
    #[validate(custom(function = "validate_not_blank"), length(max = 32))]
    pub phone: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub education: String,
    #[validate(
        length(min = 1, message = "at least one language is required"),
        custom(function = "validate_no_blank_items")
    )]
    pub languages: Vec<String>,
    #[validate(
        length(min = 1, message = "at least one skill is required"),
        custom(function = "validate_no_blank_items")
    )]
    pub skills: Vec<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub city: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub state: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub address: String,
    #[validate(length(max = 12))]
    pub pincode: Option<String>,
    #[validate(custom(function = "validate_not_blank"), length(max = 2000))]
    pub about: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveEmployerProfilePayload {
    #[validate(custom(function = "validate_not_blank"), length(max = 160))]
    pub business_name: String,
    #[validate(custom(function = "validate_not_blank"), length(max = 32))]
    pub phone: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub district: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub state: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub address: String,
    #[validate(length(max = 4000))]
    pub about_company: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedProfile<T> {
    pub created: bool,
    pub profile: T,
}

pub type SavedWorkerProfile = SavedProfile<WorkerProfile>;
pub type SavedEmployerProfile = SavedProfile<EmployerProfile>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn worker() -> serde_json::Value {
        json!({
            "full_name": "Asha Rao",
            "age": 21,
            "phone": "9000000000",
            "education": "B.Com",
            "languages": ["English"],
            "skills": ["Cashier"],
            "city": "Pune",
            "state": "MH",
            "address": "Kothrud",
            "about": "Reliable"
        })
    }

    fn parse(value: serde_json::Value) -> SaveWorkerProfilePayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn complete_worker_profile_is_valid() {
        assert!(parse(worker()).validate().is_ok());
    }

    #[test]
    fn under_age_worker_is_rejected() {
        let mut raw = worker();
        raw["age"] = json!(17);
        let errors = parse(raw).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("age"));
    }

    #[test]
    fn empty_skills_or_languages_are_rejected() {
        let mut raw = worker();
        raw["skills"] = json!([]);
        raw["languages"] = json!([]);
        let errors = parse(raw).validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("skills"));
        assert!(fields.contains_key("languages"));
    }

    #[test]
    fn employer_requires_business_name() {
        let payload: SaveEmployerProfilePayload = serde_json::from_value(json!({
            "business_name": " ",
            "phone": "1",
            "district": "Kochi",
            "state": "KL",
            "address": "Market Rd"
        }))
        .unwrap();
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("business_name"));
    }
}
