use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkerProfile {
    pub id: Uuid,
    pub account_id: Uuid,
    pub full_name: String,
    pub age: i32,
    pub phone: String,
    pub education: String,
    pub languages: Vec<String>,
    pub skills: Vec<String>,
    pub city: String,
    pub state: String,
    pub address: String,
    pub pincode: Option<String>,
    pub about: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmployerProfile {
    pub id: Uuid,
    pub account_id: Uuid,
    pub business_name: String,
    pub phone: String,
    pub district: String,
    pub state: String,
    pub address: String,
    pub about_company: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
