use serde::{Deserialize, Serialize};

use crate::models::directory::{EmployerDirectoryEntry, WorkerDirectoryEntry};
use crate::models::job::JobStatus;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminJobQuery {
    pub status: Option<JobStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetAccountActivePayload {
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerDirectoryResponse {
    pub items: Vec<WorkerDirectoryEntry>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployerDirectoryResponse {
    pub items: Vec<EmployerDirectoryEntry>,
    pub total: usize,
}
