pub mod account_service;
pub mod application_service;
pub mod directory_service;
pub mod job_service;
pub mod profile_service;
