pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::services::{
    account_service::AccountService, application_service::ApplicationService,
    directory_service::DirectoryService, job_service::JobService,
    profile_service::ProfileService,
};
use crate::utils::token::TokenService;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub tokens: TokenService,
    pub account_service: AccountService,
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub profile_service: ProfileService,
    pub directory_service: DirectoryService,
}

impl AppState {
    pub fn new(pool: PgPool, config: &Config) -> Self {
        let tokens = TokenService::new(&config.jwt_secret, config.token_ttl_days);
        let account_service = AccountService::new(pool.clone());
        let job_service = JobService::new(pool.clone());
        let application_service = ApplicationService::new(pool.clone());
        let profile_service = ProfileService::new(pool.clone());
        let directory_service = DirectoryService::new(pool.clone());

        Self {
            pool,
            tokens,
            account_service,
            job_service,
            application_service,
            profile_service,
            directory_service,
        }
    }
}
