pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use crate::services::{analysis_service::AnalysisService, student_service::StudentService};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub analysis_service: AnalysisService,
    pub student_service: StudentService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let analysis_service = AnalysisService::new(pool.clone());
        let student_service = StudentService::new(pool.clone());

        Self {
            pool,
            analysis_service,
            student_service,
        }
    }
}
