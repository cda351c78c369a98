//! Tempus Workforce Time and Attendance Server
//!
//! A Rust implementation of the Tempus time-clock backend, providing a REST
//! JSON API for terminal check-ins and the administration of properties,
//! areas, employees, schedules and user accounts, with live dashboard
//! updates over SSE.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
