//! Amiste Café administration server
//!
//! REST JSON API behind the Amiste admin app: machine catalog, installation
//! checklist wizard, sales proposals, recipes, maintenance wiki, stock counts
//! and staff roles.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod documents;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod wizard;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
