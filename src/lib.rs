pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::services::user_service::{UserService, UserStore};
use sqlx::PgPool;

/// Shared handle passed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self::with_store(UserService::new(pool))
    }

    pub fn with_store(store: impl UserStore + 'static) -> Self {
        Self {
            users: Arc::new(store),
        }
    }
}
