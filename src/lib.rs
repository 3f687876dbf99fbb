use std::sync::Arc;

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

/// Shared handler state. The store is a trait object so the same routes run
/// against MongoDB in production and the in-memory store in tests.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn db::Store>,
    pub settings: config::Settings,
}

impl AppState {
    pub fn new(store: Arc<dyn db::Store>, settings: config::Settings) -> Self {
        Self { store, settings }
    }
}
