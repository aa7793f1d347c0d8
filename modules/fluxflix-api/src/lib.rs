use std::sync::Arc;

use fluxflix_catalog::{CatalogStore, MovieService};
use fluxflix_common::Config;

pub mod auth;
pub mod error;
pub mod rest;
pub mod routes;

pub use auth::UserDirectory;
pub use error::{ApiError, ApiResult};
pub use routes::{build_app, build_router, route_table};

pub struct AppState {
    pub movies: MovieService,
    pub users: UserDirectory,
}

impl AppState {
    pub fn new(config: &Config, store: Arc<dyn CatalogStore>) -> Self {
        Self {
            movies: MovieService::new(store, config.event_interval),
            users: UserDirectory::new(config.principals()),
        }
    }
}
