use std::sync::Arc;

use anyhow::Result;
use axum::{extract::Request, ServiceExt};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fluxflix_api::{build_app, AppState};
use fluxflix_catalog::{seed, CatalogStore, MemoryCatalogStore, PgCatalogStore};
use fluxflix_common::Config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("fluxflix=info".parse()?))
        .init();

    let config = Config::from_env()?;

    let store: Arc<dyn CatalogStore> = match &config.database_url {
        Some(url) => Arc::new(PgCatalogStore::connect(url).await?),
        None => {
            info!("DATABASE_URL not set, using in-memory catalog");
            Arc::new(MemoryCatalogStore::new())
        }
    };

    if config.seed_on_startup {
        let store = store.clone();
        tokio::spawn(async move {
            if let Err(e) = seed(store.as_ref()).await {
                warn!(error = %e, "Catalog seeding failed");
            }
        });
    }

    let state = Arc::new(AppState::new(&config, store));
    let app = build_app(state);

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("Fluxflix API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
