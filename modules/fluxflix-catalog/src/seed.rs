use tracing::info;

use fluxflix_common::Movie;

use crate::error::Result;
use crate::store::CatalogStore;

pub const SEED_TITLES: [&str; 3] = ["Silence of the Lambdas", "AEon Flux", "Back to the Future"];

/// Reset the catalog to the fixed sample movies and log what ended up in it.
pub async fn seed(store: &dyn CatalogStore) -> Result<Vec<Movie>> {
    let removed = store.delete_all().await?;
    info!(removed, "Cleared catalog");

    for title in SEED_TITLES {
        store.save(title).await?;
    }

    let movies = store.find_all().await?;
    for movie in &movies {
        info!(id = %movie.id, title = %movie.title, "Seeded movie");
    }
    Ok(movies)
}
