use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use fluxflix_common::Movie;

use crate::error::Result;
use crate::store::CatalogStore;

/// Process-local catalog. Used when no `DATABASE_URL` is configured and in tests.
#[derive(Default)]
pub struct MemoryCatalogStore {
    movies: RwLock<Vec<Movie>>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn save(&self, title: &str) -> Result<Movie> {
        let movie = Movie {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
        };
        self.movies.write().await.push(movie.clone());
        Ok(movie)
    }

    async fn find_all(&self) -> Result<Vec<Movie>> {
        Ok(self.movies.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Movie>> {
        Ok(self.movies.read().await.iter().find(|m| m.id == id).cloned())
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool> {
        let mut movies = self.movies.write().await;
        let before = movies.len();
        movies.retain(|m| m.id != id);
        Ok(movies.len() != before)
    }

    async fn delete_all(&self) -> Result<u64> {
        let mut movies = self.movies.write().await;
        let removed = movies.len() as u64;
        movies.clear();
        Ok(removed)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.movies.read().await.len() as u64)
    }
}
