//! Movie documents kept as JSONB in Postgres.
//!
//! Each row holds the whole document in `doc`; `id` is duplicated into its
//! own column for keyed lookups and `seq` fixes the listing order.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use fluxflix_common::Movie;

use crate::error::{CatalogError, Result};
use crate::store::CatalogStore;

#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `url` and make sure the `movies` collection exists.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new().max_connections(5).connect(url).await?;
        let store = Self::new(pool);
        store.migrate().await?;
        info!("Connected to Postgres document store");
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS movies (
                seq  BIGSERIAL PRIMARY KEY,
                id   TEXT      UNIQUE NOT NULL,
                doc  JSONB     NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

fn decode(id: String, doc: serde_json::Value) -> Result<Movie> {
    serde_json::from_value(doc).map_err(|source| CatalogError::CorruptDocument { id, source })
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn save(&self, title: &str) -> Result<Movie> {
        let movie = Movie {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
        };

        sqlx::query("INSERT INTO movies (id, doc) VALUES ($1, $2)")
            .bind(&movie.id)
            .bind(Json(&movie))
            .execute(&self.pool)
            .await?;

        Ok(movie)
    }

    async fn find_all(&self) -> Result<Vec<Movie>> {
        let rows = sqlx::query_as::<_, (String, serde_json::Value)>(
            "SELECT id, doc FROM movies ORDER BY seq ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|(id, doc)| decode(id, doc)).collect()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Movie>> {
        let row = sqlx::query_as::<_, (String, serde_json::Value)>(
            "SELECT id, doc FROM movies WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|(id, doc)| decode(id, doc)).transpose()
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM movies").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<u64> {
        let (count,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM movies")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_reads_document() {
        let doc = serde_json::json!({"id": "abc", "title": "AEon Flux"});
        let movie = decode("abc".to_string(), doc).unwrap();
        assert_eq!(movie.title, "AEon Flux");
    }

    #[test]
    fn decode_reports_corrupt_document() {
        let doc = serde_json::json!({"name": "no title here"});
        let err = decode("abc".to_string(), doc).unwrap_err();
        assert!(matches!(err, CatalogError::CorruptDocument { ref id, .. } if id == "abc"));
    }
}
