use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Document store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),

    #[error("Corrupt movie document {id}: {source}")]
    CorruptDocument {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, CatalogError>;
