pub mod error;
pub mod memory;
pub mod pg;
pub mod seed;
pub mod service;
pub mod store;

pub use error::CatalogError;
pub use memory::MemoryCatalogStore;
pub use pg::PgCatalogStore;
pub use seed::{seed, SEED_TITLES};
pub use service::{MovieEventStream, MovieService};
pub use store::CatalogStore;
