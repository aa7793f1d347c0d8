pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, UserAccount};
pub use error::FluxflixError;
pub use types::*;
