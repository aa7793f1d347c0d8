use thiserror::Error;

#[derive(Error, Debug)]
pub enum FluxflixError {
    #[error("Configuration error: {0}")]
    Config(String),
}
