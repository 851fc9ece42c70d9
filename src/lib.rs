pub mod config;
pub mod corpus;
pub mod geometry;
pub mod layout;
pub mod optimizer;
pub mod scorer;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeytemperError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("character {ch:?} is not mapped by layout '{layout}'")]
    Lookup { ch: char, layout: String },

    #[error("degenerate normalization range: min == max == {0}")]
    DegenerateNormalization(f32),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type KtResult<T> = Result<T, KeytemperError>;
