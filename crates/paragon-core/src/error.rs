//! Error types for Paragon

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid range: from {from} is after to {to}")]
    InvalidRange { from: i64, to: i64 },

    #[error("Precondition failed: {0}")]
    Precondition(String),
}

pub type Result<T> = std::result::Result<T, Error>;
