use thiserror::Error;

#[derive(Error, Debug)]
pub enum FestivalError {
    #[error("Unparseable date: {raw}")]
    UnparseableDate { raw: String },

    #[error("Conflicting document shape: {0}")]
    ConflictingShape(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, FestivalError>;
