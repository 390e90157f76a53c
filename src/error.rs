use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TallyError>;

/// Failures raised by a storage backend.
///
/// Stores never surface these to their callers; the gateway logs and drops
/// them. They are visible only when talking to a backend directly.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("storage serialization error on {key}: {message}")]
    Serde { key: String, message: String },
    #[error("storage lock poisoned during {0}")]
    Poisoned(&'static str),
    #[error("persistence worker is no longer running")]
    Closed,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to write config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Error)]
pub enum TallyError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
