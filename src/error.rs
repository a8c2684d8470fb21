use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io { source: io::Error, path: PathBuf },
    #[error("failed to parse catalog {path}: {source}")]
    Json {
        source: serde_json::Error,
        path: PathBuf,
    },
    #[error("catalog {path} has no `{column}` column")]
    MissingColumn { column: String, path: PathBuf },
    #[error("invalid record at line {line} in {path}: {message}")]
    InvalidRecord {
        line: usize,
        message: String,
        path: PathBuf,
    },
}

impl CatalogError {
    pub(crate) fn io(source: io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }

    pub(crate) fn json(source: serde_json::Error, path: impl Into<PathBuf>) -> Self {
        Self::Json {
            source,
            path: path.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io { source: io::Error, path: PathBuf },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        source: toml::de::Error,
        path: PathBuf,
    },
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
