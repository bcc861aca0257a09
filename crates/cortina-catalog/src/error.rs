//! # Catalog Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  std::io::Error / csv::Error / toml errors                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogError (this module) ← adds the path and dataset                 │
//! │       ▲                                                                 │
//! │       │ CoreError (schema, rules) passes through unchanged              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CliError ← printed to the user                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use thiserror::Error;

use cortina_core::catalog::Dataset;
use cortina_core::CoreError;

#[derive(Debug, Error)]
pub enum CatalogError {
    // === File System ===
    /// A required dataset file does not exist.
    #[error("{dataset} catalog not found: {path}")]
    FileNotFound { dataset: Dataset, path: PathBuf },

    /// A dataset file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV ===
    /// Malformed CSV (bad quoting, invalid UTF-8).
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    // === Catalog Content ===
    /// Schema, rule or empty-catalog error from the core.
    #[error(transparent)]
    Core(#[from] CoreError),

    // === Configuration ===
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
