//! # CLI Error Type
//!
//! Everything a command can fail with, as the user sees it.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  cortina quote request.json                                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function  →  CliResult<T>                               │  │
//! │  │                                                                  │  │
//! │  │  Catalog file missing? ─── CatalogError::FileNotFound ──┐        │  │
//! │  │  Bad request JSON?     ─── CliError::Request ───────────┤        │  │
//! │  │  Unknown design?       ─── CoreError::DesignNotFound ───┤        │  │
//! │  │                                                         ▼        │  │
//! │  │                                               CliError ─► stderr │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Exit status 1, with "error [CODE]: message" on stderr                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

use cortina_catalog::CatalogError;
use cortina_core::CoreError;

#[derive(Debug, Error)]
pub enum CliError {
    /// Catalog files, CSV parsing or configuration.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Pricing, lookups and validation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The quote request file is not valid JSON for a request.
    #[error("invalid quote request {path}: {message}")]
    Request { path: PathBuf, message: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to serialize config: {0}")]
    Toml(#[from] toml::ser::Error),

    /// A session operation referenced a curtain id it does not hold.
    #[error("curtain not found in quotation: {0}")]
    CurtainNotFound(Uuid),
}

impl CliError {
    /// Machine-readable code, printed alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Catalog(CatalogError::FileNotFound { .. }) => "CATALOG_NOT_FOUND",
            CliError::Catalog(CatalogError::Core(_)) => "CATALOG_INVALID",
            CliError::Catalog(CatalogError::InvalidConfig(_))
            | CliError::Catalog(CatalogError::ConfigParse(_)) => "CONFIG_INVALID",
            CliError::Catalog(_) => "CATALOG_ERROR",
            CliError::Core(CoreError::Validation(_)) => "VALIDATION_ERROR",
            CliError::Core(CoreError::DesignNotFound(_))
            | CliError::Core(CoreError::FabricNotFound { .. })
            | CliError::Core(CoreError::SupplyOptionNotFound { .. }) => "NOT_FOUND",
            CliError::Core(_) => "PRICING_ERROR",
            CliError::Request { .. } => "INVALID_REQUEST",
            CliError::Io { .. } => "IO_ERROR",
            CliError::Json(_) | CliError::Toml(_) => "OUTPUT_ERROR",
            CliError::CurtainNotFound(_) => "NOT_FOUND",
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
