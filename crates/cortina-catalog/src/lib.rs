//! # cortina-catalog: Catalog Datasets & Configuration
//!
//! The I/O side of Cortina. Reads the four catalog datasets from CSV into
//! the core's `RawTable`s, builds the `Catalog`, and loads the
//! application configuration.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  cortina.toml + CORTINA_* env ──► AppConfig                             │
//! │                                      │ catalog_paths()                  │
//! │                                      ▼                                  │
//! │  designs.csv ─┐                 CatalogPaths                            │
//! │  bom.csv ─────┼──► reader ──► RawTable ×4 ──► Catalog::load ──► Catalog │
//! │  supplies.csv ┤                                                         │
//! │  fabrics.csv ─┘                      │ to_pricing_config()              │
//! │                                      ▼                                  │
//! │                                PricingConfig                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use cortina_catalog::{load_catalog, AppConfig};
//!
//! let config = AppConfig::load(None)?;
//! let catalog = load_catalog(&config.catalog_paths())?;
//! println!("{} designs", catalog.design_count());
//! # Ok::<(), cortina_catalog::CatalogError>(())
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod reader;

pub use config::AppConfig;
pub use error::{CatalogError, CatalogResult};
pub use loader::{load_catalog, CatalogPaths};
pub use reader::{read_table, read_table_from_str};
