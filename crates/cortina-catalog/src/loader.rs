//! # Catalog Loader
//!
//! Locates the four dataset files, reads them and hands them to
//! [`Catalog::load`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  data/designs.csv   required  ── missing → FileNotFound                 │
//! │  data/bom.csv       required  ── missing → FileNotFound                 │
//! │  data/supplies.csv  optional  ── missing → warn, load without it        │
//! │  data/fabrics.csv   required  ── missing → FileNotFound                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use cortina_core::catalog::Dataset;
use cortina_core::{Catalog, RawTable};

use crate::error::{CatalogError, CatalogResult};
use crate::reader::read_table;

/// Default file names inside the catalog directory.
pub const DEFAULT_DESIGNS_FILE: &str = "designs.csv";
pub const DEFAULT_BOM_FILE: &str = "bom.csv";
pub const DEFAULT_SUPPLIES_FILE: &str = "supplies.csv";
pub const DEFAULT_FABRICS_FILE: &str = "fabrics.csv";

/// Where each dataset lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPaths {
    pub designs: PathBuf,
    pub bom: PathBuf,
    pub supplies: PathBuf,
    pub fabrics: PathBuf,
}

impl CatalogPaths {
    /// The default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            designs: dir.join(DEFAULT_DESIGNS_FILE),
            bom: dir.join(DEFAULT_BOM_FILE),
            supplies: dir.join(DEFAULT_SUPPLIES_FILE),
            fabrics: dir.join(DEFAULT_FABRICS_FILE),
        }
    }
}

/// Reads all datasets and builds the catalog.
///
/// ## Errors
/// - `FileNotFound` for a missing designs, BOM or fabrics file
/// - `FileRead` / `Csv` for unreadable files
/// - `Core` for schema, rule or empty-catalog problems
pub fn load_catalog(paths: &CatalogPaths) -> CatalogResult<Catalog> {
    let designs = read_required(Dataset::Designs, &paths.designs)?;
    let bom = read_required(Dataset::Bom, &paths.bom)?;
    let supplies = read_optional(Dataset::Supplies, &paths.supplies)?;
    let fabrics = read_required(Dataset::Fabrics, &paths.fabrics)?;

    Ok(Catalog::load(&designs, &bom, supplies.as_ref(), &fabrics)?)
}

fn read_required(dataset: Dataset, path: &Path) -> CatalogResult<RawTable> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound {
            dataset,
            path: path.to_path_buf(),
        });
    }
    let table = read_table(path)?;
    info!(%dataset, path = %path.display(), rows = table.len(), "Loaded dataset");
    Ok(table)
}

fn read_optional(dataset: Dataset, path: &Path) -> CatalogResult<Option<RawTable>> {
    if !path.exists() {
        warn!(%dataset, path = %path.display(), "Optional dataset not found");
        return Ok(None);
    }
    let table = read_table(path)?;
    info!(%dataset, path = %path.display(), rows = table.len(), "Loaded dataset");
    Ok(Some(table))
}
