//! # Error Types
//!
//! Domain-specific error types for cortina-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cortina-core errors (this file)                                       │
//! │  ├── CoreError        - Catalog schema/rule errors, lookups            │
//! │  └── ValidationError  - CurtainSpec / config input failures            │
//! │                                                                         │
//! │  cortina-catalog errors (separate crate)                               │
//! │  └── CatalogError     - File, CSV and config failures                  │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the user sees                             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CatalogError → CliError           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! - A missing or non-numeric rule parameter: the rule default is used.
//! - A missing fabric or accessory price: the line is priced at zero and
//!   reported in `PricedCurtain::unpriced`.

use thiserror::Error;

use crate::catalog::Dataset;

// =============================================================================
// Core Error
// =============================================================================

/// Core engine errors.
///
/// Catalog errors (`Schema`, `Rule`, `EmptyCatalog`) are terminal for a
/// session: nothing downstream can run without valid catalogs. The rest
/// abort a single calculation or lookup.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required column is missing from a catalog dataset.
    ///
    /// ## When This Occurs
    /// - The spreadsheet export was edited and a header renamed
    /// - The wrong file was configured for a dataset
    #[error("{dataset} catalog must have columns {missing:?}; found {found:?}")]
    Schema {
        dataset: Dataset,
        missing: Vec<String>,
        found: Vec<String>,
    },

    /// One or more BOM rows use a quantity rule outside the allowed set.
    ///
    /// The whole BOM dataset is rejected; `rules` lists every offending
    /// value once, sorted.
    #[error("Unsupported quantity rules in BOM: {}", rules.join(", "))]
    Rule { rules: Vec<String> },

    /// A rule name could not be evaluated.
    #[error("Unsupported quantity rule: '{0}'")]
    UnsupportedRule(String),

    /// A required catalog has no rows.
    #[error("{0} catalog has no rows")]
    EmptyCatalog(Dataset),

    /// The curtain references a design that is not in the catalog.
    #[error("Design not found: {0}")]
    DesignNotFound(String),

    /// A fabric type/reference/color combination is not in the catalog.
    #[error("Fabric not found: {fabric_type} / {reference} / {color}")]
    FabricNotFound {
        fabric_type: String,
        reference: String,
        color: String,
    },

    /// A supply has no catalog option for the given reference and color.
    #[error("Supply {supply} has no option {reference} / {color}")]
    SupplyOptionNotFound {
        supply: String,
        reference: String,
        color: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is below its lower bound.
    #[error("{field} must be at least {min}")]
    BelowMinimum { field: String, min: f64 },

    /// Value is above its upper bound.
    #[error("{field} must be at most {max}")]
    AboveMaximum { field: String, max: f64 },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// NaN or infinity where a measurement or price was expected.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
