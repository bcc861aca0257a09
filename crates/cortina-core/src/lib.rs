//! # cortina-core: Pure Quotation Engine for Custom Curtains
//!
//! This crate is the **heart** of Cortina. Given window measurements, a
//! design, fabric selections and accessory selections, it produces a priced
//! bill of materials and a total with tax. Everything here is a pure
//! function over in-memory data.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cortina Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation (CLI / form front-end)                │   │
//! │  │     Quote request ──► CurtainSpec      PricedCurtain ──► print  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ cortina-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐  ┌─────────┐  ┌──────────┐  ┌────────────┐         │   │
//! │  │  │ catalog │─►│  rules  │─►│ resolver │─►│ calculator │──┐      │   │
//! │  │  │  store  │  │evaluator│  │ (lines)  │  │ (curtain)  │  │      │   │
//! │  │  └─────────┘  └─────────┘  └──────────┘  └────────────┘  │      │   │
//! │  │                                          ┌────────────┐  │      │   │
//! │  │                                          │ aggregator │◄─┘      │   │
//! │  │                                          │ (quotation)│         │   │
//! │  │                                          └────────────┘         │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │              cortina-catalog (CSV datasets, config)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Catalog store: designs, BOM, supplies, fabrics
//! - [`rules`] - Quantity rule evaluator
//! - [`resolver`] - Prices a single BOM item
//! - [`calculator`] - Prices one curtain (all lines, labor, tax)
//! - [`aggregator`] - Sums priced curtains into a quotation
//! - [`curtain`] - The `CurtainSpec` input and its selections
//! - [`quote`] - Priced output types
//! - [`money`] - Whole-unit integer money
//! - [`types`] - Enumerations (units, rules, tax)
//! - [`config`] - Overridable pricing constants
//! - [`validation`] - Input checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use cortina_core::money::Money;
//! use cortina_core::types::TaxRate;
//!
//! // A tax-inclusive total of $119,000 at 19% carries $19,000 of tax
//! let total = Money::from_units(119_000);
//! let tax = total.tax_included(TaxRate::from_bps(1900));
//! assert_eq!(tax.units(), 19_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregator;
pub mod calculator;
pub mod catalog;
pub mod config;
pub mod curtain;
pub mod error;
pub mod money;
pub mod quote;
pub mod resolver;
pub mod rules;
pub mod types;
pub mod validation;

#[cfg(test)]
pub(crate) mod fixtures;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use aggregator::aggregate;
pub use calculator::{calculate, QuoteCalculator};
pub use catalog::{Catalog, RawTable};
pub use config::{PricingConfig, SpacingDefaults};
pub use curtain::{CurtainSpec, FabricSelection, SupplySelection};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use quote::{PricedCurtain, PricedLine, Quotation};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default sales tax (IVA) in basis points: 1900 = 19%.
pub const DEFAULT_TAX_RATE_BPS: u32 = 1900;

/// Default distance between eyelets, in meters, for `UND_OJALES_PAR`.
pub const DEFAULT_EYELET_SPACING_M: f64 = 0.14;

/// Default distance between buttons, in meters, for `UND_BOTON_PAR`.
pub const DEFAULT_BUTTON_SPACING_M: f64 = 0.20;

/// Width multiplier used when a design row has none (or an invalid one).
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

/// Supply-name prefix marking a labor row in the BOM.
///
/// Labor is never priced through the BOM loop; the calculator adds one
/// labor line per curtain from the design's labor price.
pub const LABOR_MARKER: &str = "M.O";

/// Supply name of the primary fabric slot.
pub const PRIMARY_FABRIC_NAME: &str = "TELA 1";

/// Supply name of the secondary fabric slot.
pub const SECONDARY_FABRIC_NAME: &str = "TELA 2";
