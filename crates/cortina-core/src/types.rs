//! # Domain Types
//!
//! The closed vocabularies the engine works with.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  QuantityRule   │   │   SupplyKind    │   │      Unit       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  MT_ANCHO_X_MULT│   │  Fabric(slot)   │   │  MT  (meters)   │       │
//! │  │  UND_OJALES_PAR │   │  Labor          │   │  UND (count)    │       │
//! │  │  UND_BOTON_PAR  │   │  Accessory      │   │  other verbatim │       │
//! │  │  FIJO           │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │    TaxMode      │   │  AssemblyMode   │       │
//! │  │  bps (u32)      │   │  Inclusive      │   │  Whole          │       │
//! │  │  1900 = 19%     │   │  Exclusive      │   │  Split          │       │
//! │  └─────────────────┘   └─────────────────┘   │  SemiSplit      │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rule names and supply markers are parsed into these enums once, when the
//! catalog is loaded. Past that point every dispatch is an exhaustive
//! `match`, never a string comparison.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, ValidationError};
use crate::{LABOR_MARKER, PRIMARY_FABRIC_NAME, SECONDARY_FABRIC_NAME};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1900 bps = 19% (Colombian IVA)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::from_bps(crate::DEFAULT_TAX_RATE_BPS)
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percentage())
    }
}

// =============================================================================
// Tax Mode
// =============================================================================

/// How tax relates to the summed line amounts.
///
/// ```text
/// Inclusive (default):  total = round(Σ lines)
///                       tax   = round(total × r / (1 + r))
///                       net   = total − tax
///
/// Exclusive:            net   = round(Σ lines)
///                       tax   = round(net × r)
///                       total = net + tax
/// ```
/// Both keep `net + tax == total` exactly. They differ in what the catalog
/// prices mean; product owners have not settled which one is right, so the
/// choice is configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TaxMode {
    /// Catalog prices already include tax; tax is backed out of the total.
    #[default]
    Inclusive,
    /// Tax is added on top of the summed prices.
    Exclusive,
}

impl fmt::Display for TaxMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxMode::Inclusive => write!(f, "inclusive"),
            TaxMode::Exclusive => write!(f, "exclusive"),
        }
    }
}

impl FromStr for TaxMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inclusive" | "included" => Ok(TaxMode::Inclusive),
            "exclusive" | "added" => Ok(TaxMode::Exclusive),
            _ => Err(ValidationError::NotAllowed {
                field: "tax_mode".to_string(),
                allowed: vec!["inclusive".to_string(), "exclusive".to_string()],
            }),
        }
    }
}

// =============================================================================
// Unit of Measure
// =============================================================================

/// Unit of measure of a BOM line.
///
/// Unknown codes are kept verbatim (upper-cased) so they still display;
/// they round like continuous units.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    /// Linear meters ("MT").
    Meter,
    /// Discrete pieces ("UND").
    Each,
    /// Any other code.
    Other(String),
}

impl Unit {
    /// Parses a unit code: trimmed, case-insensitive.
    pub fn parse(raw: &str) -> Self {
        let code = raw.trim().to_uppercase();
        match code.as_str() {
            "MT" => Unit::Meter,
            "UND" => Unit::Each,
            _ => Unit::Other(code),
        }
    }

    /// The catalog code of this unit.
    pub fn code(&self) -> &str {
        match self {
            Unit::Meter => "MT",
            Unit::Each => "UND",
            Unit::Other(code) => code,
        }
    }

    /// Count units round to whole numbers.
    #[inline]
    pub fn is_discrete(&self) -> bool {
        matches!(self, Unit::Each)
    }

    /// Rounds a quantity for display: integers for count units, two
    /// decimals otherwise. Ties go to even.
    pub fn round_quantity(&self, quantity: f64) -> f64 {
        if self.is_discrete() {
            quantity.round_ties_even()
        } else {
            (quantity * 100.0).round_ties_even() / 100.0
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<String> for Unit {
    fn from(raw: String) -> Self {
        Unit::parse(&raw)
    }
}

impl From<&str> for Unit {
    fn from(raw: &str) -> Self {
        Unit::parse(raw)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.code().to_string()
    }
}

// =============================================================================
// Quantity Rule
// =============================================================================

/// The quantity rules a BOM row may use.
///
/// ```text
/// MT_ANCHO_X_MULT   width × multiplier × factor        factor  = param | 1.0
/// UND_OJALES_PAR    ceil_to_even(width × mult / gap)   gap     = param | 0.14
/// UND_BOTON_PAR     ceil_to_even(width × mult / gap)   gap     = param | 0.20
/// FIJO              param                              default = 0.0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum QuantityRule {
    /// Meters of finished width, times an optional factor.
    #[serde(rename = "MT_ANCHO_X_MULT")]
    WidthTimesMultiplier,
    /// Eyelets: an even count spread over the finished width.
    #[serde(rename = "UND_OJALES_PAR")]
    EyeletPairs,
    /// Buttons: an even count spread over the finished width.
    #[serde(rename = "UND_BOTON_PAR")]
    ButtonPairs,
    /// A fixed quantity per curtain.
    #[serde(rename = "FIJO")]
    Fixed,
}

impl QuantityRule {
    /// Every supported rule, in catalog documentation order.
    pub const ALL: [QuantityRule; 4] = [
        QuantityRule::WidthTimesMultiplier,
        QuantityRule::EyeletPairs,
        QuantityRule::ButtonPairs,
        QuantityRule::Fixed,
    ];

    /// The rule name as written in the BOM dataset.
    pub const fn code(&self) -> &'static str {
        match self {
            QuantityRule::WidthTimesMultiplier => "MT_ANCHO_X_MULT",
            QuantityRule::EyeletPairs => "UND_OJALES_PAR",
            QuantityRule::ButtonPairs => "UND_BOTON_PAR",
            QuantityRule::Fixed => "FIJO",
        }
    }
}

impl fmt::Display for QuantityRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for QuantityRule {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        QuantityRule::ALL
            .into_iter()
            .find(|rule| rule.code() == code)
            .ok_or(CoreError::UnsupportedRule(code))
    }
}

// =============================================================================
// Fabric Slot & Supply Kind
// =============================================================================

/// One of the two independently selected fabrics of a curtain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum FabricSlot {
    Primary,
    Secondary,
}

impl FabricSlot {
    /// The supply name that designates this slot in the BOM.
    pub const fn supply_name(&self) -> &'static str {
        match self {
            FabricSlot::Primary => PRIMARY_FABRIC_NAME,
            FabricSlot::Secondary => SECONDARY_FABRIC_NAME,
        }
    }
}

impl fmt::Display for FabricSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.supply_name())
    }
}

/// How a BOM row is priced, derived from its supply name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplyKind {
    /// Priced from the curtain's fabric selection for the slot.
    Fabric(FabricSlot),
    /// Labor row; skipped by the BOM loop.
    Labor,
    /// Any other supply; priced from the curtain's accessory selections.
    Accessory,
}

impl SupplyKind {
    /// Classifies a BOM supply name.
    ///
    /// ## Example
    /// ```rust
    /// use cortina_core::types::{FabricSlot, SupplyKind};
    ///
    /// assert_eq!(SupplyKind::classify(" tela 2 "), SupplyKind::Fabric(FabricSlot::Secondary));
    /// assert_eq!(SupplyKind::classify("M.O: Ondas"), SupplyKind::Labor);
    /// assert_eq!(SupplyKind::classify("Riel"), SupplyKind::Accessory);
    /// ```
    pub fn classify(supply: &str) -> Self {
        let name = supply.trim().to_uppercase();
        if name == PRIMARY_FABRIC_NAME {
            SupplyKind::Fabric(FabricSlot::Primary)
        } else if name == SECONDARY_FABRIC_NAME {
            SupplyKind::Fabric(FabricSlot::Secondary)
        } else if name.starts_with(LABOR_MARKER) {
            SupplyKind::Labor
        } else {
            SupplyKind::Accessory
        }
    }
}

// =============================================================================
// Assembly Mode
// =============================================================================

/// How a fabric panel is made up. Informational: it travels with the
/// fabric selection onto the quote but does not change pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AssemblyMode {
    /// Single panel ("Entera").
    #[default]
    Whole,
    /// Two panels ("Partida").
    Split,
    /// Uneven split ("Semipartida").
    SemiSplit,
}

impl fmt::Display for AssemblyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssemblyMode::Whole => write!(f, "Entera"),
            AssemblyMode::Split => write!(f, "Partida"),
            AssemblyMode::SemiSplit => write!(f, "Semipartida"),
        }
    }
}

impl FromStr for AssemblyMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "whole" | "entera" => Ok(AssemblyMode::Whole),
            "split" | "partida" => Ok(AssemblyMode::Split),
            "semi_split" | "semi-split" | "semisplit" | "semipartida" => {
                Ok(AssemblyMode::SemiSplit)
            }
            _ => Err(ValidationError::NotAllowed {
                field: "assembly".to_string(),
                allowed: vec![
                    "whole".to_string(),
                    "split".to_string(),
                    "semi_split".to_string(),
                ],
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
