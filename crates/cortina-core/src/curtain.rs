//! # Curtain Spec
//!
//! The complete input for pricing one curtain line.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │ CurtainSpec                                                             │
//! │   design ─────────────── "Ondas"                                        │
//! │   window_width × height  2.00 m × 2.40 m                                │
//! │   unit_count ─────────── 3 identical curtains                           │
//! │   multiplier ─────────── 1.8  (finished width = 3.60 m)                 │
//! │   primary_fabric ─────── Lino / L-100 / Arena @ 28,000/m                │
//! │   secondary_fabric ───── optional                                       │
//! │   selections ─────────── "Riel" → R-10 / Blanco @ 30,000                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A spec is a plain value: the calculator reads nothing else besides the
//! catalog and the pricing config, so the same spec always prices the same.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::types::{AssemblyMode, FabricSlot, Unit};
use crate::DEFAULT_MULTIPLIER;

// =============================================================================
// Selections
// =============================================================================

/// A chosen fabric for one slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FabricSelection {
    pub fabric_type: String,
    pub reference: String,
    pub color: String,
    pub price_per_meter: f64,
    #[serde(default)]
    pub assembly: AssemblyMode,
}

impl FabricSelection {
    pub fn new(
        fabric_type: impl Into<String>,
        reference: impl Into<String>,
        color: impl Into<String>,
        price_per_meter: f64,
    ) -> Self {
        Self {
            fabric_type: fabric_type.into(),
            reference: reference.into(),
            color: color.into(),
            price_per_meter,
            assembly: AssemblyMode::default(),
        }
    }

    /// Looks the fabric up and takes its catalog price.
    ///
    /// ## Errors
    /// `FabricNotFound` when the type/reference/color combination does not
    /// exist.
    pub fn from_catalog(
        catalog: &Catalog,
        fabric_type: &str,
        reference: &str,
        color: &str,
    ) -> CoreResult<Self> {
        let price = catalog
            .fabric_price(fabric_type, reference, color)
            .ok_or_else(|| CoreError::FabricNotFound {
                fabric_type: fabric_type.trim().to_string(),
                reference: reference.trim().to_string(),
                color: color.trim().to_string(),
            })?;
        Ok(Self::new(fabric_type.trim(), reference.trim(), color.trim(), price))
    }

    pub fn with_assembly(mut self, assembly: AssemblyMode) -> Self {
        self.assembly = assembly;
        self
    }

    /// Line name on the quote: `TELA 1: L-100 - Arena`.
    pub fn display_name(&self, slot: FabricSlot) -> String {
        format!("{}: {} - {}", slot.supply_name(), self.reference, self.color)
    }
}

/// A chosen variant of an accessory supply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SupplySelection {
    pub reference: String,
    pub color: String,
    pub price: f64,
    /// Catalog unit of the supply; overrides the BOM row's unit on the quote.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    pub unit: Option<Unit>,
}

impl SupplySelection {
    pub fn new(reference: impl Into<String>, color: impl Into<String>, price: f64) -> Self {
        Self {
            reference: reference.into(),
            color: color.into(),
            price,
            unit: None,
        }
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Looks the option up in the supply catalog, carrying the supply's unit.
    pub fn from_catalog(
        catalog: &Catalog,
        supply: &str,
        reference: &str,
        color: &str,
    ) -> CoreResult<Self> {
        let not_found = || CoreError::SupplyOptionNotFound {
            supply: supply.trim().to_string(),
            reference: reference.trim().to_string(),
            color: color.trim().to_string(),
        };
        let entry = catalog.supply(supply).ok_or_else(not_found)?;
        let option = catalog
            .supply_option(supply, reference, color)
            .ok_or_else(not_found)?;

        Ok(Self::new(option.reference.clone(), option.color.clone(), option.price)
            .with_unit(entry.unit.clone()))
    }
}

// =============================================================================
// Curtain Spec
// =============================================================================

/// Everything needed to price one curtain line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CurtainSpec {
    /// Category the design was picked from. Informational.
    #[serde(default)]
    pub category: Option<String>,
    pub design: String,
    /// Window width in meters.
    pub window_width: f64,
    /// Curtain height in meters.
    pub height: f64,
    /// Number of identical curtains.
    pub unit_count: u32,
    /// Designated width multiplier, at least 1.0.
    pub multiplier: f64,
    pub primary_fabric: FabricSelection,
    #[serde(default)]
    pub secondary_fabric: Option<FabricSelection>,
    /// Accessory selections keyed by BOM supply name.
    #[serde(default)]
    pub selections: BTreeMap<String, SupplySelection>,
}

impl CurtainSpec {
    /// One curtain, multiplier 1.0, no secondary fabric or selections.
    pub fn new(
        design: impl Into<String>,
        window_width: f64,
        height: f64,
        primary_fabric: FabricSelection,
    ) -> Self {
        Self {
            category: None,
            design: design.into(),
            window_width,
            height,
            unit_count: 1,
            multiplier: DEFAULT_MULTIPLIER,
            primary_fabric,
            secondary_fabric: None,
            selections: BTreeMap::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_units(mut self, unit_count: u32) -> Self {
        self.unit_count = unit_count;
        self
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn with_secondary_fabric(mut self, fabric: FabricSelection) -> Self {
        self.secondary_fabric = Some(fabric);
        self
    }

    pub fn with_selection(mut self, supply: impl Into<String>, selection: SupplySelection) -> Self {
        self.selections.insert(supply.into().trim().to_string(), selection);
        self
    }

    /// Window width times multiplier, in meters.
    pub fn finished_width(&self) -> f64 {
        self.window_width * self.multiplier
    }

    pub fn fabric(&self, slot: FabricSlot) -> Option<&FabricSelection> {
        match slot {
            FabricSlot::Primary => Some(&self.primary_fabric),
            FabricSlot::Secondary => self.secondary_fabric.as_ref(),
        }
    }

    /// The accessory selection for a BOM supply name.
    pub fn selection(&self, supply: &str) -> Option<&SupplySelection> {
        self.selections.get(supply.trim())
    }
}
