//! # Priced Output
//!
//! What the calculator and the aggregator hand back to the presentation
//! layer and the document exporter.
//!
//! ```text
//! Quotation
//! ├── curtains: [PricedCurtain]
//! │      ├── detail: [PricedLine]   name · unit · quantity · unit price · total
//! │      ├── net_subtotal + tax == total
//! │      └── unpriced: ["Riel", ...]
//! └── subtotal · tax · total        (sums of the curtains' figures)
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::curtain::FabricSelection;
use crate::money::Money;
use crate::types::Unit;

/// One line of a curtain's bill of materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricedLine {
    /// Display name (fabric lines embed reference and color).
    pub name: String,
    #[ts(type = "string")]
    pub unit: Unit,
    /// Total quantity over all units, rounded for display.
    pub quantity: f64,
    /// Unit price as selected; never rounded.
    pub unit_price: f64,
    pub line_total: Money,
}

/// One priced curtain line, as produced by the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricedCurtain {
    pub category: Option<String>,
    pub design: String,
    pub window_width: f64,
    pub height: f64,
    pub unit_count: u32,
    pub multiplier: f64,
    /// `window_width × multiplier`.
    pub finished_width: f64,
    pub primary_fabric: FabricSelection,
    pub secondary_fabric: Option<FabricSelection>,
    pub detail: Vec<PricedLine>,
    /// Total minus tax.
    pub net_subtotal: Money,
    pub tax: Money,
    pub total: Money,
    /// Lines priced at zero because their price could not be resolved.
    #[serde(default)]
    pub unpriced: Vec<String>,
}

/// A set of priced curtains and their summed totals.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Quotation {
    pub curtains: Vec<PricedCurtain>,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl Quotation {
    pub fn is_empty(&self) -> bool {
        self.curtains.is_empty()
    }

    pub fn len(&self) -> usize {
        self.curtains.len()
    }

    /// Unpriced items across all curtains, as `"design: item"`.
    pub fn unpriced(&self) -> Vec<String> {
        self.curtains
            .iter()
            .flat_map(|c| c.unpriced.iter().map(move |item| format!("{}: {}", c.design, item)))
            .collect()
    }
}
