//! # Quote Line Resolver
//!
//! Prices a single BOM row for a curtain.
//!
//! ## Price Sources
//! ```text
//! ┌────────────────────┬────────────────────────────────┬────────┬──────────────────────┐
//! │ SupplyKind         │ Unit price                     │ Unit   │ Name                 │
//! ├────────────────────┼────────────────────────────────┼────────┼──────────────────────┤
//! │ Fabric(slot)       │ chosen fabric price per meter  │ MT     │ TELA n: ref - color  │
//! │ Accessory          │ selection price, else 0        │ sel|BOM│ supply name          │
//! │ Labor              │ not resolved here (None)       │        │                      │
//! └────────────────────┴────────────────────────────────┴────────┴──────────────────────┘
//! ```
//!
//! ## Rounding
//! The displayed quantity is rounded per unit (2 decimals, or whole for
//! `UND`). The line total is rounded to whole currency. The unrounded
//! amount travels alongside so the running subtotal does not compound
//! rounding error.
//!
//! A missing price never fails: the line is priced at zero and flagged
//! `unpriced` when a price was actually expected.

use tracing::{debug, warn};

use crate::catalog::BomItem;
use crate::curtain::CurtainSpec;
use crate::money::Money;
use crate::quote::PricedLine;
use crate::types::{SupplyKind, Unit};

/// A priced line plus what the calculator needs to total it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLine {
    pub line: PricedLine,
    /// Unrounded `quantity × unit_price`.
    pub amount: f64,
    /// The price was expected but could not be resolved.
    pub unpriced: bool,
}

/// Prices one BOM row. Returns `None` for labor rows.
pub fn resolve(
    item: &BomItem,
    quantity_per_unit: f64,
    unit_count: u32,
    spec: &CurtainSpec,
) -> Option<ResolvedLine> {
    let quantity = quantity_per_unit * f64::from(unit_count);

    let (name, unit, unit_price, unpriced) = match item.kind {
        SupplyKind::Labor => {
            debug!(supply = %item.supply, "Labor row skipped; priced from the design");
            return None;
        }
        SupplyKind::Fabric(slot) => match spec.fabric(slot) {
            Some(fabric) => (
                fabric.display_name(slot),
                Unit::Meter,
                fabric.price_per_meter,
                false,
            ),
            None => (slot.supply_name().to_string(), Unit::Meter, 0.0, true),
        },
        SupplyKind::Accessory => match spec.selection(&item.supply) {
            Some(selection) => (
                item.supply.clone(),
                selection.unit.clone().unwrap_or_else(|| item.unit.clone()),
                selection.price,
                false,
            ),
            None => (item.supply.clone(), item.unit.clone(), 0.0, item.requires_selection),
        },
    };

    if unpriced {
        warn!(
            design = %spec.design,
            supply = %item.supply,
            "No price for required item; priced at zero"
        );
    }

    let amount = quantity * unit_price;
    let line = PricedLine {
        quantity: unit.round_quantity(quantity),
        line_total: Money::round_from(amount),
        name,
        unit,
        unit_price,
    };
    debug!(
        name = %line.name,
        quantity = line.quantity,
        unit_price,
        line_total = line.line_total.units(),
        "Resolved BOM line"
    );

    Some(ResolvedLine {
        line,
        amount,
        unpriced,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
