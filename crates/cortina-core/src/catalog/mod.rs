//! # Catalog Store
//!
//! Immutable lookup tables for one session: designs, the BOM of each
//! design, supply options and fabrics.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  designs    "Ondas" ──► Design { categories, multiplier, labor_price }  │
//! │                                                                         │
//! │  bom        "Ondas" ──► [ BomItem, BomItem, ... ]   (file order)        │
//! │                                                                         │
//! │  supplies   "Riel"  ──► { unit, options: [(ref, color, price), ...] }   │
//! │                                                                         │
//! │  fabrics    "Lino"  ──► "L-100" ──► [ (color, price/m), ... ]           │
//! │             type        reference                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Built once by [`Catalog::load`] and never mutated afterwards, so a
//! `&Catalog` can be shared freely between calculations.

mod load;
mod table;

pub use table::{Dataset, RawTable};
pub(crate) use table::is_blank;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use ts_rs::TS;

use crate::types::{FabricSlot, QuantityRule, SupplyKind, Unit};

// =============================================================================
// Catalog Rows
// =============================================================================

/// A named curtain style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Design {
    pub name: String,
    /// Category tags ("Type" column, comma separated).
    pub categories: Vec<String>,
    /// Finished width over window width. Defaults to 1.0.
    pub multiplier: f64,
    /// Labor price per linear meter of finished width. Defaults to 0.0.
    pub labor_price: f64,
}

impl Design {
    pub fn has_category(&self, tag: &str) -> bool {
        let tag = tag.trim();
        self.categories.iter().any(|c| c.eq_ignore_ascii_case(tag))
    }
}

/// One BOM row of a design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomItem {
    pub design: String,
    pub supply: String,
    pub kind: SupplyKind,
    pub unit: Unit,
    pub rule: QuantityRule,
    /// Raw parameter text. Parsed when the rule is evaluated.
    pub parameter: Option<String>,
    pub requires_selection: bool,
    pub notes: String,
}

impl BomItem {
    /// Accessory rows the user has to pick a reference and color for.
    pub fn is_selectable(&self) -> bool {
        self.requires_selection && self.kind == SupplyKind::Accessory
    }
}

/// One purchasable variant of a supply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SupplyOption {
    pub reference: String,
    pub color: String,
    pub price: f64,
}

/// All variants of a supply, sharing one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyCatalogEntry {
    pub unit: Unit,
    pub options: Vec<SupplyOption>,
}

impl SupplyCatalogEntry {
    /// Distinct references, in catalog order.
    pub fn references(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.options
            .iter()
            .map(|o| o.reference.as_str())
            .filter(|r| seen.insert(*r))
            .collect()
    }

    /// Colors available for a reference, in catalog order.
    pub fn colors(&self, reference: &str) -> Vec<&str> {
        let reference = reference.trim();
        self.options
            .iter()
            .filter(|o| o.reference == reference)
            .map(|o| o.color.as_str())
            .collect()
    }
}

/// A color of a fabric reference and its price per meter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FabricColor {
    pub color: String,
    pub price_per_meter: f64,
}

type FabricTree = BTreeMap<String, BTreeMap<String, Vec<FabricColor>>>;

// =============================================================================
// Catalog
// =============================================================================

/// The loaded catalog set.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    designs: Vec<Design>,
    design_index: HashMap<String, usize>,
    bom: HashMap<String, Vec<BomItem>>,
    supplies: BTreeMap<String, SupplyCatalogEntry>,
    fabrics: FabricTree,
}

impl Catalog {
    // -------------------------------------------------------------------------
    // Designs & BOM
    // -------------------------------------------------------------------------

    /// All designs, in file order.
    pub fn designs(&self) -> &[Design] {
        &self.designs
    }

    pub fn design(&self, name: &str) -> Option<&Design> {
        self.design_index
            .get(name.trim())
            .and_then(|&idx| self.designs.get(idx))
    }

    /// Every category tag in use, sorted.
    pub fn categories(&self) -> Vec<&str> {
        self.designs
            .iter()
            .flat_map(|d| d.categories.iter().map(String::as_str))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Designs carrying a tag (case-insensitive), in file order.
    pub fn designs_in_category(&self, tag: &str) -> Vec<&Design> {
        self.designs.iter().filter(|d| d.has_category(tag)).collect()
    }

    /// BOM rows of a design, in file order. Empty for unknown designs.
    pub fn bom(&self, design: &str) -> &[BomItem] {
        self.bom.get(design.trim()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Accessory rows that need a user selection.
    pub fn selectable_items(&self, design: &str) -> Vec<&BomItem> {
        self.bom(design).iter().filter(|i| i.is_selectable()).collect()
    }

    /// Whether the design's BOM has a second fabric row.
    pub fn uses_secondary_fabric(&self, design: &str) -> bool {
        self.bom(design)
            .iter()
            .any(|i| i.kind == SupplyKind::Fabric(FabricSlot::Secondary))
    }

    // -------------------------------------------------------------------------
    // Supplies
    // -------------------------------------------------------------------------

    /// False when the session runs without a supply catalog.
    pub fn has_supplies(&self) -> bool {
        !self.supplies.is_empty()
    }

    pub fn supply(&self, name: &str) -> Option<&SupplyCatalogEntry> {
        self.supplies.get(name.trim())
    }

    pub fn supply_option(&self, name: &str, reference: &str, color: &str) -> Option<&SupplyOption> {
        let (reference, color) = (reference.trim(), color.trim());
        self.supply(name)?
            .options
            .iter()
            .find(|o| o.reference == reference && o.color == color)
    }

    // -------------------------------------------------------------------------
    // Fabrics
    // -------------------------------------------------------------------------

    pub fn fabric_types(&self) -> Vec<&str> {
        self.fabrics.keys().map(String::as_str).collect()
    }

    pub fn fabric_references(&self, fabric_type: &str) -> Vec<&str> {
        self.fabrics
            .get(fabric_type.trim())
            .map(|refs| refs.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn fabric_colors(&self, fabric_type: &str, reference: &str) -> &[FabricColor] {
        self.fabrics
            .get(fabric_type.trim())
            .and_then(|refs| refs.get(reference.trim()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn fabric_price(&self, fabric_type: &str, reference: &str, color: &str) -> Option<f64> {
        let color = color.trim();
        self.fabric_colors(fabric_type, reference)
            .iter()
            .find(|c| c.color == color)
            .map(|c| c.price_per_meter)
    }

    // -------------------------------------------------------------------------
    // Counts
    // -------------------------------------------------------------------------

    pub fn design_count(&self) -> usize {
        self.designs.len()
    }

    pub fn bom_item_count(&self) -> usize {
        self.bom.values().map(Vec::len).sum()
    }

    pub fn supply_count(&self) -> usize {
        self.supplies.len()
    }

    /// Number of (type, reference, color) combinations.
    pub fn fabric_count(&self) -> usize {
        self.fabrics
            .values()
            .flat_map(|refs| refs.values())
            .map(Vec::len)
            .sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::fixtures::sample_catalog;

    #[test]
    fn test_catalog_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<super::Catalog>();
    }

    #[test]
    fn test_design_lookup_trims() {
        let catalog = sample_catalog();
        let design = catalog.design("  Ondas ").unwrap();
        assert!((design.multiplier - 2.0).abs() < 1e-12);
        assert!(catalog.design("Inexistente").is_none());
    }

    #[test]
    fn test_categories_sorted_and_filtered() {
        let catalog = sample_catalog();
        assert_eq!(catalog.categories(), vec!["Blackout", "Velo"]);

        let velo: Vec<_> = catalog
            .designs_in_category("velo")
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(velo, vec!["Ondas", "Pliegue"]);
    }

    #[test]
    fn test_bom_keeps_file_order() {
        let catalog = sample_catalog();
        let supplies: Vec<_> = catalog.bom("Ondas").iter().map(|i| i.supply.as_str()).collect();
        assert_eq!(supplies, vec!["TELA 1", "TELA 2", "Ojaletes", "Riel", "Soportes", "M.O: Ondas"]);
        assert!(catalog.bom("Inexistente").is_empty());
    }

    #[test]
    fn test_selectable_items_and_secondary_fabric() {
        let catalog = sample_catalog();
        let selectable: Vec<_> = catalog
            .selectable_items("Ondas")
            .iter()
            .map(|i| i.supply.as_str())
            .collect();
        assert_eq!(selectable, vec!["Riel"]);
        assert!(catalog.uses_secondary_fabric("Ondas"));
        assert!(!catalog.uses_secondary_fabric("Pliegue"));
    }

    #[test]
    fn test_supply_lookups() {
        let catalog = sample_catalog();
        let riel = catalog.supply("Riel").unwrap();
        assert_eq!(riel.references(), vec!["R-10", "R-20"]);
        assert_eq!(riel.colors("R-10"), vec!["Blanco", "Negro"]);

        let option = catalog.supply_option("Riel", "R-20", "Blanco").unwrap();
        assert!((option.price - 45_000.0).abs() < 1e-9);
        assert!(catalog.supply_option("Riel", "R-99", "Blanco").is_none());
    }

    #[test]
    fn test_fabric_lookups() {
        let catalog = sample_catalog();
        assert_eq!(catalog.fabric_types(), vec!["Blackout", "Lino"]);
        assert_eq!(catalog.fabric_references("Lino"), vec!["L-100", "L-200"]);
        assert_eq!(catalog.fabric_colors("Lino", "L-100").len(), 2);
        assert_eq!(catalog.fabric_price("Lino", "L-100", "Arena"), Some(28_000.0));
        assert_eq!(catalog.fabric_price("Lino", "L-100", "Rojo"), None);
        assert!(catalog.fabric_references("Seda").is_empty());
    }

    #[test]
    fn test_counts() {
        let catalog = sample_catalog();
        assert_eq!(catalog.design_count(), 3);
        assert_eq!(catalog.supply_count(), 2);
        assert_eq!(catalog.fabric_count(), 4);
    }
}
