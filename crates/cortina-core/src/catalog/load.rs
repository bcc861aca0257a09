//! Building a [`Catalog`] from raw tables.
//!
//! ```text
//! designs ──► bind columns ──► coerce multiplier / labor price ──┐
//! bom     ──► bind columns ──► parse rules (collect failures) ───┤
//! supplies ─► bind columns ──► group options by supply ──────────┼──► Catalog
//! fabrics ──► bind columns ──► type → reference → colors ────────┘
//! ```
//!
//! A schema problem or any unsupported rule rejects the whole load; no
//! partial catalog is ever returned.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, info, warn};

use super::table::{
    cell, is_blank, BOM_COLUMNS, DESIGN_COLUMNS, FABRIC_COLUMNS, SUPPLY_COLUMNS,
};
use super::{
    BomItem, Catalog, Dataset, Design, FabricColor, FabricTree, RawTable, SupplyCatalogEntry,
    SupplyOption,
};
use crate::error::{CoreError, CoreResult};
use crate::rules::parse_parameter;
use crate::types::{QuantityRule, SupplyKind, Unit};
use crate::DEFAULT_MULTIPLIER;

/// Values of the selection flag that mean "yes".
const YES_VALUES: [&str; 6] = ["SI", "SÍ", "YES", "Y", "TRUE", "1"];

impl Catalog {
    /// Builds the catalog set from the four datasets.
    ///
    /// ## Errors
    /// - `Schema` when a dataset lacks a required column
    /// - `Rule` when any BOM row names an unsupported quantity rule
    /// - `EmptyCatalog` when designs or fabrics have no usable rows
    ///
    /// `supplies` may be absent: fabric and labor lines still price, and
    /// accessories fall back to the prices in the curtain's selections.
    pub fn load(
        designs: &RawTable,
        bom: &RawTable,
        supplies: Option<&RawTable>,
        fabrics: &RawTable,
    ) -> CoreResult<Self> {
        let (designs, design_index) = load_designs(designs)?;
        let bom = load_bom(bom, &design_index)?;
        let supplies = match supplies {
            Some(table) => load_supplies(table)?,
            None => {
                warn!("No supply catalog; only fabric and labor lines will be priced from the catalog");
                BTreeMap::new()
            }
        };
        let fabrics = load_fabrics(fabrics)?;

        let catalog = Catalog {
            designs,
            design_index,
            bom,
            supplies,
            fabrics,
        };

        info!(
            designs = catalog.design_count(),
            bom_items = catalog.bom_item_count(),
            supplies = catalog.supply_count(),
            fabrics = catalog.fabric_count(),
            "Catalog loaded"
        );
        Ok(catalog)
    }
}

// =============================================================================
// Designs
// =============================================================================

fn load_designs(table: &RawTable) -> CoreResult<(Vec<Design>, HashMap<String, usize>)> {
    let [name_col, type_col, mult_col, labor_col] = table.bind(Dataset::Designs, &DESIGN_COLUMNS)?;

    let mut designs: Vec<Design> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in table.rows() {
        let name = cell(row, name_col);
        if is_blank(name) {
            continue;
        }

        let categories = split_categories(cell(row, type_col));
        let multiplier = parse_parameter(Some(cell(row, mult_col)))
            .filter(|m| *m >= 0.0)
            .unwrap_or(DEFAULT_MULTIPLIER);
        let labor_price = parse_parameter(Some(cell(row, labor_col)))
            .filter(|p| *p >= 0.0)
            .unwrap_or(0.0);

        match index.get(name) {
            Some(&idx) => {
                debug!(design = name, "Duplicate design row; later values win");
                let existing = &mut designs[idx];
                existing.multiplier = multiplier;
                existing.labor_price = labor_price;
                for tag in categories {
                    if !existing.categories.contains(&tag) {
                        existing.categories.push(tag);
                    }
                }
            }
            None => {
                index.insert(name.to_string(), designs.len());
                designs.push(Design {
                    name: name.to_string(),
                    categories,
                    multiplier,
                    labor_price,
                });
            }
        }
    }

    if designs.is_empty() {
        return Err(CoreError::EmptyCatalog(Dataset::Designs));
    }
    Ok((designs, index))
}

fn split_categories(raw: &str) -> Vec<String> {
    if is_blank(raw) {
        return Vec::new();
    }
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

// =============================================================================
// BOM
// =============================================================================

fn load_bom(
    table: &RawTable,
    design_index: &HashMap<String, usize>,
) -> CoreResult<HashMap<String, Vec<BomItem>>> {
    let [design_col, supply_col, unit_col, rule_col, param_col, select_col, notes_col] =
        table.bind(Dataset::Bom, &BOM_COLUMNS)?;

    let mut bom: HashMap<String, Vec<BomItem>> = HashMap::new();
    let mut unsupported: BTreeSet<String> = BTreeSet::new();
    let mut orphans: BTreeSet<String> = BTreeSet::new();

    for row in table.rows() {
        let design = cell(row, design_col);
        let supply = cell(row, supply_col);
        let raw_rule = cell(row, rule_col);
        if is_blank(design) && is_blank(supply) {
            continue;
        }

        let rule = match raw_rule.parse::<QuantityRule>() {
            Ok(rule) => rule,
            Err(_) => {
                let shown = if raw_rule.is_empty() {
                    "(empty)".to_string()
                } else {
                    raw_rule.to_uppercase()
                };
                unsupported.insert(shown);
                continue;
            }
        };

        if is_blank(design) || is_blank(supply) {
            debug!(design, supply, "Skipping BOM row without design or supply");
            continue;
        }
        if !design_index.contains_key(design) {
            orphans.insert(design.to_string());
        }

        let parameter = cell(row, param_col);
        let notes = cell(row, notes_col);
        let item = BomItem {
            design: design.to_string(),
            supply: supply.to_string(),
            kind: SupplyKind::classify(supply),
            unit: Unit::parse(cell(row, unit_col)),
            rule,
            parameter: (!is_blank(parameter)).then(|| parameter.to_string()),
            requires_selection: is_yes(cell(row, select_col)),
            notes: if is_blank(notes) { String::new() } else { notes.to_string() },
        };
        bom.entry(item.design.clone()).or_default().push(item);
    }

    if !unsupported.is_empty() {
        return Err(CoreError::Rule {
            rules: unsupported.into_iter().collect(),
        });
    }
    for design in &orphans {
        warn!(design = %design, "BOM rows reference a design missing from the designs catalog");
    }
    Ok(bom)
}

fn is_yes(raw: &str) -> bool {
    let flag = raw.trim().to_uppercase();
    YES_VALUES.contains(&flag.as_str())
}

// =============================================================================
// Supplies
// =============================================================================

fn load_supplies(table: &RawTable) -> CoreResult<BTreeMap<String, SupplyCatalogEntry>> {
    let [supply_col, unit_col, ref_col, color_col, price_col] =
        table.bind(Dataset::Supplies, &SUPPLY_COLUMNS)?;

    let mut supplies: BTreeMap<String, SupplyCatalogEntry> = BTreeMap::new();

    for row in table.rows() {
        let supply = cell(row, supply_col);
        if is_blank(supply) {
            continue;
        }
        let option = SupplyOption {
            reference: cell(row, ref_col).to_string(),
            color: cell(row, color_col).to_string(),
            price: parse_parameter(Some(cell(row, price_col))).unwrap_or(0.0),
        };
        supplies
            .entry(supply.to_string())
            .or_insert_with(|| SupplyCatalogEntry {
                unit: Unit::parse(cell(row, unit_col)),
                options: Vec::new(),
            })
            .options
            .push(option);
    }

    Ok(supplies)
}

// =============================================================================
// Fabrics
// =============================================================================

fn load_fabrics(table: &RawTable) -> CoreResult<FabricTree> {
    let [type_col, ref_col, color_col, price_col] = table.bind(Dataset::Fabrics, &FABRIC_COLUMNS)?;

    let mut fabrics: FabricTree = BTreeMap::new();

    for row in table.rows() {
        let fabric_type = cell(row, type_col);
        let reference = cell(row, ref_col);
        if is_blank(fabric_type) || is_blank(reference) {
            continue;
        }
        let color = cell(row, color_col).to_string();
        let price_per_meter = parse_parameter(Some(cell(row, price_col))).unwrap_or(0.0);

        let colors = fabrics
            .entry(fabric_type.to_string())
            .or_default()
            .entry(reference.to_string())
            .or_default();
        match colors.iter_mut().find(|c| c.color == color) {
            Some(existing) => existing.price_per_meter = price_per_meter,
            None => colors.push(FabricColor {
                color,
                price_per_meter,
            }),
        }
    }

    if fabrics.is_empty() {
        return Err(CoreError::EmptyCatalog(Dataset::Fabrics));
    }
    Ok(fabrics)
}

// =============================================================================
// Unit Tests
// =============================================================================
