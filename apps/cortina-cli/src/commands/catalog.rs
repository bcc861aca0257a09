//! Catalog listings: `designs`, `bom <design>` and `fabrics`.

use cortina_core::catalog::BomItem;
use cortina_core::{Catalog, CoreError, Money};

use crate::error::CliResult;

/// Designs, optionally filtered by category tag.
pub fn designs(catalog: &Catalog, category: Option<&str>) -> String {
    let designs = match category {
        Some(tag) => catalog.designs_in_category(tag),
        None => catalog.designs().iter().collect(),
    };
    if designs.is_empty() {
        return match category {
            Some(tag) => format!("No designs in category '{tag}'."),
            None => "No designs in catalog.".to_string(),
        };
    }

    let mut lines = vec![format!(
        "{:<24}{:<24}{:>8}{:>16}",
        "Design", "Categories", "Mult.", "Labor / m"
    )];
    for design in designs {
        let labor = if design.labor_price > 0.0 {
            Money::round_from(design.labor_price).to_string()
        } else {
            "-".to_string()
        };
        lines.push(format!(
            "{:<24}{:<24}{:>8.2}{:>16}",
            design.name,
            design.categories.join(", "),
            design.multiplier,
            labor
        ));
    }
    lines.push(String::new());
    lines.push(format!("Categories: {}", catalog.categories().join(", ")));
    lines.join("\n")
}

/// The bill of materials of one design, with the catalog options of every
/// accessory that needs a selection.
pub fn bom(catalog: &Catalog, design: &str) -> CliResult<String> {
    let design = catalog
        .design(design)
        .ok_or_else(|| CoreError::DesignNotFound(design.trim().to_string()))?;

    let mut lines = vec![
        format!("{} (×{:.2})", design.name, design.multiplier),
        format!(
            "  {:<20}{:<6}{:<18}{:<10}{:<10}{}",
            "Supply", "Unit", "Rule", "Param", "Select", "Notes"
        ),
    ];
    let items = catalog.bom(&design.name);
    for item in items {
        lines.push(format!(
            "  {:<20}{:<6}{:<18}{:<10}{:<10}{}",
            item.supply,
            item.unit.to_string(),
            item.rule.code(),
            item.parameter.as_deref().unwrap_or("-"),
            if item.requires_selection { "yes" } else { "no" },
            item.notes
        ));
    }
    if items.is_empty() {
        lines.push("  (no BOM rows)".to_string());
    }

    for item in catalog.selectable_items(&design.name) {
        lines.push(String::new());
        lines.extend(supply_options(catalog, item));
    }
    Ok(lines.join("\n"))
}

fn supply_options(catalog: &Catalog, item: &BomItem) -> Vec<String> {
    let Some(entry) = catalog.supply(&item.supply) else {
        return vec![format!("{}: not in the supply catalog", item.supply)];
    };
    let mut lines = vec![format!("{} options ({}):", item.supply, entry.unit)];
    for option in &entry.options {
        lines.push(format!(
            "  {:<12}{:<16}{:>14}",
            option.reference,
            option.color,
            Money::round_from(option.price).to_string()
        ));
    }
    lines
}

/// Fabric tree: type, reference, then colors with their price per meter.
pub fn fabrics(catalog: &Catalog) -> String {
    let mut lines = Vec::new();
    for fabric_type in catalog.fabric_types() {
        lines.push(fabric_type.to_string());
        for reference in catalog.fabric_references(fabric_type) {
            lines.push(format!("  {reference}"));
            for color in catalog.fabric_colors(fabric_type, reference) {
                lines.push(format!(
                    "    {:<20}{:>14} / m",
                    color.color,
                    Money::round_from(color.price_per_meter).to_string()
                ));
            }
        }
    }
    lines.push(String::new());
    lines.push(format!("{} fabrics", catalog.fabric_count()));
    lines.join("\n")
}
