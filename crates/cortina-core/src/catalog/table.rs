//! # Raw Tables
//!
//! The in-memory shape catalog datasets arrive in: a header row and string
//! records. Whoever reads the files (CSV today) only has to produce a
//! `RawTable`; column lookup, aliasing and schema errors live here.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Dataset
// =============================================================================

/// The four catalog datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    Designs,
    Bom,
    Supplies,
    Fabrics,
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dataset::Designs => write!(f, "designs"),
            Dataset::Bom => write!(f, "bom"),
            Dataset::Supplies => write!(f, "supplies"),
            Dataset::Fabrics => write!(f, "fabrics"),
        }
    }
}

// =============================================================================
// Column Schema
// =============================================================================

/// A required column: its canonical name plus the headers it may appear
/// under. The spreadsheets in use carry Spanish headers.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Column {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

impl Column {
    const fn new(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { name, aliases }
    }

    fn matches(&self, header: &str) -> bool {
        let header = normalize_header(header);
        normalize_header(self.name) == header
            || self.aliases.iter().any(|alias| normalize_header(alias) == header)
    }
}

pub(crate) const DESIGN_COLUMNS: [Column; 4] = [
    Column::new("Design", &["Diseño", "Diseno"]),
    Column::new("Type", &["Tipo"]),
    Column::new("Multiplier", &["Multiplicador"]),
    Column::new("LaborUnitPrice", &["PVP M.O.", "PVP M.O"]),
];

pub(crate) const BOM_COLUMNS: [Column; 7] = [
    Column::new("Design", &["Diseño", "Diseno"]),
    Column::new("Supply", &["Insumo"]),
    Column::new("Unit", &["Unidad"]),
    Column::new("QuantityRule", &["ReglaCantidad"]),
    Column::new("Parameter", &["Parametro", "Parámetro"]),
    Column::new("RequiresSelection", &["DependeDeSeleccion", "DependeDeSelección"]),
    Column::new("Notes", &["Observaciones"]),
];

pub(crate) const SUPPLY_COLUMNS: [Column; 5] = [
    Column::new("Supply", &["Insumo"]),
    Column::new("Unit", &["Unidad"]),
    Column::new("Reference", &["Ref", "Referencia"]),
    Column::new("Color", &[]),
    Column::new("Price", &["PVP"]),
];

pub(crate) const FABRIC_COLUMNS: [Column; 4] = [
    Column::new("FabricType", &["TipoTela"]),
    Column::new("Reference", &["Referencia", "Ref"]),
    Column::new("Color", &[]),
    Column::new("PricePerMeter", &["PVP/Metro ($)", "PVP/Metro"]),
];

fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_lowercase()
}

// =============================================================================
// Raw Table
// =============================================================================

/// A dataset as read from its source: headers plus string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Builds a table. Headers are trimmed and a leading byte-order mark
    /// is dropped.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers = headers
            .into_iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resolves the index of every required column, or reports all the
    /// missing ones at once.
    pub(crate) fn bind<const N: usize>(
        &self,
        dataset: Dataset,
        columns: &[Column; N],
    ) -> CoreResult<[usize; N]> {
        let mut indices = [0usize; N];
        let mut missing = Vec::new();

        for (slot, column) in indices.iter_mut().zip(columns.iter()) {
            match self.headers.iter().position(|h| column.matches(h)) {
                Some(idx) => *slot = idx,
                None => missing.push(column.name.to_string()),
            }
        }

        if missing.is_empty() {
            Ok(indices)
        } else {
            Err(CoreError::Schema {
                dataset,
                missing,
                found: self.headers.clone(),
            })
        }
    }
}

/// Trimmed cell text; short rows read as empty.
pub(crate) fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(|s| s.trim()).unwrap_or("")
}

/// Spreadsheet exports write missing values as empty, `nan` or `None`.
pub(crate) fn is_blank(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case("nan") || value.eq_ignore_ascii_case("none")
}
