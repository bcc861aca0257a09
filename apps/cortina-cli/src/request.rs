//! # Quote Requests
//!
//! The JSON a salesperson (or a form front-end) hands to `cortina quote`.
//! Fabrics and accessories are named by type, reference and color; prices
//! come from the catalog unless the request overrides them.
//!
//! ```json
//! {
//!   "customer": { "name": "Ana Pérez", "phone": "300 555 0101" },
//!   "seller":   { "name": "Luis" },
//!   "curtains": [
//!     {
//!       "design": "Ondas",
//!       "window_width": 1.8,
//!       "height": 2.4,
//!       "units": 2,
//!       "primary_fabric": { "fabric_type": "Lino", "reference": "L-100", "color": "Arena" },
//!       "accessories": { "Riel": { "reference": "R-10", "color": "Blanco" } }
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use cortina_core::validation::MIN_MULTIPLIER;
use cortina_core::{
    AssemblyMode, Catalog, CoreError, CurtainSpec, FabricSelection, SupplySelection,
};

use crate::error::{CliError, CliResult};

/// Customer or seller details printed on the quotation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Contact {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A whole quote request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub customer: Contact,
    #[serde(default)]
    pub seller: Contact,
    pub curtains: Vec<CurtainRequest>,
}

impl QuoteRequest {
    /// Reads and parses a request file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents, path)
    }

    /// Parses request JSON. `origin` is only used in error messages.
    pub fn from_json(contents: &str, origin: &Path) -> CliResult<Self> {
        serde_json::from_str(contents).map_err(|e| CliError::Request {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// A fabric chosen by catalog coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FabricChoice {
    pub fabric_type: String,
    pub reference: String,
    pub color: String,
    /// Price per meter to use instead of the catalog's.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_meter: Option<f64>,
    #[serde(default)]
    pub assembly: AssemblyMode,
}

impl FabricChoice {
    fn resolve(&self, catalog: &Catalog) -> CliResult<FabricSelection> {
        let selection = match self.price_per_meter {
            Some(price) => FabricSelection::new(
                self.fabric_type.trim(),
                self.reference.trim(),
                self.color.trim(),
                price,
            ),
            None => FabricSelection::from_catalog(
                catalog,
                &self.fabric_type,
                &self.reference,
                &self.color,
            )?,
        };
        Ok(selection.with_assembly(self.assembly))
    }
}

/// An accessory variant chosen by reference and color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyChoice {
    pub reference: String,
    pub color: String,
    /// Unit price to use instead of the catalog's.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl SupplyChoice {
    fn resolve(&self, catalog: &Catalog, supply: &str) -> CliResult<SupplySelection> {
        let Some(price) = self.price else {
            return Ok(SupplySelection::from_catalog(
                catalog,
                supply,
                &self.reference,
                &self.color,
            )?);
        };

        let selection = SupplySelection::new(self.reference.trim(), self.color.trim(), price);
        Ok(match catalog.supply(supply) {
            Some(entry) => selection.with_unit(entry.unit.clone()),
            None => selection,
        })
    }
}

fn default_units() -> u32 {
    1
}

/// One curtain line of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurtainRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub design: String,
    pub window_width: f64,
    pub height: f64,
    #[serde(default = "default_units")]
    pub units: u32,
    /// Falls back to the design's multiplier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
    pub primary_fabric: FabricChoice,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_fabric: Option<FabricChoice>,
    /// Keyed by BOM supply name.
    #[serde(default)]
    pub accessories: BTreeMap<String, SupplyChoice>,
}

impl CurtainRequest {
    /// Resolves every choice against the catalog.
    ///
    /// ## Errors
    /// - `DesignNotFound` for an unknown design
    /// - `FabricNotFound` / `SupplyOptionNotFound` for choices without an
    ///   override price that the catalog does not list
    pub fn to_spec(&self, catalog: &Catalog) -> CliResult<CurtainSpec> {
        let design = catalog
            .design(&self.design)
            .ok_or_else(|| CoreError::DesignNotFound(self.design.trim().to_string()))?;

        let multiplier = self
            .multiplier
            .unwrap_or_else(|| design.multiplier.max(MIN_MULTIPLIER));

        let mut spec = CurtainSpec::new(
            design.name.clone(),
            self.window_width,
            self.height,
            self.primary_fabric.resolve(catalog)?,
        )
        .with_units(self.units)
        .with_multiplier(multiplier);

        if let Some(category) = &self.category {
            spec = spec.with_category(category.trim());
        }
        if let Some(secondary) = &self.secondary_fabric {
            spec = spec.with_secondary_fabric(secondary.resolve(catalog)?);
        }
        for (supply, choice) in &self.accessories {
            spec = spec.with_selection(supply.as_str(), choice.resolve(catalog, supply)?);
        }
        Ok(spec)
    }
}
