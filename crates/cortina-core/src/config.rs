//! # Pricing Configuration
//!
//! The constants the engine prices with, gathered into one value so tests
//! and deployments can override them. Defaults come from the crate-level
//! constants (19% IVA, 0.14 m eyelets, 0.20 m buttons).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{TaxMode, TaxRate};
use crate::validation::{validate_spacing, validate_tax_rate_bps};
use crate::{DEFAULT_BUTTON_SPACING_M, DEFAULT_EYELET_SPACING_M};

/// Default spacings for the pair-count rules, in meters.
///
/// Used when a BOM row carries no usable parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SpacingDefaults {
    /// Gap between eyelets (`UND_OJALES_PAR`).
    pub eyelet_m: f64,
    /// Gap between buttons (`UND_BOTON_PAR`).
    pub button_m: f64,
}

impl Default for SpacingDefaults {
    fn default() -> Self {
        Self {
            eyelet_m: DEFAULT_EYELET_SPACING_M,
            button_m: DEFAULT_BUTTON_SPACING_M,
        }
    }
}

/// Everything the calculator needs besides the catalog and the curtain.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingConfig {
    pub tax_rate: TaxRate,
    pub tax_mode: TaxMode,
    pub spacing: SpacingDefaults,
}

impl PricingConfig {
    /// Builder-style override of the tax rate.
    pub fn with_tax_rate(mut self, rate: TaxRate) -> Self {
        self.tax_rate = rate;
        self
    }

    /// Builder-style override of the tax mode.
    pub fn with_tax_mode(mut self, mode: TaxMode) -> Self {
        self.tax_mode = mode;
        self
    }

    /// Checks the rate is a real percentage and both spacings are usable
    /// divisors.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_tax_rate_bps(self.tax_rate.bps())?;
        validate_spacing("eyelet_spacing_m", self.spacing.eyelet_m)?;
        validate_spacing("button_spacing_m", self.spacing.button_m)?;
        Ok(())
    }
}
