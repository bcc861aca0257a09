//! # Validation Module
//!
//! Input checks for curtain specs and pricing configuration.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Form / JSON request                                                    │
//! │      │  parse into CurtainSpec                                          │
//! │      ▼                                                                  │
//! │  validate_curtain(&spec)   ◄── THIS MODULE                              │
//! │      │  0 < width, height ≤ 100 m, finite                               │
//! │      │  unit_count ≥ 1                                                  │
//! │      │  multiplier ≥ 1                                                  │
//! │      │  prices ≥ 0, finite                                              │
//! │      ▼                                                                  │
//! │  QuoteCalculator::calculate                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog values are not checked here: the catalog loader coerces bad
//! multipliers and labor prices to their defaults instead of failing.

use crate::curtain::CurtainSpec;
use crate::error::ValidationError;

/// Maximum tax rate in basis points (100%).
pub const MAX_TAX_RATE_BPS: u32 = 10_000;

/// Largest window dimension or spacing accepted, in meters.
pub const MAX_DIMENSION_M: f64 = 100.0;

/// Minimum designated width multiplier of a curtain.
pub const MIN_MULTIPLIER: f64 = 1.0;

/// Validates a window or curtain dimension in meters.
///
/// ## Rules
/// - Must be finite
/// - Must be strictly positive
/// - Must not exceed [`MAX_DIMENSION_M`]
pub fn validate_dimension(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }
    if value <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    if value > MAX_DIMENSION_M {
        return Err(ValidationError::AboveMaximum {
            field: field.to_string(),
            max: MAX_DIMENSION_M,
        });
    }
    Ok(())
}

/// Validates the number of identical curtains.
pub fn validate_unit_count(count: u32) -> Result<(), ValidationError> {
    if count == 0 {
        return Err(ValidationError::MustBePositive {
            field: "unit_count".to_string(),
        });
    }
    Ok(())
}

/// Validates a designated multiplier (at least 1.0).
pub fn validate_multiplier(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "multiplier".to_string(),
        });
    }
    if value < MIN_MULTIPLIER {
        return Err(ValidationError::BelowMinimum {
            field: "multiplier".to_string(),
            min: MIN_MULTIPLIER,
        });
    }
    Ok(())
}

/// Validates a unit price. Zero is allowed.
pub fn validate_price(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }
    if value < 0.0 {
        return Err(ValidationError::BelowMinimum {
            field: field.to_string(),
            min: 0.0,
        });
    }
    Ok(())
}

/// Validates a tax rate in basis points.
pub fn validate_tax_rate_bps(bps: u32) -> Result<(), ValidationError> {
    if bps > MAX_TAX_RATE_BPS {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate_bps".to_string(),
            min: 0,
            max: MAX_TAX_RATE_BPS as i64,
        });
    }
    Ok(())
}

/// Validates a default rule spacing. It is a divisor, so it must be > 0.
pub fn validate_spacing(field: &str, value: f64) -> Result<(), ValidationError> {
    validate_dimension(field, value)
}

/// Validates a whole curtain spec before pricing.
pub fn validate_curtain(spec: &CurtainSpec) -> Result<(), ValidationError> {
    if spec.design.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "design".to_string(),
        });
    }
    validate_dimension("window_width", spec.window_width)?;
    validate_dimension("height", spec.height)?;
    validate_unit_count(spec.unit_count)?;
    validate_multiplier(spec.multiplier)?;

    validate_price("primary_fabric.price_per_meter", spec.primary_fabric.price_per_meter)?;
    if let Some(secondary) = &spec.secondary_fabric {
        validate_price("secondary_fabric.price_per_meter", secondary.price_per_meter)?;
    }
    for (supply, selection) in &spec.selections {
        validate_price(&format!("selections.{supply}.price"), selection.price)?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
