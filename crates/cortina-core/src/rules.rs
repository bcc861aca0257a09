//! # Rule Evaluator
//!
//! Turns a BOM row's quantity rule into a quantity for one curtain.
//!
//! ## Rules
//! ```text
//! finished = window_width × multiplier
//!
//! ┌──────────────────┬──────────────────────────────────┬──────────────────┐
//! │ Rule             │ Quantity per curtain             │ Parameter        │
//! ├──────────────────┼──────────────────────────────────┼──────────────────┤
//! │ MT_ANCHO_X_MULT  │ finished × factor                │ factor, 1.0      │
//! │ UND_OJALES_PAR   │ ceil_to_even(finished / spacing) │ spacing, 0.14 m  │
//! │ UND_BOTON_PAR    │ ceil_to_even(finished / spacing) │ spacing, 0.20 m  │
//! │ FIJO             │ parameter                        │ quantity, 0.0    │
//! └──────────────────┴──────────────────────────────────┴──────────────────┘
//! ```
//!
//! A parameter that is missing, blank, not a number or not finite falls
//! back to the rule's default without an error. Spacings must also be
//! positive, and small enough a divisor that `finished / spacing` stays
//! finite, to be used.

use crate::catalog::is_blank;
use crate::config::SpacingDefaults;
use crate::error::CoreResult;
use crate::types::QuantityRule;

/// Smallest even integer greater than or equal to `x`.
///
/// Eyelets and buttons come in pairs, one per side of each fold. Stays in
/// `f64` so any finite ratio maps to a finite count without an integer cast.
///
/// ## Example
/// ```rust
/// use cortina_core::rules::ceil_to_even;
///
/// assert_eq!(ceil_to_even(25.71), 26.0);
/// assert_eq!(ceil_to_even(5.0), 6.0);
/// assert_eq!(ceil_to_even(6.0), 6.0);
/// ```
pub fn ceil_to_even(x: f64) -> f64 {
    let n = x.ceil();
    // -0.0 and every integer past 2^53 are already even
    if n % 2.0 == 0.0 {
        n
    } else {
        n + 1.0
    }
}

/// Parses a rule parameter, returning `None` for anything unusable.
pub fn parse_parameter(raw: Option<&str>) -> Option<f64> {
    raw.filter(|s| !is_blank(s))
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Quantity of a supply for one curtain.
pub fn evaluate(
    rule: QuantityRule,
    parameter: Option<&str>,
    window_width: f64,
    multiplier: f64,
    spacing: &SpacingDefaults,
) -> f64 {
    let finished = window_width * multiplier;
    match rule {
        QuantityRule::WidthTimesMultiplier => finished * parse_parameter(parameter).unwrap_or(1.0),
        QuantityRule::EyeletPairs => pairs_over(finished, parameter, spacing.eyelet_m),
        QuantityRule::ButtonPairs => pairs_over(finished, parameter, spacing.button_m),
        QuantityRule::Fixed => parse_parameter(parameter).unwrap_or(0.0),
    }
}

/// Like [`evaluate`], for a rule still in text form.
///
/// ## Errors
/// `UnsupportedRule` for a name outside the four known rules.
pub fn evaluate_named(
    rule: &str,
    parameter: Option<&str>,
    window_width: f64,
    multiplier: f64,
    spacing: &SpacingDefaults,
) -> CoreResult<f64> {
    let rule: QuantityRule = rule.parse()?;
    Ok(evaluate(rule, parameter, window_width, multiplier, spacing))
}

fn pairs_over(finished: f64, parameter: Option<&str>, default_spacing: f64) -> f64 {
    let usable = |s: &f64| *s > 0.0 && (finished / *s).is_finite();
    let spacing = parse_parameter(parameter)
        .filter(usable)
        .unwrap_or(default_spacing);
    if !usable(&spacing) {
        return 0.0;
    }
    ceil_to_even(finished / spacing)
}

// =============================================================================
// Unit Tests
// =============================================================================
