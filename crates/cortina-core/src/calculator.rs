//! # Quotation Calculator
//!
//! Prices one curtain: every BOM row of its design, the labor line, and
//! the tax split.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CurtainSpec                                                            │
//! │      │ validate_curtain + design lookup                                 │
//! │      ▼                                                                  │
//! │  for item in catalog.bom(design)           (file order)                 │
//! │      │ labor rows ─────────────────────────────────► skipped            │
//! │      │ rules::evaluate ──► qty per curtain                              │
//! │      │ resolver::resolve ──► PricedLine + unrounded amount              │
//! │      ▼                                                                  │
//! │  labor line: finished width × units @ design.labor_price  (if > 0)      │
//! │      ▼                                                                  │
//! │  subtotal (unrounded) ──► settle(TaxMode) ──► net / tax / total         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tax Modes
//! ```text
//! Inclusive:  total = round(subtotal)   tax = total × r/(1+r)   net = total − tax
//! Exclusive:  net   = round(subtotal)   tax = net × r           total = net + tax
//! ```
//! Either way `net_subtotal + tax == total` holds exactly.

use tracing::{debug, instrument};

use crate::catalog::Catalog;
use crate::config::PricingConfig;
use crate::curtain::CurtainSpec;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::quote::{PricedCurtain, PricedLine};
use crate::resolver::resolve;
use crate::rules::evaluate;
use crate::types::{TaxMode, TaxRate, Unit};
use crate::validation::validate_curtain;
use crate::LABOR_MARKER;

/// Prices curtains against one catalog and pricing configuration.
///
/// Holds only shared references; build one per request or keep one per
/// session, it makes no difference.
#[derive(Debug, Clone, Copy)]
pub struct QuoteCalculator<'a> {
    catalog: &'a Catalog,
    config: &'a PricingConfig,
}

impl<'a> QuoteCalculator<'a> {
    pub fn new(catalog: &'a Catalog, config: &'a PricingConfig) -> Self {
        Self { catalog, config }
    }

    /// Prices one curtain.
    ///
    /// ## Errors
    /// - `Validation` for an invalid spec or pricing config
    /// - `DesignNotFound` when the design is not in the catalog
    ///
    /// Missing prices are not errors; see [`PricedCurtain::unpriced`].
    #[instrument(skip_all, fields(design = %spec.design, units = spec.unit_count))]
    pub fn calculate(&self, spec: &CurtainSpec) -> CoreResult<PricedCurtain> {
        self.config.validate()?;
        validate_curtain(spec)?;

        let design = self
            .catalog
            .design(&spec.design)
            .ok_or_else(|| CoreError::DesignNotFound(spec.design.trim().to_string()))?;

        let mut detail = Vec::new();
        let mut unpriced = Vec::new();
        let mut subtotal = 0.0_f64;

        for item in self.catalog.bom(&design.name) {
            let per_unit = evaluate(
                item.rule,
                item.parameter.as_deref(),
                spec.window_width,
                spec.multiplier,
                &self.config.spacing,
            );
            let Some(resolved) = resolve(item, per_unit, spec.unit_count, spec) else {
                continue;
            };
            subtotal += resolved.amount;
            if resolved.unpriced {
                unpriced.push(resolved.line.name.clone());
            }
            detail.push(resolved.line);
        }

        if design.labor_price > 0.0 {
            let meters = spec.finished_width() * f64::from(spec.unit_count);
            let amount = meters * design.labor_price;
            subtotal += amount;
            detail.push(PricedLine {
                name: format!("{}: {}", LABOR_MARKER, design.name),
                unit: Unit::Meter,
                quantity: Unit::Meter.round_quantity(meters),
                unit_price: design.labor_price,
                line_total: Money::round_from(amount),
            });
        }

        let (net_subtotal, tax, total) =
            settle(subtotal, self.config.tax_rate, self.config.tax_mode);
        debug!(
            lines = detail.len(),
            net = net_subtotal.units(),
            tax = tax.units(),
            total = total.units(),
            "Curtain priced"
        );

        Ok(PricedCurtain {
            category: spec.category.clone(),
            design: design.name.clone(),
            window_width: spec.window_width,
            height: spec.height,
            unit_count: spec.unit_count,
            multiplier: spec.multiplier,
            finished_width: spec.finished_width(),
            primary_fabric: spec.primary_fabric.clone(),
            secondary_fabric: spec.secondary_fabric.clone(),
            detail,
            net_subtotal,
            tax,
            total,
            unpriced,
        })
    }
}

/// Shorthand for `QuoteCalculator::new(catalog, config).calculate(spec)`.
pub fn calculate(
    catalog: &Catalog,
    config: &PricingConfig,
    spec: &CurtainSpec,
) -> CoreResult<PricedCurtain> {
    QuoteCalculator::new(catalog, config).calculate(spec)
}

/// Splits an unrounded subtotal into `(net, tax, total)`.
fn settle(subtotal: f64, rate: TaxRate, mode: TaxMode) -> (Money, Money, Money) {
    match mode {
        TaxMode::Inclusive => {
            let total = Money::round_from(subtotal);
            let tax = total.tax_included(rate);
            (total - tax, tax, total)
        }
        TaxMode::Exclusive => {
            let net = Money::round_from(subtotal);
            let tax = net.calculate_tax(rate);
            (net, tax, net + tax)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curtain::{FabricSelection, SupplySelection};
    use crate::error::ValidationError;
    use crate::fixtures::{
        lino, raw, sample_catalog, sample_designs, sample_fabrics, sample_supplies, simple_spec,
    };

    fn config() -> PricingConfig {
        PricingConfig::default()
    }

    #[test]
    fn test_settle_inclusive() {
        let (net, tax, total) = settle(119_000.4, TaxRate::from_bps(1900), TaxMode::Inclusive);
        assert_eq!(total.units(), 119_000);
        assert_eq!(tax.units(), 19_000);
        assert_eq!(net.units(), 100_000);
    }

    #[test]
    fn test_settle_exclusive() {
        let (net, tax, total) = settle(100_000.0, TaxRate::from_bps(1900), TaxMode::Exclusive);
        assert_eq!(net.units(), 100_000);
        assert_eq!(tax.units(), 19_000);
        assert_eq!(total.units(), 119_000);
    }

    #[test]
    fn test_settle_parts_always_add_up() {
        let mut subtotal = 0.0;
        while subtotal < 50_000.0 {
            for mode in [TaxMode::Inclusive, TaxMode::Exclusive] {
                let (net, tax, total) = settle(subtotal, TaxRate::from_bps(1900), mode);
                assert_eq!(net + tax, total, "subtotal {subtotal} mode {mode}");
            }
            subtotal += 137.37;
        }
    }

    #[test]
    fn test_romana_without_labor() {
        // Romana: multiplier from the curtain, TELA 1 factor 1.1, no labor
        let catalog = sample_catalog();
        let spec = CurtainSpec::new("Romana", 2.0, 1.6, lino()).with_units(2);
        let priced = calculate(&catalog, &config(), &spec).unwrap();

        assert_eq!(priced.detail.len(), 1);
        // 2.0 × 1.0 × 1.1 × 2 = 4.4 m × 28,000 = 123,200
        assert!((priced.detail[0].quantity - 4.4).abs() < 1e-9);
        assert_eq!(priced.detail[0].line_total.units(), 123_200);
        assert_eq!(priced.total.units(), 123_200);
        assert!(!priced.detail.iter().any(|l| l.name.starts_with(LABOR_MARKER)));
    }

    #[test]
    fn test_scenario_multiplier_two_three_units() {
        // width 1.0, multiplier 2.0, factor 1.0, 3 curtains → 6.0 m of TELA 1
        let catalog = sample_catalog();
        let spec = simple_spec("Ondas", 2.0).with_units(3);
        let priced = calculate(&catalog, &config(), &spec).unwrap();

        assert_eq!(priced.finished_width, 2.0);
        let fabric = &priced.detail[0];
        assert_eq!(fabric.name, "TELA 1: L-100 - Arena");
        assert_eq!(fabric.quantity, 6.0);
    }

    #[test]
    fn test_full_ondas_quote() {
        let catalog = sample_catalog();
        let riel = SupplySelection::from_catalog(&catalog, "Riel", "R-10", "Blanco").unwrap();
        let spec = simple_spec("Ondas", 2.0)
            .with_secondary_fabric(FabricSelection::new("Lino", "L-200", "Blanco", 31_500.0))
            .with_selection("Riel", riel)
            .with_selection("Ojaletes", SupplySelection::new("O-1", "Plata", 500.0));
        let priced = calculate(&catalog, &config(), &spec).unwrap();

        let names: Vec<_> = priced.detail.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "TELA 1: L-100 - Arena",
                "TELA 2: L-200 - Blanco",
                "Ojaletes",
                "Riel",
                "Soportes",
                "M.O: Ondas",
            ]
        );

        // TELA 1  2.0 m × 28,000 = 56,000
        // TELA 2  1.0 m × 31,500 = 31,500
        // Ojaletes 2.0 / 0.14 = 14.28 → 16 × 500 = 8,000
        // Riel    1.0 m × 30,000 = 30,000
        // Soportes 2 × 0 = 0
        // M.O     2.0 m × 12,000 = 24,000
        let totals: Vec<_> = priced.detail.iter().map(|l| l.line_total.units()).collect();
        assert_eq!(totals, vec![56_000, 31_500, 8_000, 30_000, 0, 24_000]);
        assert_eq!(priced.total.units(), 149_500);
        // 149,500 × 19 / 119 = 23,869.7 → 23,870
        assert_eq!(priced.tax.units(), 23_870);
        assert_eq!(priced.net_subtotal.units(), 125_630);
        assert!(priced.unpriced.is_empty());
    }

    #[test]
    fn test_missing_required_selection_is_reported_not_fatal() {
        let catalog = sample_catalog();
        let spec = simple_spec("Ondas", 2.0)
            .with_secondary_fabric(FabricSelection::new("Lino", "L-200", "Blanco", 31_500.0));
        let priced = calculate(&catalog, &config(), &spec).unwrap();

        let riel = priced.detail.iter().find(|l| l.name == "Riel").unwrap();
        assert_eq!(riel.unit_price, 0.0);
        assert!(riel.line_total.is_zero());
        assert_eq!(priced.unpriced, vec!["Riel"]);
    }

    #[test]
    fn test_missing_secondary_fabric_is_reported() {
        let catalog = sample_catalog();
        let priced = calculate(&catalog, &config(), &simple_spec("Ondas", 2.0)).unwrap();
        assert!(priced.unpriced.contains(&"TELA 2".to_string()));
    }

    #[test]
    fn test_labor_line_uses_finished_width() {
        let catalog = sample_catalog();
        let spec = CurtainSpec::new("Pliegue", 1.2, 2.0, lino())
            .with_multiplier(2.5)
            .with_units(2);
        let priced = calculate(&catalog, &config(), &spec).unwrap();

        let labor = priced.detail.last().unwrap();
        assert_eq!(labor.name, "M.O: Pliegue");
        assert_eq!(labor.unit, Unit::Meter);
        // 1.2 × 2.5 × 2 = 6.0 m × 9,000
        assert!((labor.quantity - 6.0).abs() < 1e-9);
        assert_eq!(labor.line_total.units(), 54_000);
    }

    #[test]
    fn test_calculate_is_idempotent() {
        let catalog = sample_catalog();
        let spec = simple_spec("Ondas", 2.3).with_units(2);
        let config = PricingConfig::default();
        let calculator = QuoteCalculator::new(&catalog, &config);

        let first = calculator.calculate(&spec).unwrap();
        let second = calculator.calculate(&spec).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_net_plus_tax_equals_total() {
        let catalog = sample_catalog();
        let riel = SupplySelection::from_catalog(&catalog, "Riel", "R-10", "Blanco").unwrap();
        // Ondas carries fabric, rail, eyelets and labor lines at once
        let ondas = simple_spec("Ondas", 2.3)
            .with_units(3)
            .with_secondary_fabric(FabricSelection::new("Lino", "L-200", "Blanco", 31_500.0))
            .with_selection("Riel", riel)
            .with_selection("Ojaletes", SupplySelection::new("O-1", "Plata", 500.0));

        for base in [simple_spec("Pliegue", 2.5), ondas] {
            for width in [0.73, 1.0, 1.45, 2.2, 3.9] {
                for mode in [TaxMode::Inclusive, TaxMode::Exclusive] {
                    let config = PricingConfig::default().with_tax_mode(mode);
                    let spec = CurtainSpec {
                        window_width: width,
                        ..base.clone()
                    };
                    let priced = calculate(&catalog, &config, &spec).unwrap();
                    assert_eq!(
                        priced.net_subtotal + priced.tax,
                        priced.total,
                        "{} at {width} m, {mode:?}",
                        spec.design
                    );
                    assert!(priced.unpriced.is_empty(), "{}", spec.design);
                }
            }
        }
    }

    #[test]
    fn test_tiny_eyelet_spacing_saturates_instead_of_panicking() {
        let bom = raw(
            &["Diseño", "Insumo", "Unidad", "ReglaCantidad", "Parametro", "DependeDeSeleccion", "Observaciones"],
            &[
                &["Ondas", "TELA 1", "MT", "MT_ANCHO_X_MULT", "", "NO", ""],
                &["Ondas", "Ojaletes", "UND", "UND_OJALES_PAR", "1e-300", "NO", ""],
            ],
        );
        let catalog =
            Catalog::load(&sample_designs(), &bom, Some(&sample_supplies()), &sample_fabrics())
                .unwrap();
        let spec = simple_spec("Ondas", 2.0)
            .with_units(2)
            .with_selection("Ojaletes", SupplySelection::new("O-1", "Plata", 500.0));

        for mode in [TaxMode::Inclusive, TaxMode::Exclusive] {
            let config = PricingConfig::default().with_tax_mode(mode);
            let priced = calculate(&catalog, &config, &spec).unwrap();

            let eyelets = priced.detail.iter().find(|l| l.name == "Ojaletes").unwrap();
            assert!(eyelets.quantity.is_finite());
            assert_eq!(eyelets.line_total.units(), i64::MAX);
            assert_eq!(priced.total.units(), i64::MAX);
        }
    }

    #[test]
    fn test_unknown_design() {
        let catalog = sample_catalog();
        let err = calculate(&catalog, &config(), &simple_spec("Inexistente", 1.0)).unwrap_err();
        assert!(matches!(err, CoreError::DesignNotFound(ref d) if d == "Inexistente"));
    }

    #[test]
    fn test_invalid_spec_is_rejected() {
        let catalog = sample_catalog();
        let err = calculate(&catalog, &config(), &simple_spec("Ondas", 0.5)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::BelowMinimum { .. })
        ));
    }

    #[test]
    fn test_zero_tax_rate() {
        let catalog = sample_catalog();
        let config = PricingConfig::default().with_tax_rate(TaxRate::zero());
        let priced = calculate(&catalog, &config, &simple_spec("Romana", 1.0)).unwrap();
        assert!(priced.tax.is_zero());
        assert_eq!(priced.net_subtotal, priced.total);
    }
}
