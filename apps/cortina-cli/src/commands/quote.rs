//! # Quote Command
//!
//! Reads a quote request, prices every curtain through a
//! [`QuotationSession`] and renders the summary as text or JSON.

use std::fmt;
use std::path::Path;
use tracing::{info, warn};

use cortina_core::{
    Catalog, Money, PricedCurtain, PricingConfig, QuoteCalculator, TaxMode, TaxRate,
};

use crate::error::CliResult;
use crate::request::{Contact, QuoteRequest};
use crate::state::{QuotationSession, QuotationSummary};

/// Prices a request into a new session.
///
/// Stops at the first curtain that cannot be resolved or priced.
pub fn build_session(
    catalog: &Catalog,
    config: &PricingConfig,
    request: &QuoteRequest,
) -> CliResult<QuotationSession> {
    let calculator = QuoteCalculator::new(catalog, config);
    let mut session =
        QuotationSession::new().with_contacts(request.customer.clone(), request.seller.clone());

    for curtain in &request.curtains {
        let spec = curtain.to_spec(catalog)?;
        session.add(&calculator, spec)?;
    }

    let quotation = session.quotation();
    for item in quotation.unpriced() {
        warn!(item = %item, "Quoted without a price");
    }
    info!(
        number = %session.number(),
        curtains = quotation.len(),
        total = %quotation.total,
        "Quotation priced"
    );
    Ok(session)
}

/// Runs `cortina quote`. Returns the rendered output.
pub fn quote(
    catalog: &Catalog,
    config: &PricingConfig,
    request_path: &Path,
    json: bool,
) -> CliResult<String> {
    let request = QuoteRequest::from_file(request_path)?;
    let session = build_session(catalog, config, &request)?;
    let summary = session.summary(config);

    if json {
        Ok(serde_json::to_string_pretty(&summary)?)
    } else {
        Ok(TextReport(&summary).to_string())
    }
}

// =============================================================================
// Text Rendering
// =============================================================================

/// Plain-text quotation.
///
/// ```text
/// Quotation 202610161430                               2026-10-16
/// Customer: Ana Pérez · 300 555 0101
///
/// 1. Ondas [Velo]  2.00 m × 2.00 m  1 unit                 $149,500
///    TELA 1: L-100 - Arena             MT     2.00     $28,000     $56,000
///    ...
///
/// Subtotal                                                 $125,630
/// Tax 19% (included)                                        $23,870
/// Total                                                    $149,500
/// ```
pub struct TextReport<'a>(pub &'a QuotationSummary);

const RULE: &str =
    "--------------------------------------------------------------------------------";

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        writeln!(f, "{:<64}{:>16}", format!("Quotation {}", summary.number), summary.date)?;
        write_contact(f, "Customer", &summary.customer)?;
        write_contact(f, "Seller", &summary.seller)?;
        writeln!(f, "{RULE}")?;

        if summary.quotation.is_empty() {
            writeln!(f, "No curtains quoted.")?;
        }
        for (index, curtain) in summary.quotation.curtains.iter().enumerate() {
            write_curtain(f, index + 1, curtain)?;
        }

        writeln!(f, "{RULE}")?;
        let quotation = &summary.quotation;
        let rate = TaxRate::from_bps(summary.tax_rate_bps);
        let tax_label = match summary.tax_mode {
            TaxMode::Inclusive => format!("Tax {rate} (included)"),
            TaxMode::Exclusive => format!("Tax {rate}"),
        };
        writeln!(f, "{:<64}{:>16}", "Subtotal", quotation.subtotal.to_string())?;
        writeln!(f, "{:<64}{:>16}", tax_label, quotation.tax.to_string())?;
        writeln!(f, "{:<64}{:>16}", "Total", quotation.total.to_string())?;
        Ok(())
    }
}

fn write_contact(f: &mut fmt::Formatter<'_>, label: &str, contact: &Contact) -> fmt::Result {
    let parts: Vec<&str> = std::iter::once(contact.name.as_str())
        .chain(contact.id_number.as_deref())
        .chain(contact.phone.as_deref())
        .chain(contact.email.as_deref())
        .chain(contact.address.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        return Ok(());
    }
    writeln!(f, "{:<10}{}", format!("{label}:"), parts.join(" · "))
}

fn write_curtain(f: &mut fmt::Formatter<'_>, number: usize, curtain: &PricedCurtain) -> fmt::Result {
    let category = curtain
        .category
        .as_deref()
        .map(|c| format!(" [{c}]"))
        .unwrap_or_default();
    let units = if curtain.unit_count == 1 { "unit" } else { "units" };
    let heading = format!(
        "{number}. {}{category}  {:.2} m × {:.2} m  {} {units}",
        curtain.design, curtain.finished_width, curtain.height, curtain.unit_count
    );
    writeln!(f, "\n{:<64}{:>16}", heading, curtain.total.to_string())?;

    for line in &curtain.detail {
        let quantity = if line.unit.is_discrete() {
            format!("{:.0}", line.quantity)
        } else {
            format!("{:.2}", line.quantity)
        };
        let unit_price = Money::round_from(line.unit_price);
        writeln!(
            f,
            "   {:<34}{:<6}{:>9}{:>14}{:>14}",
            line.name,
            line.unit.to_string(),
            quantity,
            unit_price.to_string(),
            line.line_total.to_string()
        )?;
    }

    if !curtain.unpriced.is_empty() {
        writeln!(f, "   ! no price for: {}", curtain.unpriced.join(", "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{CurtainRequest, FabricChoice, SupplyChoice};
    use crate::test_support::{pricing, sample_catalog};
    use cortina_core::AssemblyMode;
    use std::collections::BTreeMap;
    use std::io::Write;

    fn ondas_request() -> QuoteRequest {
        let mut accessories = BTreeMap::new();
        accessories.insert(
            "Riel".to_string(),
            SupplyChoice {
                reference: "R-10".into(),
                color: "Blanco".into(),
                price: None,
            },
        );
        accessories.insert(
            "Ojaletes".to_string(),
            SupplyChoice {
                reference: "O-1".into(),
                color: "Plata".into(),
                price: None,
            },
        );

        QuoteRequest {
            customer: Contact {
                phone: Some("300 555 0101".into()),
                ..Contact::named("Ana Pérez")
            },
            seller: Contact::named("Luis"),
            curtains: vec![CurtainRequest {
                category: Some("Velo".into()),
                design: "Ondas".into(),
                window_width: 1.0,
                height: 2.0,
                units: 1,
                multiplier: None,
                primary_fabric: FabricChoice {
                    fabric_type: "Lino".into(),
                    reference: "L-100".into(),
                    color: "Arena".into(),
                    price_per_meter: None,
                    assembly: AssemblyMode::Whole,
                },
                secondary_fabric: Some(FabricChoice {
                    fabric_type: "Lino".into(),
                    reference: "L-200".into(),
                    color: "Blanco".into(),
                    price_per_meter: None,
                    assembly: AssemblyMode::Whole,
                }),
                accessories,
            }],
        }
    }

    #[test]
    fn test_build_session_prices_every_curtain() {
        let catalog = sample_catalog();
        let session = build_session(&catalog, &pricing(), &ondas_request()).unwrap();

        let quotation = session.quotation();
        assert_eq!(quotation.len(), 1);
        assert_eq!(quotation.total.units(), 149_500);
        assert_eq!(quotation.tax.units(), 23_870);
        assert!(quotation.unpriced().is_empty());
    }

    #[test]
    fn test_build_session_stops_on_unknown_fabric() {
        let catalog = sample_catalog();
        let mut request = ondas_request();
        request.curtains[0].primary_fabric.reference = "L-999".into();
        assert!(build_session(&catalog, &pricing(), &request).is_err());
    }

    #[test]
    fn test_text_report() {
        let catalog = sample_catalog();
        let session = build_session(&catalog, &pricing(), &ondas_request()).unwrap();
        let text = TextReport(&session.summary(&pricing())).to_string();

        assert!(text.starts_with(&format!("Quotation {}", session.number())));
        assert!(text.contains("Customer: Ana Pérez · 300 555 0101"));
        assert!(text.contains("Seller:   Luis"));
        assert!(text.contains("1. Ondas [Velo]  2.00 m × 2.00 m  1 unit"));
        assert!(text.contains("TELA 1: L-100 - Arena"));
        assert!(text.contains("$56,000"));
        assert!(text.contains("Tax 19% (included)"));
        assert!(text.contains("$149,500"));
        assert!(!text.contains("no price for"));
    }

    #[test]
    fn test_text_report_lists_unpriced_items() {
        let catalog = sample_catalog();
        let mut request = ondas_request();
        request.curtains[0].accessories.remove("Riel");
        let session = build_session(&catalog, &pricing(), &request).unwrap();
        let text = TextReport(&session.summary(&pricing())).to_string();

        assert!(text.contains("! no price for: Riel"));
    }

    #[test]
    fn test_quote_from_file_as_json() {
        let catalog = sample_catalog();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&ondas_request()).unwrap()).unwrap();

        let output = quote(&catalog, &pricing(), file.path(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["customer"]["name"], "Ana Pérez");
        assert_eq!(value["tax_mode"], "inclusive");
        assert_eq!(value["quotation"]["total"], 149_500);
        assert_eq!(
            value["quotation"]["curtains"][0]["detail"][0]["name"],
            "TELA 1: L-100 - Arena"
        );
    }

    #[test]
    fn test_empty_request_renders() {
        let catalog = sample_catalog();
        let request = QuoteRequest::default();
        let session = build_session(&catalog, &pricing(), &request).unwrap();
        let text = TextReport(&session.summary(&pricing())).to_string();
        assert!(text.contains("No curtains quoted."));
        assert!(!text.contains("Customer:"));
    }
}
