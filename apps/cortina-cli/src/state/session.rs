//! # Quotation Session
//!
//! Holds the curtains being quoted for one customer.
//!
//! ## Session Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Operations                                   │
//! │                                                                         │
//! │  Operation                 Session Change                               │
//! │  ─────────                 ──────────────                               │
//! │                                                                         │
//! │  add(spec) ──────────────► price spec, push with a new id               │
//! │                                                                         │
//! │  replace(id, spec) ──────► re-price, swap in place (same id)            │
//! │                                                                         │
//! │  duplicate(id) ──────────► copy, push with a new id                     │
//! │                                                                         │
//! │  remove(id) ─────────────► curtains.remove(i)                           │
//! │                                                                         │
//! │  clear() ────────────────► curtains.clear(), new timestamp              │
//! │                                                                         │
//! │  quotation() ────────────► aggregate (read only)                        │
//! │                                                                         │
//! │  NOTE: A curtain is priced when it enters the session. A failed         │
//! │        calculation leaves the session unchanged.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use cortina_core::{
    aggregate, CoreResult, CurtainSpec, PricedCurtain, PricingConfig, Quotation, QuoteCalculator,
    TaxMode,
};

use crate::error::{CliError, CliResult};
use crate::request::Contact;

/// Format of the quotation number.
const NUMBER_FORMAT: &str = "%Y%m%d%H%M";

/// A curtain in the session.
///
/// The spec is kept next to its priced result so the curtain can be
/// edited and re-priced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionCurtain {
    pub id: Uuid,
    pub spec: CurtainSpec,
    pub priced: PricedCurtain,
}

/// The quotation being assembled.
///
/// ## Invariants
/// - Curtain ids are unique within the session
/// - Curtains keep insertion order; `quotation()` lists them in that order
#[derive(Debug, Clone)]
pub struct QuotationSession {
    pub customer: Contact,
    pub seller: Contact,
    created_at: DateTime<Local>,
    curtains: Vec<SessionCurtain>,
}

impl Default for QuotationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuotationSession {
    /// Creates an empty session stamped with the current time.
    pub fn new() -> Self {
        Self::started_at(Local::now())
    }

    pub fn started_at(created_at: DateTime<Local>) -> Self {
        QuotationSession {
            customer: Contact::default(),
            seller: Contact::default(),
            created_at,
            curtains: Vec::new(),
        }
    }

    pub fn with_contacts(mut self, customer: Contact, seller: Contact) -> Self {
        self.customer = customer;
        self.seller = seller;
        self
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    /// Quotation number, e.g. `202610161430`.
    pub fn number(&self) -> String {
        self.created_at.format(NUMBER_FORMAT).to_string()
    }

    /// Prices `spec` and appends it.
    pub fn add(&mut self, calculator: &QuoteCalculator<'_>, spec: CurtainSpec) -> CoreResult<Uuid> {
        let priced = calculator.calculate(&spec)?;
        let id = Uuid::new_v4();
        debug!(%id, design = %spec.design, total = %priced.total, "Curtain added");
        self.curtains.push(SessionCurtain { id, spec, priced });
        Ok(id)
    }

    /// Re-prices a curtain with a new spec, keeping its id and position.
    pub fn replace(
        &mut self,
        id: Uuid,
        calculator: &QuoteCalculator<'_>,
        spec: CurtainSpec,
    ) -> CliResult<()> {
        let index = self.position(id)?;
        let priced = calculator.calculate(&spec)?;
        debug!(%id, design = %spec.design, total = %priced.total, "Curtain replaced");
        self.curtains[index] = SessionCurtain { id, spec, priced };
        Ok(())
    }

    /// Appends a copy of a curtain under a new id.
    pub fn duplicate(&mut self, id: Uuid) -> CliResult<Uuid> {
        let index = self.position(id)?;
        let copy = SessionCurtain {
            id: Uuid::new_v4(),
            ..self.curtains[index].clone()
        };
        let new_id = copy.id;
        debug!(from = %id, to = %new_id, "Curtain duplicated");
        self.curtains.push(copy);
        Ok(new_id)
    }

    pub fn remove(&mut self, id: Uuid) -> CliResult<SessionCurtain> {
        let index = self.position(id)?;
        debug!(%id, "Curtain removed");
        Ok(self.curtains.remove(index))
    }

    /// Drops every curtain and restarts the clock; contacts are kept.
    pub fn clear(&mut self) {
        self.curtains.clear();
        self.created_at = Local::now();
        info!("Quotation cleared");
    }

    pub fn get(&self, id: Uuid) -> Option<&SessionCurtain> {
        self.curtains.iter().find(|c| c.id == id)
    }

    pub fn curtains(&self) -> &[SessionCurtain] {
        &self.curtains
    }

    pub fn len(&self) -> usize {
        self.curtains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curtains.is_empty()
    }

    /// Aggregates the priced curtains.
    pub fn quotation(&self) -> Quotation {
        aggregate(self.curtains.iter().map(|c| c.priced.clone()).collect())
    }

    pub fn summary(&self, config: &PricingConfig) -> QuotationSummary {
        QuotationSummary {
            number: self.number(),
            date: self.created_at.date_naive().to_string(),
            customer: self.customer.clone(),
            seller: self.seller.clone(),
            tax_rate_bps: config.tax_rate.bps(),
            tax_mode: config.tax_mode,
            quotation: self.quotation(),
        }
    }

    fn position(&self, id: Uuid) -> CliResult<usize> {
        self.curtains
            .iter()
            .position(|c| c.id == id)
            .ok_or(CliError::CurtainNotFound(id))
    }
}

/// What `cortina quote` prints: header data plus the aggregated quotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationSummary {
    pub number: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub customer: Contact,
    pub seller: Contact,
    pub tax_rate_bps: u32,
    pub tax_mode: TaxMode,
    pub quotation: Quotation,
}
