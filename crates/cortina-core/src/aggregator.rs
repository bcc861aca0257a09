//! # Quotation Aggregator
//!
//! Sums priced curtains into a quotation. The figures are carried forward
//! from each curtain as already rounded; tax is never recomputed on the
//! aggregate, so the grand total is exactly the sum of the curtain totals.

use crate::money::Money;
use crate::quote::{PricedCurtain, Quotation};

/// Builds a quotation from priced curtains, keeping their order.
///
/// ## Example
/// ```rust
/// use cortina_core::aggregate;
///
/// let quotation = aggregate(Vec::new());
/// assert!(quotation.is_empty());
/// assert!(quotation.total.is_zero());
/// ```
pub fn aggregate(curtains: Vec<PricedCurtain>) -> Quotation {
    let subtotal: Money = curtains.iter().map(|c| c.net_subtotal).sum();
    let tax: Money = curtains.iter().map(|c| c.tax).sum();
    let total: Money = curtains.iter().map(|c| c.total).sum();

    Quotation {
        curtains,
        subtotal,
        tax,
        total,
    }
}

impl FromIterator<PricedCurtain> for Quotation {
    fn from_iter<I: IntoIterator<Item = PricedCurtain>>(iter: I) -> Self {
        aggregate(iter.into_iter().collect())
    }
}
