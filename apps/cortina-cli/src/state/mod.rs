//! # State Module
//!
//! The in-memory working set of a quotation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    QuotationSession                                     │
//! │                                                                         │
//! │  customer, seller ── printed on the summary                             │
//! │  created_at ──────── quotation number (%Y%m%d%H%M) and date             │
//! │  curtains ────────── [SessionCurtain { id, spec, priced }]              │
//! │                             │                                           │
//! │                             ▼ quotation()                               │
//! │                       cortina_core::aggregate                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod session;

pub use session::{QuotationSession, QuotationSummary, SessionCurtain};
