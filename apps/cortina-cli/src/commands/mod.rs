//! # CLI Commands
//!
//! One module per command group. Commands return their output as text;
//! `lib.rs` decides where it goes.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here
//! ├── quote.rs     ◄─── cortina quote <request.json> [--json] [--out FILE]
//! ├── catalog.rs   ◄─── cortina designs | bom <design> | fabrics
//! └── config.rs    ◄─── cortina config [--write PATH]
//! ```

pub mod catalog;
pub mod config;
pub mod quote;
