//! # Cortina CLI
//!
//! Command-line front end for the curtain quotation engine.
//!
//! ## Module Organization
//! ```text
//! cortina_cli/
//! ├── lib.rs          ◄─── You are here (argument parsing, logging, dispatch)
//! ├── request.rs      ◄─── Quote request JSON → CurtainSpec
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   └── session.rs  ◄─── QuotationSession (add / replace / duplicate / remove)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── quote.rs    ◄─── Quote pricing and rendering
//! │   ├── catalog.rs  ◄─── Design, BOM and fabric listings
//! │   └── config.rs   ◄─── Show / write configuration
//! └── error.rs        ◄─── CLI error type
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, written to stderr             │
//! │     • Default: info,cortina=debug; override with RUST_LOG               │
//! │                                                                         │
//! │  2. Load Configuration ───────────────────────────────────────────────► │
//! │     • --config PATH, else cortina.toml in the platform config dir       │
//! │     • CORTINA_* environment overrides, then --data-dir                  │
//! │                                                                         │
//! │  3. Load Catalog (all commands except `config`) ──────────────────────► │
//! │     • designs, bom, supplies (optional), fabrics                        │
//! │                                                                         │
//! │  4. Run Command ──────────────────────────────────────────────────────► │
//! │     • Output to stdout, or to --out FILE for `quote`                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod request;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cortina_catalog::{load_catalog, AppConfig};
use cortina_core::{Catalog, PricingConfig};

pub use error::{CliError, CliResult};

/// Curtain quotation calculator.
#[derive(Debug, Parser)]
#[command(name = "cortina", version, about)]
pub struct Cli {
    /// Config file (default: cortina.toml in the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Catalog directory, overriding the configured one
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Price a quote request
    Quote {
        /// Quote request (JSON)
        request: PathBuf,

        /// Print the quotation as JSON
        #[arg(long)]
        json: bool,

        /// Write the output to a file instead of stdout
        #[arg(long, short, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// List designs
    Designs {
        /// Only designs carrying this category tag
        #[arg(long)]
        category: Option<String>,
    },

    /// Show the bill of materials of a design
    Bom { design: String },

    /// List fabrics with their price per meter
    Fabrics,

    /// Print the effective configuration
    Config {
        /// Write it to PATH instead
        #[arg(long, value_name = "PATH")]
        write: Option<PathBuf>,
    },
}

/// Installs the stderr log subscriber.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cortina=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Runs a parsed command line.
pub fn run(cli: Cli) -> CliResult<()> {
    let mut config = AppConfig::load(cli.config)?;
    if let Some(dir) = cli.data_dir {
        config.catalogs.dir = dir;
    }

    match cli.command {
        Command::Quote { request, json, out } => {
            let (catalog, pricing) = load(&config)?;
            let output = commands::quote::quote(&catalog, &pricing, &request, json)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, output + "\n").map_err(|source| CliError::Io {
                        path: path.clone(),
                        source,
                    })?;
                    info!(path = %path.display(), "Quotation written");
                }
                None => println!("{output}"),
            }
        }
        Command::Designs { category } => {
            let (catalog, _) = load(&config)?;
            println!("{}", commands::catalog::designs(&catalog, category.as_deref()));
        }
        Command::Bom { design } => {
            let (catalog, _) = load(&config)?;
            println!("{}", commands::catalog::bom(&catalog, &design)?);
        }
        Command::Fabrics => {
            let (catalog, _) = load(&config)?;
            println!("{}", commands::catalog::fabrics(&catalog));
        }
        Command::Config { write: Some(path) } => {
            let path = commands::config::write(&config, &path)?;
            println!("Config written to {}", path.display());
        }
        Command::Config { write: None } => print!("{}", commands::config::show(&config)?),
    }
    Ok(())
}

/// Loads the catalog and the pricing constants.
fn load(config: &AppConfig) -> CliResult<(Catalog, PricingConfig)> {
    let catalog = load_catalog(&config.catalog_paths())?;
    let pricing = config.to_pricing_config();
    info!(
        designs = catalog.design_count(),
        fabrics = catalog.fabric_count(),
        tax_rate = %pricing.tax_rate,
        tax_mode = %pricing.tax_mode,
        "Catalog ready"
    );
    Ok((catalog, pricing))
}
