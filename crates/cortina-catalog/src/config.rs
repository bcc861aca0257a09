//! # Application Configuration
//!
//! Where the catalogs live and which pricing constants to use.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     CORTINA_DATA_DIR=/srv/cortina/data                                  │
//! │     CORTINA_TAX_RATE_BPS=1900                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     ~/.config/cortina/cortina.toml (Linux)                              │
//! │     ~/Library/Application Support/com.cortina.cortina/cortina.toml      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     data/*.csv, 19% IVA, inclusive tax, 0.14 m / 0.20 m spacings        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # cortina.toml
//! [catalogs]
//! dir = "data"
//! designs = "designs.csv"     # relative to dir unless absolute
//! bom = "bom.csv"
//! supplies = "supplies.csv"
//! fabrics = "fabrics.csv"
//!
//! [pricing]
//! tax_rate_bps = 1900
//! tax_mode = "inclusive"      # inclusive | exclusive
//! eyelet_spacing_m = 0.14
//! button_spacing_m = 0.20
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use cortina_core::{
    PricingConfig, SpacingDefaults, TaxMode, TaxRate, DEFAULT_BUTTON_SPACING_M,
    DEFAULT_EYELET_SPACING_M, DEFAULT_TAX_RATE_BPS,
};

use crate::error::{CatalogError, CatalogResult};
use crate::loader::{
    CatalogPaths, DEFAULT_BOM_FILE, DEFAULT_DESIGNS_FILE, DEFAULT_FABRICS_FILE,
    DEFAULT_SUPPLIES_FILE,
};

/// File name of the config inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "cortina.toml";

// =============================================================================
// Catalog Settings
// =============================================================================

/// Dataset locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Directory the file names below are resolved against.
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_designs")]
    pub designs: PathBuf,

    #[serde(default = "default_bom")]
    pub bom: PathBuf,

    /// Optional dataset; a missing file only logs a warning.
    #[serde(default = "default_supplies")]
    pub supplies: PathBuf,

    #[serde(default = "default_fabrics")]
    pub fabrics: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_designs() -> PathBuf {
    PathBuf::from(DEFAULT_DESIGNS_FILE)
}
fn default_bom() -> PathBuf {
    PathBuf::from(DEFAULT_BOM_FILE)
}
fn default_supplies() -> PathBuf {
    PathBuf::from(DEFAULT_SUPPLIES_FILE)
}
fn default_fabrics() -> PathBuf {
    PathBuf::from(DEFAULT_FABRICS_FILE)
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            dir: default_data_dir(),
            designs: default_designs(),
            bom: default_bom(),
            supplies: default_supplies(),
            fabrics: default_fabrics(),
        }
    }
}

impl CatalogSettings {
    /// Resolves every file against `dir`. Absolute file paths are kept.
    pub fn paths(&self) -> CatalogPaths {
        CatalogPaths {
            designs: self.dir.join(&self.designs),
            bom: self.dir.join(&self.bom),
            supplies: self.dir.join(&self.supplies),
            fabrics: self.dir.join(&self.fabrics),
        }
    }
}

// =============================================================================
// Pricing Settings
// =============================================================================

/// Tax and rule defaults, in file form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// 1900 = 19%.
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,

    #[serde(default)]
    pub tax_mode: TaxMode,

    #[serde(default = "default_eyelet_spacing")]
    pub eyelet_spacing_m: f64,

    #[serde(default = "default_button_spacing")]
    pub button_spacing_m: f64,
}

fn default_tax_rate_bps() -> u32 {
    DEFAULT_TAX_RATE_BPS
}
fn default_eyelet_spacing() -> f64 {
    DEFAULT_EYELET_SPACING_M
}
fn default_button_spacing() -> f64 {
    DEFAULT_BUTTON_SPACING_M
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            tax_rate_bps: default_tax_rate_bps(),
            tax_mode: TaxMode::default(),
            eyelet_spacing_m: default_eyelet_spacing(),
            button_spacing_m: default_button_spacing(),
        }
    }
}

// =============================================================================
// App Configuration
// =============================================================================

/// Complete configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub catalogs: CatalogSettings,

    #[serde(default)]
    pub pricing: PricingSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, else `cortina.toml` in the config dir)
    /// 3. Environment variables
    ///
    /// An explicit path that does not exist is an error; a missing file in
    /// the default location is not.
    pub fn load(config_path: Option<PathBuf>) -> CatalogResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path).map_err(|source| {
                    CatalogError::ConfigRead {
                        path: path.clone(),
                        source,
                    }
                })?;
                config = toml::from_str(&contents)?;
            } else if explicit {
                return Err(CatalogError::ConfigRead {
                    path,
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                });
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> CatalogResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| CatalogError::InvalidConfig("No config path available".into()))?;

        let write_error = |source| CatalogError::ConfigWrite {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(write_error)?;

        info!(?path, "Config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CatalogResult<()> {
        self.to_pricing_config()
            .validate()
            .map_err(|e| CatalogError::InvalidConfig(e.to_string()))
    }

    /// The pricing constants in the core's form.
    pub fn to_pricing_config(&self) -> PricingConfig {
        PricingConfig {
            tax_rate: TaxRate::from_bps(self.pricing.tax_rate_bps),
            tax_mode: self.pricing.tax_mode,
            spacing: SpacingDefaults {
                eyelet_m: self.pricing.eyelet_spacing_m,
                button_m: self.pricing.button_spacing_m,
            },
        }
    }

    /// Resolved dataset paths.
    pub fn catalog_paths(&self) -> CatalogPaths {
        self.catalogs.paths()
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "cortina", "cortina")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `CORTINA_*` overrides from any key lookup.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("CORTINA_DATA_DIR") {
            debug!(dir = %dir, "Overriding catalog dir from environment");
            self.catalogs.dir = PathBuf::from(dir);
        }
        if let Some(path) = lookup("CORTINA_DESIGNS_PATH") {
            self.catalogs.designs = PathBuf::from(path);
        }
        if let Some(path) = lookup("CORTINA_BOM_PATH") {
            self.catalogs.bom = PathBuf::from(path);
        }
        if let Some(path) = lookup("CORTINA_SUPPLIES_PATH") {
            self.catalogs.supplies = PathBuf::from(path);
        }
        if let Some(path) = lookup("CORTINA_FABRICS_PATH") {
            self.catalogs.fabrics = PathBuf::from(path);
        }

        if let Some(bps) = lookup("CORTINA_TAX_RATE_BPS") {
            match bps.trim().parse::<u32>() {
                Ok(bps) => {
                    debug!(bps, "Overriding tax rate from environment");
                    self.pricing.tax_rate_bps = bps;
                }
                Err(_) => warn!(value = %bps, "Ignoring invalid CORTINA_TAX_RATE_BPS"),
            }
        }
        if let Some(mode) = lookup("CORTINA_TAX_MODE") {
            match mode.parse::<TaxMode>() {
                Ok(parsed) => self.pricing.tax_mode = parsed,
                Err(_) => warn!(mode = %mode, "Unknown tax mode in environment"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.pricing.tax_rate_bps, 1900);
        assert_eq!(config.pricing.tax_mode, TaxMode::Inclusive);
        assert_eq!(config.catalog_paths(), CatalogPaths::in_dir("data"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [pricing]
            tax_mode = "exclusive"
            "#,
        )
        .unwrap();
        assert_eq!(config.pricing.tax_mode, TaxMode::Exclusive);
        assert_eq!(config.pricing.tax_rate_bps, 1900);
        assert_eq!(config.catalogs, CatalogSettings::default());
    }

    #[test]
    fn test_absolute_file_path_is_kept() {
        let mut config = AppConfig::default();
        config.catalogs.fabrics = PathBuf::from("/srv/telas.csv");
        let paths = config.catalog_paths();
        assert_eq!(paths.fabrics, PathBuf::from("/srv/telas.csv"));
        assert_eq!(paths.bom, PathBuf::from("data/bom.csv"));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("CORTINA_DATA_DIR", "/tmp/catalogo"),
            ("CORTINA_TAX_RATE_BPS", "1600"),
            ("CORTINA_TAX_MODE", "exclusive"),
            ("CORTINA_BOM_PATH", "bom_2024.csv"),
        ]);
        let mut config = AppConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.pricing.tax_rate_bps, 1600);
        assert_eq!(config.pricing.tax_mode, TaxMode::Exclusive);
        assert_eq!(config.catalog_paths().bom, PathBuf::from("/tmp/catalogo/bom_2024.csv"));
    }

    #[test]
    fn test_invalid_overrides_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| match key {
            "CORTINA_TAX_RATE_BPS" => Some("diecinueve".to_string()),
            "CORTINA_TAX_MODE" => Some("gross".to_string()),
            _ => None,
        });
        assert_eq!(config.pricing, PricingSettings::default());
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.pricing.tax_rate_bps = 20_000;
        assert!(matches!(config.validate(), Err(CatalogError::InvalidConfig(_))));

        let mut config = AppConfig::default();
        config.pricing.eyelet_spacing_m = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = AppConfig::default();
        config.catalogs.dir = PathBuf::from("/srv/cortina");
        config.pricing.tax_mode = TaxMode::Exclusive;
        config.save(Some(path.clone())).unwrap();

        let loaded = AppConfig::load(Some(path)).unwrap();
        assert_eq!(loaded.catalogs.dir, PathBuf::from("/srv/cortina"));
        assert_eq!(loaded.pricing.tax_mode, TaxMode::Exclusive);
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(Some(dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, CatalogError::ConfigRead { .. }));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[pricing]\ntax_rate_bps = \"mucho\"\n").unwrap();

        assert!(AppConfig::load(Some(path)).is_err());
    }
}
