//! Configuration handling for the wizard

use crate::listing::BusinessKind;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the listing service address
pub const ADDRESS_ENV: &str = "LISTING_SERVICE_ADDRESS";

const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 3_000;

/// User configuration for the wizard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WizardConfig {
    /// Listing service address
    pub service_address: Option<String>,
    /// Connect timeout for the listing service, in milliseconds
    pub connect_timeout_ms: Option<u64>,
    /// Business kind preselected on the start screen
    pub default_business_kind: Option<BusinessKind>,
    /// Region preselected on new listings
    pub default_region: Option<String>,
}

impl WizardConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "listings", "listing-wizard")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`, falling back to defaults when absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: WizardConfig = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save configuration to the default location and return where it went
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path().context("no config directory on this platform")?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Keep command-line choices as the new defaults
    pub fn remember(&mut self, address: Option<&str>, kind: Option<BusinessKind>) {
        if let Some(address) = address {
            self.service_address = Some(address.to_string());
        }
        if kind.is_some() {
            self.default_business_kind = kind;
        }
    }

    /// Resolve the service address: explicit override, then environment,
    /// then config file, then the built-in default
    pub fn resolve_address(&self, cli_override: Option<&str>) -> String {
        cli_override
            .map(str::to_string)
            .or_else(|| std::env::var(ADDRESS_ENV).ok().filter(|a| !a.trim().is_empty()))
            .or_else(|| self.service_address.clone())
            .unwrap_or_else(|| crate::api::DEFAULT_ADDRESS.to_string())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(
            self.connect_timeout_ms
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT_MS),
        )
    }
}
