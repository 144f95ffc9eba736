use crate::core::query::{FALLBACK_SYMBOLS, RequestBuilder};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.exchangeratesapi.io";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

fn default_fallback_symbols() -> Vec<String> {
    FALLBACK_SYMBOLS.iter().map(|s| s.to_string()).collect()
}

fn default_append_fallback() -> bool {
    true
}

fn default_open_chart() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default = "default_fallback_symbols")]
    pub fallback_symbols: Vec<String>,
    #[serde(default = "default_append_fallback")]
    pub append_fallback_symbols: bool,
    /// Where CSV and HTML files go. Defaults to the working directory.
    pub output_dir: Option<String>,
    /// Open each written chart in the default browser.
    #[serde(default = "default_open_chart")]
    pub open_chart: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            provider: ProviderConfig::default(),
            fallback_symbols: default_fallback_symbols(),
            append_fallback_symbols: default_append_fallback(),
            output_dir: None,
            open_chart: default_open_chart(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to the
    /// built-in defaults when no file has been created there.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "fxhist", "fxhist")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn output_dir(&self) -> Result<PathBuf> {
        match &self.output_dir {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => std::env::current_dir().context("Could not determine working directory"),
        }
    }

    pub fn request_builder(&self) -> RequestBuilder {
        RequestBuilder::new(
            self.fallback_symbols.clone(),
            self.append_fallback_symbols,
        )
    }
}
