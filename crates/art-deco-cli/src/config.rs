//! Configuration management for the Art Deco CLI
//!
//! Stores backend, embedder, and schema settings in ~/.config/art-deco/config.toml

use anyhow::{Context, Result};
use art_deco_adapters::{ArtDecoConfig, EmbedderKind, WireSchema};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "art-deco";
const CONFIG_FILE: &str = "config.toml";

/// CLI Configuration, persisted as TOML
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub settings: ArtDecoConfig,
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from the default location, or defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let settings: ArtDecoConfig =
            toml::from_str(&content).with_context(|| "Failed to parse config file")?;

        Ok(Self { settings })
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory {:?}", dir))?;
        }

        let content =
            toml::to_string_pretty(&self.settings).context("Failed to serialize config")?;

        fs::write(path, content).with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Settings in effect: file values with environment overrides applied
    pub fn resolved(&self) -> ArtDecoConfig {
        self.settings.clone().with_env_overrides()
    }

    /// Set the REST backend endpoint
    pub fn set_endpoint(&mut self, endpoint: String) {
        self.settings.store.endpoint = endpoint.trim_end_matches('/').to_string();
    }

    /// Set the embedder kind, and its endpoint when given
    pub fn set_embedder(&mut self, kind: EmbedderKind, endpoint: Option<String>) {
        self.settings.embedder.kind = kind;
        if let Some(endpoint) = endpoint {
            self.settings.embedder.endpoint = endpoint.trim_end_matches('/').to_string();
        }
    }

    pub fn set_schema(&mut self, schema: WireSchema) {
        self.settings.store.schema = schema;
    }
}
