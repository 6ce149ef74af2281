use anyhow::{Context, Result, ensure};
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::Serialize;
use serde::de::Deserialize;
use std::path::Path;

use super::overrides::cli_provider;
use super::settings::Settings;
use super::smart_load;
use crate::tree::{Content, DocumentFormat};

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

const CONFIG_EXTENSIONS: [&str; 4] = ["toml", "json", "yaml", "yml"];

pub struct FieldcutConfig {
    figment: Figment,
}

impl FieldcutConfig {
    /// Merge every configuration layer, lowest priority first:
    /// embedded defaults, user config, repository config, `custom_config`,
    /// `FIELDCUT_*` environment variables, then `cli_overrides`.
    pub fn load<T: Serialize>(
        custom_config: Option<&Path>,
        cli_overrides: Option<T>,
    ) -> Result<Self> {
        tracing::trace!("CONFIG LOAD: Starting");

        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        if let Some(base) = Self::user_config_base_path() {
            figment = Self::merge_candidates(figment, &base);
        }
        figment = Self::merge_candidates(figment, "fieldcut");

        if let Some(path) = custom_config {
            ensure!(path.exists(), "Configuration file not found: {}", path.display());
            tracing::trace!("CONFIG LOAD: Custom config {}", path.display());
            figment = figment.merge(smart_load::auto(path));
        }

        figment = figment.merge(Env::prefixed("FIELDCUT_").split("__"));

        if let Some(overrides) = cli_overrides {
            tracing::trace!("CONFIG LOAD: Applying CLI overrides");
            figment = figment.merge(cli_provider(overrides)?);
        }

        Ok(FieldcutConfig { figment })
    }

    /// Load with no custom file and no overrides
    pub fn load_default() -> Result<Self> {
        Self::load(None, None::<()>)
    }

    /// Typed, validated settings
    pub fn settings(&self) -> Result<Settings> {
        let settings: Settings = self.figment.extract().context("Invalid configuration")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Get a nested object/section as JSON
    pub fn get_section(&self, path: &str) -> Result<serde_json::Value> {
        let value = self.figment.extract_inner(path)?;
        Ok(value)
    }

    /// Get the full merged configuration as a structured value
    pub fn get_full_config(&self) -> Result<serde_json::Value> {
        let value = self.figment.extract()?;
        Ok(value)
    }

    /// Render the merged configuration in `format`
    pub fn export(&self, format: DocumentFormat) -> Result<String> {
        let content = Content::deserialize(self.get_full_config()?)?;
        Ok(format.encode(&content, true)?)
    }

    fn merge_candidates(figment: Figment, base: &str) -> Figment {
        CONFIG_EXTENSIONS.iter().fold(figment, |figment, ext| {
            let path = format!("{base}.{ext}");
            if Path::new(&path).exists() {
                tracing::trace!("CONFIG LOAD: Found {}", path);
                figment.merge(smart_load::auto(&path))
            } else {
                figment
            }
        })
    }

    fn user_config_base_path() -> Option<String> {
        std::env::var("HOME")
            .ok()
            .map(|home| format!("{home}/.config/fieldcut/config"))
    }
}
