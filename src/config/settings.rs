//! Typed view of the merged configuration

use anyhow::{Result, bail, ensure};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::filter::EmptyPolicy;
use crate::tree::DocumentFormat;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub filter: FilterSettings,
    pub output: OutputSettings,
    pub input: InputSettings,
    pub parallel: ParallelSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSettings {
    /// Behaviour when no usable expression is given
    pub empty: EmptyPolicy,
    /// Named filter sets selectable with `--profile`
    #[serde(default)]
    pub profiles: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    pub format: OutputFormat,
    pub pretty: bool,
    pub highlight: Highlight,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSettings {
    /// Extensions picked up when walking directories
    pub extensions: Vec<String>,
    /// Glob patterns skipped when walking directories
    #[serde(default)]
    pub exclude: Vec<String>,
    pub use_gitignore: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallelSettings {
    /// 0 means no limit beyond `thread_percentage`
    pub max_threads: usize,
    pub thread_percentage: u8,
    pub min_documents: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Same as the input document
    Auto,
    Json,
    Yaml,
    Toml,
}

impl OutputFormat {
    #[must_use]
    pub fn resolve(self, input: DocumentFormat) -> DocumentFormat {
        match self {
            OutputFormat::Auto => input,
            OutputFormat::Json => DocumentFormat::Json,
            OutputFormat::Yaml => DocumentFormat::Yaml,
            OutputFormat::Toml => DocumentFormat::Toml,
        }
    }
}

impl From<DocumentFormat> for OutputFormat {
    fn from(format: DocumentFormat) -> Self {
        match format {
            DocumentFormat::Json => OutputFormat::Json,
            DocumentFormat::Yaml => OutputFormat::Yaml,
            DocumentFormat::Toml => OutputFormat::Toml,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    /// Only when stdout is a terminal
    Auto,
    Always,
    Never,
}

impl Highlight {
    #[must_use]
    pub fn enabled(self) -> bool {
        match self {
            Highlight::Auto => atty::is(atty::Stream::Stdout),
            Highlight::Always => true,
            Highlight::Never => false,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (1..=100).contains(&self.parallel.thread_percentage),
            "parallel.thread_percentage must be between 1 and 100, got {}",
            self.parallel.thread_percentage
        );
        ensure!(!self.input.extensions.is_empty(), "input.extensions must not be empty");
        Ok(())
    }
}

impl FilterSettings {
    /// Expressions stored under a profile name
    pub fn profile(&self, name: &str) -> Result<&[String]> {
        match self.profiles.get(name) {
            Some(expressions) => Ok(expressions),
            None if self.profiles.is_empty() => {
                bail!("Unknown filter profile '{}': no profiles are configured", name)
            }
            None => bail!(
                "Unknown filter profile '{}' (available: {})",
                name,
                self.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
            ),
        }
    }
}

impl InputSettings {
    /// Whether a file extension is one of the configured document extensions
    #[must_use]
    pub fn accepts_extension(&self, extension: &str) -> bool {
        self.extensions.iter().any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
