//! Document formats: detection, decoding, encoding and terminal highlighting.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::node::Content;
use crate::error::{Error, Result};

lazy_static! {
    static ref TOML_TABLE: Regex = Regex::new(r"^\[\[?\s*[A-Za-z_][A-Za-z0-9_.\- ]*\]\]?$")
        .expect("valid TOML table regex");
    static ref TOML_ASSIGNMENT: Regex =
        Regex::new(r#"^[A-Za-z0-9_."'-]+\s*="#).expect("valid TOML assignment regex");
    static ref YAML_MAPPING: Regex = Regex::new(r#"^["']?[^\s:#"'=][^:=]*["']?:(\s|$)"#)
        .expect("valid YAML key regex");
}

/// Structured text formats a document can be read from and written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Json,
    #[value(alias = "yml")]
    Yaml,
    Toml,
}

impl DocumentFormat {
    /// Format implied by a file extension
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "json" => Some(DocumentFormat::Json),
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            "toml" => Some(DocumentFormat::Toml),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension().and_then(|ext| ext.to_str()).and_then(Self::from_extension)
    }

    /// Guess the format of raw document text.
    ///
    /// JSON is recognized by its enclosing brackets; otherwise the first line
    /// that looks like a TOML table/assignment or a YAML mapping/list decides.
    #[must_use]
    pub fn detect(content: &str) -> Option<Self> {
        let trimmed = content.trim();
        let first_line = trimmed.lines().next().unwrap_or_default().trim();

        // A TOML table header also starts with '['
        let object = trimmed.starts_with('{') && trimmed.ends_with('}');
        let array = trimmed.starts_with('[') && trimmed.ends_with(']');
        if (object || array) && !TOML_TABLE.is_match(first_line) {
            return Some(DocumentFormat::Json);
        }

        for line in trimmed.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line == "---" || line.starts_with("- ") || YAML_MAPPING.is_match(line) {
                return Some(DocumentFormat::Yaml);
            }
            if TOML_TABLE.is_match(line) || TOML_ASSIGNMENT.is_match(line) {
                return Some(DocumentFormat::Toml);
            }
        }

        None
    }

    /// Path extension first, then content
    pub fn resolve(path: Option<&Path>, content: &str) -> Result<Self> {
        path.and_then(Self::from_path)
            .or_else(|| Self::detect(content))
            .ok_or_else(|| {
                let name = path.map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());
                Error::UnknownFormat(name)
            })
    }

    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Json => "json",
            DocumentFormat::Yaml => "yaml",
            DocumentFormat::Toml => "toml",
        }
    }

    pub fn decode(&self, input: &str) -> Result<Content> {
        let content = match self {
            DocumentFormat::Json => serde_json::from_str(input)?,
            DocumentFormat::Yaml => serde_yml::from_str(input)?,
            DocumentFormat::Toml => toml::from_str(input)?,
        };
        Ok(content)
    }

    /// Encode a tree. `pretty` only affects JSON and TOML.
    pub fn encode(&self, content: &Content, pretty: bool) -> Result<String> {
        let output = match self {
            DocumentFormat::Json if pretty => serde_json::to_string_pretty(content)?,
            DocumentFormat::Json => serde_json::to_string(content)?,
            DocumentFormat::Yaml => serde_yml::to_string(content)?,
            DocumentFormat::Toml if pretty => toml::to_string_pretty(content)?,
            DocumentFormat::Toml => toml::to_string(content)?,
        };
        Ok(output)
    }

    /// Wrap already-encoded text in 24-bit terminal colour escapes.
    ///
    /// Falls back to the plain text if highlighting fails.
    #[must_use]
    pub fn highlight(&self, text: &str) -> String {
        use syntect::easy::HighlightLines;
        use syntect::highlighting::Style;
        use syntect::util::{LinesWithEndings, as_24_bit_terminal_escaped};
        use two_face::theme::EmbeddedThemeName;
        use two_face::{syntax, theme};

        let ps = syntax::extra_newlines();
        let ts = theme::extra();

        let syntax = ps
            .find_syntax_by_extension(self.extension())
            .unwrap_or_else(|| ps.find_syntax_plain_text());
        let theme = ts.get(EmbeddedThemeName::Base16OceanDark);
        let mut h = HighlightLines::new(syntax, theme);
        let mut highlighted = String::new();

        for line in LinesWithEndings::from(text) {
            let ranges: Vec<(Style, &str)> = match h.highlight_line(line, &ps) {
                Ok(ranges) => ranges,
                Err(err) => {
                    tracing::debug!("Highlighting failed, printing plain text: {}", err);
                    return text.to_string();
                }
            };
            highlighted.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }
        // reset colours so the shell prompt is not tinted
        highlighted.push_str("\x1b[0m");

        highlighted
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for DocumentFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_extension(s.trim()).ok_or_else(|| Error::UnknownFormat(s.to_string()))
    }
}
