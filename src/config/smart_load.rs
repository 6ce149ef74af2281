use figment::providers::{Format, Json, Toml, Yaml};
use std::path::Path;

use crate::tree::DocumentFormat;

/// Configuration file provider that picks its parser from the file extension,
/// falling back to sniffing the content for unknown extensions.
///
/// Missing files yield an empty provider, like figment's own file providers.
pub fn auto<P: AsRef<Path>>(path: P) -> SmartProvider {
    let path = path.as_ref();

    let format = DocumentFormat::from_path(path).or_else(|| {
        let content = std::fs::read_to_string(path).ok()?;
        let detected = DocumentFormat::detect(&content);
        tracing::debug!("Detected {:?} for config file {}", detected, path.display());
        detected
    });

    match format {
        Some(DocumentFormat::Json) => SmartProvider::Json(Json::file(path)),
        Some(DocumentFormat::Yaml) => SmartProvider::Yaml(Yaml::file(path)),
        // TOML is the native config format
        Some(DocumentFormat::Toml) | None => SmartProvider::Toml(Toml::file(path)),
    }
}

/// One of figment's file providers, chosen at runtime
pub enum SmartProvider {
    Toml(figment::providers::Data<Toml>),
    Json(figment::providers::Data<Json>),
    Yaml(figment::providers::Data<Yaml>),
}

impl figment::Provider for SmartProvider {
    fn metadata(&self) -> figment::Metadata {
        match self {
            SmartProvider::Toml(p) => p.metadata(),
            SmartProvider::Json(p) => p.metadata(),
            SmartProvider::Yaml(p) => p.metadata(),
        }
    }

    fn data(
        &self,
    ) -> Result<figment::value::Map<figment::Profile, figment::value::Dict>, figment::Error> {
        match self {
            SmartProvider::Toml(p) => p.data(),
            SmartProvider::Json(p) => p.data(),
            SmartProvider::Yaml(p) => p.data(),
        }
    }
}
