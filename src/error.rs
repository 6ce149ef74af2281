//! Error types for filter parsing, pruning and document encoding.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid filter expression '{expression}': {reason}")]
    InvalidFilterSyntax {
        expression: String,
        reason: &'static str,
    },

    #[error("No usable filter expressions were supplied")]
    EmptyFilterSet,

    #[error("Filter collection is missing")]
    NullFilterCollection,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("TOML parse error: {0}")]
    TomlDecode(#[from] toml::de::Error),

    #[error("TOML encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown document format: {0}")]
    UnknownFormat(String),
}

impl Error {
    pub(crate) fn syntax(expression: &str, reason: &'static str) -> Self {
        Error::InvalidFilterSyntax {
            expression: expression.to_string(),
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
