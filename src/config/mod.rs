//! Layered configuration
//!
//! Settings are merged with figment from, lowest priority first:
//!
//! 1. the embedded `default-config.toml`
//! 2. `~/.config/fieldcut/config.{toml,json,yaml,yml}`
//! 3. `fieldcut.{toml,json,yaml,yml}` in the working directory
//! 4. a file given with `--config` (any supported format)
//! 5. `FIELDCUT_*` environment variables, nested keys split on `__`
//! 6. command line flags that were actually given

mod loader;
mod overrides;
mod settings;
mod smart_load;

pub use loader::FieldcutConfig;
pub use settings::{
    FilterSettings, Highlight, InputSettings, OutputFormat, OutputSettings, ParallelSettings,
    Settings,
};
