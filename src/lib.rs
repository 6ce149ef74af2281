//! # fieldcut - field projection for structured data
//!
//! fieldcut prunes a hierarchical document down to exactly the fields picked by a
//! set of path filters, keeping the shape of the tree. It works on anything serde
//! can read: typed Rust values, JSON, YAML and TOML documents.
//!
//! ## Filter expressions
//!
//! - `name` selects a top level field
//! - `parent/child` selects a nested field
//! - `parent/*` selects every field below `parent`
//! - `parent(a,b)` selects `a` and `b` below `parent`
//!
//! A bare wildcard combined with a sub-selection narrows the wildcard for that
//! parent: `["*", "owner(id,name)"]` keeps every top level field, but only `id`
//! and `name` inside `owner`.
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use fieldcut::FilterProcessor;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Default)]
//! #[serde(default)]
//! struct Account {
//!     id: u64,
//!     email: Option<String>,
//!     secret: Option<String>,
//! }
//!
//! let processor = FilterProcessor::new(Some(["id", "email"]))?;
//! let account = Account { id: 7, email: Some("a@b.c".into()), secret: Some("x".into()) };
//!
//! let visible: Account = processor.process(&account)?;
//! assert!(visible.secret.is_none());
//!
//! let json = processor.process_as_json(&account)?;
//! assert!(!json.contains("secret"));
//! # Ok::<(), fieldcut::Error>(())
//! ```
//!
//! ## Command line
//!
//! ```bash
//! fieldcut apply -f 'id' -f 'owner(id,name)' response.json
//! fieldcut explain -f '*' -f 'owner(id)' response.json
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod input;
pub mod parallel;
pub mod processor;
pub mod prune;
pub mod tree;

pub use error::{Error, Result};
pub use filter::{
    EmptyPolicy, FieldPath, Filter, FilterEntry, FilterOrigin, FilterSet, MatchDecision, MatchType,
};
pub use processor::FilterProcessor;
pub use prune::{PruneEvent, PruneStats, Pruner};
pub use tree::{Content, DocumentFormat, Node, Scalar};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
