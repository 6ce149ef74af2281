//! Document tree the pruner operates on, and its adapters.
//!
//! [`Content`] implements `Serialize` and `Deserialize`, so typed objects and
//! every format in [`DocumentFormat`] convert to and from it through serde.

mod codec;
mod format;
mod node;

pub use format::DocumentFormat;
pub use node::{Content, Node, Scalar};
