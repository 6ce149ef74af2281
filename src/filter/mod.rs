//! Filter expressions and path matching
//!
//! # Syntax Overview
//!
//! ```text
//! filter      := simple_path | subselect
//! simple_path := segment ('/' segment)*
//! subselect   := path '(' leaf (',' leaf)* ')'
//! segment     := word | '*'
//! leaf        := word
//! word        := one or more [A-Za-z0-9_] characters
//! ```
//!
//! Parsing flattens every expression into [`Filter`] records collected in a
//! [`FilterSet`]. Matching classifies a node path against every filter and
//! folds the result into a [`MatchDecision`].

mod matcher;
mod parser;
mod path;

pub use matcher::{MatchDecision, MatchType};
pub use parser::{EmptyPolicy, Filter, FilterEntry, FilterOrigin, FilterSet, WILDCARD};
pub use path::FieldPath;
