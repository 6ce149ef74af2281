//! One-stop filtering of typed values, JSON values and document text.
//!
//! A [`FilterProcessor`] parses its filter expressions once, when it is
//! built. A malformed expression therefore fails construction, before any
//! source value has been looked at.

use serde::Serialize;
use serde::de::{Deserialize, DeserializeOwned};

use crate::error::Result;
use crate::filter::{EmptyPolicy, FilterEntry, FilterSet};
use crate::prune::{PruneEvent, PruneStats, Pruner};
use crate::tree::{Content, DocumentFormat};

#[derive(Debug, Clone)]
pub struct FilterProcessor {
    filters: FilterSet,
}

impl FilterProcessor {
    /// Build a processor that rejects an empty filter collection.
    ///
    /// `None` fails with [`Error::NullFilterCollection`](crate::Error::NullFilterCollection);
    /// a collection holding only blank entries fails with
    /// [`Error::EmptyFilterSet`](crate::Error::EmptyFilterSet).
    pub fn new<I>(filters: Option<I>) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: FilterEntry,
    {
        Self::with_policy(filters, EmptyPolicy::default())
    }

    pub fn with_policy<I>(filters: Option<I>, policy: EmptyPolicy) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: FilterEntry,
    {
        let filters = FilterSet::from_collection(filters, policy)?;
        tracing::debug!("Parsed {} filters", filters.len());
        Ok(Self { filters })
    }

    #[must_use]
    pub fn from_filter_set(filters: FilterSet) -> Self {
        Self { filters }
    }

    #[must_use]
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    #[must_use]
    pub fn pruner(&self) -> Pruner<'_> {
        Pruner::new(&self.filters)
    }

    /// Prune a tree in place
    pub fn process_content(&self, content: &mut Content) -> PruneStats {
        self.pruner().prune(content)
    }

    /// Filter a typed value into a new value of the same type.
    ///
    /// Fields pruned away must be deserializable when absent, e.g. through
    /// `#[serde(default)]` or `Option`.
    pub fn process<T>(&self, source: &T) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let content = self.process_tree(source)?;
        Ok(serde_json::from_value(serde_json::to_value(&content)?)?)
    }

    /// Filter a typed value, keeping the pruned tree
    pub fn process_tree<T: Serialize + ?Sized>(&self, source: &T) -> Result<Content> {
        let mut content = Content::deserialize(serde_json::to_value(source)?)?;
        self.process_content(&mut content);
        Ok(content)
    }

    pub fn process_value(&self, value: serde_json::Value) -> Result<serde_json::Value> {
        let mut content = Content::deserialize(value)?;
        self.process_content(&mut content);
        Ok(serde_json::to_value(&content)?)
    }

    /// Filter a typed value and encode the result as indented JSON
    pub fn process_as_json<T: Serialize + ?Sized>(&self, source: &T) -> Result<String> {
        self.process_as(source, DocumentFormat::Json, true)
    }

    pub fn process_as_yaml<T: Serialize + ?Sized>(&self, source: &T) -> Result<String> {
        self.process_as(source, DocumentFormat::Yaml, true)
    }

    pub fn process_as_toml<T: Serialize + ?Sized>(&self, source: &T) -> Result<String> {
        self.process_as(source, DocumentFormat::Toml, true)
    }

    pub fn process_as<T: Serialize + ?Sized>(
        &self,
        source: &T,
        format: DocumentFormat,
        pretty: bool,
    ) -> Result<String> {
        let content = self.process_tree(source)?;
        format.encode(&content, pretty)
    }

    /// Decode document text, prune it, and encode it again, possibly in
    /// another format.
    pub fn process_str(
        &self,
        input: &str,
        input_format: DocumentFormat,
        output_format: DocumentFormat,
        pretty: bool,
    ) -> Result<String> {
        let mut content = input_format.decode(input)?;
        let stats = self.process_content(&mut content);
        tracing::trace!("{} of {} nodes retained", stats.retained(), stats.visited);
        output_format.encode(&content, pretty)
    }

    /// Decision taken for every visited node, in document order.
    ///
    /// The source is left alone; pruning runs on a copy.
    #[must_use]
    pub fn explain(&self, source: &Content) -> Vec<PruneEvent> {
        let mut events = Vec::new();
        let mut scratch = source.clone();
        self.pruner().prune_traced(&mut scratch, &mut events);
        events
    }
}
