//! Retrieval collaborator contract
//!
//! The agent never talks to an index engine directly; it depends on the
//! [`Retriever`] seam and on the tolerant [`RetrievalResult`] payload model
//! defined here. The engine behind the seam (vector store, keyword index,
//! remote service) is out of scope.

mod http;

pub use http::HttpRetriever;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Retrieval collaborator trait.
///
/// Implementations run a similarity/keyword search over the tender index
/// and return ranked documents with parallel metadata. May fail at runtime;
/// callers convert failures into user-visible text at the dispatch boundary.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Returns the name of the retriever (used in logs)
    fn name(&self) -> &str;

    /// Run a search for `query`, returning up to `k` ranked documents
    async fn ask(&self, query: &str, k: usize) -> Result<RetrievalResult>;
}

/// Result payload produced by a retrieval collaborator.
///
/// Index backends disagree on nesting: some return flat `documents` /
/// `metadatas` sequences, others wrap each in a per-query outer list. Both
/// shapes deserialize; `docs()` / `metas()` read through the ambiguity and
/// always expose flat slices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrievalResult {
    #[serde(default)]
    pub documents: Hits<String>,

    /// Index-aligned with `documents` when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadatas: Option<Hits<TenderMeta>>,
}

impl RetrievalResult {
    /// Result with flat documents and no metadata
    pub fn from_documents(docs: Vec<String>) -> Self {
        Self {
            documents: Hits::Flat(docs),
            metadatas: None,
        }
    }

    /// Normalized view of the returned documents
    pub fn docs(&self) -> &[String] {
        self.documents.as_flat()
    }

    /// Normalized view of the returned metadata, if any was attached
    pub fn metas(&self) -> Option<&[TenderMeta]> {
        self.metadatas.as_ref().map(Hits::as_flat)
    }

    /// How many documents the index returned
    pub fn total(&self) -> usize {
        self.docs().len()
    }
}

/// A hit sequence with one level of optional outer nesting.
///
/// Backends that group results per query return a singleton outer list;
/// only the first group participates in the flat view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Hits<T> {
    Flat(Vec<T>),
    Grouped(Vec<Vec<T>>),
}

impl<T> Hits<T> {
    /// View the hits as a flat slice, unwrapping the outer level if present
    pub fn as_flat(&self) -> &[T] {
        match self {
            Hits::Flat(items) => items,
            Hits::Grouped(groups) => groups.first().map(Vec::as_slice).unwrap_or(&[]),
        }
    }

    pub fn len(&self) -> usize {
        self.as_flat().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_flat().is_empty()
    }
}

impl<T> Default for Hits<T> {
    fn default() -> Self {
        Hits::Flat(Vec::new())
    }
}

impl<T> From<Vec<T>> for Hits<T> {
    fn from(items: Vec<T>) -> Self {
        Hits::Flat(items)
    }
}

/// Per-document metadata attached by the index.
///
/// The scraped dataset labels its fields in Hebrew while newer index builds
/// use English keys; both spellings are accepted on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TenderMeta {
    /// Tender title
    #[serde(default, alias = "שם המכרז", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Submission deadline
    #[serde(default, alias = "מועד אחרון להגשה", skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,

    /// Source link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
