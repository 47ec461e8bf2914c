//! Core types for the Tender Intelligence Agent
//!
//! This crate provides the foundational abstractions shared by the rest of
//! the workspace: the error type, the configuration layer, and the
//! retrieval-collaborator contract with its tolerant result payload model.

pub mod config;
pub mod error;
pub mod retrieval;

// Re-exports
pub use config::{DatasetConfig, RetrievalConfig, ServerConfig, TiaConfig};
pub use error::{Error, Result};
pub use retrieval::{Hits, HttpRetriever, RetrievalResult, Retriever, TenderMeta};
