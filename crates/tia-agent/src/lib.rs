//! # TIA Agent
//!
//! The question-answering core of the Tender Intelligence Agent.
//!
//! ## Overview
//!
//! A [`TenderAgent`] turns one Hebrew utterance into one Hebrew answer. It
//! answers counting questions straight from the local tender table, and
//! everything else through the configured retrieval backend after augmenting
//! the query with conversation memory. Failures never escape: an unready
//! backend or a failed search both come back as literal guidance text, and
//! the exchange lands in memory either way.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tia_agent::TenderAgent;
//! use tia_core::HttpRetriever;
//! use tia_memory::ConversationMemory;
//!
//! # async fn run() {
//! let agent = TenderAgent::builder()
//!     .csv_path("data/tenders_details.csv")
//!     .retriever(Arc::new(HttpRetriever::new("http://localhost:9200/ask")))
//!     .build();
//!
//! let mut memory = ConversationMemory::new();
//! let answer = agent.respond(&mut memory, "אילו מכרזים יש בתחום גינון?").await;
//! println!("{answer}");
//! # }
//! ```

pub mod agent;
pub mod augment;
pub mod summary;

// Re-exports
pub use agent::{TenderAgent, TenderAgentBuilder, RETRIEVAL_NOT_READY};
pub use augment::augment_query;
pub use summary::summarize;
