//! # TIA Dataset
//!
//! Local tender-table access for the Tender Intelligence Agent.
//!
//! The scraped tender snapshot lives in a CSV file next to the service. The
//! [`LocalCounter`] answers "how many tenders in domain X" questions by
//! scanning that file directly, which keeps counting exact and cheap and
//! leaves retrieval for the questions that actually need it. The file is
//! consulted fresh on every counting question and its absence is a normal
//! condition, not an error.

pub mod counter;
pub mod table;

// Re-exports
pub use counter::LocalCounter;
pub use table::load_rows;
