//! # TIA Memory
//!
//! Conversation memory for the Tender Intelligence Agent.
//!
//! ## Overview
//!
//! Every chat session carries a [`ConversationMemory`]: a bounded deque of
//! the last eight (question, answer) turns plus two sticky slots, the last
//! recognized tender domain and the last recognized issuing office. The
//! slots are what let an elliptical follow-up ("כמה יש?") resolve against
//! what the user asked about two turns ago.
//!
//! ## Features
//!
//! - **Bounded turns**: oldest exchanges are evicted silently past capacity
//! - **Sticky slots**: domain and office only ever move forward
//! - **Transcript rendering**: the last few turns as "משתמש:"/"סוכן:" lines,
//!   with long answers cut to a short preview
//!
//! ## Usage
//!
//! ```rust
//! use tia_memory::ConversationMemory;
//!
//! let mut memory = ConversationMemory::new();
//! memory.record(
//!     "אילו מכרזים יש בתחום גינון?",
//!     "נמצאו 3 מכרזים רלוונטיים.",
//! );
//!
//! assert_eq!(memory.last_domain(), Some("גינון"));
//! let transcript = memory.recent_context(4);
//! assert!(transcript.starts_with("משתמש:"));
//! ```

pub mod memory;
pub mod slots;

// Re-exports
pub use memory::{ConversationMemory, Turn, CONTEXT_TURNS, TURN_CAPACITY};
pub use slots::{extract, ExtractedSlots};
