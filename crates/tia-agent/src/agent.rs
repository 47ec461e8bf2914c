//! The tender agent: one utterance in, one Hebrew answer out.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use tia_core::Retriever;
use tia_dataset::LocalCounter;
use tia_memory::ConversationMemory;

use crate::{augment, summary};

/// Guidance returned when no retrieval backend is wired up.
pub const RETRIEVAL_NOT_READY: &str =
    "החיבור לאינדקס (RAG) לא מוכן. ודאו שמנוע האחזור מוגדר וחושף פונקציית ask(query, k).";

/// Answers user questions about government tenders.
///
/// Per utterance the agent tries the local counter first, then dispatches a
/// memory-augmented query to the retrieval backend and renders the result.
/// Every path, including failures, resolves to a literal Hebrew answer and
/// records the exchange in the session's memory exactly once.
pub struct TenderAgent {
    counter: LocalCounter,
    retriever: Option<Arc<dyn Retriever>>,
    top_k: usize,
    summary_limit: usize,
}

impl TenderAgent {
    pub fn builder() -> TenderAgentBuilder {
        TenderAgentBuilder::default()
    }

    /// Whether a retrieval backend was configured at startup.
    pub fn retrieval_ready(&self) -> bool {
        self.retriever.is_some()
    }

    /// Answer one utterance and record the exchange.
    pub async fn respond(&self, memory: &mut ConversationMemory, utterance: &str) -> String {
        let question = utterance.trim();
        let answer = self.answer(memory, question).await;
        memory.record(question, &answer);
        answer
    }

    async fn answer(&self, memory: &ConversationMemory, question: &str) -> String {
        if let Some(counted) = self.counter.try_count(question) {
            debug!("answered from local tender table");
            return counted;
        }

        let query = augment::augment_query(memory, question);

        let Some(retriever) = &self.retriever else {
            debug!("retrieval not configured, returning operator guidance");
            return RETRIEVAL_NOT_READY.to_string();
        };

        // Count-only framing keys off the user's own words, not the
        // augmented query.
        let only_count = augment::wants_count(question);

        debug!(backend = retriever.name(), k = self.top_k, "dispatching to retrieval");
        match retriever.ask(&query, self.top_k).await {
            Ok(result) => summary::summarize(&result, self.summary_limit, only_count),
            Err(err) => {
                warn!(error = %err, "retrieval failed");
                format!("שגיאה בזמן חיפוש באינדקס: {err}")
            }
        }
    }
}

/// Builder for [`TenderAgent`].
pub struct TenderAgentBuilder {
    csv_path: PathBuf,
    retriever: Option<Arc<dyn Retriever>>,
    top_k: usize,
    summary_limit: usize,
}

impl Default for TenderAgentBuilder {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("data/tenders_details.csv"),
            retriever: None,
            top_k: 5,
            summary_limit: 3,
        }
    }
}

impl TenderAgentBuilder {
    /// Path of the local tender table used for counting questions.
    pub fn csv_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.csv_path = path.into();
        self
    }

    /// Retrieval backend. Leaving it unset keeps the agent usable; retrieval
    /// questions then get the operator-guidance answer.
    pub fn retriever(mut self, retriever: Arc<dyn Retriever>) -> Self {
        self.retriever = Some(retriever);
        self
    }

    /// Result budget passed to the retrieval backend.
    pub fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Maximum number of example bullets in a summarized answer.
    pub fn summary_limit(mut self, summary_limit: usize) -> Self {
        self.summary_limit = summary_limit;
        self
    }

    pub fn build(self) -> TenderAgent {
        TenderAgent {
            counter: LocalCounter::new(self.csv_path),
            retriever: self.retriever,
            top_k: self.top_k,
            summary_limit: self.summary_limit,
        }
    }
}
