//! Bounded per-session conversation memory.

use crate::slots;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of remembered (question, answer) turns per session.
pub const TURN_CAPACITY: usize = 8;

/// How many trailing turns participate in a rendered transcript.
pub const CONTEXT_TURNS: usize = 4;

/// Character budget for an answer inside a rendered transcript.
const ANSWER_PREVIEW_CHARS: usize = 200;

/// One completed (question, answer) exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub question: String,
    pub answer: String,
}

/// Short-term memory of a single chat session.
///
/// Keeps the last [`TURN_CAPACITY`] exchanges plus the most recently
/// recognized domain and office slots. Slots only move forward: an utterance
/// without a recognizable slot leaves the previous value in place, so a
/// follow-up like "כמה יש?" still knows which domain the user meant.
#[derive(Debug, Clone, Default)]
pub struct ConversationMemory {
    last_domain: Option<String>,
    last_office: Option<String>,
    turns: VecDeque<Turn>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed exchange.
    ///
    /// Slots found in the question overwrite the remembered ones, the turn is
    /// appended with both sides whitespace-trimmed, and the oldest turn is
    /// evicted once the capacity is reached.
    pub fn record(&mut self, question: &str, answer: &str) {
        let found = slots::extract(question);
        if let Some(domain) = found.domain {
            self.last_domain = Some(domain);
        }
        if let Some(office) = found.office {
            self.last_office = Some(office);
        }

        if self.turns.len() >= TURN_CAPACITY {
            self.turns.pop_front();
        }
        self.turns.push_back(Turn {
            question: question.trim().to_string(),
            answer: answer.trim().to_string(),
        });
    }

    /// Render the last `n` turns as alternating "משתמש:" / "סוכן:" lines.
    ///
    /// Answers are cut to a 200-character preview so one verbose reply cannot
    /// dominate the transcript. Returns an empty string before the first turn.
    pub fn recent_context(&self, n: usize) -> String {
        if self.turns.is_empty() || n == 0 {
            return String::new();
        }

        let skip = self.turns.len().saturating_sub(n);
        let mut lines = Vec::with_capacity((self.turns.len() - skip) * 2);
        for turn in self.turns.iter().skip(skip) {
            lines.push(format!("משתמש: {}", turn.question));
            lines.push(format!(
                "סוכן: {}",
                preview(&turn.answer, ANSWER_PREVIEW_CHARS)
            ));
        }
        lines.join("\n")
    }

    /// Most recently recognized domain phrase, if any utterance carried one.
    pub fn last_domain(&self) -> Option<&str> {
        self.last_domain.as_deref()
    }

    /// Most recently recognized issuing office, if any utterance carried one.
    pub fn last_office(&self) -> Option<&str> {
        self.last_office.as_deref()
    }

    /// Stored turns, oldest first.
    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Character-wise prefix. Answers are Hebrew and multi-byte, so a byte slice
/// could split a codepoint.
fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let memory = ConversationMemory::new();
        assert!(memory.is_empty());
        assert_eq!(memory.last_domain(), None);
        assert_eq!(memory.last_office(), None);
        assert_eq!(memory.recent_context(4), "");
    }

    #[test]
    fn record_trims_both_sides() {
        let mut memory = ConversationMemory::new();
        memory.record("  שאלה  ", "  תשובה  ");
        let turn = memory.turns().next().unwrap();
        assert_eq!(turn.question, "שאלה");
        assert_eq!(turn.answer, "תשובה");
    }

    #[test]
    fn evicts_oldest_beyond_capacity() {
        let mut memory = ConversationMemory::new();
        for i in 0..TURN_CAPACITY + 1 {
            memory.record(&format!("שאלה {i}"), &format!("תשובה {i}"));
        }

        assert_eq!(memory.len(), TURN_CAPACITY);
        let questions: Vec<_> = memory.turns().map(|t| t.question.clone()).collect();
        assert_eq!(questions.first().map(String::as_str), Some("שאלה 1"));
        assert_eq!(
            questions.last().map(String::as_str),
            Some(format!("שאלה {TURN_CAPACITY}").as_str())
        );
    }

    #[test]
    fn slots_update_from_questions() {
        let mut memory = ConversationMemory::new();
        memory.record("מה יש בתחום גינון?", "נמצאו 3 מכרזים");
        assert_eq!(memory.last_domain(), Some("גינון"));

        memory.record("ומה פרסם משרד הבריאות?", "הנה הרשימה");
        assert_eq!(memory.last_office(), Some("משרד הבריאות"));
        // Domain survives an utterance that only mentioned an office.
        assert_eq!(memory.last_domain(), Some("גינון"));
    }

    #[test]
    fn slots_never_revert_on_plain_followup() {
        let mut memory = ConversationMemory::new();
        memory.record("מכרזים בנושא אבטחה", "נמצאו 2");
        memory.record("כמה יש?", "נמצאו 2");
        assert_eq!(memory.last_domain(), Some("אבטחה"));
    }

    #[test]
    fn recent_context_formats_alternating_lines() {
        let mut memory = ConversationMemory::new();
        memory.record("שאלה ראשונה", "תשובה ראשונה");
        memory.record("שאלה שנייה", "תשובה שנייה");

        let context = memory.recent_context(CONTEXT_TURNS);
        assert_eq!(
            context,
            "משתמש: שאלה ראשונה\nסוכן: תשובה ראשונה\nמשתמש: שאלה שנייה\nסוכן: תשובה שנייה"
        );
    }

    #[test]
    fn recent_context_keeps_only_trailing_turns() {
        let mut memory = ConversationMemory::new();
        for i in 0..6 {
            memory.record(&format!("שאלה {i}"), &format!("תשובה {i}"));
        }

        let context = memory.recent_context(CONTEXT_TURNS);
        assert!(!context.contains("שאלה 1"));
        assert!(context.contains("שאלה 2"));
        assert!(context.contains("שאלה 5"));
    }

    #[test]
    fn recent_context_truncates_answers_by_chars() {
        let mut memory = ConversationMemory::new();
        let long_answer = "א".repeat(250);
        memory.record("שאלה", &long_answer);

        let context = memory.recent_context(1);
        let agent_line = context.lines().nth(1).unwrap();
        let body = agent_line.strip_prefix("סוכן: ").unwrap();
        assert_eq!(body.chars().count(), 200);
    }

    #[test]
    fn recent_context_zero_is_empty() {
        let mut memory = ConversationMemory::new();
        memory.record("שאלה", "תשובה");
        assert_eq!(memory.recent_context(0), "");
    }
}
