//! Query augmentation from conversation memory.

use once_cell::sync::Lazy;
use regex::Regex;
use tia_memory::{ConversationMemory, CONTEXT_TURNS};

static WANTS_COUNT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bכמה\b|\bמספר\b").unwrap());

static MENTIONS_DOMAIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"תחום|בנושא|בקטגור(?:יה|יית)").unwrap());

/// Whether the utterance asks for a count ("how many" / "number of").
pub(crate) fn wants_count(utterance: &str) -> bool {
    WANTS_COUNT_RE.is_match(utterance)
}

fn mentions_domain(utterance: &str) -> bool {
    MENTIONS_DOMAIN_RE.is_match(utterance)
}

/// Build the query string actually dispatched to retrieval.
///
/// Two independent augmentations, in this order:
///
/// 1. A counting question that names no domain of its own borrows the last
///    remembered domain as a parenthetical intent hint.
/// 2. When prior turns exist, a transcript of the last few is prepended so
///    the index sees the conversation and not just the current line.
///
/// With no remembered domain and no prior turns the utterance passes through
/// unchanged.
pub fn augment_query(memory: &ConversationMemory, utterance: &str) -> String {
    let mut query = utterance.to_string();

    if wants_count(utterance) && !mentions_domain(utterance) {
        if let Some(domain) = memory.last_domain() {
            query = format!("{query} (כוונה: מדובר בתחום '{domain}')");
        }
    }

    let context = memory.recent_context(CONTEXT_TURNS);
    if !context.is_empty() {
        query = format!("הקשר שיחה קודם:\n{context}\n\nשאלת המשתמש כעת: {query}");
    }

    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_through_without_memory() {
        let memory = ConversationMemory::new();
        assert_eq!(
            augment_query(&memory, "אילו מכרזים חדשים פורסמו השבוע"),
            "אילו מכרזים חדשים פורסמו השבוע"
        );
    }

    #[test]
    fn injects_domain_hint_for_elliptical_count_question() {
        let mut memory = ConversationMemory::new();
        memory.record("מה יש בתחום גינון?", "נמצאו 3 מכרזים רלוונטיים.");

        let query = augment_query(&memory, "כמה יש?");
        assert!(query.contains("כמה יש? (כוונה: מדובר בתחום 'גינון')"));
    }

    #[test]
    fn no_hint_when_domain_is_named_inline() {
        let mut memory = ConversationMemory::new();
        memory.record("מה יש בתחום גינון?", "נמצאו 3 מכרזים רלוונטיים.");

        let query = augment_query(&memory, "כמה יש בנושא תחבורה?");
        assert!(!query.contains("כוונה"));
    }

    #[test]
    fn no_hint_for_non_count_question() {
        let mut memory = ConversationMemory::new();
        memory.record("מה יש בתחום גינון?", "נמצאו 3 מכרזים רלוונטיים.");

        let query = augment_query(&memory, "ספר לי עוד");
        assert!(!query.contains("כוונה"));
    }

    #[test]
    fn prepends_context_block_for_followups() {
        let mut memory = ConversationMemory::new();
        memory.record("שאלה ראשונה", "תשובה ראשונה");

        let query = augment_query(&memory, "שאלה שנייה");
        assert_eq!(
            query,
            "הקשר שיחה קודם:\nמשתמש: שאלה ראשונה\nסוכן: תשובה ראשונה\n\nשאלת המשתמש כעת: שאלה שנייה"
        );
    }

    #[test]
    fn hint_lands_inside_context_block() {
        let mut memory = ConversationMemory::new();
        memory.record("מכרזים בנושא אבטחה", "נמצאו 2 מכרזים רלוונטיים.");

        let query = augment_query(&memory, "מספר המכרזים הפתוחים");
        assert!(query.starts_with("הקשר שיחה קודם:\n"));
        assert!(query.ends_with("שאלת המשתמש כעת: מספר המכרזים הפתוחים (כוונה: מדובר בתחום 'אבטחה')"));
    }

    #[test]
    fn count_marker_requires_word_boundary() {
        let memory = ConversationMemory::new();
        // "מספרה" (hairdresser) contains the letters of "מספר" but is not a
        // count marker.
        assert!(!wants_count("איפה יש מספרה בירושלים"));
        assert!(wants_count("מספר המכרזים הפתוחים"));
    }
}
