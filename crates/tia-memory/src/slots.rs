//! Slot extraction over user utterances.
//!
//! Pure pattern matching with no side effects. An utterance is scanned for a
//! domain phrase ("בתחום X" / "בנושא X" / "תחום X") and an issuing-office
//! phrase (an office token such as משרד or עיריית followed by a name). Both
//! phrases run to the end of the line or the first question mark.

use once_cell::sync::Lazy;
use regex::Regex;

static DOMAIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:ב(?:תחום|נושא)|תחום)\s+([^\n?]+)").unwrap());

static OFFICE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(משרד|עיריית|עירייה|רשות)\s+([^\n?]+)").unwrap());

/// Slots recognized in a single utterance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedSlots {
    pub domain: Option<String>,
    pub office: Option<String>,
}

impl ExtractedSlots {
    pub fn is_empty(&self) -> bool {
        self.domain.is_none() && self.office.is_none()
    }
}

/// Scan an utterance for domain and office phrases.
///
/// The first match wins for each slot independently; either or both may be
/// absent. Captured phrases are whitespace-trimmed, and the office keeps its
/// type token ("משרד החינוך", not just "החינוך").
pub fn extract(utterance: &str) -> ExtractedSlots {
    let domain = DOMAIN_RE
        .captures(utterance)
        .map(|caps| caps[1].trim().to_string());

    let office = OFFICE_RE
        .captures(utterance)
        .map(|caps| format!("{} {}", &caps[1], &caps[2]).trim().to_string());

    ExtractedSlots { domain, office }
}
