//! Local counting of tenders by domain term.
//!
//! Counting questions ("כמה מכרזים יש בתחום גינון?") are answered straight
//! from the CSV snapshot, bypassing retrieval entirely. Anything that stops
//! this from working, an unmatched pattern, a missing file, unreadable data,
//! yields `None` so the caller falls through to retrieval instead.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::table;

static COUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:כמה|מספר)\s+מכרזים\s+(?:יש\s+)?(?:פתוחים\s+)?(?:ב(?:תחום|נושא)\s+)?(.+)")
        .unwrap()
});

/// Answers "how many tenders" questions from the local tender table.
///
/// The table is re-read on every query; the snapshot on disk is the single
/// source of truth and may change between questions.
#[derive(Debug, Clone)]
pub struct LocalCounter {
    csv_path: PathBuf,
}

impl LocalCounter {
    pub fn new(csv_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
        }
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    /// Try to answer a counting question directly from the table.
    ///
    /// Returns `Some` Hebrew sentence with the count when the utterance is a
    /// counting question and the table is readable, `None` otherwise. A row
    /// counts once when any of its cells contains the domain term as a
    /// case-insensitive substring; the header row never participates.
    pub fn try_count(&self, utterance: &str) -> Option<String> {
        let caps = COUNT_RE.captures(utterance.trim())?;
        let domain = caps[1].trim().trim_end_matches('?').to_string();

        if !self.csv_path.exists() {
            debug!(
                path = %self.csv_path.display(),
                "tender table not present, deferring to retrieval"
            );
            return None;
        }

        let rows = match table::load_rows(&self.csv_path) {
            Ok(rows) => rows,
            Err(err) => {
                warn!(error = %err, "tender table unreadable, deferring to retrieval");
                return None;
            }
        };

        let needle = domain.to_lowercase();
        let count = rows
            .iter()
            .filter(|row| row.iter().any(|cell| cell.to_lowercase().contains(&needle)))
            .count();

        Some(count_message(count, &domain))
    }
}

fn count_message(count: usize, domain: &str) -> String {
    if count > 0 {
        format!("נמצאו כ-{count} מכרזים שמתאימים לתחום “{domain}”.")
    } else {
        format!("לא נמצאו מכרזים תואמים לתחום “{domain}”.")
    }
}
