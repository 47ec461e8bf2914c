//! Rendering retrieval payloads into Hebrew chat answers.

use tia_core::{RetrievalResult, TenderMeta};

/// Character budget for a document preview used when a tender has no title.
const DOC_PREVIEW_CHARS: usize = 120;

/// Render a retrieval payload as a short Hebrew digest.
///
/// Zero documents yield a fixed "nothing relevant" sentence regardless of
/// mode. With `only_count` the answer reports the total alone. Otherwise a
/// header names the total and up to `limit` bullets follow; each bullet
/// prefers the tender title and falls back to a truncated document preview,
/// with a due date and a source link appended when the metadata carries
/// them. Absent fields are omitted outright, never rendered empty.
pub fn summarize(result: &RetrievalResult, limit: usize, only_count: bool) -> String {
    let docs = result.docs();
    let total = docs.len();
    if total == 0 {
        return "לא נמצאו תוצאות רלוונטיות.".to_string();
    }

    if only_count {
        return format!("נמצאו {total} מכרזים רלוונטיים.");
    }

    let mut lines = vec![format!("נמצאו {total} מכרזים רלוונטיים. הנה חלק מהם:")];
    match result.metas().filter(|metas| !metas.is_empty()) {
        Some(metas) => {
            // zip truncates if the metadata sequence is shorter; the header
            // still reports the full document total.
            for (doc, meta) in docs.iter().zip(metas.iter()).take(limit) {
                lines.push(bullet(doc, Some(meta)));
            }
        }
        None => {
            for doc in docs.iter().take(limit) {
                lines.push(bullet(doc, None));
            }
        }
    }
    lines.join("\n")
}

fn bullet(doc: &str, meta: Option<&TenderMeta>) -> String {
    let title = meta
        .and_then(|m| m.title.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let mut line = match title {
        Some(title) => format!("• {title}"),
        None => format!("• {}", doc_preview(doc)),
    };

    if let Some(due) = field(meta, |m| m.due.as_deref()) {
        line.push_str(&format!(" — מועד אחרון: {due}"));
    }
    if let Some(url) = field(meta, |m| m.url.as_deref()) {
        line.push_str(&format!("\nמקור: {url}"));
    }
    line
}

fn field<'a>(
    meta: Option<&'a TenderMeta>,
    get: impl Fn(&'a TenderMeta) -> Option<&'a str>,
) -> Option<&'a str> {
    meta.and_then(get).filter(|value| !value.is_empty())
}

/// Character-based cut; documents are Hebrew and multi-byte.
fn doc_preview(doc: &str) -> String {
    let mut chars = doc.chars();
    let preview: String = chars.by_ref().take(DOC_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tia_core::Hits;

    fn meta(title: Option<&str>, due: Option<&str>, url: Option<&str>) -> TenderMeta {
        TenderMeta {
            title: title.map(str::to_string),
            due: due.map(str::to_string),
            url: url.map(str::to_string),
        }
    }

    fn result_with(docs: Vec<&str>, metas: Option<Vec<TenderMeta>>) -> RetrievalResult {
        let mut result =
            RetrievalResult::from_documents(docs.into_iter().map(str::to_string).collect());
        result.metadatas = metas.map(Hits::Flat);
        result
    }

    #[test]
    fn empty_result_has_fixed_message() {
        let result = RetrievalResult::default();
        assert_eq!(summarize(&result, 3, false), "לא נמצאו תוצאות רלוונטיות.");
        assert_eq!(summarize(&result, 3, true), "לא נמצאו תוצאות רלוונטיות.");
    }

    #[test]
    fn only_count_reports_total_without_bullets() {
        let docs = vec!["א", "ב", "ג", "ד", "ה", "ו", "ז"];
        let result = result_with(docs, None);

        let answer = summarize(&result, 3, true);
        assert_eq!(answer, "נמצאו 7 מכרזים רלוונטיים.");
        assert!(!answer.contains('•'));
    }

    #[test]
    fn header_counts_all_but_bullets_stop_at_limit() {
        let docs = vec!["מסמך א", "מסמך ב", "מסמך ג", "מסמך ד", "מסמך ה"];
        let result = result_with(docs, None);

        let answer = summarize(&result, 3, false);
        assert!(answer.starts_with("נמצאו 5 מכרזים רלוונטיים. הנה חלק מהם:"));
        assert_eq!(answer.matches('•').count(), 3);
    }

    #[test]
    fn bullet_prefers_title_over_document_text() {
        let result = result_with(
            vec!["טקסט גולמי של המסמך"],
            Some(vec![meta(Some("אחזקת גנים ציבוריים"), None, None)]),
        );

        let answer = summarize(&result, 3, false);
        assert!(answer.contains("• אחזקת גנים ציבוריים"));
        assert!(!answer.contains("טקסט גולמי"));
    }

    #[test]
    fn blank_title_falls_back_to_document_text() {
        let result = result_with(
            vec!["תיאור המכרז עצמו"],
            Some(vec![meta(Some("   "), None, None)]),
        );

        let answer = summarize(&result, 3, false);
        assert!(answer.contains("• תיאור המכרז עצמו"));
    }

    #[test]
    fn long_document_is_truncated_with_ellipsis() {
        let long_doc = "א".repeat(150);
        let result = result_with(vec![long_doc.as_str()], None);

        let answer = summarize(&result, 3, false);
        let bullet_line = answer.lines().nth(1).unwrap();
        let body = bullet_line.strip_prefix("• ").unwrap();
        assert!(body.ends_with("..."));
        assert_eq!(body.chars().count(), DOC_PREVIEW_CHARS + 3);
    }

    #[test]
    fn short_document_is_not_padded() {
        let result = result_with(vec!["קצר"], None);
        let answer = summarize(&result, 3, false);
        assert!(answer.contains("• קצר"));
        assert!(!answer.contains("..."));
    }

    #[test]
    fn due_and_url_render_as_suffixes() {
        let result = result_with(
            vec!["מסמך"],
            Some(vec![meta(
                Some("מכרז גינון"),
                Some("2025-09-01"),
                Some("https://example.gov.il/tender/1"),
            )]),
        );

        let answer = summarize(&result, 3, false);
        assert!(answer.contains("• מכרז גינון — מועד אחרון: 2025-09-01"));
        assert!(answer.contains("\nמקור: https://example.gov.il/tender/1"));
    }

    #[test]
    fn empty_metadata_fields_are_omitted() {
        let result = result_with(
            vec!["מסמך בלי כלום"],
            Some(vec![meta(None, Some(""), Some(""))]),
        );

        let answer = summarize(&result, 3, false);
        assert!(!answer.contains("מועד אחרון"));
        assert!(!answer.contains("מקור:"));
    }

    #[test]
    fn empty_metadata_sequence_behaves_as_absent() {
        let result = result_with(vec!["מסמך ראשון"], Some(vec![]));

        let answer = summarize(&result, 3, false);
        assert!(answer.contains("• מסמך ראשון"));
    }

    #[test]
    fn short_metadata_sequence_truncates_bullets_not_total() {
        let result = result_with(
            vec!["מסמך א", "מסמך ב", "מסמך ג"],
            Some(vec![meta(Some("כותרת א"), None, None)]),
        );

        let answer = summarize(&result, 3, false);
        assert!(answer.starts_with("נמצאו 3 מכרזים רלוונטיים. הנה חלק מהם:"));
        assert_eq!(answer.matches('•').count(), 1);
    }

    #[test]
    fn grouped_payload_is_unwrapped_before_rendering() {
        let result: RetrievalResult = serde_json::from_value(serde_json::json!({
            "documents": [["מסמך פנימי"]],
            "metadatas": [[{"title": "כותרת מקוננת"}]]
        }))
        .unwrap();

        let answer = summarize(&result, 3, false);
        assert!(answer.contains("• כותרת מקוננת"));
    }
}
