//! Plain-text rendering of transcript messages, documents and alerts.

use crate::alerts::AlertBucket;
use crate::api::models::{display_category, Alert, Document, Source};
use crate::chat::sources::{cite, CitedSegment};
use crate::chat::{Message, MessageKind};
use std::fmt::Write;

const INDENT: &str = "    ";

pub fn message(msg: &Message) -> String {
    match msg.kind {
        MessageKind::SystemNotice => format!("[notice] {}\n", msg.content),
        MessageKind::User | MessageKind::Assistant => {
            let speaker = if msg.kind == MessageKind::User {
                "You"
            } else {
                "ConTrackt AI"
            };
            format!("{} >\n{}", speaker, answer(&msg.content, &msg.sources))
        }
    }
}

/// Renders an assistant answer, expanding cited segments into source blocks.
pub fn answer(content: &str, sources: &[Source]) -> String {
    let cited = cite(content, sources);
    if let [only] = cited.as_slice() {
        if !only.segment.is_cited() {
            return format!("{}\n", only.segment.body);
        }
    }

    let blocks: Vec<String> = cited.iter().map(source_block).collect();
    blocks.join("\n")
}

fn source_block(cited: &CitedSegment<'_>) -> String {
    let title = cited.segment.title.as_deref().unwrap_or_default();
    let mut out = String::new();

    let _ = write!(out, "  [{}]", title);
    if let Some(url) = cited.source.and_then(|s| s.file_url.as_deref()) {
        let _ = write!(out, " <{}>", url);
    }
    out.push('\n');

    if let Some(source) = cited.source {
        if let Some(reason) = source.reason.as_deref() {
            let _ = writeln!(out, "{INDENT}Why? {}", reason);
        }
        if let Some(snippet) = source.snippet.as_deref() {
            let _ = writeln!(out, "{INDENT}\"...{}...\"", snippet);
        }
    }

    for line in cited.segment.body.lines() {
        let _ = writeln!(out, "{INDENT}| {}", line);
    }
    out
}

pub fn document(doc: &Document) -> String {
    let mut line = format!(
        "#{:<5} {}  ({}, {} pages, uploaded {})",
        doc.id,
        doc.title,
        display_category(&doc.category),
        doc.total_pages,
        doc.uploaded_at
    );
    if let Some(expiry) = doc.expiry_date.as_deref() {
        let _ = write!(line, "  expires {}", expiry);
    }
    line
}

pub fn alert(alert: &Alert) -> String {
    let bucket = alert
        .bucket()
        .map(AlertBucket::label)
        .unwrap_or("Later");
    format!(
        "{:>4}d  {}  ({}, expires {}, {})  [{}]",
        alert.days_remaining,
        alert.title,
        display_category(&alert.category),
        alert.expiry_date,
        alert.status,
        bucket
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{Role, Transcript};

    fn source(title: &str) -> Source {
        Source {
            title: title.to_string(),
            page: 4,
            score: 0.7,
            file_url: Some(format!("https://files.example/{title}")),
            snippet: Some("the term shall be five (5) years".into()),
            reason: Some("Mentions the contract term".into()),
        }
    }

    #[test]
    fn test_plain_answer_verbatim() {
        let out = answer("Line one\n  indented", &[]);
        assert_eq!(out, "Line one\n  indented\n");
    }

    #[test]
    fn test_cited_answer_shows_source_details() {
        let sources = vec![source("msa.pdf")];
        let out = answer("### SOURCE: [msa.pdf]\nThe term is 5 years.", &sources);
        assert!(out.contains("[msa.pdf] <https://files.example/msa.pdf>"));
        assert!(out.contains("Why? Mentions the contract term"));
        assert!(out.contains("\"...the term shall be five (5) years...\""));
        assert!(out.contains("| The term is 5 years."));
    }

    #[test]
    fn test_unmatched_citation_has_no_link() {
        let out = answer("### SOURCE: [Other]\nText", &[source("msa.pdf")]);
        assert!(out.starts_with("  [Other]\n"));
        assert!(!out.contains("Why?"));
    }

    #[test]
    fn test_notice_rendered_distinctly() {
        let mut transcript = Transcript::new();
        transcript.append_system_notice("Filter active: NDAs");
        assert_eq!(message(transcript.last()), "[notice] Filter active: NDAs\n");
    }

    #[test]
    fn test_user_turn_plain() {
        let msg = Message::from_raw(Role::User, "What is the notice period?");
        assert_eq!(message(&msg), "You >\nWhat is the notice period?\n");
    }

    #[test]
    fn test_user_turn_with_marker_segmented() {
        let msg = Message::from_raw(Role::User, "### SOURCE: [draft.pdf]\nIs this clause valid?");
        let out = message(&msg);
        assert!(out.starts_with("You >\n  [draft.pdf]\n"));
        assert!(out.contains("    | Is this clause valid?"));
        assert!(!out.contains("### SOURCE:"));
    }

    #[test]
    fn test_document_line() {
        let doc = Document {
            id: 3,
            title: "Acme Loan".into(),
            category: "loan_agreements".into(),
            uploaded_at: "2024-02-02".into(),
            total_pages: 9,
            effective_date: None,
            expiry_date: Some("2026-02-02".into()),
            file_url: None,
        };
        let line = document(&doc);
        assert!(line.contains("loan agreements"));
        assert!(line.contains("expires 2026-02-02"));
    }

    #[test]
    fn test_alert_line() {
        let a = Alert {
            id: 1,
            title: "Office Lease".into(),
            category: "general".into(),
            expiry_date: "2025-01-10".into(),
            days_remaining: 12,
            status: "active".into(),
            file_url: None,
        };
        let line = alert(&a);
        assert!(line.starts_with("  12d  Office Lease"));
        assert!(line.ends_with("[Critical]"));
    }
}
