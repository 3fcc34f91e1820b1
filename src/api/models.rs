use serde::{Deserialize, Serialize};

/// A retrieval citation attached to one assistant answer.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Source {
    pub title: String,
    pub page: i64,
    pub score: f64,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ChatRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_ids: Option<Vec<i64>>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub processing_time: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Document {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub uploaded_at: String,
    pub total_pages: i64,
    #[serde(default)]
    pub effective_date: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
}

/// An expiring contract as reported by `GET /alerts`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Alert {
    pub id: i64,
    pub title: String,
    pub category: String,
    /// `YYYY-MM-DD`
    pub expiry_date: String,
    pub days_remaining: i64,
    pub status: String,
    #[serde(default)]
    pub file_url: Option<String>,
}

/// Categories are stored as snake_case slugs; only the first underscore is
/// turned into a space for display.
pub fn display_category(category: &str) -> String {
    category.replacen('_', " ", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_optional_fields() {
        let source: Source = serde_json::from_str(
            r#"{"title": "NDA.pdf", "page": 2, "score": 0.42, "file_url": null}"#,
        )
        .unwrap();
        assert_eq!(source.file_url, None);
        assert_eq!(source.snippet, None);
        assert_eq!(source.reason, None);
        assert_eq!(source.page, 2);
    }

    #[test]
    fn test_chat_request_omits_empty_filters() {
        let request = ChatRequest {
            query: "When does it expire?".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"query": "When does it expire?"}));
    }

    #[test]
    fn test_document_without_dates() {
        let doc: Document = serde_json::from_str(
            r#"{"id": 7, "title": "Lease", "category": "general",
                "uploaded_at": "2024-03-01T10:00:00Z", "total_pages": 12}"#,
        )
        .unwrap();
        assert_eq!(doc.expiry_date, None);
        assert_eq!(doc.total_pages, 12);
    }

    #[test]
    fn test_display_category() {
        assert_eq!(display_category("loan_agreements"), "loan agreements");
        assert_eq!(display_category("a_b_c"), "a b_c");
        assert_eq!(display_category("nda"), "nda");
    }
}
