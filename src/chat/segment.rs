//! Splits assistant answers on the in-band citation marker.
//!
//! The backend prefixes every cited passage with `### SOURCE:` followed by
//! the document title (often in square brackets) on the same line:
//!
//! ```text
//! ### SOURCE: [Acme MSA]
//! The term is 5 years.
//! ```

/// Literal token that introduces a cited segment.
pub const SOURCE_MARKER: &str = "### SOURCE:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// `None` only for answers that carry no marker at all.
    pub title: Option<String>,
    pub body: String,
}

impl Segment {
    pub fn is_cited(&self) -> bool {
        self.title.is_some()
    }
}

/// Splits `content` into segments in narrative order.
///
/// Without a marker the whole text comes back verbatim as one untitled
/// segment. Otherwise every non-blank fragment between markers becomes a
/// segment, including any text before the first marker.
pub fn segment(content: &str) -> Vec<Segment> {
    if !content.contains(SOURCE_MARKER) {
        return vec![Segment {
            title: None,
            body: content.to_string(),
        }];
    }

    content
        .split(SOURCE_MARKER)
        .filter(|fragment| !fragment.trim().is_empty())
        .map(|fragment| {
            let (title_line, rest) = fragment.split_once('\n').unwrap_or((fragment, ""));
            Segment {
                title: Some(clean_title(title_line)),
                body: rest.trim().to_string(),
            }
        })
        .collect()
}

fn clean_title(line: &str) -> String {
    line.trim().chars().filter(|c| *c != '[' && *c != ']').collect()
}
