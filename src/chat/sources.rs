use super::segment::{segment, Segment};
use crate::api::models::Source;

/// A segment paired with the source its title resolved to, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct CitedSegment<'a> {
    pub segment: Segment,
    pub source: Option<&'a Source>,
}

/// Resolves a cleaned citation title to one of the answer's sources.
///
/// Scans `sources` in the order the backend returned them and stops at the
/// first candidate that matches case-insensitively after trimming, or
/// where either title contains the other. When several sources overlap,
/// the earliest one wins.
pub fn find_source<'a>(title: &str, sources: &'a [Source]) -> Option<&'a Source> {
    let wanted = title.trim().to_lowercase();
    sources.iter().find(|source| {
        source.title.trim().to_lowercase() == wanted
            || title.contains(source.title.as_str())
            || source.title.contains(title)
    })
}

/// Segments `content` and resolves every cited segment against `sources`.
/// Plain answers are never looked up.
pub fn cite<'a>(content: &str, sources: &'a [Source]) -> Vec<CitedSegment<'a>> {
    segment(content)
        .into_iter()
        .map(|segment| {
            let source = segment
                .title
                .as_deref()
                .and_then(|title| find_source(title, sources));
            CitedSegment { segment, source }
        })
        .collect()
}
