use scraper::ElementRef;

use super::{class_string, element_text};
use crate::sanitize::is_date_like;

/// Class substrings that identify review text, most specific first.
const REVIEW_CLASS_PATTERNS: [&str; 6] = [
    "recommendation_desc",
    "recommendation_desc_text",
    "curator_review",
    "curator_review_desc",
    "blurb",
    "desc",
];

/// Tags considered by the fallback scan.
const FALLBACK_TAGS: [&str; 3] = ["div", "span", "p"];

/// Class substrings marking timestamp fields, skipped by the fallback scan.
const DATE_CLASS_HINTS: [&str; 4] = ["date", "posted", "time", "timestamp"];

/// Number of descendant elements the fallback scan looks at.
pub const FALLBACK_SCAN_LIMIT: usize = 60;

/// Shortest text the fallback scan keeps, in characters.
pub const MIN_FALLBACK_TEXT_CHARS: usize = 8;

#[derive(Debug, Clone)]
struct CandidateText {
    text: String,
    classes: String,
}

/// Picks the text block inside `container` most likely to be the review body.
///
/// Known review classes are tried first. Only when none of them yields text
/// does a generic scan of `div`/`span`/`p` descendants run. Date-like
/// candidates are discarded and the longest survivor wins; an unrelated long
/// block (a disclaimer, say) can therefore outrank a short review. Returns an
/// empty string when nothing survives.
#[must_use]
pub fn pick_best_text(container: ElementRef<'_>) -> String {
    let mut candidates = targeted_candidates(container);
    if candidates.is_empty() {
        candidates = fallback_candidates(container);
    }
    select_longest(candidates)
}

fn descendant_elements(container: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    container.descendants().skip(1).filter_map(ElementRef::wrap)
}

fn targeted_candidates(container: ElementRef<'_>) -> Vec<CandidateText> {
    REVIEW_CLASS_PATTERNS
        .iter()
        .filter_map(|&pattern| {
            descendant_elements(container)
                .find(|el| el.value().classes().any(|class| class.contains(pattern)))
        })
        .filter_map(|el| {
            let text = element_text(el);
            (!text.is_empty()).then(|| CandidateText {
                text,
                classes: class_string(el),
            })
        })
        .collect()
}

fn fallback_candidates(container: ElementRef<'_>) -> Vec<CandidateText> {
    descendant_elements(container)
        .filter(|el| FALLBACK_TAGS.contains(&el.value().name()))
        .take(FALLBACK_SCAN_LIMIT)
        .filter_map(|el| {
            let classes = class_string(el);
            if DATE_CLASS_HINTS.iter().any(|&hint| classes.contains(hint)) {
                return None;
            }
            let text = element_text(el);
            (text.chars().count() >= MIN_FALLBACK_TEXT_CHARS).then_some(CandidateText { text, classes })
        })
        .collect()
}

fn select_longest(candidates: Vec<CandidateText>) -> String {
    let mut best = String::new();
    let mut best_len = 0usize;
    for candidate in candidates {
        if is_date_like(&candidate.text) {
            tracing::trace!(classes = %candidate.classes, "skipping date-like review candidate");
            continue;
        }
        let len = candidate.text.chars().count();
        if len > best_len {
            best_len = len;
            best = candidate.text;
        }
    }
    best
}
