//! Review-record extraction from a curator results fragment.
//!
//! The feed returns each page of recommendations as a loosely structured
//! HTML fragment. Class names drift between layouts, so extraction is
//! heuristic: every store app link is a record anchor, its nearest
//! recommendation-like ancestor is the record container, and the review and
//! sentiment are read out of that container.
//!
//! The engine is pure. Each call owns its parsed tree and `seen` set, so
//! independent fragments can be extracted concurrently.

mod best_text;
mod container;
mod sentiment;

use std::collections::HashSet;
use std::sync::LazyLock;

use curdump_core::ReviewRecord;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::ScraperError;
use crate::sanitize::{sanitize_review_text, SanitizedText};
use crate::urls::{curator_review_url, store_app_url, to_absolute_store_url};

pub use best_text::{pick_best_text, FALLBACK_SCAN_LIMIT, MIN_FALLBACK_TEXT_CHARS};
pub use container::{locate_container, CONTAINER_WALK_LIMIT};
pub use sentiment::{
    classify_sentiment, classify_vocabulary, ClassVocabulary, SentimentRule, DEFAULT_SENTIMENT,
    SENTIMENT_RULES, SENTIMENT_WALK_LIMIT,
};

static APP_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/app/(\d+)").expect("valid app path regex"));
static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid anchor selector"));

/// Extracts one [`ReviewRecord`] per distinct app id linked from `fragment`.
///
/// Records come back in discovery order. When an app id is linked more than
/// once, only the first anchor produces a record. Anchors without a
/// `/app/<digits>` href are ignored.
///
/// A blank fragment yields no records.
///
/// # Errors
///
/// Returns [`ScraperError::Markup`] when a non-blank fragment contains no
/// elements at all, which is what an error body served in place of results
/// looks like.
pub fn extract_reviews(
    fragment: &str,
    curator_id: u64,
) -> Result<Vec<ReviewRecord>, ScraperError> {
    if fragment.trim().is_empty() {
        return Ok(Vec::new());
    }

    let document = Html::parse_fragment(fragment);
    if !document
        .root_element()
        .descendants()
        .skip(1)
        .any(|node| node.value().is_element())
    {
        return Err(ScraperError::Markup {
            reason: format!("no elements in {} bytes of input", fragment.len()),
        });
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut records = Vec::new();

    for anchor in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(app_id) = app_id_from_href(href) else {
            continue;
        };
        if !seen.insert(app_id) {
            continue;
        }
        records.push(build_record(anchor, href, app_id, curator_id));
    }

    tracing::debug!(
        curator_id,
        records = records.len(),
        "extracted review records from fragment"
    );
    Ok(records)
}

fn app_id_from_href(href: &str) -> Option<&str> {
    APP_PATH_RE
        .captures(href)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}

fn build_record(anchor: ElementRef<'_>, href: &str, app_id: &str, curator_id: u64) -> ReviewRecord {
    let container = locate_container(anchor);
    let raw_review = pick_best_text(container);
    let SanitizedText {
        text,
        had_url,
        url_count,
    } = sanitize_review_text(&raw_review);
    let sentiment = classify_sentiment(container);

    let mut product_url = to_absolute_store_url(href);
    if product_url.is_empty() {
        product_url = store_app_url(app_id);
    }

    ReviewRecord {
        product_id: app_id.to_owned(),
        product_url,
        curator_url: curator_review_url(app_id, curator_id),
        review_text: text,
        review_has_url: had_url,
        review_url_count: url_count,
        sentiment,
    }
}

/// Drops records whose app id was already seen, keeping the first.
///
/// Used to merge records across pages; records with an empty id are dropped.
#[must_use]
pub fn dedupe_records(records: Vec<ReviewRecord>) -> Vec<ReviewRecord> {
    let mut seen: HashSet<String> = HashSet::new();
    records
        .into_iter()
        .filter(|r| !r.product_id.is_empty() && seen.insert(r.product_id.clone()))
        .collect()
}

/// Space-joined class tokens of `element`.
pub(crate) fn class_string(element: ElementRef<'_>) -> String {
    element.value().classes().collect::<Vec<_>>().join(" ")
}

/// Text of `element`: trimmed, non-empty text nodes joined by newlines.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// `element` followed by its element ancestors, nearest first.
pub(crate) fn self_and_ancestors<'a>(
    element: ElementRef<'a>,
) -> impl Iterator<Item = ElementRef<'a>> {
    std::iter::successors(Some(element), |el| el.parent().and_then(ElementRef::wrap))
}

#[cfg(test)]
#[path = "../extract_test.rs"]
mod tests;
