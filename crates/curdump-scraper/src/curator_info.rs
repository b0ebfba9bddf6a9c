//! Curator metadata from the landing page.

use std::sync::LazyLock;

use curdump_core::CuratorInfo;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

static FOLLOWER_CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"follower|follow_count|num_followers|followers").expect("valid follower regex")
});
static DIGIT_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\d,]+").expect("valid digit run regex"));
static CURATOR_NAME_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1.curator_name").expect("valid curator name selector"));
static H1_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1").expect("valid h1 selector"));
static CLASSED_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[class]").expect("valid class selector"));

/// Reads the curator's display name and follower count from its landing page.
///
/// Missing fields degrade to `None` / `0`; this never fails.
#[must_use]
pub fn parse_curator_info(page_html: &str, curator_id: u64, page_url: &str) -> CuratorInfo {
    let document = Html::parse_document(page_html);

    let curator_name = document
        .select(&CURATOR_NAME_SELECTOR)
        .next()
        .or_else(|| document.select(&H1_SELECTOR).next())
        .map(stripped_text)
        .filter(|name| !name.is_empty());

    let followers = document
        .select(&CLASSED_SELECTOR)
        .find(|el| el.value().classes().any(|c| FOLLOWER_CLASS_RE.is_match(c)))
        .map_or(0, |el| parse_follower_count(&el.text().collect::<String>()));

    CuratorInfo {
        curator_id,
        curator_name,
        curator_url: page_url.to_owned(),
        followers,
    }
}

fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

/// First run of digits and commas in `text`, separators removed.
fn parse_follower_count(text: &str) -> u64 {
    DIGIT_RUN_RE
        .find(text)
        .map(|m| m.as_str().replace(',', ""))
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(0)
}
