//! URL helpers: store links, curator ids, and base-endpoint recovery.

use std::sync::LazyLock;

use curdump_core::DEFAULT_STORE_URL;
use regex::Regex;
use scraper::{Html, Selector};

static BASE_URL_VAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"g_strCuratorBaseURL\s*=\s*"([^"]+)""#).expect("valid base url var regex")
});
static SCHEME_SLASHES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(https?:)/*").expect("valid scheme regex"));
static CURATOR_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"curator/(\d+)").expect("valid curator path regex"));
static CANONICAL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"link[rel~="canonical"][href]"#).expect("valid canonical selector")
});
static OG_URL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[property="og:url"][content]"#).expect("valid og:url selector")
});

/// Upper bound on `\/` unescaping rounds.
const MAX_UNESCAPE_ROUNDS: usize = 10;

/// Canonicalizes a base endpoint recovered from page markup or script.
///
/// Script variables arrive JSON-escaped (`https:\/\/host\/path`), sometimes
/// more than once. Unescapes up to [`MAX_UNESCAPE_ROUNDS`] times, drops any
/// leftover backslashes, forces exactly `scheme://`, and appends one trailing
/// slash.
///
/// ```
/// use curdump_scraper::urls::normalize_base_url;
/// assert_eq!(
///     normalize_base_url(r"https:\/\/example.com\/curator\/1"),
///     "https://example.com/curator/1/"
/// );
/// ```
#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    let mut s = raw.trim().to_owned();
    for _ in 0..MAX_UNESCAPE_ROUNDS {
        if !s.contains("\\/") {
            break;
        }
        s = s.replace("\\/", "/");
    }
    s = s.replace('\\', "");
    let mut s = SCHEME_SLASHES_RE
        .replace(&s, "${1}//")
        .trim()
        .to_owned();
    if !s.ends_with('/') {
        s.push('/');
    }
    s
}

/// Recovers a curator's canonical base endpoint from its landing page.
///
/// Sources, first hit wins: the `g_strCuratorBaseURL` script variable, the
/// canonical link tag, `og:url` metadata, and finally `requested_url`
/// itself. The result is always normalized.
#[must_use]
pub fn resolve_curator_base(page_html: &str, requested_url: &str) -> String {
    if let Some(raw) = BASE_URL_VAR_RE
        .captures(page_html)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
    {
        return normalize_base_url(raw);
    }

    let document = Html::parse_document(page_html);

    let from_meta = document
        .select(&CANONICAL_SELECTOR)
        .find_map(|el| non_empty_attr(el.value().attr("href")))
        .or_else(|| {
            document
                .select(&OG_URL_SELECTOR)
                .find_map(|el| non_empty_attr(el.value().attr("content")))
        });

    match from_meta {
        Some(raw) => normalize_base_url(raw),
        None => {
            tracing::debug!(
                requested_url,
                "no base endpoint in curator page; using requested URL"
            );
            normalize_base_url(requested_url)
        }
    }
}

fn non_empty_attr(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Makes a store href absolute and drops its query string.
///
/// Root-relative hrefs are joined to the store origin. Anything else is
/// passed through minus its query.
#[must_use]
pub fn to_absolute_store_url(href: &str) -> String {
    let h = href.trim();
    let absolute = if h.starts_with('/') {
        format!("{DEFAULT_STORE_URL}{h}")
    } else {
        h.to_owned()
    };
    strip_query(&absolute).to_owned()
}

fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

/// Store page URL for `app_id` tagged with the curator's clan id.
#[must_use]
pub fn curator_review_url(app_id: &str, curator_id: u64) -> String {
    format!("{DEFAULT_STORE_URL}/app/{app_id}/?curator_clanid={curator_id}")
}

/// Fallback store page URL used when an anchor's href is empty.
#[must_use]
pub fn store_app_url(app_id: &str) -> String {
    format!("{DEFAULT_STORE_URL}/app/{app_id}")
}

/// Landing page URL for a curator under the given store origin.
#[must_use]
pub fn curator_page_url(store_url: &str, curator_id: u64) -> String {
    format!("{}/curator/{curator_id}/", store_url.trim_end_matches('/'))
}

/// Accepts either a bare numeric id or any string containing
/// `curator/<digits>` (such as a full curator URL).
#[must_use]
pub fn parse_curator_id(input: &str) -> Option<u64> {
    let input = input.trim();
    if let Some(cap) = CURATOR_PATH_RE.captures(input) {
        return cap.get(1).and_then(|m| m.as_str().parse().ok());
    }
    if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
        return input.parse().ok();
    }
    None
}
