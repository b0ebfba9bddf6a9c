//! Review text cleanup and timestamp detection.
//!
//! Curator blurbs routinely carry pasted links and a `링크:` ("link:") label
//! in front of them. Both are removed so the exported review is prose only,
//! while the number of stripped links is kept as a signal.

use std::sync::LazyLock;

use regex::{Regex, RegexSet};

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s"'<>]+"#).expect("valid url regex"));
static LINK_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"링크\s*:").expect("valid link marker regex"));
static NEWLINE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n+").expect("valid newline regex"));
static TRAILING_JUNK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,\s]+$").expect("valid trailing junk regex"));

static DATE_LIKE_SET: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"^\d{1,2}\s+(January|February|March|April|May|June|July|August|September|October|November|December)(,\s*\d{4})?$",
        r"^\d{4}-\d{2}-\d{2}$",
        r"^\d{4}\.\d{1,2}\.\d{1,2}\.?$",
        r"^\d{4}년\s*\d{1,2}월\s*\d{1,2}일$",
    ])
    .expect("valid date regex set")
});

/// Anything longer than this many characters is treated as prose.
const MAX_DATE_CHARS: usize = 32;

/// Result of [`sanitize_review_text`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizedText {
    pub text: String,
    pub had_url: bool,
    pub url_count: usize,
}

/// Strips URLs and `링크:` markers from raw review text, collapses newline
/// runs, and trims trailing commas and whitespace.
///
/// URL and marker removal repeat until the text stops changing, so a marker
/// splitting a URL cannot leave a URL behind. This makes the function
/// idempotent: feeding `text` back in returns it unchanged with no URLs.
#[must_use]
pub fn sanitize_review_text(raw: &str) -> SanitizedText {
    if raw.is_empty() {
        return SanitizedText::default();
    }

    let mut text = raw.to_owned();
    let mut url_count = 0usize;
    loop {
        url_count += URL_RE.find_iter(&text).count();
        let without_urls = URL_RE.replace_all(&text, "");
        let stripped = LINK_MARKER_RE.replace_all(&without_urls, "").into_owned();
        if stripped == text {
            break;
        }
        text = stripped;
    }

    let collapsed = NEWLINE_RUN_RE.replace_all(&text, "\n");
    let cleaned = TRAILING_JUNK_RE.replace(collapsed.trim(), "").into_owned();

    SanitizedText {
        text: cleaned,
        had_url: url_count > 0,
        url_count,
    }
}

/// Returns `true` when `text` looks like a posting date rather than a review.
///
/// Recognized shapes: `15 January`, `15 January, 2024`, `2024-01-15`,
/// `2024.1.15` (optionally dot-terminated), and `2024년 1월 15일`.
#[must_use]
pub fn is_date_like(text: &str) -> bool {
    let t = text.trim();
    if t.is_empty() || t.chars().count() > MAX_DATE_CHARS {
        return false;
    }
    DATE_LIKE_SET.is_match(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_url_and_link_marker() {
        let out = sanitize_review_text("Great game! https://example.com/x?y=1 링크: see above");
        assert!(out.text.starts_with("Great game!"));
        assert!(out.text.ends_with("see above"));
        assert!(!out.text.contains("https://"));
        assert!(!out.text.contains("링크"));
        assert!(out.had_url);
        assert_eq!(out.url_count, 1);
    }

    #[test]
    fn sanitize_counts_every_url() {
        let out = sanitize_review_text("a http://x.io/1 b https://y.io/2 c https://z.io");
        assert_eq!(out.url_count, 3);
        assert_eq!(out.text, "a  b  c");
    }

    #[test]
    fn sanitize_stops_url_at_quote_and_angle_bracket() {
        let out = sanitize_review_text("see https://x.io/a\"quoted\" and <https://y.io/b>");
        assert_eq!(out.url_count, 2);
        assert_eq!(out.text, "see \"quoted\" and <>");
    }

    #[test]
    fn sanitize_removes_marker_with_spacing() {
        let out = sanitize_review_text("추천합니다\n링크 : https://store.example.com/page");
        assert_eq!(out.text, "추천합니다");
        assert_eq!(out.url_count, 1);
    }

    #[test]
    fn sanitize_collapses_newline_runs() {
        let out = sanitize_review_text("first line\n\n\nsecond line");
        assert_eq!(out.text, "first line\nsecond line");
        assert!(!out.had_url);
    }

    #[test]
    fn sanitize_trims_trailing_commas() {
        let out = sanitize_review_text("  Solid roguelike, ,  ");
        assert_eq!(out.text, "Solid roguelike");
    }

    #[test]
    fn sanitize_empty_input() {
        assert_eq!(sanitize_review_text(""), SanitizedText::default());
    }

    #[test]
    fn sanitize_handles_marker_hiding_a_url() {
        let out = sanitize_review_text("check ht링크:tps://hidden.example/path now");
        assert_eq!(out.text, "check  now");
        assert_eq!(out.url_count, 1);
    }

    #[test]
    fn sanitize_is_idempotent() {
        let inputs = [
            "Great game! https://example.com/x?y=1 링크: see above",
            "Buggy and unbalanced https://x.co/y",
            "line\n\n\nline2,,, ",
            "링링크:크: 리뷰 https://a.b/c",
            "already clean",
            "   ",
        ];
        for input in inputs {
            let first = sanitize_review_text(input);
            let second = sanitize_review_text(&first.text);
            assert_eq!(second.text, first.text, "input: {input:?}");
            assert!(!second.had_url, "input: {input:?}");
            assert_eq!(second.url_count, 0, "input: {input:?}");
        }
    }

    #[test]
    fn date_like_iso() {
        assert!(is_date_like("2024-01-15"));
    }

    #[test]
    fn date_like_rejects_long_text() {
        assert!(!is_date_like(
            "2024-01-15 extra long trailing content making it too long"
        ));
    }

    #[test]
    fn date_like_rejects_korean_prose() {
        assert!(!is_date_like("이것은 리뷰입니다"));
    }

    #[test]
    fn date_like_day_month_with_and_without_year() {
        assert!(is_date_like("3 March"));
        assert!(is_date_like("15 January, 2024"));
        assert!(is_date_like("  28 November,2023 "));
        assert!(!is_date_like("15 Janvier"));
    }

    #[test]
    fn date_like_dotted() {
        assert!(is_date_like("2024.1.5"));
        assert!(is_date_like("2024.01.15."));
        assert!(!is_date_like("24.01.15"));
    }

    #[test]
    fn date_like_korean_date() {
        assert!(is_date_like("2024년 1월 15일"));
        assert!(is_date_like("2024년1월15일"));
    }

    #[test]
    fn date_like_length_cap_is_inclusive() {
        let at_cap = format!("15{}September, 2024", " ".repeat(15));
        assert_eq!(at_cap.chars().count(), MAX_DATE_CHARS);
        assert!(is_date_like(&at_cap));

        let over_cap = format!("15{}September, 2024", " ".repeat(16));
        assert_eq!(over_cap.chars().count(), MAX_DATE_CHARS + 1);
        assert!(!is_date_like(&over_cap));
    }

    #[test]
    fn date_like_empty_is_false() {
        assert!(!is_date_like(""));
        assert!(!is_date_like("   "));
    }
}
