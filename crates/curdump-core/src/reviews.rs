use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Recommendation stance a curator attached to a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Recommended,
    NotRecommended,
    Informational,
}

impl Sentiment {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Recommended => "recommended",
            Sentiment::NotRecommended => "not_recommended",
            Sentiment::Informational => "informational",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One curated game recommendation extracted from a results page.
///
/// Field names on the wire (`appid`, `url`, `review`, `type`) match the
/// export format consumed downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Numeric store app id, kept as a string. Never empty.
    #[serde(rename = "appid")]
    pub product_id: String,
    /// Absolute store page URL with the query string removed.
    #[serde(rename = "url")]
    pub product_url: String,
    /// Store page URL tagged with the curator's clan id.
    pub curator_url: String,
    /// Sanitized review body; empty when nothing usable was found.
    #[serde(rename = "review")]
    pub review_text: String,
    /// `true` when the raw review contained at least one URL before stripping.
    pub review_has_url: bool,
    pub review_url_count: usize,
    #[serde(rename = "type")]
    pub sentiment: Sentiment,
}

/// Metadata scraped from a curator's landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuratorInfo {
    pub curator_id: u64,
    pub curator_name: Option<String>,
    pub curator_url: String,
    pub followers: u64,
}

impl CuratorInfo {
    /// Info carrying only the id and landing URL, used when the page could
    /// not be fetched or parsed.
    #[must_use]
    pub fn bare(curator_id: u64, curator_url: impl Into<String>) -> Self {
        Self {
            curator_id,
            curator_name: None,
            curator_url: curator_url.into(),
            followers: 0,
        }
    }

    /// Display name, falling back to `"Curator #<id>"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.curator_name
            .clone()
            .unwrap_or_else(|| format!("Curator #{}", self.curator_id))
    }
}

/// Top-level document written by the JSON exporter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuratorExport {
    pub curator_id: u64,
    pub curator_name: String,
    pub curator_url: String,
    pub total_games: usize,
    pub exported_at: DateTime<Utc>,
    pub games: Vec<ReviewRecord>,
}

impl CuratorExport {
    #[must_use]
    pub fn new(info: &CuratorInfo, games: Vec<ReviewRecord>, exported_at: DateTime<Utc>) -> Self {
        Self {
            curator_id: info.curator_id,
            curator_name: info.display_name(),
            curator_url: info.curator_url.clone(),
            total_games: games.len(),
            exported_at,
            games,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(id: &str, sentiment: Sentiment) -> ReviewRecord {
        ReviewRecord {
            product_id: id.to_string(),
            product_url: format!("https://store.steampowered.com/app/{id}/"),
            curator_url: format!(
                "https://store.steampowered.com/app/{id}/?curator_clanid=42788178"
            ),
            review_text: "Tight combat and a great soundtrack".to_string(),
            review_has_url: false,
            review_url_count: 0,
            sentiment,
        }
    }

    #[test]
    fn sentiment_display_matches_wire_name() {
        assert_eq!(Sentiment::Recommended.to_string(), "recommended");
        assert_eq!(Sentiment::NotRecommended.to_string(), "not_recommended");
        assert_eq!(Sentiment::Informational.to_string(), "informational");
    }

    #[test]
    fn review_record_serializes_with_export_field_names() {
        let record = make_record("620", Sentiment::NotRecommended);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["appid"], "620");
        assert_eq!(value["url"], "https://store.steampowered.com/app/620/");
        assert_eq!(value["review"], "Tight combat and a great soundtrack");
        assert_eq!(value["review_has_url"], false);
        assert_eq!(value["review_url_count"], 0);
        assert_eq!(value["type"], "not_recommended");
        assert!(value.get("product_id").is_none());
    }

    #[test]
    fn display_name_falls_back_to_curator_number() {
        let info = CuratorInfo::bare(30_894_603, "https://store.steampowered.com/curator/30894603/");
        assert_eq!(info.display_name(), "Curator #30894603");
    }

    #[test]
    fn display_name_prefers_scraped_name() {
        let mut info = CuratorInfo::bare(42_788_178, "https://store.steampowered.com/curator/42788178/");
        info.curator_name = Some("퀘이사플레이".to_string());
        assert_eq!(info.display_name(), "퀘이사플레이");
    }

    #[test]
    fn curator_export_counts_games() {
        let info = CuratorInfo::bare(1, "https://store.steampowered.com/curator/1/");
        let games = vec![
            make_record("10", Sentiment::Recommended),
            make_record("20", Sentiment::Informational),
        ];
        let export = CuratorExport::new(&info, games, Utc::now());
        assert_eq!(export.total_games, 2);
        assert_eq!(export.curator_name, "Curator #1");
        assert_eq!(export.games[1].sentiment, Sentiment::Informational);
    }
}
