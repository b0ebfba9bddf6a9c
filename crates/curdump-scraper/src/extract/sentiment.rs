use curdump_core::Sentiment;
use scraper::ElementRef;

use super::self_and_ancestors;

/// Number of elements, starting with the container itself, whose classes
/// feed the sentiment vocabulary.
pub const SENTIMENT_WALK_LIMIT: usize = 10;

/// Sentiment assigned when no rule matches.
pub const DEFAULT_SENTIMENT: Sentiment = Sentiment::Recommended;

/// Class tokens accumulated along a container's ancestor chain.
///
/// Matching is by substring over the space-joined tokens, so a class such as
/// `review_negative` counts as mentioning `negative`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassVocabulary {
    joined: String,
}

impl ClassVocabulary {
    /// Collects class tokens from `container` and its ancestors, up to
    /// [`SENTIMENT_WALK_LIMIT`] elements.
    #[must_use]
    pub fn collect(container: ElementRef<'_>) -> Self {
        Self::from_tokens(
            self_and_ancestors(container)
                .take(SENTIMENT_WALK_LIMIT)
                .flat_map(|el| el.value().classes()),
        )
    }

    #[must_use]
    pub fn from_tokens<'a, I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            joined: tokens.into_iter().collect::<Vec<_>>().join(" "),
        }
    }

    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        self.joined.contains(needle)
    }
}

/// One entry of the ordered sentiment decision table.
#[derive(Clone, Copy)]
pub struct SentimentRule {
    pub name: &'static str,
    pub matches: fn(&ClassVocabulary) -> bool,
    pub sentiment: Sentiment,
}

fn is_negative(vocab: &ClassVocabulary) -> bool {
    vocab.mentions("not_recommended") || vocab.mentions("negative")
}

fn is_informational(vocab: &ClassVocabulary) -> bool {
    vocab.mentions("informational")
}

/// Evaluated in order; the first matching rule decides. Negative signals
/// outrank informational ones.
pub const SENTIMENT_RULES: &[SentimentRule] = &[
    SentimentRule {
        name: "negative",
        matches: is_negative,
        sentiment: Sentiment::NotRecommended,
    },
    SentimentRule {
        name: "informational",
        matches: is_informational,
        sentiment: Sentiment::Informational,
    },
];

/// Applies [`SENTIMENT_RULES`] to `vocab`, falling back to [`DEFAULT_SENTIMENT`].
#[must_use]
pub fn classify_vocabulary(vocab: &ClassVocabulary) -> Sentiment {
    SENTIMENT_RULES
        .iter()
        .find(|rule| (rule.matches)(vocab))
        .map_or(DEFAULT_SENTIMENT, |rule| rule.sentiment)
}

/// Classifies the recommendation held by `container` from the classes on
/// its ancestor chain.
#[must_use]
pub fn classify_sentiment(container: ElementRef<'_>) -> Sentiment {
    classify_vocabulary(&ClassVocabulary::collect(container))
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::*;

    fn vocab(tokens: &[&str]) -> ClassVocabulary {
        ClassVocabulary::from_tokens(tokens.iter().copied())
    }

    #[test]
    fn rules_are_ordered_negative_first() {
        let names: Vec<&str> = SENTIMENT_RULES.iter().map(|r| r.name).collect();
        assert_eq!(names, ["negative", "informational"]);
    }

    #[test]
    fn empty_vocabulary_defaults_to_recommended() {
        assert_eq!(classify_vocabulary(&vocab(&[])), Sentiment::Recommended);
    }

    #[test]
    fn not_recommended_token() {
        assert_eq!(
            classify_vocabulary(&vocab(&["recommendation", "not_recommended"])),
            Sentiment::NotRecommended
        );
    }

    #[test]
    fn negative_substring_counts() {
        assert_eq!(
            classify_vocabulary(&vocab(&["review_negative_box"])),
            Sentiment::NotRecommended
        );
    }

    #[test]
    fn informational_token() {
        assert_eq!(
            classify_vocabulary(&vocab(&["recommendation", "informational"])),
            Sentiment::Informational
        );
    }

    #[test]
    fn negative_outranks_informational() {
        assert_eq!(
            classify_vocabulary(&vocab(&["informational", "negative"])),
            Sentiment::NotRecommended
        );
    }

    #[test]
    fn collects_classes_from_ancestors() {
        let doc = Html::parse_fragment(
            r#"<div class="informational"><div class="wrap"><div class="recommendation negative"><a href="/app/1">x</a></div></div></div>"#,
        );
        let selector = Selector::parse("div.recommendation").unwrap();
        let container = doc.select(&selector).next().unwrap();
        let collected = ClassVocabulary::collect(container);
        assert!(collected.mentions("wrap"));
        assert!(collected.mentions("informational"));
        assert_eq!(classify_sentiment(container), Sentiment::NotRecommended);
    }

    #[test]
    fn ancestors_beyond_walk_limit_are_ignored() {
        let mut html = String::from(r#"<div class="negative">"#);
        for _ in 0..SENTIMENT_WALK_LIMIT {
            html.push_str("<div>");
        }
        html.push_str(r#"<div class="recommendation">r</div>"#);
        for _ in 0..=SENTIMENT_WALK_LIMIT {
            html.push_str("</div>");
        }
        let doc = Html::parse_fragment(&html);
        let selector = Selector::parse("div.recommendation").unwrap();
        let container = doc.select(&selector).next().unwrap();
        assert_eq!(classify_sentiment(container), Sentiment::Recommended);
    }
}
