pub mod client;
pub mod curator_info;
pub mod error;
pub mod extract;
mod rate_limit;
pub mod sanitize;
pub mod types;
pub mod urls;

pub use client::{CuratorClient, ProgressFn, FILTERED_ENDPOINT_SUFFIX, MAX_PAGES};
pub use curator_info::parse_curator_info;
pub use error::ScraperError;
pub use extract::{dedupe_records, extract_reviews};
pub use sanitize::{is_date_like, sanitize_review_text, SanitizedText};
pub use types::{ClientSettings, FetchOptions, FilteredEndpoint, FilteredPage};
pub use urls::{normalize_base_url, parse_curator_id, resolve_curator_base};
