//! Multi-page review fetch loop for `CuratorClient`.

use std::time::Duration;

use curdump_core::ReviewRecord;

use crate::error::ScraperError;
use crate::extract::{dedupe_records, extract_reviews};
use crate::types::FetchOptions;

use super::CuratorClient;

/// Maximum number of feed pages requested in one run, counting skipped pages.
/// Bounds the loop when the advertised total is wrong.
///
/// Each page may be retried up to `max_retries` times, so the worst-case
/// request count is `MAX_PAGES * (1 + max_retries)`.
pub const MAX_PAGES: usize = 1000;

/// Progress callback invoked after each page with `(fetched, total)`.
pub type ProgressFn<'a> = &'a (dyn Fn(u64, u64) + Send + Sync);

impl CuratorClient {
    /// Fetches every review record a curator has published.
    ///
    /// Reads the advertised total first; a total of zero returns an empty
    /// list. Pages are then requested at offsets `0, batch, 2*batch, ...`
    /// while the offset is below the total. A page that fails (after
    /// retries) or is not markup is logged and skipped. The loop stops early
    /// when the feed reports `success: false`, returns an empty fragment, or
    /// a page yields no records. Records are merged across pages keeping the
    /// first occurrence of each app id.
    ///
    /// `progress` is called after each successful page with
    /// `(min(offset, total), total)`.
    ///
    /// # Errors
    ///
    /// - Propagates errors from [`Self::resolve_filtered_url`] and
    ///   [`Self::fetch_total_count`].
    /// - Returns [`ScraperError::PaginationLimit`] if more than
    ///   [`MAX_PAGES`] pages would be requested.
    pub async fn fetch_all_reviews(
        &self,
        curator_id: u64,
        options: &FetchOptions,
        progress: Option<ProgressFn<'_>>,
    ) -> Result<Vec<ReviewRecord>, ScraperError> {
        let endpoint = self.resolve_filtered_url(curator_id).await?;
        let total = self.fetch_total_count(&endpoint, &options.sort).await?;
        if total == 0 {
            tracing::info!(curator_id, "curator feed reports no reviews");
            return Ok(Vec::new());
        }
        tracing::info!(curator_id, total, "fetching curator reviews");

        let batch = u64::from(options.batch_size.max(1));
        let mut all_records: Vec<ReviewRecord> = Vec::new();
        let mut start = 0u64;
        let mut page_count = 0usize;

        while start < total {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(ScraperError::PaginationLimit {
                    curator_id,
                    max_pages: MAX_PAGES,
                });
            }

            if page_count > 1 && options.inter_request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(options.inter_request_delay_ms)).await;
            }

            let page = match self
                .fetch_filtered_page(&endpoint, start, options.batch_size.max(1), &options.sort)
                .await
            {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!(curator_id, start, error = %e, "page fetch failed — skipping");
                    start += batch;
                    continue;
                }
            };

            if !page.success {
                tracing::warn!(curator_id, start, "feed reported failure — stopping");
                break;
            }
            if page.results_html.is_empty() {
                tracing::debug!(curator_id, start, "empty results fragment — stopping");
                break;
            }

            let records = match extract_reviews(&page.results_html, curator_id) {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!(curator_id, start, error = %e, "page extraction failed — skipping");
                    start += batch;
                    continue;
                }
            };
            let fetched = records.len();
            all_records.extend(records);

            start += batch;
            let done = start.min(total);
            tracing::info!(
                curator_id,
                progress = done,
                total,
                collected = all_records.len(),
                "fetched curator review page"
            );
            if let Some(report) = progress {
                report(done, total);
            }

            if fetched == 0 {
                break;
            }
        }

        let unique = dedupe_records(all_records);
        tracing::info!(curator_id, unique = unique.len(), "finished curator review fetch");
        Ok(unique)
    }
}
