// src/pipeline/search.rs

//! Page aggregation pipeline.
//!
//! Pages are fetched strictly one after another with a pacing delay between
//! requests. A failure on page 1 aborts the run; a failure on any later page
//! drops that page and the run continues. `total` is reported as upstream
//! sent it and is never corrected for dropped pages.

use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::models::{CanonicalEvent, Config, PageEnvelope};
use crate::services::{EventNormalizer, PageFetcher, PageSource, ResultOrderer, SortPolicy};
use crate::utils::time::{Clock, SystemClock};

/// Summary of an aggregation run.
#[derive(Debug, Default)]
pub struct SearchOutcome {
    /// Ordered canonical events
    pub events: Vec<CanonicalEvent>,
    /// Upstream-reported total
    pub total: u64,
    /// Number of pages implied by `total`
    pub page_total: u32,
    /// Pages that failed and were dropped
    pub skipped_pages: Vec<u32>,
}

/// Drives the page loop over a [`PageSource`].
pub struct EventSearch<S> {
    source: S,
    normalizer: EventNormalizer,
    orderer: ResultOrderer,
    keyword_page_size: u32,
    catalog_page_size: u32,
    delay: Duration,
}

impl EventSearch<PageFetcher> {
    /// Build a searcher that talks to the configured upstream using the wall clock.
    pub fn from_config(config: &Config) -> Result<Self> {
        let source = PageFetcher::new(&config.upstream)?;
        Self::with_source(source, config, Arc::new(SystemClock))
    }
}

impl<S: PageSource> EventSearch<S> {
    pub fn with_source(source: S, config: &Config, clock: Arc<dyn Clock>) -> Result<Self> {
        let normalizer = EventNormalizer::new(&config.upstream, config.timezone()?, clock);
        Ok(Self {
            source,
            normalizer,
            orderer: ResultOrderer,
            keyword_page_size: config.search.keyword_page_size.max(1),
            catalog_page_size: config.search.catalog_page_size.max(1),
            delay: Duration::from_millis(config.search.request_delay_ms),
        })
    }

    /// Search events matching `query`, ordered by time.
    pub async fn search_by_keyword(&self, query: &str) -> Result<SearchOutcome> {
        self.aggregate(query, self.keyword_page_size, SortPolicy::Keyword)
            .await
    }

    /// List the whole catalog, ended events last.
    pub async fn search_all(&self) -> Result<SearchOutcome> {
        self.aggregate("", self.catalog_page_size, SortPolicy::Catalog)
            .await
    }

    /// First keyword-search page, undecorated.
    pub async fn fetch_raw(&self, query: &str) -> Result<PageEnvelope> {
        self.source
            .fetch_page(query, 1, self.keyword_page_size)
            .await
    }

    async fn aggregate(
        &self,
        query: &str,
        page_size: u32,
        policy: SortPolicy,
    ) -> Result<SearchOutcome> {
        let first = self.source.fetch_page(query, 1, page_size).await?;

        let total = first.total;
        let page_total = page_count(total, page_size);
        log::debug!("Query {query:?}: {total} events over {page_total} page(s)");

        let mut outcome = SearchOutcome {
            events: self.normalizer.normalize_all(&first.list),
            total,
            page_total,
            skipped_pages: Vec::new(),
        };

        for page_no in 2..=page_total {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            match self.source.fetch_page(query, page_no, page_size).await {
                Ok(page) => outcome
                    .events
                    .extend(self.normalizer.normalize_all(&page.list)),
                Err(error) => {
                    log::warn!("Skipping page {page_no}/{page_total} of {query:?}: {error}");
                    outcome.skipped_pages.push(page_no);
                }
            }
        }

        self.orderer.sort(&mut outcome.events, policy);

        log::info!(
            "Collected {} of {} events ({} page(s) skipped)",
            outcome.events.len(),
            total,
            outcome.skipped_pages.len()
        );
        Ok(outcome)
    }
}

/// `ceil(total / page_size)`, saturating at `u32::MAX`.
fn page_count(total: u64, page_size: u32) -> u32 {
    let pages = total.div_ceil(u64::from(page_size.max(1)));
    u32::try_from(pages).unwrap_or(u32::MAX)
}
