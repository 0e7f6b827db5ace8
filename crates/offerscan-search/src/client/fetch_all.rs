//! Multi-page fetch with bounded concurrency for `OfferClient`.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use offerscan_core::SearchParameters;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::PageFetchError;
use crate::geo::is_within_radius;
use crate::types::{Offer, SearchPage};

use super::{OfferClient, MAX_PAGES};

/// Caller-supplied limits for one paginated fetch.
///
/// Cancelling the token or passing the deadline abandons every page still in
/// flight; pages already collected are kept.
#[derive(Debug, Clone, Default)]
pub struct FetchBudget {
    cancel: CancellationToken,
    timeout: Option<Duration>,
}

impl FetchBudget {
    #[must_use]
    pub fn new(cancel: CancellationToken, timeout: Option<Duration>) -> Self {
        Self { cancel, timeout }
    }

    /// No deadline and a token nobody else holds.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// A page that contributed no records.
#[derive(Debug)]
pub struct PageFailure {
    pub page: u32,
    pub error: PageFetchError,
}

/// Everything one paginated fetch produced.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// Listings within the radius, in no particular order. May contain the
    /// same id more than once; deduplication happens at merge time.
    pub offers: Vec<Offer>,
    /// Page count announced by page 0, after clamping.
    pub total_pages: u32,
    pub pages_succeeded: u32,
    pub failures: Vec<PageFailure>,
    /// Listings dropped by the radius filter, including those without
    /// coordinates.
    pub outside_radius: usize,
}

impl FetchOutcome {
    /// `true` if any page was abandoned because of cancellation or the
    /// deadline.
    #[must_use]
    pub fn was_interrupted(&self) -> bool {
        self.failures.iter().any(|f| f.error.is_budget_stop())
    }

    fn absorb(&mut self, filtered: FilteredPage) {
        self.offers.extend(filtered.kept);
        self.outside_radius += filtered.dropped;
    }
}

struct FilteredPage {
    kept: Vec<Offer>,
    dropped: usize,
}

impl OfferClient {
    /// Fetches every page for `params` and keeps the listings within the
    /// search radius.
    ///
    /// Page 0 is fetched alone because it announces the page count. Pages
    /// `1..total_pages` are then fetched concurrently, at most
    /// `max_concurrent_pages` at a time. A failed page is recorded in
    /// [`FetchOutcome::failures`] and does not affect its siblings.
    ///
    /// A page 0 without the embedded listing collection means "no results"
    /// and yields an empty outcome.
    pub async fn fetch_all_offers(
        &self,
        params: &SearchParameters,
        budget: &FetchBudget,
    ) -> FetchOutcome {
        let deadline = budget.timeout.map(|t| Instant::now() + t);
        let mut outcome = FetchOutcome::default();

        let first = match self.fetch_page_within(0, params, budget, deadline).await {
            Ok(page) => page,
            Err(error) => {
                tracing::warn!(page = 0, error = %error, "first page failed; run yields no records");
                outcome.failures.push(PageFailure { page: 0, error });
                return outcome;
            }
        };

        let announced = first.total_pages();
        let Some(first_offers) = first.into_offers() else {
            tracing::info!(ort = params.location(), "no embedded listings on first page");
            outcome.pages_succeeded = 1;
            outcome.total_pages = announced.unwrap_or(0);
            return outcome;
        };

        let total_pages = match announced {
            Some(n) if n > MAX_PAGES => {
                tracing::warn!(announced = n, max_pages = MAX_PAGES, "clamping page count");
                MAX_PAGES
            }
            Some(n) => n.max(1),
            None => {
                tracing::warn!("first page has listings but no pagination block; assuming one page");
                1
            }
        };
        outcome.total_pages = total_pages;
        outcome.pages_succeeded = 1;
        outcome.absorb(filter_page(first_offers, params));

        tracing::debug!(total_pages, ort = params.location(), "fetching remaining pages");

        let results: Vec<(u32, Result<FilteredPage, PageFetchError>)> =
            stream::iter(1..total_pages)
                .map(|page| async move {
                    let result = self
                        .fetch_page_within(page, params, budget, deadline)
                        .await
                        .map(|p| filter_page(p.into_offers().unwrap_or_default(), params));
                    (page, result)
                })
                .buffer_unordered(self.max_concurrent_pages)
                .collect()
                .await;

        for (page, result) in results {
            match result {
                Ok(filtered) => {
                    outcome.pages_succeeded += 1;
                    outcome.absorb(filtered);
                }
                Err(error) => {
                    if error.is_budget_stop() {
                        tracing::debug!(page, error = %error, "page abandoned");
                    } else {
                        tracing::warn!(page, error = %error, "page failed; skipping");
                    }
                    outcome.failures.push(PageFailure { page, error });
                }
            }
        }

        outcome.failures.sort_by_key(|f| f.page);
        outcome
    }

    /// One page fetch raced against cancellation and the run deadline.
    async fn fetch_page_within(
        &self,
        page: u32,
        params: &SearchParameters,
        budget: &FetchBudget,
        deadline: Option<Instant>,
    ) -> Result<SearchPage, PageFetchError> {
        let deadline_reached = async {
            match deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            () = budget.cancel.cancelled() => Err(PageFetchError::Cancelled { page }),
            () = deadline_reached => Err(PageFetchError::DeadlineExceeded { page }),
            result = self.fetch_page(page, params) => result,
        }
    }
}

fn filter_page(offers: Vec<Offer>, params: &SearchParameters) -> FilteredPage {
    let radius = f64::from(params.radius_km());
    let before = offers.len();
    let kept: Vec<Offer> = offers
        .into_iter()
        .filter(|o| is_within_radius(o, params.center_lat(), params.center_lon(), radius))
        .collect();
    let dropped = before - kept.len();
    FilteredPage { kept, dropped }
}
