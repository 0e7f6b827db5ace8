//! One search run, and sessions that chain several runs into one store.

use std::time::Duration;

use offerscan_core::SearchParameters;

use crate::aggregate::{aggregate, providers_over_radius, ProviderAnomaly, ProviderTable};
use crate::client::{FetchBudget, OfferClient, PageFailure};
use crate::merge::{merge_run, MergeStore};
use crate::types::Offer;

/// Result of one fetch, filter, and merge cycle.
#[derive(Debug)]
pub struct RunReport {
    pub descriptor: String,
    pub radius_km: u32,
    pub total_pages: u32,
    /// Listings within the radius, before any deduplication.
    pub raw_candidates: usize,
    pub outside_radius: usize,
    /// Listings without a title or provider name.
    pub incomplete: usize,
    pub missing_id: usize,
    pub duplicates_removed: usize,
    /// Listings whose id an earlier run already stored.
    pub already_stored: usize,
    pub newly_merged: usize,
    pub page_failures: Vec<PageFailure>,
    /// Aggregate over this run's newly merged listings only.
    pub stats: ProviderTable,
    pub anomalies: Vec<ProviderAnomaly>,
}

impl RunReport {
    /// `true` if cancellation or the deadline cut the fetch short.
    #[must_use]
    pub fn was_interrupted(&self) -> bool {
        self.page_failures.iter().any(|f| f.error.is_budget_stop())
    }
}

/// Runs one search and merges its results into `store`.
pub async fn run_search(
    client: &OfferClient,
    params: &SearchParameters,
    store: &mut MergeStore,
    budget: &FetchBudget,
) -> RunReport {
    let descriptor = params.descriptor();
    tracing::info!(query = %descriptor, "starting search run");

    let outcome = client.fetch_all_offers(params, budget).await;
    let raw_candidates = outcome.offers.len();

    let (complete, incomplete): (Vec<Offer>, Vec<Offer>) = outcome
        .offers
        .into_iter()
        .partition(|o| o.title().is_some() && o.provider_name().is_some());
    if !incomplete.is_empty() {
        tracing::warn!(count = incomplete.len(), "dropped listings without title or provider");
    }

    let merged = merge_run(complete, store);
    let stats = aggregate(&merged.newly_merged);
    let anomalies = providers_over_radius(&stats, params.radius_km());
    for anomaly in &anomalies {
        tracing::warn!(
            provider = %anomaly.provider,
            count = anomaly.count,
            radius_km = anomaly.radius_km,
            "provider count exceeds search radius"
        );
    }

    let report = RunReport {
        descriptor,
        radius_km: params.radius_km(),
        total_pages: outcome.total_pages,
        raw_candidates,
        outside_radius: outcome.outside_radius,
        incomplete: incomplete.len(),
        missing_id: merged.missing_id,
        duplicates_removed: merged.duplicates_in_run,
        already_stored: merged.already_stored,
        newly_merged: merged.newly_merged.len(),
        page_failures: outcome.failures,
        stats,
        anomalies,
    };

    tracing::info!(
        total_pages = report.total_pages,
        raw = report.raw_candidates,
        new = report.newly_merged,
        duplicates = report.duplicates_removed,
        failed_pages = report.page_failures.len(),
        store_size = store.len(),
        "search run finished"
    );

    report
}

/// Totals over everything a session has stored.
#[derive(Debug)]
pub struct SessionSummary {
    pub total_unique: usize,
    pub total_raw: usize,
    pub total_removed: usize,
    pub stats: ProviderTable,
}

/// A sequence of runs sharing one [`MergeStore`].
#[derive(Debug, Default)]
pub struct Session {
    store: MergeStore,
    descriptors: Vec<String>,
    total_raw: usize,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn store(&self) -> &MergeStore {
        &self.store
    }

    /// Query descriptors of every run, in execution order.
    #[must_use]
    pub fn descriptors(&self) -> &[String] {
        &self.descriptors
    }

    #[must_use]
    pub fn total_raw(&self) -> usize {
        self.total_raw
    }

    pub async fn run(
        &mut self,
        client: &OfferClient,
        params: &SearchParameters,
        budget: &FetchBudget,
    ) -> RunReport {
        let report = run_search(client, params, &mut self.store, budget).await;
        self.descriptors.push(report.descriptor.clone());
        self.total_raw += report.raw_candidates;
        report
    }

    /// Runs every search in order, pausing between runs.
    ///
    /// `on_run` sees each report as soon as its run finishes. Stops early,
    /// without starting further runs, once the budget's token is cancelled.
    pub async fn run_all<F>(
        &mut self,
        client: &OfferClient,
        searches: &[SearchParameters],
        pause: Duration,
        budget: &FetchBudget,
        mut on_run: F,
    ) -> Vec<RunReport>
    where
        F: FnMut(usize, &RunReport),
    {
        let cancel = budget.cancel_token();
        let mut reports = Vec::with_capacity(searches.len());

        for (index, params) in searches.iter().enumerate() {
            if index > 0 && !pause.is_zero() {
                tokio::select! {
                    () = cancel.cancelled() => {}
                    () = tokio::time::sleep(pause) => {}
                }
            }
            if cancel.is_cancelled() {
                tracing::info!(completed = index, remaining = searches.len() - index, "session cancelled");
                break;
            }

            let report = self.run(client, params, budget).await;
            on_run(index, &report);
            reports.push(report);
        }

        reports
    }

    /// Aggregates the whole store.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        let total_unique = self.store.len();
        SessionSummary {
            total_unique,
            total_raw: self.total_raw,
            total_removed: self.total_raw.saturating_sub(total_unique),
            stats: aggregate(self.store.offers()),
        }
    }

    #[must_use]
    pub fn into_store(self) -> MergeStore {
        self.store
    }
}
