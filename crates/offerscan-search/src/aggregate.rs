//! Per-provider statistics over merged listings.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::types::{Offer, OfferId};

/// Distinct ids, titles, and locations seen for one provider.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ProviderStats {
    ids: BTreeSet<OfferId>,
    titles: BTreeSet<String>,
    locations: BTreeSet<String>,
}

impl ProviderStats {
    /// Number of distinct listing ids. Always equals `ids().len()`.
    #[must_use]
    pub fn count(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn ids(&self) -> &BTreeSet<OfferId> {
        &self.ids
    }

    #[must_use]
    pub fn titles(&self) -> &BTreeSet<String> {
        &self.titles
    }

    #[must_use]
    pub fn locations(&self) -> &BTreeSet<String> {
        &self.locations
    }

    /// Alphabetically first title, used as the representative title in
    /// exports.
    #[must_use]
    pub fn first_title(&self) -> Option<&str> {
        self.titles.iter().next().map(String::as_str)
    }
}

/// Provider name to statistics, ordered by name.
pub type ProviderTable = BTreeMap<String, ProviderStats>;

/// Groups listings by provider.
///
/// Listings missing an id, a title, or a provider name are skipped with a
/// warning and never create a provider entry. A missing location is not a
/// reason to skip; the listing just adds no location.
pub fn aggregate<'a, I>(offers: I) -> ProviderTable
where
    I: IntoIterator<Item = &'a Offer>,
{
    let mut table = ProviderTable::new();
    let mut skipped = 0usize;

    for offer in offers {
        let (Some(id), Some(title), Some(provider)) =
            (offer.id(), offer.title(), offer.provider_name())
        else {
            skipped += 1;
            tracing::warn!(
                has_id = offer.id().is_some(),
                has_title = offer.title().is_some(),
                has_provider = offer.provider_name().is_some(),
                "skipping incomplete listing in aggregation"
            );
            continue;
        };

        let stats = table.entry(provider.to_owned()).or_default();
        stats.ids.insert(id);
        stats.titles.insert(title.to_owned());
        if let Some(location) = offer.location_name() {
            stats.locations.insert(location.to_owned());
        }
    }

    tracing::debug!(providers = table.len(), skipped, "aggregated listings");
    table
}

/// A provider whose distinct-listing count exceeds the search radius.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderAnomaly {
    pub provider: String,
    pub count: usize,
    pub radius_km: u32,
}

/// Providers whose count exceeds `radius_km`.
///
/// This compares a listing count with a distance in kilometers. The two are
/// unrelated units; the threshold is kept only because existing users rely
/// on the warning to spot suspicious over-returns from the API.
#[must_use]
pub fn providers_over_radius(table: &ProviderTable, radius_km: u32) -> Vec<ProviderAnomaly> {
    let limit = usize::try_from(radius_km).unwrap_or(usize::MAX);
    table
        .iter()
        .filter(|(_, stats)| stats.count() > limit)
        .map(|(provider, stats)| ProviderAnomaly {
            provider: provider.clone(),
            count: stats.count(),
            radius_km,
        })
        .collect()
}
