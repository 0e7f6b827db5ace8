//! Identity-keyed merge of candidate listings into a session-long store.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};

use crate::types::{Offer, OfferId};

/// Deduplicated listings collected over a session, keyed by id.
///
/// Only grows. Once an id is stored its record is never replaced.
#[derive(Debug, Default, Clone)]
pub struct MergeStore {
    offers: BTreeMap<OfferId, Offer>,
}

impl MergeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.offers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &OfferId) -> bool {
        self.offers.contains_key(id)
    }

    #[must_use]
    pub fn get(&self, id: &OfferId) -> Option<&Offer> {
        self.offers.get(id)
    }

    /// Entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&OfferId, &Offer)> {
        self.offers.iter()
    }

    pub fn offers(&self) -> impl Iterator<Item = &Offer> {
        self.offers.values()
    }
}

/// What one merge did to the store.
#[derive(Debug, Default)]
pub struct MergeReport {
    /// Records inserted by this merge, in candidate order.
    pub newly_merged: Vec<Offer>,
    /// Repeats of an id seen earlier in the same candidate list.
    pub duplicates_in_run: usize,
    /// Records without a usable id. Never merged, never counted as duplicates.
    pub missing_id: usize,
    /// Records whose id was stored by an earlier run.
    pub already_stored: usize,
}

/// Merges one run's candidates into `store`, first occurrence wins.
pub fn merge_run(candidates: Vec<Offer>, store: &mut MergeStore) -> MergeReport {
    let mut report = MergeReport::default();
    let mut seen_this_run: HashSet<OfferId> = HashSet::new();

    for offer in candidates {
        let Some(id) = offer.id() else {
            report.missing_id += 1;
            continue;
        };

        if !seen_this_run.insert(id.clone()) {
            report.duplicates_in_run += 1;
            continue;
        }

        match store.offers.entry(id) {
            Entry::Occupied(_) => report.already_stored += 1,
            Entry::Vacant(slot) => {
                slot.insert(offer.clone());
                report.newly_merged.push(offer);
            }
        }
    }

    if report.missing_id > 0 {
        tracing::warn!(count = report.missing_id, "dropped listings without an id");
    }
    tracing::debug!(
        newly_merged = report.newly_merged.len(),
        duplicates_in_run = report.duplicates_in_run,
        already_stored = report.already_stored,
        store_size = store.len(),
        "merged run"
    );

    report
}
