//! Paginated acquisition of training offers, radius filtering, merge across runs, and per-provider statistics.

pub mod aggregate;
pub mod client;
pub mod error;
pub mod geo;
pub mod merge;
pub mod run;
pub mod types;

pub use aggregate::{aggregate, providers_over_radius, ProviderAnomaly, ProviderStats, ProviderTable};
pub use client::{ClientSettings, FetchBudget, FetchOutcome, OfferClient, PageFailure};
pub use error::{PageFetchError, SearchError};
pub use geo::{distance_km, is_within_radius};
pub use merge::{merge_run, MergeReport, MergeStore};
pub use run::{run_search, RunReport, Session, SessionSummary};
pub use types::{Offer, OfferId, SearchPage};
