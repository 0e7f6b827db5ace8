use thiserror::Error;

/// Construction-time failures of the search client.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

/// Typed outcome of one failed page request.
///
/// None of these abort a run: the paginator records them per page and the
/// page contributes zero records.
#[derive(Debug, Error)]
pub enum PageFetchError {
    #[error("page {page}: request timed out")]
    Timeout { page: u32 },

    #[error("page {page}: transport error: {source}")]
    Transport {
        page: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("page {page}: unexpected HTTP status {status}")]
    Status { page: u32, status: u16 },

    #[error("page {page}: response body is not a search envelope: {source}")]
    Decode {
        page: u32,
        #[source]
        source: serde_json::Error,
    },

    #[error("page {page}: cancelled")]
    Cancelled { page: u32 },

    #[error("page {page}: fetch deadline exceeded")]
    DeadlineExceeded { page: u32 },
}

impl PageFetchError {
    pub(crate) fn from_transport(page: u32, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            PageFetchError::Timeout { page }
        } else {
            PageFetchError::Transport { page, source }
        }
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        match self {
            PageFetchError::Timeout { page }
            | PageFetchError::Transport { page, .. }
            | PageFetchError::Status { page, .. }
            | PageFetchError::Decode { page, .. }
            | PageFetchError::Cancelled { page }
            | PageFetchError::DeadlineExceeded { page } => *page,
        }
    }

    /// `true` when the page was abandoned by the caller's budget rather than
    /// failing on its own.
    #[must_use]
    pub fn is_budget_stop(&self) -> bool {
        matches!(
            self,
            PageFetchError::Cancelled { .. } | PageFetchError::DeadlineExceeded { .. }
        )
    }
}
