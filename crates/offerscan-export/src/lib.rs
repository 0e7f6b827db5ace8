//! Export sink: provider table as CSV, deduplicated listings as JSON.

pub mod json;
pub mod naming;
pub mod table;

use std::path::PathBuf;

use thiserror::Error;

pub use json::export_offers_json;
pub use naming::{export_file_stem, safe_city};
pub use table::{export_provider_table, write_provider_table};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Creates `dir` and its parents if missing.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the directory cannot be created.
pub fn ensure_export_dir(dir: &std::path::Path) -> Result<(), ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;

    /// A fresh directory under the system temp dir, unique per test.
    pub fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "offerscan-export-{name}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }
}
