use std::io::Write;
use std::path::Path;

use offerscan_search::MergeStore;
use serde_json::{Map, Value};

use crate::ExportError;

/// Writes the stored listings as a pretty-printed JSON object keyed by id.
///
/// # Errors
///
/// - [`ExportError::Io`] if the file cannot be created or flushed.
/// - [`ExportError::Json`] if serialization fails.
pub fn export_offers_json(path: &Path, store: &MergeStore) -> Result<(), ExportError> {
    let records: Map<String, Value> = store
        .iter()
        .map(|(id, offer)| (id.to_string(), offer.raw().clone()))
        .collect();

    let file = std::fs::File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &records)?;
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), records = records.len(), "exported listings");
    Ok(())
}

#[cfg(test)]
mod tests {
    use offerscan_search::{merge_run, Offer};
    use serde_json::json;

    use super::*;
    use crate::test_support::scratch_dir;

    #[test]
    fn writes_records_keyed_by_id() {
        let mut store = MergeStore::new();
        merge_run(
            vec![
                Offer::new(json!({"id": 2, "angebot": {"titel": "Köchin"}})),
                Offer::new(json!({"id": "a-1", "angebot": {"titel": "Maler"}})),
            ],
            &mut store,
        );

        let path = scratch_dir("json").join("offers.json");
        export_offers_json(&path, &store).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Köchin"), "non-ASCII text should be written as is");
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["2"]["angebot"]["titel"], "Köchin");
        assert_eq!(parsed["a-1"]["id"], "a-1");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn write_failure_on_full_device_is_reported() {
        let mut store = MergeStore::new();
        merge_run(vec![Offer::new(json!({"id": 1, "angebot": {"titel": "Koch"}}))], &mut store);

        let err = export_offers_json(Path::new("/dev/full"), &store).unwrap_err();
        assert!(
            matches!(err, ExportError::Io { .. } | ExportError::Json(_)),
            "got {err:?}"
        );
    }
}
