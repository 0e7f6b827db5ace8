//! Provider table export.

use std::io::Write;
use std::path::Path;

use offerscan_search::ProviderTable;

use crate::ExportError;

const HEADERS: [&str; 5] = [
    "Anbieter",
    "Anzahl Angebote",
    "Titel",
    "Standorte",
    "für Suche verwendeter Link (wiederholend)",
];

/// Writes one CSV row per provider, sorted by provider name. The query
/// descriptor is repeated on every row.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] if a row cannot be written.
pub fn write_provider_table<W: Write>(
    writer: W,
    table: &ProviderTable,
    descriptor: &str,
) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADERS)?;

    for (provider, stats) in table {
        let title = stats.first_title().unwrap_or_default();
        if title.is_empty() {
            tracing::debug!(provider = %provider, "provider has no title");
        }
        let locations = stats
            .locations()
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("; ");
        let count = stats.count().to_string();
        csv.write_record([provider.as_str(), count.as_str(), title, locations.as_str(), descriptor])?;
    }

    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes the provider table to `path`.
///
/// Returns `Ok(false)` without touching the filesystem when the table is
/// empty.
///
/// # Errors
///
/// - [`ExportError::Io`] if the file cannot be created.
/// - [`ExportError::Csv`] if writing fails.
pub fn export_provider_table(
    path: &Path,
    table: &ProviderTable,
    descriptor: &str,
) -> Result<bool, ExportError> {
    if table.is_empty() {
        tracing::info!(path = %path.display(), "no providers to export");
        return Ok(false);
    }

    let file = std::fs::File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_provider_table(std::io::BufWriter::new(file), table, descriptor)?;

    tracing::info!(path = %path.display(), providers = table.len(), "exported provider table");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use offerscan_search::{aggregate, Offer};
    use serde_json::json;

    use super::*;
    use crate::test_support::scratch_dir;

    fn table() -> ProviderTable {
        let offers = vec![
            Offer::new(json!({
                "id": 1,
                "angebot": {"titel": "Koch", "bildungsanbieter": {"name": "Zeta GmbH"}},
                "adresse": {"ortStrasse": {"name": "Berlin"}}
            })),
            Offer::new(json!({
                "id": 2,
                "angebot": {"titel": "Baecker", "bildungsanbieter": {"name": "Alpha e.V."}},
                "adresse": {"ortStrasse": {"name": "Potsdam"}}
            })),
            Offer::new(json!({
                "id": 3,
                "angebot": {"titel": "Konditor", "bildungsanbieter": {"name": "Alpha e.V."}},
                "adresse": {"ortStrasse": {"name": "Berlin"}}
            })),
        ];
        aggregate(&offers)
    }

    #[test]
    fn rows_are_sorted_with_counts_and_descriptor() {
        let mut out = Vec::new();
        write_provider_table(&mut out, &table(), "ort=Berlin").unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Anbieter,Anzahl Angebote,Titel,Standorte,"));
        assert_eq!(lines[1], "Alpha e.V.,2,Baecker,Berlin; Potsdam,ort=Berlin");
        assert_eq!(lines[2], "Zeta GmbH,1,Koch,Berlin,ort=Berlin");
    }

    #[test]
    fn empty_table_writes_no_file() {
        let dir = scratch_dir("empty-table");
        let path = dir.join("stats.csv");
        let written = export_provider_table(&path, &ProviderTable::new(), "q").unwrap();
        assert!(!written);
        assert!(!path.exists());
    }

    #[test]
    fn export_writes_file() {
        let dir = scratch_dir("table");
        let path = dir.join("stats.csv");
        assert!(export_provider_table(&path, &table(), "q").unwrap());
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Zeta GmbH"));
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let path = scratch_dir("missing").join("nope").join("stats.csv");
        let err = export_provider_table(&path, &table(), "q").unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }), "got {err:?}");
    }
}
