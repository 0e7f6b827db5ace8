//! `offerscan search`: resolve the input mode, run the session, export.
//!
//! Parameter errors abort before any request is sent. Page failures inside
//! a run are reported in the progress output and never abort the session.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{ArgGroup, Args};
use tokio_util::sync::CancellationToken;

use offerscan_core::{AppConfig, SearchParameters};
use offerscan_export::{ensure_export_dir, export_file_stem, export_offers_json, export_provider_table};
use offerscan_search::{ClientSettings, FetchBudget, OfferClient, RunReport, Session, SessionSummary};

#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("input")
        .args(["link", "links_file", "searches", "city"])
        .required(true)
        .multiple(false)
))]
pub struct SearchArgs {
    /// Search link copied from the website; repeat to chain several searches
    #[arg(long)]
    pub link: Vec<String>,

    /// File with one search link per line; blank lines are ignored
    #[arg(long)]
    pub links_file: Option<PathBuf>,

    /// YAML file listing searches as links or manual fields
    #[arg(long)]
    pub searches: Option<PathBuf>,

    /// Location name sent to the search endpoint
    #[arg(long, requires_all = ["job_id", "lat", "lon"])]
    pub city: Option<String>,

    /// Job category id
    #[arg(long)]
    pub job_id: Option<String>,

    /// Search radius in kilometers
    #[arg(long, default_value = "50")]
    pub radius: String,

    /// Latitude of the search center
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<String>,

    /// Longitude of the search center
    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<String>,

    /// Education-type code (see `offerscan offer-types`)
    #[arg(long, default_value = "109")]
    pub offer_type: String,

    /// Directory for exported files (defaults to OFFERSCAN_EXPORT_DIR)
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Also write the deduplicated listings as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the resolved parameters without sending any request
    #[arg(long)]
    pub dry_run: bool,
}

/// One resolved search and the text that identifies it in exports.
#[derive(Debug, Clone)]
pub(crate) struct PlannedSearch {
    pub descriptor: String,
    pub params: SearchParameters,
}

/// Turns the chosen input mode into validated searches.
///
/// # Errors
///
/// Returns an error if any link or field fails validation, or a file cannot
/// be read. Nothing is partially resolved.
pub(crate) fn resolve_searches(args: &SearchArgs) -> anyhow::Result<Vec<PlannedSearch>> {
    if !args.link.is_empty() {
        return resolve_links(args.link.iter().map(String::as_str));
    }

    if let Some(path) = &args.links_file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read links file {}", path.display()))?;
        let planned = resolve_links(content.lines().map(str::trim).filter(|l| !l.is_empty()))?;
        if planned.is_empty() {
            anyhow::bail!("links file {} contains no links", path.display());
        }
        return Ok(planned);
    }

    if let Some(path) = &args.searches {
        let file = offerscan_core::load_searches(path)?;
        return file
            .searches
            .iter()
            .map(|entry| {
                Ok(PlannedSearch {
                    descriptor: entry.descriptor()?,
                    params: entry.to_parameters()?,
                })
            })
            .collect();
    }

    let (Some(city), Some(job_id), Some(lat), Some(lon)) =
        (&args.city, &args.job_id, &args.lat, &args.lon)
    else {
        anyhow::bail!("provide --link, --links-file, --searches, or --city with --job-id --lat --lon");
    };
    let params = SearchParameters::from_fields(city, job_id, &args.radius, lat, lon, &args.offer_type)?;
    Ok(vec![PlannedSearch {
        descriptor: params.descriptor(),
        params,
    }])
}

fn resolve_links<'a>(links: impl Iterator<Item = &'a str>) -> anyhow::Result<Vec<PlannedSearch>> {
    links
        .enumerate()
        .map(|(i, link)| {
            let params = offerscan_core::parse_search_link(link)
                .with_context(|| format!("link #{} is not a usable search link", i + 1))?;
            Ok(PlannedSearch {
                descriptor: link.to_owned(),
                params,
            })
        })
        .collect()
}

pub(crate) fn print_parameters(params: &SearchParameters) {
    for (label, value) in params.labelled_fields() {
        println!("  {label:<12} {value}");
    }
}

fn print_run_report(index: usize, total: usize, report: &RunReport) {
    println!("[{}/{total}] {}", index + 1, report.descriptor);
    println!(
        "  pages: {} ({} failed), in radius: {}, outside radius: {}",
        report.total_pages,
        report.page_failures.len(),
        report.raw_candidates,
        report.outside_radius
    );
    println!(
        "  duplicates removed: {}, already stored: {}, incomplete: {}, without id: {}",
        report.duplicates_removed, report.already_stored, report.incomplete, report.missing_id
    );
    println!(
        "  new offers: {} from {} providers",
        report.newly_merged,
        report.stats.len()
    );
    for anomaly in &report.anomalies {
        println!(
            "  warning: {} has {} offers, more than the radius value {}",
            anomaly.provider, anomaly.count, anomaly.radius_km
        );
    }
    if report.was_interrupted() {
        println!("  run was cut short; results are partial");
    }
}

fn print_summary(summary: &SessionSummary) {
    println!(
        "total: {} unique offers from {} providers ({} raw, {} duplicates removed)",
        summary.total_unique,
        summary.stats.len(),
        summary.total_raw,
        summary.total_removed
    );
}

/// Runs every planned search in one session and exports the merged result.
///
/// # Errors
///
/// Returns an error for invalid input, client construction failure, or
/// export I/O failure. Failed pages are reported, not returned.
pub(crate) async fn run_search_command(config: &AppConfig, args: &SearchArgs) -> anyhow::Result<()> {
    let planned = resolve_searches(args)?;

    if args.dry_run {
        for (i, search) in planned.iter().enumerate() {
            println!("dry-run: search {} of {}: {}", i + 1, planned.len(), search.descriptor);
            print_parameters(&search.params);
        }
        return Ok(());
    }

    let client = OfferClient::new(&ClientSettings::from_app_config(config))?;

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupt received; stopping after in-flight pages");
                cancel.cancel();
            }
        }
    });
    let budget = FetchBudget::new(cancel, config.fetch_deadline_secs.map(Duration::from_secs));

    let params: Vec<SearchParameters> = planned.iter().map(|s| s.params.clone()).collect();
    let total = planned.len();
    let mut session = Session::new();
    let reports = session
        .run_all(
            &client,
            &params,
            Duration::from_millis(config.run_pause_ms),
            &budget,
            |i, report| print_run_report(i, total, report),
        )
        .await;

    if reports.len() < total {
        println!("stopped after {} of {total} searches", reports.len());
    }

    let summary = session.summary();
    print_summary(&summary);

    let export_dir = args.export_dir.clone().unwrap_or_else(|| config.export_dir.clone());
    export_session(&export_dir, &planned, &session, &summary, args.json)
}

fn export_session(
    dir: &Path,
    planned: &[PlannedSearch],
    session: &Session,
    summary: &SessionSummary,
    with_json: bool,
) -> anyhow::Result<()> {
    let Some(first) = planned.first() else {
        return Ok(());
    };
    if summary.stats.is_empty() {
        println!("no data to export");
        return Ok(());
    }

    ensure_export_dir(dir)?;
    let stem = export_file_stem(
        chrono::Local::now().naive_local(),
        first.params.job_category_id(),
        first.params.location(),
    );
    let descriptor = planned
        .iter()
        .map(|s| s.descriptor.as_str())
        .collect::<Vec<_>>()
        .join(" | ");

    let table_path = dir.join(format!("{stem}.csv"));
    export_provider_table(&table_path, &summary.stats, &descriptor)?;
    println!("provider table saved as {}", table_path.display());

    if with_json {
        let json_path = dir.join(format!("{stem}.json"));
        export_offers_json(&json_path, session.store())?;
        println!("listings saved as {}", json_path.display());
    }

    println!(
        "exported {} offers from {} providers",
        summary.total_unique,
        summary.stats.len()
    );
    Ok(())
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
