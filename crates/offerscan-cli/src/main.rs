mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use offerscan_core::{AppConfig, ConfigError, OfferType};

#[derive(Debug, Parser)]
#[command(name = "offerscan")]
#[command(about = "Search training offers around a location and summarise them per provider")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one or more searches, merge the results, and export them
    Search(search::SearchArgs),
    /// Decode a search link and print the parameters it resolves to
    ParseLink {
        /// Search link copied from the website
        link: String,
    },
    /// List the known education-type codes
    OfferTypes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli, offerscan_core::load_app_config).await
}

/// Dispatches a parsed command. Configuration is only loaded for commands
/// that talk to the API, so a bad `OFFERSCAN_*` value cannot break the
/// offline ones.
async fn run<F>(cli: Cli, load_config: F) -> anyhow::Result<()>
where
    F: FnOnce() -> Result<AppConfig, ConfigError>,
{
    match cli.command {
        Some(Commands::Search(args)) => {
            let config = load_config()?;
            init_tracing(&config.log_level)?;
            search::run_search_command(&config, &args).await?;
        }
        Some(Commands::ParseLink { link }) => {
            let params = offerscan_core::parse_search_link(&link)?;
            search::print_parameters(&params);
        }
        Some(Commands::OfferTypes) => {
            for offer_type in OfferType::ALL {
                println!("{offer_type}");
            }
        }
        None => println!("no command given; see `offerscan --help`"),
    }

    Ok(())
}

fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}

#[cfg(test)]
mod tests;
