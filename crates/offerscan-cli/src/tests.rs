use super::*;

const LINK: &str = "https://web.arbeitsagentur.de/ausbildungssuche/suche?beruf=7856&uk=25&kat=1&ort=Berlin_13.386738_52.531976";

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["offerscan"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_offer_types_command() {
    let cli = Cli::try_parse_from(["offerscan", "offer-types"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::OfferTypes)));
}

#[test]
fn parses_parse_link_command() {
    let cli = Cli::try_parse_from(["offerscan", "parse-link", LINK]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::ParseLink { ref link }) if link == LINK
    ));
}

#[test]
fn search_accepts_repeated_links() {
    let cli = Cli::try_parse_from(["offerscan", "search", "--link", LINK, "--link", LINK]).unwrap();
    let Some(Commands::Search(args)) = cli.command else {
        panic!("expected search command");
    };
    assert_eq!(args.link.len(), 2);
    assert!(!args.dry_run);
    assert!(!args.json);
}

#[test]
fn search_manual_defaults_radius_and_offer_type() {
    let cli = Cli::try_parse_from([
        "offerscan", "search", "--city", "Berlin", "--job-id", "7856", "--lat", "52.5", "--lon",
        "13.4",
    ])
    .unwrap();
    let Some(Commands::Search(args)) = cli.command else {
        panic!("expected search command");
    };
    assert_eq!(args.radius, "50");
    assert_eq!(args.offer_type, "109");
}

#[test]
fn search_manual_accepts_negative_coordinates() {
    let cli = Cli::try_parse_from([
        "offerscan", "search", "--city", "Lima", "--job-id", "1", "--lat", "-12.04", "--lon",
        "-77.04", "--dry-run",
    ])
    .unwrap();
    let Some(Commands::Search(args)) = cli.command else {
        panic!("expected search command");
    };
    assert_eq!(args.lat.as_deref(), Some("-12.04"));
    assert!(args.dry_run);
}

#[test]
fn search_rejects_mixed_input_modes() {
    let result = Cli::try_parse_from([
        "offerscan", "search", "--link", LINK, "--searches", "searches.yaml",
    ]);
    assert!(result.is_err());
}

#[test]
fn search_requires_an_input_mode() {
    assert!(Cli::try_parse_from(["offerscan", "search", "--json"]).is_err());
}

#[test]
fn manual_city_requires_coordinates() {
    let result = Cli::try_parse_from(["offerscan", "search", "--city", "Berlin", "--job-id", "1"]);
    assert!(result.is_err());
}

fn broken_config() -> Result<AppConfig, ConfigError> {
    Err(ConfigError::InvalidEnvVar {
        var: "OFFERSCAN_REQUEST_TIMEOUT_SECS".to_string(),
        reason: "invalid digit found in string".to_string(),
    })
}

#[tokio::test]
async fn offline_commands_ignore_broken_config() {
    for argv in [
        vec!["offerscan", "parse-link", LINK],
        vec!["offerscan", "offer-types"],
        vec!["offerscan"],
    ] {
        let cli = Cli::try_parse_from(argv.iter().copied()).unwrap();
        run(cli, broken_config)
            .await
            .unwrap_or_else(|e| panic!("{argv:?} failed: {e:#}"));
    }
}

#[tokio::test]
async fn search_reports_broken_config() {
    let cli = Cli::try_parse_from(["offerscan", "search", "--link", LINK, "--dry-run"]).unwrap();
    let err = run(cli, broken_config).await.unwrap_err();
    assert!(
        format!("{err:#}").contains("OFFERSCAN_REQUEST_TIMEOUT_SECS"),
        "got: {err:#}"
    );
}
