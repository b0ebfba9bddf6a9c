use super::*;

fn config() -> AppConfig {
    AppConfig {
        store_url: "https://store.steampowered.com".to_owned(),
        log_level: "info".to_owned(),
        data_dir: PathBuf::from("./data"),
        request_timeout_secs: 25,
        user_agent: "curdump-test/0.1".to_owned(),
        accept_language: "en-US".to_owned(),
        batch_size: 50,
        inter_request_delay_ms: 300,
        max_retries: 2,
        retry_backoff_base_secs: 1,
    }
}

#[test]
fn parses_bare_curator_id_with_defaults() {
    let cli = Cli::try_parse_from(["curdump", "42788178"]).expect("expected valid cli args");
    assert_eq!(cli.curator.as_deref(), Some("42788178"));
    assert_eq!(cli.format, ExportFormat::Json);
    assert_eq!(cli.sort, "recent");
    assert!(cli.output.is_none());
    assert!(!cli.quiet);
    assert!(!cli.quasarplay);
}

#[test]
fn parses_short_flags() {
    let cli = Cli::try_parse_from([
        "curdump",
        "https://store.steampowered.com/curator/30894603/",
        "-o",
        "out/reviews.csv",
        "-f",
        "csv",
        "-q",
    ])
    .expect("expected valid cli args");
    assert_eq!(cli.format, ExportFormat::Csv);
    assert_eq!(cli.output, Some(PathBuf::from("out/reviews.csv")));
    assert!(cli.quiet);
}

#[test]
fn parses_appids_format() {
    let cli = Cli::try_parse_from(["curdump", "1", "--format", "appids"]).unwrap();
    assert_eq!(cli.format, ExportFormat::Appids);
}

#[test]
fn rejects_unknown_format() {
    assert!(Cli::try_parse_from(["curdump", "1", "-f", "xml"]).is_err());
}

#[test]
fn curator_is_required_without_preset_flag() {
    assert!(Cli::try_parse_from(["curdump"]).is_err());
}

#[test]
fn preset_flag_needs_no_curator() {
    let cli = Cli::try_parse_from(["curdump", "--quasarplay", "--sort", "score"]).unwrap();
    assert!(cli.quasarplay);
    assert!(cli.curator.is_none());
    assert_eq!(cli.sort, "score");
}

#[test]
fn rejects_zero_batch_size() {
    assert!(Cli::try_parse_from(["curdump", "1", "--batch-size", "0"]).is_err());
}

#[test]
fn fetch_options_come_from_config_by_default() {
    let cli = Cli::try_parse_from(["curdump", "1"]).unwrap();
    let options = cli.fetch_options(&config());
    assert_eq!(options.sort, "recent");
    assert_eq!(options.batch_size, 50);
    assert_eq!(options.inter_request_delay_ms, 300);
}

#[test]
fn flags_override_fetch_options() {
    let cli = Cli::try_parse_from(["curdump", "1", "--batch-size", "20", "--delay-ms", "0"]).unwrap();
    let options = cli.fetch_options(&config());
    assert_eq!(options.batch_size, 20);
    assert_eq!(options.inter_request_delay_ms, 0);
}
