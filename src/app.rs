//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and resolves configuration
//! - prepares the output directory and reads the date list
//! - runs the download pipeline
//! - prints per-date errors and the final summary

use clap::Parser;

use crate::cli::Cli;
use crate::config::{AppConfig, Properties};
use crate::error::AppError;
use crate::fetch::FetchOptions;

pub mod pipeline;

/// Entry point for the `rover-fetch` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    crate::logging::init();
    run_with(cli)
}

/// Run with already-parsed arguments.
///
/// The output directory is created before the date list is read, so a run with
/// no usable dates still leaves it in place.
pub fn run_with(cli: Cli) -> Result<(), AppError> {
    tracing::info!("starting rover image downloader");

    let props = Properties::load(&cli.config)?;
    let config = config_from_args(&cli, AppConfig::from_env(&props)?);
    let fetch_options = FetchOptions {
        max_redirects: cli.max_redirects,
        ..FetchOptions::default()
    };

    crate::io::ensure_output_dir(&config.output_directory)?;

    let tokens = crate::io::read_date_tokens(&config.dates_file);
    if tokens.is_empty() {
        return Err(AppError::new(
            3,
            format!(
                "No dates found in '{}'. Exiting.",
                config.dates_file.display()
            ),
        ));
    }

    let pipeline = pipeline::Pipeline::new(&config, fetch_options)?;
    let run = pipeline.run(&tokens);

    for message in run.outcomes.iter().filter_map(|o| o.error_message()) {
        println!("ERROR: {message}");
    }

    crate::report::log_summary(&run.summary);
    println!();
    println!("{}", crate::report::format_summary(&run.summary));

    Ok(())
}

/// Apply command-line overrides on top of the resolved configuration.
pub fn config_from_args(cli: &Cli, mut config: AppConfig) -> AppConfig {
    if let Some(dates) = &cli.dates {
        config.dates_file = dates.clone();
    }
    if let Some(output) = &cli.output {
        config.output_directory = output.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.api_base_url = base_url.clone();
    }
    if let Some(api_key) = cli.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
        config.api_key = api_key.to_string();
    }
    if let Some(year) = cli.default_year {
        config.default_year = year;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::fs;
    use std::path::{Path, PathBuf};

    fn base() -> AppConfig {
        AppConfig::resolve(&Properties::default(), |_| Some("env-key".to_string())).unwrap()
    }

    #[test]
    fn cli_flags_override_resolved_config() {
        let cli = Cli::parse_from([
            "rover-fetch",
            "--api-key",
            "cli-key",
            "--output",
            "imgs",
            "--default-year",
            "2022",
        ]);
        let config = config_from_args(&cli, base());
        assert_eq!(config.api_key, "cli-key");
        assert_eq!(config.output_directory, PathBuf::from("imgs"));
        assert_eq!(config.default_year, 2022);
        assert_eq!(config.dates_file, PathBuf::from("dates.txt"));
    }

    #[test]
    fn unset_flags_keep_config_values() {
        let cli = Cli::parse_from(["rover-fetch"]);
        assert_eq!(config_from_args(&cli, base()), base());
        assert_eq!(base().api_key, "env-key");
    }

    fn cli_for(root: &Path, dates: &Path, output: &Path) -> Cli {
        let args: Vec<OsString> = vec![
            "rover-fetch".into(),
            "--config".into(),
            root.join("absent.properties").into(),
            "--dates".into(),
            dates.into(),
            "--output".into(),
            output.into(),
            "--base-url".into(),
            "http://127.0.0.1:1".into(),
        ];
        Cli::parse_from(args)
    }

    #[test]
    fn blank_dates_file_exits_with_3_after_creating_output() {
        let root = tempfile::tempdir().unwrap();
        let dates = root.path().join("dates.txt");
        fs::write(&dates, "\n   \n\t\n").unwrap();
        let output = root.path().join("images");

        let err = run_with(cli_for(root.path(), &dates, &output)).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("No dates found"), "{err}");
        assert!(output.is_dir());
    }

    #[test]
    fn missing_dates_file_exits_with_3() {
        let root = tempfile::tempdir().unwrap();
        let output = root.path().join("images");

        let err = run_with(cli_for(root.path(), &root.path().join("nope.txt"), &output)).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn blocked_output_path_exits_with_1() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let dates = root.path().join("dates.txt");
        fs::write(&dates, "June 2, 2018\n").unwrap();

        let err = run_with(cli_for(root.path(), &dates, &blocker.join("images"))).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn invalid_tokens_do_not_fail_the_run() {
        let root = tempfile::tempdir().unwrap();
        let dates = root.path().join("dates.txt");
        fs::write(&dates, "not a date\nApril 31, 2018\n").unwrap();
        let output = root.path().join("images");

        run_with(cli_for(root.path(), &dates, &output)).unwrap();
        assert!(output.is_dir());
        assert_eq!(fs::read_dir(&output).unwrap().count(), 0);
    }
}
