//! Per-token download workflow:
//! token -> date -> catalog query -> one fetch per photo -> file on disk
//!
//! Every failure below the run level is turned into a [`DateOutcome`] here; no
//! error leaves this module.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::catalog::{CatalogClient, Photo};
use crate::config::AppConfig;
use crate::dates::DateInterpreter;
use crate::domain::{DateOutcome, RunSummary};
use crate::error::AppError;
use crate::fetch::{FetchOptions, ResilientFetcher};
use crate::io::{ensure_date_dir, photo_file_name, write_payload};

/// All outputs of one run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub outcomes: Vec<DateOutcome>,
    pub summary: RunSummary,
}

/// Everything needed to process tokens, built once per run.
pub struct Pipeline {
    interpreter: DateInterpreter,
    catalog: CatalogClient,
    fetcher: ResilientFetcher,
    output_dir: PathBuf,
}

impl Pipeline {
    pub fn new(config: &AppConfig, fetch_options: FetchOptions) -> Result<Self, AppError> {
        let fetcher = ResilientFetcher::with_options(fetch_options)
            .map_err(|e| AppError::new(2, format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            interpreter: DateInterpreter::new(config.default_year),
            catalog: CatalogClient::new(&config.api_base_url, &config.api_key),
            fetcher,
            output_dir: config.output_directory.clone(),
        })
    }

    /// Replace the date interpreter (e.g. to pin "today").
    pub fn with_interpreter(mut self, interpreter: DateInterpreter) -> Self {
        self.interpreter = interpreter;
        self
    }

    /// Process tokens strictly in order, one at a time.
    pub fn run(&self, tokens: &[String]) -> RunOutput {
        let mut summary = RunSummary::default();
        let mut outcomes = Vec::with_capacity(tokens.len());
        for token in tokens {
            let outcome = self.process_token(token);
            summary.record(&outcome);
            outcomes.push(outcome);
        }
        RunOutput { outcomes, summary }
    }

    pub fn process_token(&self, token: &str) -> DateOutcome {
        let _span = tracing::info_span!("date", token).entered();
        tracing::info!("processing date");

        match self.interpreter.parse(token) {
            Ok(date) => self.download_date(date),
            Err(error) => {
                tracing::error!(%error, "invalid date");
                DateOutcome::InvalidDate {
                    token: token.to_string(),
                    error,
                }
            }
        }
    }

    /// Query the catalog for `date` and save every photo it lists.
    pub fn download_date(&self, date: NaiveDate) -> DateOutcome {
        let photos = match self.catalog.fetch_photos(&self.fetcher, date) {
            Ok(photos) => photos,
            Err(e) => {
                tracing::error!(%date, error = %e, "catalog request failed");
                return DateOutcome::Failed {
                    date,
                    reason: e.to_string(),
                };
            }
        };

        if photos.is_empty() {
            tracing::warn!(%date, "no photos found");
            return DateOutcome::NoImages { date };
        }
        tracing::info!(%date, count = photos.len(), "found photos");

        let dir = match ensure_date_dir(&self.output_dir, date) {
            Ok(dir) => dir,
            Err(e) => {
                tracing::error!(%date, error = %e, "failed to create date directory");
                return DateOutcome::Failed {
                    date,
                    reason: format!("Failed to create directory for date {date}: {e}"),
                };
            }
        };

        let attempted = photos.len();
        let saved = photos
            .iter()
            .filter(|photo| self.download_photo(photo, &dir))
            .count();
        tracing::info!(%date, saved, attempted, "finished date");

        if saved > 0 {
            DateOutcome::Downloaded {
                date,
                saved,
                attempted,
            }
        } else {
            DateOutcome::DownloadsFailed { date, attempted }
        }
    }

    /// Fetch one photo into `dir`. Failures are logged and reported as `false`.
    fn download_photo(&self, photo: &Photo, dir: &Path) -> bool {
        let name = photo_file_name(&photo.img_src, photo.id);
        tracing::debug!(id = photo.id, camera = %photo.camera.name, url = %photo.img_src, "downloading photo");

        let bytes = match self.fetcher.fetch(&photo.img_src) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(id = photo.id, error = %e, "failed to download image");
                return false;
            }
        };
        match write_payload(dir, &name, &bytes) {
            Ok(path) => {
                tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved photo");
                true
            }
            Err(e) => {
                tracing::error!(id = photo.id, error = %e, "failed to write image");
                false
            }
        }
    }
}
