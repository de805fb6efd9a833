//! Per-date outcomes and the run tally built from them.

use chrono::NaiveDate;

use crate::dates::DateError;

/// What happened to one input token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateOutcome {
    /// At least one photo was written.
    Downloaded {
        date: NaiveDate,
        saved: usize,
        attempted: usize,
    },
    /// The catalog had no photos for this date.
    NoImages { date: NaiveDate },
    /// The token was rejected before any request was made.
    InvalidDate { token: String, error: DateError },
    /// The date could not be processed (catalog query or folder creation); no
    /// photos were attempted.
    Failed { date: NaiveDate, reason: String },
    /// Photos were listed but none could be saved.
    DownloadsFailed { date: NaiveDate, attempted: usize },
}

impl DateOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Downloaded { .. })
    }

    /// One-line, user-facing description of a failure, if this is one.
    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Downloaded { .. } | Self::NoImages { .. } => None,
            Self::InvalidDate { error, .. } => Some(error.to_string()),
            Self::Failed { date, reason } => {
                Some(format!("Failed to process date {date}: {reason}"))
            }
            Self::DownloadsFailed { date, attempted } => Some(format!(
                "Failed to process date {date}: none of {attempted} photos could be downloaded"
            )),
        }
    }
}

/// Counters printed at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub tokens: usize,
    pub succeeded: usize,
    pub invalid: usize,
    pub no_images: usize,
    pub failed: usize,
    pub photos_saved: usize,
    pub photos_failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &DateOutcome) {
        self.tokens += 1;
        match outcome {
            DateOutcome::Downloaded { saved, attempted, .. } => {
                self.succeeded += 1;
                self.photos_saved += saved;
                self.photos_failed += attempted - saved;
            }
            DateOutcome::NoImages { .. } => self.no_images += 1,
            DateOutcome::InvalidDate { .. } => self.invalid += 1,
            DateOutcome::Failed { .. } => self.failed += 1,
            DateOutcome::DownloadsFailed { attempted, .. } => {
                self.failed += 1;
                self.photos_failed += attempted;
            }
        }
    }

    pub fn from_outcomes<'a>(outcomes: impl IntoIterator<Item = &'a DateOutcome>) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            summary.record(outcome);
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 6, 2).unwrap()
    }

    #[test]
    fn every_outcome_lands_in_exactly_one_bucket() {
        let outcomes = vec![
            DateOutcome::Downloaded { date: date(), saved: 2, attempted: 3 },
            DateOutcome::NoImages { date: date() },
            DateOutcome::InvalidDate { token: "x".into(), error: DateError::Empty },
            DateOutcome::Failed { date: date(), reason: "503".into() },
            DateOutcome::DownloadsFailed { date: date(), attempted: 4 },
        ];
        let summary = RunSummary::from_outcomes(&outcomes);
        assert_eq!(
            summary,
            RunSummary {
                tokens: 5,
                succeeded: 1,
                invalid: 1,
                no_images: 1,
                failed: 2,
                photos_saved: 2,
                photos_failed: 5,
            }
        );
    }

    #[test]
    fn only_failures_have_messages() {
        assert!(DateOutcome::NoImages { date: date() }.error_message().is_none());
        let msg = DateOutcome::DownloadsFailed { date: date(), attempted: 3 }
            .error_message()
            .unwrap();
        assert!(msg.contains("2018-06-02"));
        assert!(msg.contains("none of 3 photos"));
    }
}
