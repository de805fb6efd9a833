//! Token → validated calendar date.
//!
//! Parsing runs in two passes over the format rules: the trimmed token as given,
//! then (if nothing matched) a normalized spelling. A structural match is then
//! checked against the calendar and the mission window.

use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::{Local, Month, NaiveDate};
use regex::Regex;

use super::rules::{RawDate, SUPPORTED_FORMATS, match_rules};

/// Curiosity's landing date; nothing earlier exists in the catalog.
pub const MISSION_START: NaiveDate = match NaiveDate::from_ymd_opt(2012, 8, 6) {
    Some(date) => date,
    None => panic!("invalid mission start date"),
};

/// Year appended to tokens that carry only a month and a day.
pub const DEFAULT_YEAR: i32 = 2021;

static MONTH_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+ \d{1,2}$").expect("static regex"));
static MONTH_DAY_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]+) (\d{1,2}) (\d{4})$").expect("static regex"));

/// Why a token was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("Date string cannot be empty")]
    Empty,

    #[error("Could not parse date: {token}. Supported formats include {formats}.", formats = SUPPORTED_FORMATS)]
    UnrecognizedFormat { token: String },

    #[error("Invalid date: {token}. {month} has only {max_days} days.")]
    DayOutOfRange {
        token: String,
        month: &'static str,
        max_days: u32,
    },

    #[error("Invalid date: {token}. Date cannot be in the future.")]
    FutureDate { token: String, date: NaiveDate },

    #[error(
        "Invalid date: {token}. Date must not be before Curiosity's landing date (August 6, 2012)."
    )]
    BeforeMissionStart { token: String, date: NaiveDate },
}

/// Parses human-entered date tokens.
///
/// "Today" is read from the local clock on every call unless pinned with
/// [`DateInterpreter::with_today`].
#[derive(Debug, Clone)]
pub struct DateInterpreter {
    default_year: i32,
    today: Option<NaiveDate>,
}

impl Default for DateInterpreter {
    fn default() -> Self {
        Self {
            default_year: DEFAULT_YEAR,
            today: None,
        }
    }
}

impl DateInterpreter {
    pub fn new(default_year: i32) -> Self {
        Self {
            default_year,
            today: None,
        }
    }

    /// Pin "today" instead of reading the clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Parse and validate one token.
    pub fn parse(&self, token: &str) -> Result<NaiveDate, DateError> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(DateError::Empty);
        }

        let raw = self
            .structural_match(trimmed)
            .or_else(|| {
                let normalized = self.normalize(trimmed);
                if normalized == trimmed {
                    None
                } else {
                    self.structural_match(&normalized)
                }
            })
            .ok_or_else(|| DateError::UnrecognizedFormat {
                token: trimmed.to_string(),
            })?;

        let date = to_calendar_date(raw, trimmed)?;
        self.check_range(date, trimmed)
    }

    /// Range-check a date that is already structured.
    pub fn validate(&self, date: NaiveDate) -> Result<NaiveDate, DateError> {
        self.check_range(date, &iso_date(date))
    }

    fn structural_match(&self, token: &str) -> Option<RawDate> {
        let (rule, raw) = match_rules(token)?;
        tracing::debug!(token, pattern = rule.pattern(), "matched date layout");
        Some(raw)
    }

    /// Rewrite the two near-miss spellings the rules do not cover.
    ///
    /// - `June 15` gets the default year: `June 15, 2021`
    /// - `Jun 15 2021` gets a comma after the day: `Jun 15, 2021`
    fn normalize<'a>(&self, token: &'a str) -> Cow<'a, str> {
        if MONTH_DAY.is_match(token) {
            return Cow::Owned(format!("{token}, {:04}", self.default_year));
        }
        if let Some(caps) = MONTH_DAY_YEAR.captures(token) {
            return Cow::Owned(format!("{} {}, {}", &caps[1], &caps[2], &caps[3]));
        }
        Cow::Borrowed(token)
    }

    fn check_range(&self, date: NaiveDate, token: &str) -> Result<NaiveDate, DateError> {
        if date > self.today() {
            tracing::warn!(token, %date, "date is in the future");
            return Err(DateError::FutureDate {
                token: token.to_string(),
                date,
            });
        }
        if date < MISSION_START {
            tracing::warn!(token, %date, "date is before mission start");
            return Err(DateError::BeforeMissionStart {
                token: token.to_string(),
                date,
            });
        }
        Ok(date)
    }
}

/// Parse with the default interpreter (default year 2021, live clock).
pub fn parse_date(token: &str) -> Result<NaiveDate, DateError> {
    DateInterpreter::default().parse(token)
}

fn to_calendar_date(raw: RawDate, token: &str) -> Result<NaiveDate, DateError> {
    let unrecognized = || DateError::UnrecognizedFormat {
        token: token.to_string(),
    };
    let month = u8::try_from(raw.month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or_else(unrecognized)?;
    let max_days = month.num_days(raw.year).map(u32::from).ok_or_else(unrecognized)?;

    if raw.day > max_days {
        tracing::warn!(token, month = month.name(), max_days, "day exceeds month length");
        return Err(DateError::DayOutOfRange {
            token: token.to_string(),
            month: month.name(),
            max_days,
        });
    }
    NaiveDate::from_ymd_opt(raw.year, raw.month, raw.day).ok_or_else(unrecognized)
}

/// ISO `yyyy-MM-dd` rendering used for query parameters and folder names.
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
