//! Run configuration.
//!
//! Values come from a Java-style properties file (`key=value`, `key: value` or
//! `key value`), read literally: nothing in a value is expanded. The API key may
//! also come from `NASA_API_KEY` (in the environment or a `.env` file), which wins
//! over the file. Command-line flags are applied on top by `app`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::dates::DEFAULT_YEAR;
use crate::error::AppError;

pub const DEFAULT_PROPERTIES_FILE: &str = "application.properties";

pub const DEFAULT_API_BASE_URL: &str = "https://api.nasa.gov";
pub const DEFAULT_API_KEY: &str = "DEMO_KEY";
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "nasa_images";
pub const DEFAULT_DATES_FILE: &str = "dates.txt";

pub const API_KEY_ENV: &str = "NASA_API_KEY";

pub const KEY_API_BASE_URL: &str = "nasa.api.base.url";
pub const KEY_API_KEY: &str = "nasa.api.key";
pub const KEY_OUTPUT_DIRECTORY: &str = "output.directory";
pub const KEY_DATES_FILE: &str = "dates.file.path";
pub const KEY_DEFAULT_YEAR: &str = "dates.default.year";

/// Flat key-value lookup loaded from a properties file.
#[derive(Debug, Clone, Default)]
pub struct Properties {
    values: HashMap<String, String>,
}

impl Properties {
    /// Load `path`. A missing file yields empty properties; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "properties file not found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(AppError::new(
                    2,
                    format!("Failed to open config '{}': {e}", path.display()),
                ));
            }
        };

        let props = Self::parse(&text).map_err(|e| {
            AppError::new(2, format!("Failed to parse config '{}': {e}", path.display()))
        })?;
        tracing::info!(path = %path.display(), keys = props.values.len(), "loaded configuration");
        Ok(props)
    }

    /// Parse properties text. Later keys replace earlier ones.
    ///
    /// - `#` and `!` start comment lines
    /// - the key ends at the first unescaped `=`, `:` or whitespace
    /// - a line ending in an unescaped `\` continues on the next line
    /// - `\t`, `\n`, `\r`, `\f` and `\uXXXX` are unescaped; any other `\c` is `c`
    pub fn parse(text: &str) -> Result<Self, String> {
        let mut values = HashMap::new();
        for (line_no, line) in logical_lines(text) {
            let (key, value) = split_entry(&line);
            let key = unescape(key).map_err(|e| format!("line {line_no}: {e}"))?;
            let value = unescape(value).map_err(|e| format!("line {line_no}: {e}"))?;
            values.insert(key, value);
        }
        Ok(Self { values })
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Non-blank value for `key`, trimmed.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// Join continued lines and drop blanks and comments.
/// Yields the 1-based number of each entry's first line.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let mut out = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim_start();
        let (start, mut buf) = match pending.take() {
            Some(p) => p,
            None => {
                if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                    continue;
                }
                (idx + 1, String::new())
            }
        };

        let trailing = line.chars().rev().take_while(|&c| c == '\\').count();
        if trailing % 2 == 1 {
            buf.push_str(&line[..line.len() - 1]);
            pending = Some((start, buf));
        } else {
            buf.push_str(line);
            out.push((start, buf));
        }
    }
    if let Some(p) = pending {
        out.push(p);
    }
    out
}

/// Split a logical line into its raw (still escaped) key and value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || c.is_whitespace() {
            key_end = i;
            break;
        }
    }

    let key = &line[..key_end];
    let rest = line[key_end..].trim_start();
    let rest = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))
        .map_or(rest, str::trim_start);
    (key, rest)
}

fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{0c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .and_then(char::from_u32)
                    .ok_or_else(|| format!("malformed \\uXXXX escape '\\u{hex}'"))?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub api_key: String,
    pub output_directory: PathBuf,
    pub dates_file: PathBuf,
    /// Year assumed for tokens like `June 15`.
    pub default_year: i32,
}

impl AppConfig {
    /// Resolve from properties, reading the API key override through `env`.
    pub fn resolve<F>(props: &Properties, env: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = env(API_KEY_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .or_else(|| props.get(KEY_API_KEY).map(str::to_string))
            .unwrap_or_else(|| DEFAULT_API_KEY.to_string());

        let default_year = match props.get(KEY_DEFAULT_YEAR) {
            Some(raw) => parse_year(raw)?,
            None => DEFAULT_YEAR,
        };

        Ok(Self {
            api_base_url: props
                .get(KEY_API_BASE_URL)
                .unwrap_or(DEFAULT_API_BASE_URL)
                .to_string(),
            api_key,
            output_directory: PathBuf::from(
                props.get(KEY_OUTPUT_DIRECTORY).unwrap_or(DEFAULT_OUTPUT_DIRECTORY),
            ),
            dates_file: PathBuf::from(props.get(KEY_DATES_FILE).unwrap_or(DEFAULT_DATES_FILE)),
            default_year,
        })
    }

    /// Resolve using the real process environment, after loading `.env` if present.
    pub fn from_env(props: &Properties) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::resolve(props, |key| std::env::var(key).ok())
    }
}

pub fn parse_year(raw: &str) -> Result<i32, AppError> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|y| (1..=9999).contains(y))
        .ok_or_else(|| AppError::new(2, format!("Invalid {KEY_DEFAULT_YEAR} '{raw}'.")))
}
