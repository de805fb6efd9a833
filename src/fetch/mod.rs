//! Single-file HTTP download with hand-followed redirects.
//!
//! The transport's own redirect policy is switched off so that the hop limit is
//! ours, independent of `reqwest` defaults. Each hop is one loop iteration; the
//! response for a hop is dropped (closing or returning its connection) before the
//! next request is made.
//!
//! Transport errors are terminal for the call. Only 301/302/303 consume a hop.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use url::Url;

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const READ_TIMEOUT: Duration = Duration::from_secs(30);
pub const MAX_REDIRECTS: u32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Too many redirects (limit is {max})")]
    TooManyRedirects { max: u32 },

    #[error("Redirect ({status}) with no Location header")]
    MissingRedirectTarget { status: u16 },

    #[error("Download failed with status code: {code}")]
    BadStatus { code: u16 },

    #[error("Download failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Timeouts and hop limit for a [`ResilientFetcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    /// Bounds the wait for response headers, then each read of the body.
    pub read_timeout: Duration,
    pub max_redirects: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: CONNECT_TIMEOUT,
            read_timeout: READ_TIMEOUT,
            max_redirects: MAX_REDIRECTS,
        }
    }
}

pub struct ResilientFetcher {
    client: Client,
    max_redirects: u32,
}

impl ResilientFetcher {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_options(FetchOptions::default())
    }

    pub fn with_options(options: FetchOptions) -> Result<Self, FetchError> {
        // The blocking client's `timeout` bounds the wait for response headers,
        // then each read of the body.
        let client = Client::builder()
            .redirect(Policy::none())
            .connect_timeout(options.connect_timeout)
            .timeout(options.read_timeout)
            .build()?;
        Ok(Self {
            client,
            max_redirects: options.max_redirects,
        })
    }

    /// GET `url`, following up to `max_redirects` redirects, and return the body.
    ///
    /// The body is buffered in memory with no size limit.
    pub fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut current = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        let mut hops = 0u32;

        loop {
            tracing::debug!(url = %current, hops, "requesting");
            let mut response = self.client.get(current.clone()).send()?;
            let status = response.status();

            match status {
                StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND | StatusCode::SEE_OTHER => {
                    hops += 1;
                    if hops > self.max_redirects {
                        tracing::warn!(url = %current, max = self.max_redirects, "redirect limit exceeded");
                        return Err(FetchError::TooManyRedirects {
                            max: self.max_redirects,
                        });
                    }

                    let location = response
                        .headers()
                        .get(LOCATION)
                        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
                        .ok_or(FetchError::MissingRedirectTarget {
                            status: status.as_u16(),
                        })?;
                    drop(response);

                    // `join` keeps absolute locations as-is and resolves relative ones.
                    let next = current
                        .join(&location)
                        .map_err(|source| FetchError::InvalidUrl {
                            url: location.clone(),
                            source,
                        })?;
                    tracing::debug!(from = %current, to = %next, hops, "following redirect");
                    current = next;
                }
                StatusCode::OK => {
                    let mut body = Vec::new();
                    response.copy_to(&mut body)?;
                    tracing::debug!(url = %current, bytes = body.len(), "download complete");
                    return Ok(body);
                }
                other => {
                    return Err(FetchError::BadStatus {
                        code: other.as_u16(),
                    });
                }
            }
        }
    }
}
