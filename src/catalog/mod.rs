//! Mars Rover Photos API integration.

use chrono::NaiveDate;
use url::Url;

use crate::dates::iso_date;
use crate::fetch::{FetchError, ResilientFetcher};

pub mod models;

pub use models::*;

const PHOTOS_PATH: &str = "mars-photos/api/v1/rovers/curiosity/photos";

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Invalid catalog URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Catalog request failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Failed to parse catalog response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Builds photo queries against one API base URL with one key.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    api_key: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// `{base}/mars-photos/api/v1/rovers/curiosity/photos?earth_date=..&api_key=..`
    pub fn photos_url(&self, date: NaiveDate) -> Result<Url, CatalogError> {
        let raw = format!("{}/{PHOTOS_PATH}", self.base_url.trim_end_matches('/'));
        let mut url = Url::parse(&raw).map_err(|source| CatalogError::InvalidUrl { url: raw, source })?;
        url.query_pairs_mut()
            .append_pair("earth_date", &iso_date(date))
            .append_pair("api_key", &self.api_key);
        Ok(url)
    }

    /// Fetch and decode every photo record for `date`.
    pub fn fetch_photos(
        &self,
        fetcher: &ResilientFetcher,
        date: NaiveDate,
    ) -> Result<Vec<Photo>, CatalogError> {
        let url = self.photos_url(date)?;
        tracing::debug!(%date, "requesting photo catalog");
        let body = fetcher.fetch(url.as_str())?;
        let response: CatalogResponse = serde_json::from_slice(&body)?;
        Ok(response.photos)
    }
}
