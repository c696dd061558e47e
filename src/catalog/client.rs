//! HTTP access to the remote catalog service.
//!
//! The service exposes two endpoints: `GET {base}/tracks` returning a JSON
//! array of tracks and `POST {base}/seed` which populates an empty catalog.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::debug;

use super::model::Track;
use crate::config::ServerSettings;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} returned {status}")]
    Status { url: String, status: StatusCode },
    #[error("unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Where the loader gets its tracks from.
pub trait CatalogSource {
    fn fetch_tracks(&self) -> Result<Vec<Track>, CatalogError>;
    fn seed(&self) -> Result<(), CatalogError>;
}

impl<T: CatalogSource + ?Sized> CatalogSource for &T {
    fn fetch_tracks(&self) -> Result<Vec<Track>, CatalogError> {
        (**self).fetch_tracks()
    }

    fn seed(&self) -> Result<(), CatalogError> {
        (**self).seed()
    }
}

/// A blocking client for the catalog service.
pub struct HttpCatalog {
    base_url: String,
    http: Client,
}

impl HttpCatalog {
    pub fn new(settings: &ServerSettings) -> Result<Self, CatalogError> {
        // The blocking client defaults to a 30s timeout; `None` clears it.
        let http = Client::builder()
            .timeout(settings.request_timeout_secs.map(Duration::from_secs))
            .build()?;

        Ok(Self {
            base_url: trim_base(&settings.base_url),
            http,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

impl CatalogSource for HttpCatalog {
    fn fetch_tracks(&self) -> Result<Vec<Track>, CatalogError> {
        let url = self.url("/tracks");
        debug!(%url, "fetching tracks");

        let resp = self.http.get(&url).send()?;
        if !resp.status().is_success() {
            return Err(CatalogError::Status {
                url,
                status: resp.status(),
            });
        }

        resp.json::<Vec<Track>>().map_err(CatalogError::Decode)
    }

    fn seed(&self) -> Result<(), CatalogError> {
        let url = self.url("/seed");
        debug!(%url, "seeding catalog");

        let resp = self.http.post(&url).send()?;
        if !resp.status().is_success() {
            return Err(CatalogError::Status {
                url,
                status: resp.status(),
            });
        }
        Ok(())
    }
}

pub(crate) fn trim_base(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}
