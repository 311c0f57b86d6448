//! KOERI "last 500 earthquakes" catalog retrieval.
//!
//! The catalog is a plain HTML page wrapping a fixed-width `<pre>` listing. We
//! fetch it whole and hand the text to `io::parse`; no retries, a failed fetch
//! ends the run.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::PipelineError;

pub const DEFAULT_CATALOG_URL: &str = "http://www.koeri.boun.edu.tr/scripts/lst9.asp";

/// Environment variable overriding the catalog URL.
pub const CATALOG_URL_ENV: &str = "KOERI_CATALOG_URL";

pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Anything that can produce the raw catalog text.
pub trait CatalogSource {
    /// Human-readable origin, for logs.
    fn describe(&self) -> String;

    fn fetch_catalog(&self) -> Result<String, PipelineError>;
}

pub struct KoeriClient {
    client: Client,
    url: String,
}

impl KoeriClient {
    /// Build a client for `url` with a bounded request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PipelineError::Ingestion(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Resolve the URL from `.env` / the environment, falling back to the public endpoint.
    pub fn from_env(timeout: Duration) -> Result<Self, PipelineError> {
        dotenvy::dotenv().ok();
        let url = std::env::var(CATALOG_URL_ENV)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());
        Self::new(url, timeout)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CatalogSource for KoeriClient {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch_catalog(&self) -> Result<String, PipelineError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| PipelineError::Ingestion(format!("request to {} failed: {e}", self.url)))?;

        if !resp.status().is_success() {
            return Err(PipelineError::Ingestion(format!(
                "{} responded with status {}",
                self.url,
                resp.status()
            )));
        }

        resp.text()
            .map_err(|e| PipelineError::Ingestion(format!("failed to read response body: {e}")))
    }
}

/// A catalog saved to disk, e.g. for offline runs.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CatalogSource for FileCatalog {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch_catalog(&self) -> Result<String, PipelineError> {
        let bytes = std::fs::read(&self.path).map_err(|e| {
            PipelineError::Ingestion(format!("failed to read '{}': {e}", self.path.display()))
        })?;
        // Saved pages are not always UTF-8; keep going with replacement characters.
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
