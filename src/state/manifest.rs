/// Manifest loading
///
/// The manifest is a single static JSON array of catalog records. It is
/// fetched once at startup, either over HTTP or from a local file, and
/// normalized into `CatalogRecord`s. Any failure leaves the app with an
/// empty catalog instead of an error screen.

use reqwest::Url;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::data::CatalogRecord;

/// Errors that can occur while fetching the manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array of records, found {0}")]
    NotAnArray(&'static str),
}

/// Where the manifest lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    Remote(Url),
    Local(PathBuf),
}

impl ManifestSource {
    /// `http(s)://...` is fetched over the network, anything else is a file path
    pub fn parse(source: &str) -> Self {
        let source = source.trim();
        if source.starts_with("http://") || source.starts_with("https://") {
            if let Ok(url) = Url::parse(source) {
                return ManifestSource::Remote(url);
            }
        }
        ManifestSource::Local(PathBuf::from(source))
    }
}

impl fmt::Display for ManifestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestSource::Remote(url) => write!(f, "{}", url),
            ManifestSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetch and normalize the manifest
pub async fn fetch_manifest(source: &ManifestSource) -> Result<Vec<CatalogRecord>, ManifestError> {
    let body = match source {
        ManifestSource::Remote(url) => {
            let response = reqwest::get(url.clone()).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ManifestError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }
            response.bytes().await?.to_vec()
        }
        ManifestSource::Local(path) => tokio::fs::read(path).await.map_err(|source| {
            ManifestError::Io {
                path: path.clone(),
                source,
            }
        })?,
    };

    parse_manifest(&body)
}

/// Parse manifest bytes into normalized records.
///
/// Array elements that aren't JSON objects are skipped.
pub fn parse_manifest(body: &[u8]) -> Result<Vec<CatalogRecord>, ManifestError> {
    let value: Value = serde_json::from_slice(body)?;

    let entries = match value {
        Value::Array(entries) => entries,
        other => return Err(ManifestError::NotAnArray(kind_of(&other))),
    };

    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match entry.as_object() {
            Some(object) => records.push(CatalogRecord::from_json(index, object)),
            None => warn!(
                index,
                kind = kind_of(entry),
                "skipping manifest entry that is not an object"
            ),
        }
    }

    debug!(count = records.len(), "parsed manifest");
    Ok(records)
}

/// Load the manifest, falling back to an empty catalog on any error.
/// No retry is attempted.
pub async fn load_manifest(source: ManifestSource) -> Vec<CatalogRecord> {
    info!(%source, "📚 loading manifest");

    match fetch_manifest(&source).await {
        Ok(records) => {
            info!(count = records.len(), "✅ manifest loaded");
            records
        }
        Err(err) => {
            warn!(
                %source,
                error = %err,
                "⚠️  failed to load materials, showing an empty catalog"
            );
            Vec::new()
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
