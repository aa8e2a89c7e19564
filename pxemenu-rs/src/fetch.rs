//! Script retrieval.
//!
//! A script comes from an HTTP(S) URL, a local file, or stdin.  Fetching is
//! a single attempt; no retry and no caching.

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::error::FetchError;
use crate::load::script_lines;

/// Fetch timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where to read a script from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSource {
    Url(String),
    File(PathBuf),
    Stdin,
}

impl ScriptSource {
    /// Classify a location string: `http://…`/`https://…` is a URL, `-` is
    /// stdin, anything else a file path.
    pub fn parse(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            ScriptSource::Url(location.to_owned())
        } else if location == "-" {
            ScriptSource::Stdin
        } else {
            ScriptSource::File(PathBuf::from(location))
        }
    }
}

impl fmt::Display for ScriptSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptSource::Url(url) => f.write_str(url),
            ScriptSource::File(path) => write!(f, "{}", path.display()),
            ScriptSource::Stdin => f.write_str("-"),
        }
    }
}

/// Supplies the raw lines of a script.
pub trait ScriptFetcher {
    fn fetch_lines(
        &self,
        source: &ScriptSource,
    ) -> impl Future<Output = Result<Vec<String>, FetchError>> + Send;
}

/// Fetcher backed by an HTTP client, the filesystem and stdin.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pxemenu/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    async fn fetch_url(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: url.to_owned(), status: status.as_u16() });
        }
        Ok(response.text().await?)
    }
}

impl ScriptFetcher for HttpFetcher {
    async fn fetch_lines(&self, source: &ScriptSource) -> Result<Vec<String>, FetchError> {
        debug!(%source, "fetching script");
        let text = match source {
            ScriptSource::Url(url) => self.fetch_url(url).await?,
            ScriptSource::File(path) => read_file(path).await?,
            ScriptSource::Stdin => read_stdin().await?,
        };
        Ok(script_lines(&text))
    }
}

async fn read_file(path: &Path) -> Result<String, FetchError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| FetchError::Io { path: path.to_path_buf(), source })
}

async fn read_stdin() -> Result<String, FetchError> {
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .map_err(FetchError::Stdin)?;
    Ok(text)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
