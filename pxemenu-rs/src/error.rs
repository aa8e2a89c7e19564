//! Error types for menu loading, fetching and selection.
//!
//! Nothing here is fatal to the process: parse problems are collected as
//! diagnostics on the loaded menu, fetch failures leave the previously
//! published menu in place, and [`MenuError::NotFound`] is surfaced to the
//! caller as a "not found" outcome.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while interpreting a menu script or selecting from it.
#[derive(Debug, Error)]
pub enum MenuError {
    /// A `set`, `item`, `iseq`, `colour` or `cpair` line that doesn't have
    /// its expected shape.  The line is skipped and parsing continues.
    #[error("malformed directive `{line}`: {reason}")]
    MalformedDirective { line: String, reason: &'static str },

    /// A label the load cycle needs (normally `menu`) is absent.
    #[error("label ':{0}' not found")]
    MissingLabel(String),

    /// Selection of a key that is not a selectable item of the current menu.
    #[error("no menu item with key '{0}'")]
    NotFound(String),

    /// The script could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl MenuError {
    pub(crate) fn malformed(line: &str, reason: &'static str) -> Self {
        MenuError::MalformedDirective { line: line.trim().to_owned(), reason }
    }
}

/// Transport or remote failure while retrieving a script.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read script from stdin: {0}")]
    Stdin(#[source] std::io::Error),
}

/// Result type for menu operations.
pub type Result<T> = std::result::Result<T, MenuError>;
