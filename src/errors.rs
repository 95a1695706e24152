/*!
 * Error types for the submerge application.
 *
 * The subtitle core reports typed errors so callers can tell a fatal I/O
 * failure apart from a malformed timestamp that parsing and alignment
 * tolerate. Application glue wraps them in `anyhow`.
 */

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the subtitle parse/align/merge engine
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// The subtitle source could not be opened or decoded as UTF-8
    #[error("Subtitle source unreadable: {path:?}: {source}")]
    SourceUnreadable {
        /// Path that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A timestamp or range line does not match `HH:MM:SS,mmm`
    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(String),

    /// The merged track could not be written
    #[error("Destination unwritable: {path:?}: {source}")]
    DestinationUnwritable {
        /// Path that failed to write
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl SubtitleError {
    /// Whether the error aborts the operation that raised it.
    /// Malformed timestamps are degraded per entry by the parser and aligner.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::MalformedTimestamp(_))
    }
}

/// Errors raised while scanning or querying the media library
#[derive(Error, Debug)]
pub enum LibraryError {
    /// A show, season, episode or movie lookup came up empty
    #[error("{kind} not found: {name}")]
    NotFound {
        /// What was looked up ("TV show", "Season", ...)
        kind: &'static str,
        /// The name that was requested
        name: String,
    },

    /// Directory traversal failed
    #[error("Failed to scan {path:?}: {message}")]
    Scan {
        path: PathBuf,
        message: String,
    },

    /// Error from the subtitle engine
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),
}

impl LibraryError {
    pub(crate) fn not_found(kind: &'static str, name: &str) -> Self {
        Self::NotFound {
            kind,
            name: name.to_string(),
        }
    }
}

impl From<walkdir::Error> for LibraryError {
    fn from(error: walkdir::Error) -> Self {
        let path = error.path().map(|p| p.to_path_buf()).unwrap_or_default();
        Self::Scan {
            path,
            message: error.to_string(),
        }
    }
}
