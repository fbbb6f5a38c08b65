//! Error types for the dl-scanner crate.
//!
//! This module provides the [`ScanError`] type for errors that can occur
//! while enumerating a directory tree or persisting the resulting listing.

use camino::Utf8PathBuf;

/// Errors that can occur during scanning and saving.
///
/// # Error Recovery Strategy
///
/// - **Access errors** ([`ScanError::Access`]): Recoverable below the root -
///   the failing subtree is abandoned and its siblings are still scanned
/// - **Non-UTF-8 names** ([`ScanError::NonUtf8Path`]): Recoverable - the entry
///   is kept under a lossily decoded name
/// - **No data** ([`ScanError::NoData`]): Nothing written
/// - **Write errors** ([`ScanError::Write`]): Nothing written
///
/// # Examples
///
/// ```
/// use dl_scanner::ScanError;
///
/// fn describe(err: &ScanError) -> String {
///     format!("{}: {err}", err.context())
/// }
///
/// assert_eq!(
///     describe(&ScanError::NoData),
///     "Error saving to file: No directories or files found to save."
/// );
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Failed to list a directory (missing, not a directory, permission denied).
    #[error("failed to read directory {path}: {source}")]
    Access {
        /// The directory that couldn't be listed.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An entry name is not valid UTF-8.
    ///
    /// Entries are stored as UTF-8 paths, so such an entry cannot be recorded.
    #[error("path is not valid UTF-8: {}", _0.display())]
    NonUtf8Path(std::path::PathBuf),

    /// A save was requested before anything was scanned.
    #[error("No directories or files found to save.")]
    NoData,

    /// Failed to write the listing file.
    #[error("failed to write {path}: {source}")]
    Write {
        /// The file that couldn't be written.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Creates a new [`ScanError::Access`] error.
    #[inline]
    pub fn access(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Access {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`ScanError::Write`] error.
    #[inline]
    pub fn write(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Returns the operation context reported alongside this error.
    ///
    /// Traversal failures read `Error accessing <path>`; save failures read
    /// `Error saving to file`.
    #[must_use]
    pub fn context(&self) -> String {
        match self {
            Self::Access { path, .. } => format!("Error accessing {path}"),
            Self::NonUtf8Path(path) => format!("Error accessing {}", path.display()),
            Self::NoData | Self::Write { .. } => "Error saving to file".to_owned(),
        }
    }

    /// Returns `true` if a traversal can continue past this error.
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Access { .. } | Self::NonUtf8Path(_))
    }

    /// Returns the UTF-8 path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::Access { path, .. } | Self::Write { path, .. } => Some(path),
            Self::NonUtf8Path(_) | Self::NoData => None,
        }
    }
}
