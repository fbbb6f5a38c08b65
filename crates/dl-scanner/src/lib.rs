//! Depth-first directory enumeration with pluggable progress sinks.
//!
//! This crate records every file and directory below a root path, in
//! pre-order, and persists or prints the accumulated listing.
//!
//! # Overview
//!
//! The main entry point is [`Scanner`], which combines:
//!
//! - A tree walker: sequential `tokio::fs` traversal
//! - [`ScanSink`]: where progress and failure events go
//! - [`ScanStats`]: per-scan counters
//! - [`output`]: the file and console renderings of the listing
//!
//! # Example
//!
//! ```no_run
//! use camino::Utf8Path;
//! use dl_scanner::Scanner;
//!
//! # async fn example() -> Result<(), dl_scanner::ScanError> {
//! let mut scanner = Scanner::new();
//! let summary = scanner.scan_directory(Utf8Path::new("./src")).await?;
//! println!("Recorded {} entries", summary.entries_added);
//!
//! scanner.print_scanned_list();
//! scanner.save_to_file(Utf8Path::new("directory_list.txt")).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Reporting
//!
//! Every operation returns a typed result *and* reports failures to the
//! sink, with the same context strings the default [`TracingSink`] logs
//! (`Error accessing <path>`, `Error saving to file`). Callers that only care
//! about the log output can ignore the result; callers that need to react can
//! match on [`ScanError`].
//!
//! # Architecture
//!
//! ```text
//! Scanner (entries, sink, stats)
//!     │
//!     ├── TreeWalker (recursive read_dir, pre-order)
//!     │
//!     ├── ScanSink ──► TracingSink | NullSink | ChannelSink
//!     │
//!     └── output (render_entries, write_listing, resolve_output_path)
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod error;
pub mod output;
mod sink;
mod stats;
mod walker;

pub use error::ScanError;
pub use sink::{ChannelSink, NullSink, ScanEvent, ScanSink, TracingSink};
pub use stats::{ScanStats, StatsSnapshot};

use std::io::{self, Write};
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

use walker::TreeWalker;

/// Observable state of a [`Scanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScannerState {
    /// No entries: freshly constructed, cleared, or nothing found yet.
    Empty,
    /// At least one entry has been recorded.
    Populated,
}

/// Result of a single [`Scanner::scan_directory`] call.
#[derive(Debug)]
pub struct ScanSummary {
    /// The directory that was scanned.
    pub root: Utf8PathBuf,
    /// Number of entries this scan appended.
    pub entries_added: usize,
    /// Counters for this scan.
    pub stats: StatsSnapshot,
    /// Recoverable errors hit below the root.
    pub errors: Vec<ScanError>,
}

impl ScanSummary {
    /// Returns `true` if every subtree was listed successfully.
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Records the contents of directory trees.
///
/// Entries accumulate across scans until [`clear_list`](Self::clear_list) is
/// called; the same tree scanned twice appears twice.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use dl_scanner::{NullSink, Scanner, ScannerState};
/// use std::sync::Arc;
///
/// # async fn example() {
/// let mut scanner = Scanner::with_sink(Arc::new(NullSink));
/// assert_eq!(scanner.state(), ScannerState::Empty);
///
/// let _ = scanner.scan_directory(Utf8Path::new(".")).await;
/// for entry in scanner.scanned_list() {
///     println!("{entry}");
/// }
/// # }
/// ```
pub struct Scanner {
    /// Recorded paths in traversal order.
    entries: Vec<Utf8PathBuf>,
    /// Receiver of progress and failure events.
    sink: Arc<dyn ScanSink>,
    /// Counters for the most recent scan.
    stats: ScanStats,
}

impl std::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("entries", &self.entries.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    /// Creates an empty scanner that logs through [`TracingSink`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingSink))
    }

    /// Creates an empty scanner reporting to the given sink.
    #[must_use]
    pub fn with_sink(sink: Arc<dyn ScanSink>) -> Self {
        Self {
            entries: Vec::new(),
            sink,
            stats: ScanStats::new(),
        }
    }

    /// Recursively records every entry below `path`.
    ///
    /// Each entry's joined path is appended regardless of type; directories
    /// are recorded before their contents. Unreadable subtrees are reported,
    /// collected in [`ScanSummary::errors`], and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Access`] if `path` itself cannot be listed. The
    /// failure has already been reported to the sink, and any entries
    /// recorded before it are kept.
    pub async fn scan_directory(&mut self, path: &Utf8Path) -> Result<ScanSummary, ScanError> {
        debug!(root = %path, "Starting directory scan");
        self.stats.reset();

        let before = self.entries.len();
        let mut walker = TreeWalker::new(self.sink.as_ref(), &self.stats);
        let outcome = walker.walk(path.to_owned(), &mut self.entries).await;
        let errors = walker.into_errors();

        if let Err(err) = outcome {
            self.stats.increment_errors();
            self.sink.on_event(ScanEvent::failed(&err));
            return Err(err);
        }

        let summary = ScanSummary {
            root: path.to_owned(),
            entries_added: self.entries.len() - before,
            stats: self.stats.snapshot(),
            errors,
        };

        debug!(
            root = %summary.root,
            entries = summary.entries_added,
            directories = summary.stats.directories,
            files = summary.stats.files,
            errors = summary.stats.errors,
            "Directory scan finished"
        );

        Ok(summary)
    }

    /// Returns the accumulated entries in traversal order.
    #[inline]
    #[must_use]
    pub fn scanned_list(&self) -> &[Utf8PathBuf] {
        &self.entries
    }

    /// Writes the accumulated entries to `file_path`, one per line.
    ///
    /// A `file_path` ending in a separator is treated as a directory (see
    /// [`output::resolve_output_path`]). Existing files are overwritten.
    ///
    /// Returns the path actually written.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::NoData`] if nothing has been recorded (no file is
    /// written), or [`ScanError::Write`] if the file cannot be written. Both
    /// are reported to the sink first.
    pub async fn save_to_file(&self, file_path: &Utf8Path) -> Result<Utf8PathBuf, ScanError> {
        match self.write_entries(file_path).await {
            Ok(path) => {
                self.sink.on_event(ScanEvent::Saved(path.clone()));
                Ok(path)
            }
            Err(err) => {
                self.sink.on_event(ScanEvent::failed(&err));
                Err(err)
            }
        }
    }

    async fn write_entries(&self, file_path: &Utf8Path) -> Result<Utf8PathBuf, ScanError> {
        if self.entries.is_empty() {
            return Err(ScanError::NoData);
        }

        let target = output::resolve_output_path(file_path);
        let contents = output::render_entries(&self.entries);
        tokio::fs::write(&target, contents)
            .await
            .map_err(|e| ScanError::write(target.clone(), e))?;

        info!(path = %target, entries = self.entries.len(), "Wrote directory list");
        Ok(target)
    }

    /// Prints the numbered listing to stdout.
    pub fn print_scanned_list(&self) {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        let _ = self.write_scanned_list(&mut handle);
    }

    /// Writes the numbered listing to `out`.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_scanned_list<W: Write>(&self, out: &mut W) -> io::Result<()> {
        output::write_listing(out, &self.entries)
    }

    /// Removes all recorded entries. Safe to call repeatedly.
    pub fn clear_list(&mut self) {
        self.entries.clear();
        self.sink.on_event(ScanEvent::Cleared);
    }

    /// Returns whether any entries are recorded.
    #[must_use]
    pub fn state(&self) -> ScannerState {
        if self.entries.is_empty() {
            ScannerState::Empty
        } else {
            ScannerState::Populated
        }
    }

    /// Number of recorded entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries are recorded.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a snapshot of the most recent scan's counters.
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}
