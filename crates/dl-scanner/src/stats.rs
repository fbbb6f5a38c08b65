//! Scan statistics with atomic counters.
//!
//! This module provides [`ScanStats`] for counting what a scan discovers and
//! [`StatsSnapshot`] for point-in-time views.
//!
//! Counters use [`Relaxed`](std::sync::atomic::Ordering::Relaxed) ordering.
//! They are informational and never drive control flow.
//!
//! # Examples
//!
//! ```
//! use dl_scanner::ScanStats;
//!
//! let stats = ScanStats::new();
//! stats.increment_directories();
//! stats.increment_files();
//!
//! let snapshot = stats.snapshot();
//! assert_eq!(snapshot.entries(), 2);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Atomic counters for a single scan.
#[derive(Debug, Default)]
pub struct ScanStats {
    /// Number of directory entries recorded.
    directories: AtomicU64,
    /// Number of non-directory entries recorded.
    files: AtomicU64,
    /// Number of recoverable errors (unreadable subtrees, non-UTF-8 names).
    errors: AtomicU64,
}

impl ScanStats {
    /// Creates a new [`ScanStats`] with all counters at zero.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the directory counter.
    #[inline]
    pub fn increment_directories(&self) {
        self.directories.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the file counter.
    #[inline]
    pub fn increment_files(&self) {
        self.files.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the error counter.
    #[inline]
    pub fn increment_errors(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns a point-in-time snapshot of all counters.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            directories: self.directories.load(Ordering::Relaxed),
            files: self.files.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }

    /// Resets all counters to zero.
    ///
    /// Called at the start of every scan.
    pub fn reset(&self) {
        self.directories.store(0, Ordering::Relaxed);
        self.files.store(0, Ordering::Relaxed);
        self.errors.store(0, Ordering::Relaxed);
    }
}

/// A point-in-time copy of [`ScanStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Number of directory entries recorded.
    pub directories: u64,
    /// Number of non-directory entries recorded.
    pub files: u64,
    /// Number of recoverable errors.
    pub errors: u64,
}

impl StatsSnapshot {
    /// Total number of entries recorded (directories and files).
    #[inline]
    #[must_use]
    pub const fn entries(&self) -> u64 {
        self.directories + self.files
    }

    /// Returns `true` if the scan hit no errors.
    #[inline]
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.errors == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_are_zero() {
        let snapshot = ScanStats::new().snapshot();
        assert_eq!(snapshot, StatsSnapshot::default());
        assert!(snapshot.is_clean());
    }

    #[test]
    fn test_increment_and_snapshot() {
        let stats = ScanStats::new();
        stats.increment_directories();
        stats.increment_files();
        stats.increment_files();
        stats.increment_errors();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.directories, 1);
        assert_eq!(snapshot.files, 2);
        assert_eq!(snapshot.errors, 1);
        assert_eq!(snapshot.entries(), 3);
        assert!(!snapshot.is_clean());
    }

    #[test]
    fn test_reset() {
        let stats = ScanStats::new();
        stats.increment_files();
        stats.increment_errors();
        stats.reset();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = StatsSnapshot {
            directories: 4,
            files: 9,
            errors: 0,
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"{"directories":4,"files":9,"errors":0}"#);
    }
}
