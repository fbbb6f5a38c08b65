//! Depth-first directory traversal.
//!
//! This module provides [`TreeWalker`], which lists directories with
//! `tokio::fs` and records every entry in pre-order: a directory is recorded
//! before any of its children, and its whole subtree is finished before the
//! next sibling is visited.
//!
//! # Failure Isolation
//!
//! A subtree that cannot be listed is reported to the sink, recorded as a
//! recoverable error, and skipped. Only a failure to list the starting
//! directory itself is returned to the caller. Entries collected before a
//! failure are kept.
//!
//! An entry whose name is not valid UTF-8 is recorded with its name decoded
//! lossily and reported as a recoverable [`ScanError::NonUtf8Path`]. It is
//! still descended into through its real on-disk path.
//!
//! Directory-ness comes from the listing's own file type, which does not
//! follow symbolic links. A link to a directory is recorded but never
//! descended into.

use std::fs::FileType;
use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::pin::Pin;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::ScanError;
use crate::sink::{ScanEvent, ScanSink};
use crate::stats::ScanStats;

/// Boxed future returned by the recursive walk.
type WalkFuture<'s> = Pin<Box<dyn Future<Output = Result<(), ScanError>> + Send + 's>>;

/// A single-use walker that appends discovered paths to an entry list.
pub(crate) struct TreeWalker<'a> {
    /// Receiver of progress and failure events.
    sink: &'a dyn ScanSink,
    /// Per-scan counters.
    stats: &'a ScanStats,
    /// Recoverable errors hit below the starting directory.
    errors: Vec<ScanError>,
}

impl<'a> TreeWalker<'a> {
    pub(crate) fn new(sink: &'a dyn ScanSink, stats: &'a ScanStats) -> Self {
        Self {
            sink,
            stats,
            errors: Vec::new(),
        }
    }

    /// Consumes the walker, returning the recoverable errors it recorded.
    pub(crate) fn into_errors(self) -> Vec<ScanError> {
        self.errors
    }

    /// Lists `dir` and appends each entry to `entries`, recursing into
    /// subdirectories.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Access`] if `dir` itself cannot be listed.
    pub(crate) fn walk<'s>(
        &'s mut self,
        dir: Utf8PathBuf,
        entries: &'s mut Vec<Utf8PathBuf>,
    ) -> WalkFuture<'s> {
        let on_disk = dir.clone().into_std_path_buf();
        self.walk_dir(dir, on_disk, entries)
    }

    /// Recursive step of [`walk`](Self::walk).
    ///
    /// `dir` is the recorded (UTF-8) form of the directory and `on_disk` the
    /// path used for I/O. They differ once a non-UTF-8 name has been
    /// recorded lossily.
    fn walk_dir<'s>(
        &'s mut self,
        dir: Utf8PathBuf,
        on_disk: PathBuf,
        entries: &'s mut Vec<Utf8PathBuf>,
    ) -> WalkFuture<'s> {
        Box::pin(async move {
            self.sink.on_event(ScanEvent::ReadingDirectory(dir.clone()));

            let mut read_dir = tokio::fs::read_dir(&on_disk)
                .await
                .map_err(|e| ScanError::access(dir.clone(), e))?;

            while let Some(entry) = read_dir
                .next_entry()
                .await
                .map_err(|e| ScanError::access(dir.clone(), e))?
            {
                let file_name = entry.file_name();
                let path = match file_name.to_str() {
                    Some(name) => dir.join(name),
                    None => {
                        self.record(ScanError::NonUtf8Path(entry.path()));
                        dir.join(file_name.to_string_lossy().as_ref())
                    }
                };

                let is_dir = self.is_directory(&path, entry.file_type().await);
                entries.push(path.clone());

                if is_dir {
                    self.stats.increment_directories();
                    self.sink.on_event(ScanEvent::DirectoryFound(path.clone()));
                    if let Err(err) = self.walk_dir(path, entry.path(), entries).await {
                        self.record(err);
                    }
                } else {
                    self.stats.increment_files();
                    self.sink.on_event(ScanEvent::FileFound(path));
                }
            }

            Ok(())
        })
    }

    /// Decides whether an entry is descended into.
    ///
    /// A failed type lookup is recorded against `path` and the entry is kept
    /// as a leaf.
    fn is_directory(&mut self, path: &Utf8Path, file_type: io::Result<FileType>) -> bool {
        match file_type {
            Ok(file_type) => file_type.is_dir(),
            Err(err) => {
                self.record(ScanError::access(path.to_owned(), err));
                false
            }
        }
    }

    /// Reports and keeps a recoverable error.
    fn record(&mut self, err: ScanError) {
        self.stats.increment_errors();
        self.sink.on_event(ScanEvent::failed(&err));
        self.errors.push(err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{ChannelSink, NullSink};
    use std::fs;
    use tempfile::TempDir;

    fn utf8_root(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("Invalid path")
    }

    #[tokio::test]
    async fn test_walk_records_directory_before_children() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = utf8_root(&temp_dir);
        fs::create_dir_all(root.join("a/b")).expect("Failed to create dirs");
        fs::write(root.join("a/b/leaf.txt"), "x").expect("Failed to write file");

        let stats = ScanStats::new();
        let mut walker = TreeWalker::new(&NullSink, &stats);
        let mut entries = Vec::new();
        walker
            .walk(root.clone(), &mut entries)
            .await
            .expect("Walk failed");

        assert_eq!(
            entries,
            vec![root.join("a"), root.join("a/b"), root.join("a/b/leaf.txt")]
        );
        assert!(walker.into_errors().is_empty());

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.directories, 2);
        assert_eq!(snapshot.files, 1);
    }

    #[tokio::test]
    async fn test_walk_missing_root_returns_access_error() {
        let stats = ScanStats::new();
        let mut walker = TreeWalker::new(&NullSink, &stats);
        let mut entries = Vec::new();

        let result = walker
            .walk(Utf8PathBuf::from("/nonexistent/path/that/does/not/exist"), &mut entries)
            .await;

        assert!(matches!(result, Err(ScanError::Access { .. })));
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_walk_emits_reading_event_per_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = utf8_root(&temp_dir);
        fs::create_dir(root.join("sub")).expect("Failed to create dir");

        let (sink, mut rx) = ChannelSink::new();
        let stats = ScanStats::new();
        let mut walker = TreeWalker::new(&sink, &stats);
        let mut entries = Vec::new();
        walker.walk(root.clone(), &mut entries).await.expect("Walk failed");

        let mut reads = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let ScanEvent::ReadingDirectory(path) = event {
                reads.push(path);
            }
        }
        assert_eq!(reads, vec![root.clone(), root.join("sub")]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_walk_does_not_follow_directory_symlinks() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = utf8_root(&temp_dir);
        fs::create_dir(root.join("real")).expect("Failed to create dir");
        fs::write(root.join("real/inside.txt"), "x").expect("Failed to write file");
        std::os::unix::fs::symlink(root.join("real"), root.join("link"))
            .expect("Failed to create symlink");

        let stats = ScanStats::new();
        let mut walker = TreeWalker::new(&NullSink, &stats);
        let mut entries = Vec::new();
        walker.walk(root.clone(), &mut entries).await.expect("Walk failed");

        assert!(entries.contains(&root.join("link")));
        assert!(!entries.contains(&root.join("link/inside.txt")));
        assert_eq!(entries.len(), 3);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_walk_keeps_non_utf8_directory_and_its_subtree() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = utf8_root(&temp_dir);
        let bad_dir = temp_dir.path().join(OsStr::from_bytes(b"bad\xffdir"));
        fs::create_dir(&bad_dir).expect("Failed to create dir");
        fs::write(bad_dir.join("inner.txt"), "x").expect("Failed to write file");
        fs::write(root.join("ok.txt"), "x").expect("Failed to write file");

        let stats = ScanStats::new();
        let mut walker = TreeWalker::new(&NullSink, &stats);
        let mut entries = Vec::new();
        walker.walk(root.clone(), &mut entries).await.expect("Walk failed");

        let lossy = root.join("bad\u{FFFD}dir");
        assert_eq!(entries.len(), 3);
        assert!(entries.contains(&lossy));
        assert!(entries.contains(&lossy.join("inner.txt")));
        assert!(entries.contains(&root.join("ok.txt")));

        let errors = walker.into_errors();
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], ScanError::NonUtf8Path(path) if *path == bad_dir));

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.directories, 1);
        assert_eq!(snapshot.files, 2);
        assert_eq!(snapshot.errors, 1);
    }

    #[test]
    fn test_file_type_failure_is_recorded() {
        let (sink, mut rx) = ChannelSink::new();
        let stats = ScanStats::new();
        let mut walker = TreeWalker::new(&sink, &stats);
        let path = Utf8PathBuf::from("/tree/locked");

        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert!(!walker.is_directory(&path, Err(denied)));

        assert_eq!(stats.snapshot().errors, 1);
        assert!(matches!(rx.try_recv(), Ok(ScanEvent::Failed { .. })));

        let errors = walker.into_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path(), Some(&path));
    }
}
