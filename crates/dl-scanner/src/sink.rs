//! Progress and failure reporting for the scanner.
//!
//! The [`Scanner`](crate::Scanner) never writes to a global stream directly.
//! Every progress step and every failure is handed to a [`ScanSink`] as a
//! [`ScanEvent`], so callers decide whether events are logged, forwarded, or
//! dropped.
//!
//! # Provided Sinks
//!
//! - [`TracingSink`]: logs through `tracing` (the default)
//! - [`NullSink`]: discards everything
//! - [`ChannelSink`]: forwards events over a tokio channel
//!
//! # Examples
//!
//! ```
//! use dl_scanner::{ScanEvent, ScanSink};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! #[derive(Default)]
//! struct CountingSink(AtomicUsize);
//!
//! impl ScanSink for CountingSink {
//!     fn on_event(&self, _event: ScanEvent) {
//!         self.0.fetch_add(1, Ordering::Relaxed);
//!     }
//! }
//! ```

use camino::Utf8PathBuf;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::error::ScanError;

/// An event emitted by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// About to list the given directory.
    ReadingDirectory(Utf8PathBuf),

    /// A directory entry was recorded and will be descended into.
    DirectoryFound(Utf8PathBuf),

    /// A non-directory entry was recorded.
    FileFound(Utf8PathBuf),

    /// An operation failed.
    Failed {
        /// Where the failure happened, e.g. `Error accessing /srv`.
        context: String,
        /// The error message.
        message: String,
    },

    /// The listing was written to the given file.
    Saved(Utf8PathBuf),

    /// The accumulated listing was cleared.
    Cleared,
}

impl ScanEvent {
    /// Builds a [`ScanEvent::Failed`] from a scan error.
    #[must_use]
    pub fn failed(err: &ScanError) -> Self {
        Self::Failed {
            context: err.context(),
            message: err.to_string(),
        }
    }
}

/// A receiver of scanner events.
///
/// # Thread Safety
///
/// Sinks must be [`Send`] and [`Sync`] so a scan future holding one can be
/// moved across runtime worker threads.
pub trait ScanSink: Send + Sync {
    /// Handles a single event.
    fn on_event(&self, event: ScanEvent);
}

/// A sink that logs every event through `tracing`.
///
/// Directory and file discoveries are logged at `info`, directory reads at
/// `debug`, and failures at `error` with the failure context as the message.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ScanSink for TracingSink {
    fn on_event(&self, event: ScanEvent) {
        match event {
            ScanEvent::ReadingDirectory(path) => debug!(path = %path, "Attempting to read directory"),
            ScanEvent::DirectoryFound(path) => info!(path = %path, "Scanning directory"),
            ScanEvent::FileFound(path) => info!(path = %path, "Found file"),
            ScanEvent::Failed { context, message } => error!(error = %message, "{context}"),
            ScanEvent::Saved(path) => info!(path = %path, "Directory list successfully saved"),
            ScanEvent::Cleared => info!("Directory list cleared"),
        }
    }
}

/// A sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ScanSink for NullSink {
    #[inline]
    fn on_event(&self, _event: ScanEvent) {}
}

/// A sink that forwards events over an unbounded tokio channel.
///
/// Events are dropped silently once the receiver is gone.
///
/// # Examples
///
/// ```
/// use dl_scanner::{ChannelSink, ScanEvent, ScanSink};
///
/// let (sink, mut rx) = ChannelSink::new();
/// sink.on_event(ScanEvent::Cleared);
/// assert_eq!(rx.try_recv().ok(), Some(ScanEvent::Cleared));
/// ```
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<ScanEvent>,
}

impl ChannelSink {
    /// Creates a sink and the receiver its events arrive on.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ScanEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ScanSink for ChannelSink {
    fn on_event(&self, event: ScanEvent) {
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_failed_event_from_error() {
        let err = ScanError::access("/gone", io::Error::new(io::ErrorKind::NotFound, "missing"));
        match ScanEvent::failed(&err) {
            ScanEvent::Failed { context, message } => {
                assert_eq!(context, "Error accessing /gone");
                assert!(message.contains("missing"));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn test_channel_sink_forwards_in_order() {
        let (sink, mut rx) = ChannelSink::new();
        sink.on_event(ScanEvent::FileFound(Utf8PathBuf::from("a")));
        sink.on_event(ScanEvent::Cleared);

        assert_eq!(
            rx.try_recv().ok(),
            Some(ScanEvent::FileFound(Utf8PathBuf::from("a")))
        );
        assert_eq!(rx.try_recv().ok(), Some(ScanEvent::Cleared));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_sink_after_receiver_dropped() {
        let (sink, rx) = ChannelSink::new();
        drop(rx);
        sink.on_event(ScanEvent::Cleared);
    }

    #[test]
    fn test_null_and_tracing_sinks_accept_all_events() {
        let events = [
            ScanEvent::ReadingDirectory(Utf8PathBuf::from("root")),
            ScanEvent::DirectoryFound(Utf8PathBuf::from("root/sub")),
            ScanEvent::FileFound(Utf8PathBuf::from("root/x.txt")),
            ScanEvent::failed(&ScanError::NoData),
            ScanEvent::Saved(Utf8PathBuf::from("out.txt")),
            ScanEvent::Cleared,
        ];
        for event in events {
            NullSink.on_event(event.clone());
            TracingSink.on_event(event);
        }
    }
}
