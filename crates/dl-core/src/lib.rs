//! Core configuration, errors, and constants for the dirlist tool.
//!
//! This crate provides the foundational pieces shared across the workspace:
//!
//! - [`Config`] and its sections ([`ScanConfig`], [`OutputConfig`])
//! - [`ConfigError`] for configuration loading and validation
//! - File name constants used when persisting a directory listing

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;

pub use config::{Config, OutputConfig, ScanConfig};
pub use error::ConfigError;

/// Output file written by the `dirlist` binary when no output is given.
pub const DEFAULT_OUTPUT_FILE: &str = "directory_list.txt";

/// File name appended to an output path that ends with a path separator.
pub const DIRECTORY_OUTPUT_FILE_NAME: &str = "directory_list_output.txt";
