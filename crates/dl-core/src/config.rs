//! Configuration structures for the dirlist tool.
//!
//! This module provides configuration types for each part of the application:
//!
//! - [`ScanConfig`] - Which directory tree to enumerate
//! - [`OutputConfig`] - Where the listing is persisted and whether it is printed
//! - [`Config`] - Root configuration combining all settings
//!
//! All configuration types implement [`Default`] with the values used when the
//! binary is run with no arguments, and every struct is `#[serde(default)]` so
//! a configuration file only needs the fields it overrides.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::DEFAULT_OUTPUT_FILE;

/// Configuration for the directory scan.
///
/// # Examples
///
/// ```
/// use dl_core::ScanConfig;
///
/// let config = ScanConfig::default();
/// assert_eq!(config.root.as_str(), ".");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Root directory to enumerate.
    ///
    /// Relative roots are resolved against the working directory before
    /// scanning.
    pub root: Utf8PathBuf,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: Utf8PathBuf::from("."),
        }
    }
}

/// Configuration for persisting and displaying the listing.
///
/// # Examples
///
/// ```
/// use dl_core::OutputConfig;
///
/// let config = OutputConfig::default();
/// assert_eq!(config.file.as_str(), "directory_list.txt");
/// assert!(config.print_listing);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination file for the listing.
    ///
    /// A path ending in a separator is treated as a directory.
    pub file: Utf8PathBuf,

    /// Whether to print the numbered listing to stdout after scanning.
    pub print_listing: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: Utf8PathBuf::from(DEFAULT_OUTPUT_FILE),
            print_listing: true,
        }
    }
}

/// Root configuration for the dirlist tool.
///
/// # Examples
///
/// ```
/// use dl_core::Config;
///
/// let config = Config::default();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scan configuration.
    pub scan: ScanConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

impl Config {
    /// Loads a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults. The loaded configuration is
    /// validated before being returned.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Parse`] if it is not valid JSON for this schema, or a
    /// validation error from [`validate`](Self::validate).
    pub fn from_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration can be used for a run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if the scan root or the output
    /// file is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan.root.as_str().is_empty() {
            return Err(ConfigError::invalid_option("scan.root", "must not be empty"));
        }
        if self.output.file.as_str().is_empty() {
            return Err(ConfigError::invalid_option(
                "output.file",
                "must not be empty",
            ));
        }
        Ok(())
    }
}
