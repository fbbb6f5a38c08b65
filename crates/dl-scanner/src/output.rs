//! Rendering and persistence helpers for a directory listing.
//!
//! Two renderings exist:
//!
//! - The **file format**: entries joined with `\n`, no header and no trailing
//!   newline ([`render_entries`])
//! - The **console format**: a bordered, 1-based numbered listing
//!   ([`write_listing`])

use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use dl_core::DIRECTORY_OUTPUT_FILE_NAME;

/// Title line of the console listing.
const LISTING_TITLE: &str = "Scanned Directory List:";

/// Border line framing the console listing.
const LISTING_BORDER: &str = "========================";

/// Resolves the file a listing is written to.
///
/// A path ending in a separator names a directory, and
/// [`DIRECTORY_OUTPUT_FILE_NAME`] is appended to it. Any other path is used
/// as-is.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use dl_scanner::output::resolve_output_path;
///
/// assert_eq!(
///     resolve_output_path(Utf8Path::new("/tmp/")).as_str(),
///     "/tmp/directory_list_output.txt"
/// );
/// assert_eq!(resolve_output_path(Utf8Path::new("out.txt")).as_str(), "out.txt");
/// ```
#[must_use]
pub fn resolve_output_path(path: &Utf8Path) -> Utf8PathBuf {
    if ends_with_separator(path.as_str()) {
        path.join(DIRECTORY_OUTPUT_FILE_NAME)
    } else {
        path.to_owned()
    }
}

fn ends_with_separator(path: &str) -> bool {
    path.ends_with('/') || path.ends_with(std::path::MAIN_SEPARATOR)
}

/// Renders entries in the file format.
#[must_use]
pub fn render_entries(entries: &[Utf8PathBuf]) -> String {
    entries
        .iter()
        .map(|entry| entry.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes the console listing of `entries` to `out`.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_listing<W: Write>(out: &mut W, entries: &[Utf8PathBuf]) -> io::Result<()> {
    writeln!(out, "{LISTING_TITLE}")?;
    writeln!(out, "{LISTING_BORDER}")?;
    for (index, entry) in entries.iter().enumerate() {
        writeln!(out, "{}. {entry}", index + 1)?;
    }
    writeln!(out, "{LISTING_BORDER}")?;
    Ok(())
}
