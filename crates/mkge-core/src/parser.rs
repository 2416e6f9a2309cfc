//! Archive file name parsing.
//!
//! Names look like `mkge-1.2.3Beta4+madkit-5.1.0.0.jar`. The match is anchored
//! at the start only, so any extension (or other trailing text) is ignored.
//!
//! Numbers must be written without leading zeros. Download URLs are rebuilt
//! from the parsed numbers, so `03` would point at a file named `3`.

use mkge_schema::{ArchiveRecord, ParseError};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static ARCHIVE_NAME: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^mkge-([0-9]+)\.([0-9]+)\.([0-9]+)(Stable|Alpha[0-9]+|Beta[0-9]+)\+madkit-([0-9]+\.[0-9]+\.[0-9]+\.[0-9]+)",
    )
    .ok()
});

fn number(raw: &str) -> Result<u32, ParseError> {
    raw.parse()
        .map_err(|_| ParseError::OutOfRange(raw.to_string()))
}

fn is_canonical(digits: &str) -> bool {
    digits == "0" || !digits.starts_with('0')
}

/// Parse a bare archive file name into an [`ArchiveRecord`].
///
/// # Errors
///
/// Returns [`ParseError::InvalidFileName`] when the name does not follow the
/// archive grammar or spells a number with a leading zero, or
/// [`ParseError::OutOfRange`] when a number overflows.
pub fn parse(file_name: &str) -> Result<ArchiveRecord, ParseError> {
    let caps = ARCHIVE_NAME
        .as_ref()
        .and_then(|re| re.captures(file_name))
        .ok_or_else(|| ParseError::InvalidFileName(file_name.to_string()))?;

    let iteration = caps[4].trim_start_matches(char::is_alphabetic);
    let canonical = [&caps[1], &caps[2], &caps[3]]
        .into_iter()
        .chain((!iteration.is_empty()).then_some(iteration))
        .chain(caps[5].split('.'))
        .all(is_canonical);
    if !canonical {
        return Err(ParseError::InvalidFileName(file_name.to_string()));
    }

    Ok(ArchiveRecord {
        major: number(&caps[1])?,
        minor: number(&caps[2])?,
        revision: number(&caps[3])?,
        release: caps[4].parse()?,
        runtime: caps[5].parse()?,
    })
}

/// Parse the file name component of `path`, ignoring its directories.
///
/// # Errors
///
/// Same as [`parse`]; a path without a UTF-8 file name is an invalid file name.
pub fn parse_path(path: &Path) -> Result<ArchiveRecord, ParseError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ParseError::InvalidFileName(path.display().to_string()))?;
    parse(name)
}
