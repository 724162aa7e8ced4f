use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::ScrapeError;

/// Read a newline-delimited URL list. Lines are trimmed, blank lines
/// skipped, order preserved. Emptiness is the batch runner's concern.
pub fn read_url_list(path: &Path) -> Result<Vec<String>, ScrapeError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            ScrapeError::MissingUrlFile(path.to_path_buf())
        } else {
            ScrapeError::UrlFileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

// ── Tests ──
