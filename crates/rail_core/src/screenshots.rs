use anyhow::{Result, bail};
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

const FAILURE_MARKER: &str = "(failed|attempt)";

/// Matches screenshot file names that belong to one case and were taken on
/// a failure or a retried attempt, such as `C12 login works (failed).png`.
pub struct ScreenshotMatcher {
    case_marker: Regex,
    failure_marker: Regex,
}

impl ScreenshotMatcher {
    pub fn new(case_id: u64) -> Result<Self> {
        // the case marker must not be the prefix of a longer id, C1 vs C12
        let case_marker = Regex::new(&format!(r"C{case_id}(?:\D|$)"))?;
        let failure_marker = Regex::new(FAILURE_MARKER)?;
        Ok(Self {
            case_marker,
            failure_marker,
        })
    }

    pub fn is_match(&self, file_name: &str) -> bool {
        self.case_marker.is_match(file_name) && self.failure_marker.is_match(file_name)
    }
}

/// Walks `root` and returns the screenshots of `case_id`, sorted by path.
pub fn find_screenshots(root: &Path, case_id: u64) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        bail!("unable to scan screenshots folder {}", root.display());
    }

    let matcher = ScreenshotMatcher::new(case_id)?;
    let mut found = vec![];

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping screenshot entry: {e}");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let matched = matcher.is_match(&entry.file_name().to_string_lossy());
        if matched {
            debug!("found screenshot {} for C{case_id}", entry.path().display());
            found.push(entry.into_path());
        }
    }

    Ok(found)
}
