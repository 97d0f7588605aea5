//! Screenshot discovery: directory and glob scanning, tab building.
//!
//! Every scan builds fresh [`ScreenshotRecord`]s; nothing persists between
//! invocations. All discovery failures (missing directory, bad glob,
//! unreadable metadata) degrade to empty or skipped entries, never errors.

pub mod patterns;

use crate::paths::{expand_tilde, is_glob_pattern};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions accepted by glob scans (the pattern itself is the name filter).
const GLOB_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// A discovered screenshot file.
#[derive(Debug, Clone)]
pub struct ScreenshotRecord {
    /// Absolute path; unique key within a scan.
    pub path: PathBuf,
    /// Base name, used for display and pattern matching.
    pub name: String,
    /// Last modification time, used for sort order and relative display.
    pub modified: DateTime<Local>,
    /// File size in bytes, used for display and thumbnail gating.
    pub size_bytes: u64,
}

impl ScreenshotRecord {
    /// Build a record from a path, reading metadata.
    ///
    /// Returns `None` when the path is not a regular file or its metadata
    /// cannot be read.
    fn from_path(path: &Path) -> Option<Self> {
        let metadata = fs::metadata(path).ok()?;
        if !metadata.is_file() {
            return None;
        }
        let name = path.file_name()?.to_string_lossy().into_owned();
        let modified = metadata
            .modified()
            .map(DateTime::<Local>::from)
            .unwrap_or_else(|_| Local::now());
        Some(Self {
            path: path.to_path_buf(),
            name,
            modified,
            size_bytes: metadata.len(),
        })
    }
}

/// One configured source and its discovered records.
#[derive(Debug, Clone)]
pub struct SourceTab {
    /// Short display name derived from the source string.
    pub label: String,
    /// The original configured source (directory or glob).
    pub pattern: String,
    /// Records sorted by modification time descending.
    pub screenshots: Vec<ScreenshotRecord>,
}

/// Scan a plain directory for screenshot files.
///
/// Keeps only `.png` entries (case-insensitive) whose base name matches one
/// of the known screenshot naming patterns. A missing or unreadable directory
/// yields an empty list.
pub fn scan_directory(dir: &Path) -> Vec<ScreenshotRecord> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            log::debug!("Cannot read directory {}: {err}", dir.display());
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        if !has_extension(&path, &["png"]) {
            continue;
        }
        if !patterns::matches_screenshot_name(&name) {
            continue;
        }
        if let Some(record) = ScreenshotRecord::from_path(&path) {
            records.push(record);
        }
    }
    records
}

/// Expand a glob pattern and collect matching image files.
///
/// Supports `*`, `**`, `?`, and bracket classes. Keeps png/jpg/jpeg/webp
/// files; the pattern itself is the name filter, so no screenshot-name
/// matching happens here. Invalid patterns yield an empty list.
pub fn scan_glob(pattern: &str) -> Vec<ScreenshotRecord> {
    let expanded = expand_tilde(pattern);
    let pattern_str = expanded.to_string_lossy();

    let paths = match glob::glob(&pattern_str) {
        Ok(paths) => paths,
        Err(err) => {
            log::debug!("Invalid glob pattern '{pattern}': {err}");
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for path in paths.flatten() {
        if !has_extension(&path, &GLOB_EXTENSIONS) {
            continue;
        }
        if let Some(record) = ScreenshotRecord::from_path(&path) {
            records.push(record);
        }
    }
    records
}

/// Scan a single source, dispatching on glob-ness.
pub fn scan_source(source: &str) -> Vec<ScreenshotRecord> {
    if is_glob_pattern(source) {
        scan_glob(source)
    } else {
        scan_directory(&expand_tilde(source))
    }
}

/// Scan every source and build display tabs.
///
/// Each tab is sorted by modification time descending; ties keep their
/// original scan order (the sort is stable). Empty tabs are retained here so
/// callers can decide whether to filter them.
pub fn build_tabs(sources: &[String], label_width: usize) -> Vec<SourceTab> {
    sources
        .iter()
        .map(|source| {
            let mut screenshots = scan_source(source);
            screenshots.sort_by(|a, b| b.modified.cmp(&a.modified));
            log::debug!("Source '{source}': {} screenshot(s)", screenshots.len());
            SourceTab {
                label: tab_label(source, label_width),
                pattern: source.clone(),
                screenshots,
            }
        })
        .collect()
}

/// Derive a short tab label from a source string.
///
/// Directories use their last path component; globs use the deepest
/// directory component before the first metacharacter. Labels are truncated
/// to `width` characters.
pub fn tab_label(source: &str, width: usize) -> String {
    let label = if is_glob_pattern(source) {
        let prefix: String = source
            .chars()
            .take_while(|c| !['*', '?', '[', '{', '!'].contains(c))
            .collect();
        Path::new(prefix.trim_end_matches('/'))
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.to_string())
    } else {
        Path::new(source.trim_end_matches('/'))
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.to_string())
    };

    if label.chars().count() > width {
        let truncated: String = label.chars().take(width.saturating_sub(1)).collect();
        format!("{truncated}…")
    } else {
        label
    }
}

fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            allowed.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
