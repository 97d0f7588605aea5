//! Source path resolution for screenshot discovery.
//!
//! This module handles:
//! - Tilde expansion in user-supplied paths
//! - Glob-pattern classification of configured sources
//! - Platform-default screenshot directory detection
//! - The config > environment > platform-default priority chain

use crate::config::Config;
use std::path::PathBuf;

/// Environment variable supplying a single fallback screenshot directory.
pub const SOURCE_DIR_ENV: &str = "SHOTSTAGE_DIR";

/// Characters that mark a source string as a glob pattern rather than a directory.
const GLOB_CHARS: [char; 7] = ['*', '?', '[', ']', '{', '}', '!'];

/// Expand a leading tilde (`~/`) in a path string.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

/// Returns true if the string contains any glob metacharacter.
///
/// Sources that look like globs are expanded against the file system;
/// everything else is treated as a plain directory.
pub fn is_glob_pattern(s: &str) -> bool {
    s.chars().any(|c| GLOB_CHARS.contains(&c))
}

/// Detect the platform-default screenshot directory.
///
/// On macOS this reads the `com.apple.screencapture location` preference and
/// falls back to `~/Desktop` when the preference is unset or points at a
/// missing path. On other platforms it probes a fixed list of conventional
/// screenshot folders and returns the first that exists, else `~/Desktop`.
///
/// Probe failures never surface to the caller; the chain simply continues.
pub fn default_directory() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"));

    #[cfg(target_os = "macos")]
    {
        if let Some(dir) = macos_screencapture_location() {
            if dir.exists() {
                return dir;
            }
            log::debug!(
                "screencapture location {} does not exist, falling back",
                dir.display()
            );
        }
        return home.join("Desktop");
    }

    #[cfg(not(target_os = "macos"))]
    {
        let candidates = [
            home.join("Pictures").join("Screenshots"),
            home.join("Pictures"),
            home.join("Screenshots"),
            home.join("Desktop"),
        ];
        for candidate in candidates {
            if candidate.is_dir() {
                return candidate;
            }
        }
        home.join("Desktop")
    }
}

/// Read the macOS screenshot-location preference via `defaults read`.
#[cfg(target_os = "macos")]
fn macos_screencapture_location() -> Option<PathBuf> {
    use std::process::Command;

    let output = Command::new("defaults")
        .args(["read", "com.apple.screencapture", "location"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let raw = String::from_utf8_lossy(&output.stdout);
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(expand_tilde(trimmed))
}

/// Resolve the ordered list of screenshot sources.
///
/// Priority: configured source list, then the `SHOTSTAGE_DIR` environment
/// variable, then the platform default. The first non-empty level wins.
/// Resolution is re-run on every call; config reads are cheap and rare.
pub fn resolve_sources(config: &Config) -> Vec<String> {
    if !config.sources.paths.is_empty() {
        log::debug!("Using {} configured source(s)", config.sources.paths.len());
        return config.sources.paths.clone();
    }

    if let Ok(dir) = std::env::var(SOURCE_DIR_ENV)
        && !dir.trim().is_empty()
    {
        log::debug!("Using {SOURCE_DIR_ENV}={dir}");
        return vec![dir];
    }

    let fallback = default_directory();
    log::debug!("Using platform default source: {}", fallback.display());
    vec![fallback.to_string_lossy().into_owned()]
}
