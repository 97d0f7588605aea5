//! Configuration type definitions.

use serde::{Deserialize, Serialize};

/// Screenshot source settings.
///
/// Sources are directories or glob patterns scanned when the picker opens.
/// When empty, the `SHOTSTAGE_DIR` environment variable and then the
/// platform-default screenshot directory are used instead.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Ordered list of directories or glob patterns, each becoming one
    /// picker tab (e.g. `"~/Desktop/ss"`, `"/out/**/thumbnail_*.png"`)
    #[serde(default)]
    pub paths: Vec<String>,
}

/// Picker display preferences.
#[derive(Debug, Serialize, Deserialize)]
pub struct UiConfig {
    /// Number of list rows visible at once (valid range: 3 - 30)
    #[serde(default = "default_visible_rows")]
    pub visible_rows: usize,

    /// Maximum tab label width in characters (valid range: 8 - 40)
    #[serde(default = "default_tab_label_width")]
    pub tab_label_width: usize,

    /// Files larger than this many bytes show "no preview" instead of a
    /// thumbnail (valid range: 64 KiB - 64 MiB)
    #[serde(default = "default_thumbnail_max_bytes")]
    pub thumbnail_max_bytes: u64,

    /// Thumbnail pane width in terminal cells (valid range: 16 - 80)
    #[serde(default = "default_thumbnail_width")]
    pub thumbnail_width: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            visible_rows: default_visible_rows(),
            tab_label_width: default_tab_label_width(),
            thumbnail_max_bytes: default_thumbnail_max_bytes(),
            thumbnail_width: default_thumbnail_width(),
        }
    }
}

/// SSH sync-script settings.
///
/// Only consumed by the sync-script generator; absent unless the user opts
/// into remote screenshot syncing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Directory watched on the remote machine
    #[serde(default = "default_watch_dir")]
    pub watch_dir: String,

    /// Local directory screenshots are synced into
    #[serde(default = "default_remote_dir")]
    pub remote_dir: String,

    /// Remote host override (user@host); falls back to the generator argument
    #[serde(default)]
    pub remote_host: Option<String>,

    /// SSH port (valid range: 1 - 65535)
    #[serde(default = "default_sync_port")]
    pub port: u16,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            watch_dir: default_watch_dir(),
            remote_dir: default_remote_dir(),
            remote_host: None,
            port: default_sync_port(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_visible_rows() -> usize {
    10
}

fn default_tab_label_width() -> usize {
    18
}

fn default_thumbnail_max_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_thumbnail_width() -> usize {
    40
}

fn default_watch_dir() -> String {
    "~/Desktop".to_string()
}

fn default_remote_dir() -> String {
    "~/Desktop/ss".to_string()
}

fn default_sync_port() -> u16 {
    22
}
