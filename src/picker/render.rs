//! Frame rendering for the picker.
//!
//! Every frame redraws a fixed-height content region: a tab header, the
//! list column (cursor/staged markers, name, relative timestamp, size), and
//! an adjacent thumbnail column. Frame width is adaptive; the row count is
//! fixed by `ui.visible_rows`.

use chrono::{DateTime, Local};

use crate::picker::state::{PickerController, PickerMode};
use crate::picker::thumbnail::Thumbnail;
use crate::staging::StagingStore;

/// Minimum total width before the thumbnail pane is dropped entirely.
const MIN_WIDTH_FOR_THUMBNAIL: usize = 60;

const INVERSE: &str = "\x1b[7m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render one full frame of the picker at the given terminal width.
pub fn render_frame(
    picker: &mut PickerController,
    store: &StagingStore,
    width: usize,
) -> Vec<String> {
    let width = width.max(20);
    let show_thumbnail =
        width >= MIN_WIDTH_FOR_THUMBNAIL && width > picker.thumbnail_width + 20;
    let list_width = if show_thumbnail {
        width - picker.thumbnail_width - 3
    } else {
        width
    };

    let mut lines = Vec::with_capacity(picker.visible_rows + 3);
    lines.push(header_line(picker, store, width));

    let thumb_lines = if show_thumbnail {
        thumbnail_lines(picker)
    } else {
        Vec::new()
    };

    for row in 0..picker.visible_rows {
        let index = picker.scroll + row;
        let list_part = list_row(picker, store, index, list_width);
        if show_thumbnail {
            let thumb_part = thumb_lines.get(row).cloned().unwrap_or_default();
            lines.push(format!("{list_part} {DIM}│{RESET} {thumb_part}"));
        } else {
            lines.push(list_part);
        }
    }

    lines.push(footer_line(picker));
    lines
}

/// Tab bar plus staged-count indicator.
fn header_line(picker: &PickerController, store: &StagingStore, width: usize) -> String {
    let mut header = String::new();
    for (i, tab) in picker.tabs.iter().enumerate() {
        let label = format!(" {} ({}) ", tab.label, tab.screenshots.len());
        if i == picker.active_tab {
            header.push_str(&format!("{INVERSE}{label}{RESET}"));
        } else {
            header.push_str(&label);
        }
    }
    let staged = match store.count() {
        0 => String::new(),
        1 => "1 screenshot staged".to_string(),
        n => format!("{n} screenshots staged"),
    };
    let used = visible_width(&header) + staged.len();
    let pad = width.saturating_sub(used);
    format!("{header}{}{BOLD}{staged}{RESET}", " ".repeat(pad))
}

/// One list row: marker, name, relative time, size.
fn list_row(
    picker: &PickerController,
    store: &StagingStore,
    index: usize,
    width: usize,
) -> String {
    let Some(record) = picker.tabs[picker.active_tab].screenshots.get(index) else {
        return " ".repeat(width);
    };

    let cursor_mark = if index == picker.cursor { '❯' } else { ' ' };
    let staged_mark = if store.is_staged(&record.path) { '●' } else { ' ' };
    let time = format_relative(record.modified);
    let size = format_size(record.size_bytes);
    let meta = format!("{time:>8}  {size:>9}");

    // name gets whatever is left between the markers and the metadata
    let name_width = width.saturating_sub(4 + meta.len() + 2);
    let name = truncate(&record.name, name_width);
    let row = format!("{cursor_mark} {staged_mark} {name:<name_width$}  {meta}");

    if index == picker.cursor {
        format!("{INVERSE}{row}{RESET}")
    } else {
        row
    }
}

/// Key help or the nuke confirmation prompt.
fn footer_line(picker: &PickerController) -> String {
    match picker.mode() {
        PickerMode::NukeConfirm => {
            let count = picker.tabs[picker.active_tab].screenshots.len();
            format!("{BOLD}Delete all {count} screenshots in this tab? Press again to confirm, any other key to cancel.{RESET}")
        }
        PickerMode::Browsing => format!(
            "{DIM}space stage · enter done · o open · x delete · n nuke tab · tab switch · esc close{RESET}"
        ),
    }
}

/// Thumbnail pane lines for the record under the cursor.
fn thumbnail_lines(picker: &mut PickerController) -> Vec<String> {
    let Some(record) = picker.current_record().cloned() else {
        return Vec::new();
    };
    let cols = picker.thumbnail_width;
    let rows = picker.visible_rows;
    let thumbnail = picker.thumbnails.get(
        &record.path,
        record.size_bytes,
        picker.thumbnail_max_bytes,
        cols,
        rows,
    );
    let lines = match thumbnail {
        Thumbnail::Ready(lines) => lines.clone(),
        Thumbnail::TooLarge => vec![format!("{DIM}[no preview: file too large]{RESET}")],
        Thumbnail::Unavailable => vec![format!("{DIM}[no preview]{RESET}")],
    };
    picker.last_rendered_thumb = Some(record.path);
    lines
}

/// Human-readable relative timestamp ("just now", "5m ago", "3h ago", ...).
pub fn format_relative(time: DateTime<Local>) -> String {
    let delta = Local::now().signed_duration_since(time);
    let seconds = delta.num_seconds();
    if seconds < 60 {
        "just now".to_string()
    } else if seconds < 3600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < 86_400 {
        format!("{}h ago", seconds / 3600)
    } else if seconds < 7 * 86_400 {
        format!("{}d ago", seconds / 86_400)
    } else {
        time.format("%Y-%m-%d").to_string()
    }
}

/// Human-readable byte size with one decimal for KB/MB.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let kept: String = s.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Character count ignoring ANSI escape sequences.
fn visible_width(s: &str) -> usize {
    let mut count = 0;
    let mut in_escape = false;
    for c in s.chars() {
        if in_escape {
            if c == 'm' {
                in_escape = false;
            }
        } else if c == '\x1b' {
            in_escape = true;
        } else {
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{KeybindingsConfig, UiConfig};
    use crate::scan::{ScreenshotRecord, SourceTab};
    use chrono::Duration;
    use std::io::Write;
    use std::path::Path;
    use tempfile::TempDir;

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut in_escape = false;
        for c in s.chars() {
            if in_escape {
                if c == 'm' {
                    in_escape = false;
                }
            } else if c == '\x1b' {
                in_escape = true;
            } else {
                out.push(c);
            }
        }
        out
    }

    fn record_in(dir: &Path, name: &str) -> ScreenshotRecord {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"png").unwrap();
        ScreenshotRecord {
            path,
            name: name.to_string(),
            modified: Local::now(),
            size_bytes: 3,
        }
    }

    fn picker_with(records: Vec<ScreenshotRecord>) -> PickerController {
        let action_map = KeybindingsConfig::default().build_action_map().unwrap();
        let tab = SourceTab {
            label: "ss".to_string(),
            pattern: "~/ss".to_string(),
            screenshots: records,
        };
        PickerController::new(vec![tab], &UiConfig::default(), action_map).unwrap()
    }

    #[test]
    fn frame_has_fixed_row_count() {
        let temp = TempDir::new().unwrap();
        let mut picker = picker_with(vec![record_in(temp.path(), "a.png")]);
        let store = StagingStore::new();
        let lines = render_frame(&mut picker, &store, 100);
        // header + visible_rows + footer
        assert_eq!(lines.len(), 12);
    }

    #[test]
    fn header_shows_tab_label_and_staged_count() {
        let temp = TempDir::new().unwrap();
        let record = record_in(temp.path(), "a.png");
        let mut picker = picker_with(vec![record.clone()]);
        let mut store = StagingStore::new();
        store.stage(&record).unwrap();

        let lines = render_frame(&mut picker, &store, 100);
        let header = strip_ansi(&lines[0]);
        assert!(header.contains("ss (1)"));
        assert!(header.contains("1 screenshot staged"));
    }

    #[test]
    fn cursor_and_staged_markers_appear() {
        let temp = TempDir::new().unwrap();
        let a = record_in(temp.path(), "a.png");
        let b = record_in(temp.path(), "b.png");
        let mut picker = picker_with(vec![a.clone(), b]);
        let mut store = StagingStore::new();
        store.stage(&a).unwrap();

        let lines = render_frame(&mut picker, &store, 100);
        let first = strip_ansi(&lines[1]);
        assert!(first.starts_with("❯ ●"));
        assert!(first.contains("a.png"));
        let second = strip_ansi(&lines[2]);
        assert!(second.contains("b.png"));
        assert!(!second.contains('●'));
    }

    #[test]
    fn nuke_confirm_footer_prompts() {
        let temp = TempDir::new().unwrap();
        let mut picker = picker_with(vec![record_in(temp.path(), "a.png")]);
        picker.mode = PickerMode::NukeConfirm;
        let store = StagingStore::new();
        let lines = render_frame(&mut picker, &store, 100);
        assert!(strip_ansi(lines.last().unwrap()).contains("Press again to confirm"));
    }

    #[test]
    fn narrow_frames_drop_the_thumbnail_pane() {
        let temp = TempDir::new().unwrap();
        let mut picker = picker_with(vec![record_in(temp.path(), "a.png")]);
        let store = StagingStore::new();
        let lines = render_frame(&mut picker, &store, 40);
        assert!(lines.iter().all(|line| !line.contains('│')));
    }

    #[test]
    fn relative_time_buckets() {
        let now = Local::now();
        assert_eq!(format_relative(now), "just now");
        assert_eq!(format_relative(now - Duration::minutes(5)), "5m ago");
        assert_eq!(format_relative(now - Duration::hours(3)), "3h ago");
        assert_eq!(format_relative(now - Duration::days(2)), "2d ago");
        let old = now - Duration::days(30);
        assert_eq!(format_relative(old), old.format("%Y-%m-%d").to_string());
    }

    #[test]
    fn size_formatting() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(5 * 1024), "5.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
