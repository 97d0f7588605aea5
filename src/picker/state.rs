//! Picker state machine: cursor, tabs, staging, deletion.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::config::{Action, KeyBinding, UiConfig};
use crate::picker::keys::KeyPress;
use crate::picker::thumbnail::ThumbnailCache;
use crate::scan::{ScreenshotRecord, SourceTab};
use crate::staging::StagingStore;

/// Current picker interaction mode.
///
/// `NukeConfirm` is the pending bulk-delete confirmation: the next press of
/// the nuke key deletes the active tab's records, any other key cancels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerMode {
    Browsing,
    NukeConfirm,
}

/// How the picker exited.
///
/// Staging is independent of picker lifetime: staged images survive both
/// variants and persist until drained or cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerOutcome {
    Committed,
    Cancelled,
}

/// Interactive picker state.
///
/// Holds the scanned tabs, cursor/scroll bookkeeping, the thumbnail cache,
/// and the key-to-action dispatch map. All mutation happens through
/// [`PickerController::handle_key`]; the staging store is passed in by the
/// caller so tests and the send hook can share it.
pub struct PickerController {
    pub(crate) tabs: Vec<SourceTab>,
    pub(crate) active_tab: usize,
    pub(crate) cursor: usize,
    pub(crate) scroll: usize,
    pub(crate) mode: PickerMode,
    pub(crate) visible_rows: usize,
    pub(crate) tab_label_width: usize,
    pub(crate) thumbnails: ThumbnailCache,
    pub(crate) thumbnail_max_bytes: u64,
    pub(crate) thumbnail_width: usize,
    /// Path of the thumbnail drawn last frame; cleared on tab switch so the
    /// next frame reloads.
    pub(crate) last_rendered_thumb: Option<PathBuf>,
    action_map: HashMap<KeyBinding, Action>,
}

impl PickerController {
    /// Build a picker over the non-empty tabs of a scan.
    ///
    /// Empty tabs are filtered out up front; returns `None` when no source
    /// produced any screenshots (callers surface that as a warning
    /// notification).
    pub fn new(
        tabs: Vec<SourceTab>,
        ui: &UiConfig,
        action_map: HashMap<KeyBinding, Action>,
    ) -> Option<Self> {
        let tabs: Vec<SourceTab> = tabs
            .into_iter()
            .filter(|tab| !tab.screenshots.is_empty())
            .collect();
        if tabs.is_empty() {
            return None;
        }
        Some(Self {
            tabs,
            active_tab: 0,
            cursor: 0,
            scroll: 0,
            mode: PickerMode::Browsing,
            visible_rows: ui.visible_rows,
            tab_label_width: ui.tab_label_width,
            thumbnails: ThumbnailCache::new(),
            thumbnail_max_bytes: ui.thumbnail_max_bytes,
            thumbnail_width: ui.thumbnail_width,
            last_rendered_thumb: None,
            action_map,
        })
    }

    /// The record under the cursor, if the active tab has any.
    pub fn current_record(&self) -> Option<&ScreenshotRecord> {
        self.tabs.get(self.active_tab)?.screenshots.get(self.cursor)
    }

    pub fn mode(&self) -> PickerMode {
        self.mode
    }

    pub fn active_tab(&self) -> usize {
        self.active_tab
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Look up an action for the given key press.
    fn find_action(&self, press: &KeyPress) -> Option<Action> {
        for (binding, action) in &self.action_map {
            if binding.matches(&press.key, press.ctrl, false, press.alt) {
                return Some(*action);
            }
        }
        None
    }

    /// Process one key press, mutating staging state as needed.
    ///
    /// Returns `Some` when the picker is finished.
    pub fn handle_key(
        &mut self,
        press: &KeyPress,
        store: &mut StagingStore,
    ) -> Option<PickerOutcome> {
        let action = self.find_action(press);

        // Any key other than the nuke key cancels a pending confirmation
        // without side effects.
        if self.mode == PickerMode::NukeConfirm {
            self.mode = PickerMode::Browsing;
            if action == Some(Action::NukeTab) {
                return self.nuke_active_tab(store);
            }
            return None;
        }

        match action? {
            Action::MoveUp => {
                self.move_cursor(-1);
                None
            }
            Action::MoveDown => {
                self.move_cursor(1);
                None
            }
            Action::NextTab => {
                self.cycle_tab();
                None
            }
            Action::ToggleStage => {
                if let Some(record) = self.current_record().cloned() {
                    store.toggle(&record);
                }
                None
            }
            Action::OpenExternal => {
                self.open_current();
                None
            }
            Action::DeleteEntry => self.delete_current(store),
            Action::NukeTab => {
                self.mode = PickerMode::NukeConfirm;
                None
            }
            Action::Accept => Some(PickerOutcome::Committed),
            Action::Cancel => Some(PickerOutcome::Cancelled),
        }
    }

    /// Move the cursor, clamped to the active tab, keeping it inside the
    /// visible scroll window.
    fn move_cursor(&mut self, delta: i64) {
        let len = self.tabs[self.active_tab].screenshots.len();
        if len == 0 {
            return;
        }
        let max = (len - 1) as i64;
        self.cursor = (self.cursor as i64 + delta).clamp(0, max) as usize;
        self.fix_scroll();
    }

    fn fix_scroll(&mut self) {
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + self.visible_rows {
            self.scroll = self.cursor + 1 - self.visible_rows;
        }
    }

    /// Cycle to the next non-empty tab. No-op with a single tab.
    fn cycle_tab(&mut self) {
        let non_empty = self
            .tabs
            .iter()
            .filter(|tab| !tab.screenshots.is_empty())
            .count();
        if non_empty < 2 {
            return;
        }
        let mut next = self.active_tab;
        loop {
            next = (next + 1) % self.tabs.len();
            if !self.tabs[next].screenshots.is_empty() {
                break;
            }
        }
        self.switch_to_tab(next);
    }

    fn switch_to_tab(&mut self, index: usize) {
        self.active_tab = index;
        self.cursor = 0;
        self.scroll = 0;
        self.last_rendered_thumb = None;
    }

    /// Open the record under the cursor in the platform viewer. Best-effort.
    fn open_current(&self) {
        if let Some(record) = self.current_record()
            && let Err(err) = open::that(&record.path)
        {
            log::debug!("Could not open {}: {err}", record.path.display());
        }
    }

    /// Delete the record under the cursor from disk and from the tab.
    ///
    /// Unlink failures leave the in-memory list unchanged. Emptying the last
    /// non-empty tab closes the picker.
    fn delete_current(&mut self, store: &mut StagingStore) -> Option<PickerOutcome> {
        let record = self.current_record().cloned()?;
        if let Err(err) = fs::remove_file(&record.path) {
            log::debug!("Could not delete {}: {err}", record.path.display());
            return None;
        }
        self.forget_record(&record, store);
        self.after_tab_mutation()
    }

    /// Delete every record in the active tab, per-file best-effort.
    ///
    /// Files that fail to unlink stay in the list; the rest are removed and
    /// unstaged in one tab-level update.
    fn nuke_active_tab(&mut self, store: &mut StagingStore) -> Option<PickerOutcome> {
        let records: Vec<ScreenshotRecord> = self.tabs[self.active_tab].screenshots.clone();
        for record in records {
            if let Err(err) = fs::remove_file(&record.path) {
                log::debug!("Could not delete {}: {err}", record.path.display());
                continue;
            }
            self.forget_record(&record, store);
        }
        self.after_tab_mutation()
    }

    /// Remove one deleted record from staging, thumbnails, and the tab list.
    fn forget_record(&mut self, record: &ScreenshotRecord, store: &mut StagingStore) {
        store.unstage(&record.path);
        self.thumbnails.evict(&record.path);
        if self.last_rendered_thumb.as_deref() == Some(record.path.as_path()) {
            self.last_rendered_thumb = None;
        }
        self.tabs[self.active_tab]
            .screenshots
            .retain(|r| r.path != record.path);
    }

    /// Re-validate cursor/scroll after deletions; switch tabs or close when
    /// the active tab emptied.
    fn after_tab_mutation(&mut self) -> Option<PickerOutcome> {
        let len = self.tabs[self.active_tab].screenshots.len();
        if len == 0 {
            if let Some(next) = self
                .tabs
                .iter()
                .enumerate()
                .find(|(i, tab)| *i != self.active_tab && !tab.screenshots.is_empty())
                .map(|(i, _)| i)
            {
                self.switch_to_tab(next);
                return None;
            }
            return Some(PickerOutcome::Committed);
        }
        if self.cursor >= len {
            self.cursor = len - 1;
        }
        if self.scroll > self.cursor {
            self.scroll = self.cursor;
        }
        None
    }
}
