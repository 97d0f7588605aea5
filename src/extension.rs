//! Extension wiring: commands, shortcuts, and the send hook.
//!
//! [`ScreenshotExtension`] is the single object the host instantiates. It
//! owns the staging store for the process lifetime and glues the scanner,
//! picker, and sync-script generator to the host's registration surfaces.

use crate::config::Config;
use crate::host::{
    CommandSpec, HostContext, InterceptAction, NotifyKind, OutgoingMessage, ShortcutSpec, UiLoop,
};
use crate::picker::{PickerController, PickerSession};
use crate::staging::StagingStore;
use crate::sync_script;
use crate::{paths, scan};

/// The screenshot staging extension.
pub struct ScreenshotExtension {
    config: Config,
    store: StagingStore,
}

impl ScreenshotExtension {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            store: StagingStore::new(),
        }
    }

    /// Commands registered against the host.
    pub fn commands() -> Vec<CommandSpec> {
        vec![
            CommandSpec {
                name: "screenshots",
                description: "Browse and stage screenshots for the next message",
            },
            CommandSpec {
                name: "screenshots-clear",
                description: "Discard all staged screenshots",
            },
            CommandSpec {
                name: "screenshots-sync-script",
                description: "Print the SSH sync script for remote screenshot mirroring",
            },
        ]
    }

    /// Shortcut chords bound to the commands above.
    pub fn shortcuts() -> Vec<ShortcutSpec> {
        vec![ShortcutSpec {
            chord: "Ctrl+G",
            command: "screenshots",
        }]
    }

    /// Status widget text: `None` when nothing is staged.
    pub fn status_line(&self) -> Option<String> {
        match self.store.count() {
            0 => None,
            1 => Some("1 screenshot staged".to_string()),
            n => Some(format!("{n} screenshots staged")),
        }
    }

    /// Open the interactive picker over the currently resolved sources.
    ///
    /// Scans on every invocation, warns when no source yields screenshots,
    /// and refreshes the status widget after the picker closes. Staged
    /// images persist whether the picker committed or cancelled.
    pub fn open_picker(&mut self, ctx: &mut dyn HostContext, ui: &mut dyn UiLoop) {
        let sources = paths::resolve_sources(&self.config);
        let tabs = scan::build_tabs(&sources, self.config.ui.tab_label_width);

        let action_map = match self.config.keybindings.build_action_map() {
            Ok(map) => map,
            Err(err) => {
                ctx.notify(NotifyKind::Error, &format!("Invalid keybindings: {err}"));
                return;
            }
        };

        let Some(controller) = PickerController::new(tabs, &self.config.ui, action_map) else {
            ctx.notify(
                NotifyKind::Warning,
                &format!("No screenshots found in {}", sources.join(", ")),
            );
            return;
        };

        let mut session = PickerSession::new(controller, &mut self.store);
        let exit = ui.run(&mut session);
        log::debug!("Picker closed: {exit:?}, {} staged", self.store.count());

        ctx.set_status(self.status_line());
    }

    /// Discard all staged screenshots and clear the status widget.
    pub fn clear_staged(&mut self, ctx: &mut dyn HostContext) {
        let count = self.store.count();
        self.store.clear();
        ctx.set_status(None);
        ctx.notify(
            NotifyKind::Info,
            &format!("Cleared {count} staged screenshot(s)"),
        );
    }

    /// Print the sync script through a notification-sized surface.
    pub fn sync_script(&self, ctx: &mut dyn HostContext) -> Option<String> {
        let Some(sync) = &self.config.sync else {
            ctx.notify(
                NotifyKind::Warning,
                "No [sync] section configured; add one to config.toml first",
            );
            return None;
        };
        let host = sync.remote_host.as_deref().unwrap_or("user@remote");
        Some(sync_script::generate(sync, host))
    }

    /// The input-interception hook: drain staged images into the outgoing
    /// message. This is the sole path by which staged images reach a message.
    pub fn intercept_outgoing(&mut self, message: OutgoingMessage) -> InterceptAction {
        if self.store.count() == 0 {
            return InterceptAction::Continue;
        }
        let staged = self.store.drain();
        log::debug!("Attaching {} staged screenshot(s) to message", staged.len());
        let mut transformed = message;
        transformed.images.extend(staged);
        InterceptAction::Transform(transformed)
    }

    #[cfg(test)]
    pub(crate) fn store_mut(&mut self) -> &mut StagingStore {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{UiExit, UiWidget};
    use crate::scan::ScreenshotRecord;
    use chrono::Local;
    use std::io::Write;
    use tempfile::TempDir;

    /// Host stub recording notifications and status updates.
    #[derive(Default)]
    struct FakeHost {
        notifications: Vec<(NotifyKind, String)>,
        status: Option<String>,
    }

    impl HostContext for FakeHost {
        fn notify(&mut self, kind: NotifyKind, message: &str) {
            self.notifications.push((kind, message.to_string()));
        }
        fn set_status(&mut self, text: Option<String>) {
            self.status = text;
        }
    }

    /// UI loop stub replaying a fixed byte script.
    struct ScriptedUi {
        script: Vec<Vec<u8>>,
    }

    impl UiLoop for ScriptedUi {
        fn run(&mut self, widget: &mut dyn UiWidget) -> UiExit {
            for chunk in &self.script {
                widget.render(100);
                if let Some(exit) = widget.handle_input(chunk) {
                    return exit;
                }
            }
            UiExit::Cancelled
        }
    }

    fn extension_with_source(dir: &std::path::Path) -> ScreenshotExtension {
        let mut config = Config::default();
        config.sources.paths = vec![dir.display().to_string()];
        ScreenshotExtension::new(config)
    }

    fn write_screenshot(dir: &std::path::Path, name: &str) {
        let mut file = std::fs::File::create(dir.join(name)).unwrap();
        file.write_all(b"png bytes").unwrap();
    }

    #[test]
    fn empty_sources_surface_one_warning() {
        let temp = TempDir::new().unwrap();
        let mut extension = extension_with_source(temp.path());
        let mut host = FakeHost::default();
        let mut ui = ScriptedUi { script: vec![] };

        extension.open_picker(&mut host, &mut ui);
        assert_eq!(extension.status_line(), None);
        assert_eq!(host.notifications.len(), 1);
        assert_eq!(host.notifications[0].0, NotifyKind::Warning);
        assert!(host.notifications[0].1.contains("No screenshots found"));
    }

    #[test]
    fn picker_session_stages_through_the_ui_loop() {
        let temp = TempDir::new().unwrap();
        write_screenshot(temp.path(), "Screenshot 2024-01-30 at 10.00.00.png");
        let mut extension = extension_with_source(temp.path());
        let mut host = FakeHost::default();
        // Stage the record under the cursor, then accept.
        let mut ui = ScriptedUi {
            script: vec![b" ".to_vec(), b"\r".to_vec()],
        };

        extension.open_picker(&mut host, &mut ui);
        assert_eq!(extension.status_line().as_deref(), Some("1 screenshot staged"));
        assert_eq!(host.status.as_deref(), Some("1 screenshot staged"));
    }

    #[test]
    fn cancel_keeps_staged_images() {
        let temp = TempDir::new().unwrap();
        write_screenshot(temp.path(), "Screenshot 2024-01-30 at 10.00.00.png");
        let mut extension = extension_with_source(temp.path());
        let mut host = FakeHost::default();
        let mut ui = ScriptedUi {
            script: vec![b" ".to_vec(), b"\x1b".to_vec()],
        };

        extension.open_picker(&mut host, &mut ui);
        assert_eq!(extension.status_line().as_deref(), Some("1 screenshot staged"));
    }

    #[test]
    fn intercept_appends_and_drains() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.png");
        std::fs::write(&path, b"data").unwrap();
        let record = ScreenshotRecord {
            path,
            name: "a.png".to_string(),
            modified: Local::now(),
            size_bytes: 4,
        };

        let mut extension = ScreenshotExtension::new(Config::default());
        extension.store_mut().stage(&record).unwrap();

        let message = OutgoingMessage {
            text: "look at this".to_string(),
            images: vec![],
        };
        match extension.intercept_outgoing(message) {
            InterceptAction::Transform(out) => {
                assert_eq!(out.text, "look at this");
                assert_eq!(out.images.len(), 1);
                assert_eq!(out.images[0].mime_type, "image/png");
            }
            InterceptAction::Continue => panic!("expected transform"),
        }
        assert_eq!(extension.status_line(), None);

        // Second message passes through untouched.
        assert!(matches!(
            extension.intercept_outgoing(OutgoingMessage::default()),
            InterceptAction::Continue
        ));
    }

    #[test]
    fn clear_resets_status() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.png");
        std::fs::write(&path, b"data").unwrap();
        let record = ScreenshotRecord {
            path,
            name: "a.png".to_string(),
            modified: Local::now(),
            size_bytes: 4,
        };
        let mut extension = ScreenshotExtension::new(Config::default());
        extension.store_mut().stage(&record).unwrap();

        let mut host = FakeHost::default();
        extension.clear_staged(&mut host);
        assert_eq!(extension.status_line(), None);
        assert_eq!(host.status, None);
    }

    #[test]
    fn sync_script_requires_configuration() {
        let mut extension = ScreenshotExtension::new(Config::default());
        let mut host = FakeHost::default();
        assert!(extension.sync_script(&mut host).is_none());
        assert_eq!(host.notifications[0].0, NotifyKind::Warning);
    }
}
