//! Host extension API surface.
//!
//! The host coding-agent application owns the event loop, notification and
//! widget surfaces, and the outgoing-message hook. This module defines the
//! trait seams the extension is wired through, so tests can stub the host
//! entirely in memory.

use crate::staging::StagedImage;

/// Severity of a host notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Info,
    Warning,
    Error,
}

/// Surfaces the host exposes to command and shortcut handlers.
pub trait HostContext {
    /// Show a transient notification to the user.
    fn notify(&mut self, kind: NotifyKind, message: &str);

    /// Update (or clear, with `None`) the extension's status widget.
    fn set_status(&mut self, text: Option<String>);
}

/// A widget driven by the host's custom UI loop.
///
/// The host calls `render` whenever a frame is needed and `handle_input`
/// with raw key data; a `Some` return from `handle_input` ends the loop.
pub trait UiWidget {
    /// Produce the display lines for the current frame at the given width.
    fn render(&mut self, width: u16) -> Vec<String>;

    /// Process raw input bytes. Returns `Some` when the widget is finished.
    fn handle_input(&mut self, raw: &[u8]) -> Option<UiExit>;
}

/// How a custom UI loop finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiExit {
    /// The user accepted; any staged work stands.
    Committed,
    /// The user backed out of the UI. Staged work still stands; only the
    /// widget closed.
    Cancelled,
}

/// The host's render/input loop for custom interactive widgets.
pub trait UiLoop {
    /// Drive the widget until it produces an exit value.
    fn run(&mut self, widget: &mut dyn UiWidget) -> UiExit;
}

/// A pending outgoing message as handed to the input-interception hook.
#[derive(Debug, Clone, Default)]
pub struct OutgoingMessage {
    /// The user's message text.
    pub text: String,
    /// Images already attached by the host or other extensions.
    pub images: Vec<StagedImage>,
}

/// Result of the input-interception hook.
#[derive(Debug)]
pub enum InterceptAction {
    /// Pass the message through unchanged.
    Continue,
    /// Replace the outgoing message (used to append staged images).
    Transform(OutgoingMessage),
}

/// A command registered against the host.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
}

/// A shortcut chord bound to a registered command.
#[derive(Debug, Clone, Copy)]
pub struct ShortcutSpec {
    pub chord: &'static str,
    pub command: &'static str,
}
