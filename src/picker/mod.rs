//! Interactive screenshot picker.
//!
//! The picker is a host-driven widget: the host's custom UI loop calls
//! [`render`](crate::host::UiWidget::render) for each frame and feeds raw
//! key bytes to [`handle_input`](crate::host::UiWidget::handle_input) until
//! the picker produces an exit value.

pub mod keys;
pub mod render;
pub mod state;
pub mod thumbnail;

pub use state::{PickerController, PickerMode, PickerOutcome};

use crate::host::{UiExit, UiWidget};
use crate::staging::StagingStore;

/// A running picker bound to the staging store it mutates.
///
/// The store is borrowed, not owned: the same store instance is later
/// drained by the send hook, and tests can inspect it after the session.
pub struct PickerSession<'a> {
    controller: PickerController,
    store: &'a mut StagingStore,
}

impl<'a> PickerSession<'a> {
    pub fn new(controller: PickerController, store: &'a mut StagingStore) -> Self {
        Self { controller, store }
    }
}

impl UiWidget for PickerSession<'_> {
    fn render(&mut self, width: u16) -> Vec<String> {
        render::render_frame(&mut self.controller, self.store, width as usize)
    }

    fn handle_input(&mut self, raw: &[u8]) -> Option<UiExit> {
        let press = keys::decode(raw)?;
        match self.controller.handle_key(&press, self.store)? {
            PickerOutcome::Committed => Some(UiExit::Committed),
            PickerOutcome::Cancelled => Some(UiExit::Cancelled),
        }
    }
}
