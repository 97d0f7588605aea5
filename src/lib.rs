//! Library exports for the shotstage extension.
//!
//! Exposes the staging, scanning, and picker subsystems alongside the host
//! API traits so that a host coding-agent application (and the integration
//! tests) can embed the extension without going through the CLI binary.

pub mod config;
pub mod extension;
pub mod host;
pub mod paths;
pub mod picker;
pub mod scan;
pub mod staging;
pub mod sync_script;

pub use config::Config;
pub use extension::ScreenshotExtension;
