//! Library exports for reuse in integration tests.
/// Sequential invocation of the external annotator.
pub mod annotate;
/// Application directory helpers.
pub mod app_dirs;
/// Drop payload validation and slot state.
pub mod drop_slot;
/// Shared egui UI modules.
pub mod egui_app;
/// Logging setup.
pub mod logging;
