//! Shared egui UI modules.
/// App state and run sequencing bridge.
pub mod controller;
/// UI state types consumed by the renderer.
pub mod state;
/// egui renderer.
pub mod ui;
