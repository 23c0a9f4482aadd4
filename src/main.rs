#![deny(missing_docs)]
#![deny(warnings)]

//! Entry point for the egui-based Globatch UI.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use eframe::egui;
use globatch::egui_app::ui::{GlobatchApp, MIN_VIEWPORT_SIZE};
use globatch::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size(MIN_VIEWPORT_SIZE)
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_drag_and_drop(true);

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Globatch",
        native_options,
        Box::new(|_cc| Ok(Box::new(GlobatchApp::new()))),
    )?;
    Ok(())
}
