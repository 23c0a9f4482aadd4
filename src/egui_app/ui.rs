//! egui renderer for the application UI.

/// Palette and shared visual tuning.
pub mod style;

use std::path::PathBuf;

use eframe::egui::{
    self, Align2, Frame, Margin, Pos2, RichText, Sense, StrokeKind, Vec2,
};

use crate::drop_slot::SlotKind;
use crate::egui_app::controller::{Controller, SlotId, StatusTone};

/// Minimum window size that keeps all three drop zones visible.
pub const MIN_VIEWPORT_SIZE: Vec2 = Vec2::new(460.0, 420.0);

/// Renders the egui UI using the shared controller state.
pub struct GlobatchApp {
    controller: Controller,
    visuals_set: bool,
}

impl Default for GlobatchApp {
    fn default() -> Self {
        Self::new()
    }
}

impl GlobatchApp {
    /// Create the app with empty slots.
    pub fn new() -> Self {
        Self {
            controller: Controller::new(),
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_central(&mut self, ctx: &egui::Context) {
        let hovered: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .hovered_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        let pointer = ctx.input(|i| i.pointer.hover_pos().or_else(|| i.pointer.interact_pos()));

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading("Globatch");
            ui.label(
                RichText::new("Annotate a glow show once per club")
                    .color(style::palette().text_muted),
            );
            ui.add_space(8.0);
            for id in SlotId::ALL {
                self.render_drop_zone(ui, id, &hovered, &dropped, pointer);
                ui.add_space(8.0);
            }
            self.render_run_controls(ui);
        });
    }

    fn render_drop_zone(
        &mut self,
        ui: &mut egui::Ui,
        id: SlotId,
        hovered: &[PathBuf],
        dropped: &[PathBuf],
        pointer: Option<Pos2>,
    ) {
        let palette = style::palette();
        let desired = egui::vec2(ui.available_width(), 72.0);
        let (rect, response) = ui.allocate_exact_size(desired, Sense::click());
        let filled = self.controller.slot(id).path().is_some();
        ui.painter().rect_filled(rect, 4.0, style::slot_fill(filled));
        ui.painter()
            .rect_stroke(rect, 4.0, style::inner_border(), StrokeKind::Inside);

        let over = pointer.is_some_and(|pos| rect.contains(pos));
        if over && !hovered.is_empty() && self.controller.slot(id).would_accept(hovered) {
            ui.painter()
                .rect_stroke(rect, 4.0, style::accept_stroke(), StrokeKind::Inside);
        }

        ui.painter().text(
            rect.left_top() + egui::vec2(10.0, 10.0),
            Align2::LEFT_TOP,
            id.label(),
            egui::FontId::proportional(14.0),
            palette.text_primary,
        );
        let detail = self
            .controller
            .slot(id)
            .path()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| id.hint().to_string());
        ui.painter().text(
            rect.left_bottom() + egui::vec2(10.0, -10.0),
            Align2::LEFT_BOTTOM,
            detail,
            egui::FontId::proportional(12.0),
            palette.text_muted,
        );

        if response.clicked() {
            self.controller.browse_slot(id);
        }
        if over && !dropped.is_empty() && !self.controller.accept_drop(id, dropped) {
            let noun = match self.controller.slot(id).kind() {
                SlotKind::File => "file",
                SlotKind::Directory => "folder",
            };
            self.controller.set_status(
                format!("Drop a single existing {noun} onto {}", id.label()),
                StatusTone::Warning,
            );
        }
    }

    fn render_run_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Clubs");
            let edit = egui::TextEdit::singleline(&mut self.controller.ui.clubs_text)
                .desired_width(64.0)
                .hint_text("e.g. 6");
            ui.add(edit);
            let run = ui.add_enabled(self.controller.ui.run_enabled, egui::Button::new("Run"));
            if run.clicked() {
                self.controller.start_run();
            }
        });
    }

    fn render_report_prompt(&mut self, ctx: &egui::Context) {
        let mut open = true;
        let mut dismiss = false;
        let Some(report) = self.controller.ui.report.clone() else {
            return;
        };
        egui::Window::new(report.title.as_str())
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .collapsible(false)
            .resizable(false)
            .auto_sized()
            .open(&mut open)
            .show(ctx, |ui| {
                ui.set_min_width(320.0);
                if report.detail.is_empty() {
                    ui.label(RichText::new("(no output)").color(style::palette().text_muted));
                } else {
                    egui::ScrollArea::vertical().max_height(220.0).show(ui, |ui| {
                        ui.label(RichText::new(report.detail.as_str()).monospace());
                    });
                }
                ui.add_space(8.0);
                let button = if report.failed { "OK" } else { "Yay!" };
                if ui.button(button).clicked() {
                    dismiss = true;
                }
            });
        if dismiss || !open {
            self.controller.clear_report();
        }
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .stroke(style::outer_border())
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                let status = self.controller.ui.status.clone();
                ui.horizontal(|ui| {
                    let (badge_rect, _) =
                        ui.allocate_exact_size(egui::vec2(16.0, 16.0), Sense::hover());
                    ui.painter().rect_filled(badge_rect, 0.0, status.badge_color);
                    ui.painter().rect_stroke(
                        badge_rect,
                        0.0,
                        style::inner_border(),
                        StrokeKind::Inside,
                    );
                    ui.add_space(8.0);
                    ui.label(RichText::new(&status.badge_label).color(palette.text_primary));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(palette.text_primary));
                });
            });
    }
}

impl eframe::App for GlobatchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.render_status(ctx);
        self.render_central(ctx);
        self.render_report_prompt(ctx);
    }
}
