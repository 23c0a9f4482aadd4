//! Bridges drop-slot state and the annotation run loop to the egui UI.

use std::path::PathBuf;

use egui::Color32;
use rfd::FileDialog;

use crate::annotate::{self, CommandRunner, ProcessRunner, RunError, RunRequest};
use crate::drop_slot::{DropSlot, SlotChanged, SlotKind};
use crate::egui_app::state::{RunPrompt, UiState};

/// Identifies one of the three drop zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotId {
    /// The `.glo` program to annotate.
    Glo,
    /// The Audacity project supplying annotation input.
    Audacity,
    /// The folder receiving one output file per club.
    Destination,
}

impl SlotId {
    /// All slots in render order.
    pub const ALL: [SlotId; 3] = [SlotId::Glo, SlotId::Audacity, SlotId::Destination];

    /// Short label shown on the drop zone.
    pub fn label(self) -> &'static str {
        match self {
            SlotId::Glo => "Glow program",
            SlotId::Audacity => "Audacity project",
            SlotId::Destination => "Destination folder",
        }
    }

    /// Hint shown while the slot is empty.
    pub fn hint(self) -> &'static str {
        match self {
            SlotId::Glo => "Drop a .glo file here, or click to browse",
            SlotId::Audacity => "Drop an .aup file here, or click to browse",
            SlotId::Destination => "Drop a folder here, or click to browse",
        }
    }
}

/// Maintains app state and bridges the run loop to the egui UI.
pub struct Controller {
    /// UI model read by the renderer.
    pub ui: UiState,
    glo: DropSlot,
    audacity: DropSlot,
    destination: DropSlot,
    annotator: PathBuf,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    /// Create a controller with three empty slots and a resolved annotator.
    pub fn new() -> Self {
        Self {
            ui: UiState::default(),
            glo: DropSlot::new(SlotKind::File),
            audacity: DropSlot::new(SlotKind::File),
            destination: DropSlot::new(SlotKind::Directory),
            annotator: annotate::annotator_path(),
        }
    }

    /// Read access to a slot's state for rendering.
    pub fn slot(&self, id: SlotId) -> &DropSlot {
        match id {
            SlotId::Glo => &self.glo,
            SlotId::Audacity => &self.audacity,
            SlotId::Destination => &self.destination,
        }
    }

    fn slot_mut(&mut self, id: SlotId) -> &mut DropSlot {
        match id {
            SlotId::Glo => &mut self.glo,
            SlotId::Audacity => &mut self.audacity,
            SlotId::Destination => &mut self.destination,
        }
    }

    /// Offer a drop payload to a slot; returns whether it was accepted.
    pub fn accept_drop(&mut self, id: SlotId, payload: &[PathBuf]) -> bool {
        let Some(event) = self.slot_mut(id).accept(payload) else {
            return false;
        };
        self.apply_slot_change(id, event);
        true
    }

    /// Open a file/folder picker for the slot as a drag-and-drop fallback.
    pub fn browse_slot(&mut self, id: SlotId) {
        let picked = match id {
            SlotId::Glo => FileDialog::new()
                .add_filter("Glow program", &["glo"])
                .pick_file(),
            SlotId::Audacity => FileDialog::new()
                .add_filter("Audacity project", &["aup"])
                .pick_file(),
            SlotId::Destination => FileDialog::new().pick_folder(),
        };
        let Some(path) = picked else {
            return;
        };
        // Picked paths flow through the same validation as drops.
        if !self.accept_drop(id, std::slice::from_ref(&path)) {
            self.set_status(
                format!("{} was rejected for {}", path.display(), id.label()),
                StatusTone::Warning,
            );
        }
    }

    fn apply_slot_change(&mut self, id: SlotId, event: SlotChanged) {
        tracing::info!("{} accepted {}", id.label(), event.path.display());
        self.set_status(
            format!("{}: {}", id.label(), event.path.display()),
            StatusTone::Info,
        );
        self.refresh_run_eligibility();
    }

    fn refresh_run_eligibility(&mut self) {
        self.ui.run_enabled = self.glo.path().is_some()
            && self.audacity.path().is_some()
            && self.destination.path().is_some();
    }

    /// Run the annotator once per club, blocking until done or first failure.
    pub fn start_run(&mut self) {
        self.start_run_with(&mut ProcessRunner)
    }

    /// Run with an explicit runner; the seam the tests drive.
    pub fn start_run_with<R: CommandRunner>(&mut self, runner: &mut R) {
        let clubs = match annotate::parse_club_count(&self.ui.clubs_text) {
            Ok(clubs) => clubs,
            Err(err) => {
                tracing::warn!("Run refused: {err}");
                self.ui.report = Some(RunPrompt {
                    title: "Number of clubs invalid".into(),
                    detail: "Please enter a positive number".into(),
                    failed: true,
                });
                self.set_status("Number of clubs invalid", StatusTone::Error);
                return;
            }
        };
        let (Some(glo), Some(audacity), Some(destination)) = (
            self.glo.path(),
            self.audacity.path(),
            self.destination.path(),
        ) else {
            self.set_status("Drop all three targets before running", StatusTone::Warning);
            return;
        };
        let request = RunRequest {
            glo: glo.to_path_buf(),
            audacity: audacity.to_path_buf(),
            destination: destination.to_path_buf(),
            clubs,
        };
        tracing::info!(
            "Run started: {clubs} club(s), {} + {} into {}",
            request.glo.display(),
            request.audacity.display(),
            request.destination.display(),
        );
        match annotate::run_clubs(&request, &self.annotator, runner) {
            Ok(()) => {
                self.ui.report = Some(RunPrompt {
                    title: "All clubs annotated".into(),
                    detail: format!(
                        "Wrote {clubs} file(s) into {}",
                        request.destination.display()
                    ),
                    failed: false,
                });
                self.set_status(format!("Annotated {clubs} club(s)"), StatusTone::Info);
            }
            Err(RunError::ClubFailed { club, output }) => {
                self.ui.report = Some(RunPrompt {
                    title: format!("Could not annotate club {club}"),
                    detail: output,
                    failed: true,
                });
                self.set_status(format!("Club {club} failed"), StatusTone::Error);
            }
            Err(RunError::Launch {
                program,
                club,
                source,
            }) => {
                self.ui.report = Some(RunPrompt {
                    title: format!("Could not annotate club {club}"),
                    detail: format!("Failed to launch {}: {source}", program.display()),
                    failed: true,
                });
                self.set_status(format!("Club {club} failed"), StatusTone::Error);
            }
        }
    }

    /// Dismiss the run report dialog.
    pub fn clear_report(&mut self) {
        self.ui.report = None;
    }

    pub(crate) fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        let (label, color) = status_badge(tone);
        self.ui.status.text = text.into();
        self.ui.status.badge_label = label;
        self.ui.status.badge_color = color;
    }
}

/// Coarse tone behind the footer status badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Info,
    Warning,
    Error,
}

fn status_badge(tone: StatusTone) -> (String, Color32) {
    match tone {
        StatusTone::Idle => ("Idle".into(), Color32::from_rgb(42, 42, 42)),
        StatusTone::Info => ("Info".into(), Color32::from_rgb(64, 140, 112)),
        StatusTone::Warning => ("Warning".into(), Color32::from_rgb(192, 138, 43)),
        StatusTone::Error => ("Error".into(), Color32::from_rgb(192, 57, 43)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::Invocation;
    use std::ffi::OsString;
    use std::path::Path;
    use tempfile::tempdir;

    struct CountingRunner {
        calls: usize,
    }

    impl CommandRunner for CountingRunner {
        fn run(&mut self, _program: &Path, _args: &[OsString]) -> std::io::Result<Invocation> {
            self.calls += 1;
            Ok(Invocation {
                success: true,
                text: String::new(),
            })
        }
    }

    fn fill_all_slots(controller: &mut Controller, dir: &Path) {
        let glo = dir.join("show.glo");
        let aup = dir.join("show.aup");
        std::fs::write(&glo, b"").unwrap();
        std::fs::write(&aup, b"").unwrap();
        assert!(controller.accept_drop(SlotId::Glo, &[glo]));
        assert!(controller.accept_drop(SlotId::Audacity, &[aup]));
        assert!(controller.accept_drop(SlotId::Destination, &[dir.to_path_buf()]));
    }

    #[test]
    fn run_stays_disabled_until_all_slots_filled() {
        let dir = tempdir().unwrap();
        let glo = dir.path().join("show.glo");
        std::fs::write(&glo, b"").unwrap();

        let mut controller = Controller::new();
        assert!(!controller.ui.run_enabled);
        controller.accept_drop(SlotId::Glo, std::slice::from_ref(&glo));
        assert!(!controller.ui.run_enabled);
        fill_all_slots(&mut controller, dir.path());
        assert!(controller.ui.run_enabled);
    }

    #[test]
    fn rejected_drop_does_not_change_eligibility() {
        let dir = tempdir().unwrap();
        let mut controller = Controller::new();
        fill_all_slots(&mut controller, dir.path());

        let missing = dir.path().join("nope.glo");
        assert!(!controller.accept_drop(SlotId::Glo, &[missing]));
        assert!(controller.ui.run_enabled);
    }

    #[test]
    fn invalid_club_count_never_invokes_the_annotator() {
        let dir = tempdir().unwrap();
        let mut controller = Controller::new();
        fill_all_slots(&mut controller, dir.path());

        for text in ["", "zero", "0", "-2"] {
            let mut runner = CountingRunner { calls: 0 };
            controller.ui.clubs_text = text.to_string();
            controller.start_run_with(&mut runner);
            assert_eq!(runner.calls, 0, "input {text:?} must not spawn anything");
            let report = controller.ui.report.take().unwrap();
            assert_eq!(report.title, "Number of clubs invalid");
            assert!(report.failed);
        }
    }

    #[test]
    fn successful_run_reports_success_once_per_club() {
        let dir = tempdir().unwrap();
        let mut controller = Controller::new();
        fill_all_slots(&mut controller, dir.path());

        let mut runner = CountingRunner { calls: 0 };
        controller.ui.clubs_text = "4".into();
        controller.start_run_with(&mut runner);
        assert_eq!(runner.calls, 4);
        let report = controller.ui.report.take().unwrap();
        assert!(!report.failed);
        assert_eq!(report.title, "All clubs annotated");
    }
}
