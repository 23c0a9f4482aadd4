//! Shared state types for the egui UI.

use egui::Color32;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    /// Status badge + text shown in the footer.
    pub status: StatusBarState,
    /// Club count text field contents.
    pub clubs_text: String,
    /// Whether all three slots hold a path; recomputed on slot acceptance.
    pub run_enabled: bool,
    /// Modal report shown after a run attempt, if any.
    pub report: Option<RunPrompt>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            clubs_text: String::new(),
            run_enabled: false,
            report: None,
        }
    }
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    /// Human-readable status line.
    pub text: String,
    /// Short badge label next to the status line.
    pub badge_label: String,
    /// Badge fill color.
    pub badge_color: Color32,
}

impl StatusBarState {
    /// Initial prompt shown before anything was dropped.
    pub fn idle() -> Self {
        Self {
            text: "Drop a .glo program, an Audacity project and a destination folder".into(),
            badge_label: "Idle".into(),
            badge_color: Color32::from_rgb(42, 42, 42),
        }
    }
}

/// Outcome dialog contents for one run attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunPrompt {
    /// Window title.
    pub title: String,
    /// Detail text; child diagnostics for failures.
    pub detail: String,
    /// Whether the run ended in failure.
    pub failed: bool,
}
