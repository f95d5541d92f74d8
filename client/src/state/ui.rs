//! Local UI chrome state (panel visibility and screen capabilities).
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of conversation state (`chat`)
//! so panels can open and close without touching message data.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// Optional chat screen features.
///
/// The plain screen has none of them; the full screen adds system-message
/// editing, transcript export and server-side clearing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub system_message: bool,
    pub export: bool,
    pub clear: bool,
}

impl Capabilities {
    pub const fn full() -> Self {
        Self { system_message: true, export: true, clear: true }
    }

    pub const fn basic() -> Self {
        Self { system_message: false, export: false, clear: false }
    }

    /// Whether the conversation toolbar has anything to show.
    pub fn any(self) -> bool {
        self.system_message || self.export || self.clear
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::full()
    }
}

/// UI state for the side panels.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub show_history: bool,
    pub show_system_message: bool,
}

impl UiState {
    pub fn toggle_history(&mut self) {
        self.show_history = !self.show_history;
    }

    pub fn close_history(&mut self) {
        self.show_history = false;
    }

    pub fn toggle_system_message(&mut self) {
        self.show_system_message = !self.show_system_message;
    }

    pub fn close_system_message(&mut self) {
        self.show_system_message = false;
    }
}
