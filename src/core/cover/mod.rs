//! # Cover Module
//!
//! Model of the app cover shown while the app is in the background: an
//! icon, a label and a single "scan" action handed to the main window.

use crate::events::{Event, EventSender, WindowEvent};
use serde::Serialize;

pub const DEFAULT_LABEL: &str = "CodeReader";
pub const DEFAULT_ICON: &str = "cover-image.svg";

/// The application window as seen by the cover
pub trait ScanWindow {
    fn start_scan(&mut self);
    fn activate(&mut self);
}

/// Actions offered on the cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverAction {
    Scan,
}

impl CoverAction {
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Scan => "icon-cover-search",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverView {
    pub label: String,
    pub icon: String,
}

impl CoverView {
    pub fn new(label: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: icon.into(),
        }
    }

    pub fn actions(&self) -> &'static [CoverAction] {
        &[CoverAction::Scan]
    }

    /// Perform `action` on the window
    pub fn trigger(&self, action: CoverAction, window: &mut dyn ScanWindow) {
        match action {
            CoverAction::Scan => {
                window.start_scan();
                window.activate();
            }
        }
    }
}

impl Default for CoverView {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL, DEFAULT_ICON)
    }
}

/// A [`ScanWindow`] that forwards requests as [`WindowEvent`]s
pub struct EventWindow {
    events: EventSender,
}

impl EventWindow {
    pub fn new(events: EventSender) -> Self {
        Self { events }
    }
}

impl ScanWindow for EventWindow {
    fn start_scan(&mut self) {
        self.events.send(Event::Window(WindowEvent::StartScan));
    }

    fn activate(&mut self) {
        self.events.send(Event::Window(WindowEvent::Activate));
    }
}
