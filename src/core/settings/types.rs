//! Settings values and the setter trait.

use serde::{Deserialize, Serialize};

pub const KEY_SOUND: &str = "sound";
pub const KEY_DIGITAL_ZOOM: &str = "digital_zoom";
pub const KEY_SCAN_DURATION: &str = "scan_duration";
pub const KEY_RESULT_VIEW_DURATION: &str = "result_view_duration";
pub const KEY_MARKER_COLOR: &str = "marker_color";
pub const KEY_HISTORY_SIZE: &str = "history_size";
pub const KEY_SCAN_ON_START: &str = "scan_on_start";

pub const DEFAULT_SOUND: bool = false;
pub const DEFAULT_DIGITAL_ZOOM: i32 = 3;
pub const DEFAULT_SCAN_DURATION: i32 = 20;
pub const DEFAULT_RESULT_VIEW_DURATION: i32 = 4;
pub const DEFAULT_MARKER_COLOR: &str = "#00FF00";
pub const DEFAULT_HISTORY_SIZE: i32 = 50;
pub const DEFAULT_SCAN_ON_START: bool = false;

/// Typed setters of a settings backend.
///
/// Database initialization copies legacy values through this trait, so
/// any backend (in-memory, file, platform store) can receive them.
pub trait SettingsSink {
    fn set_sound(&mut self, value: bool);
    fn set_digital_zoom(&mut self, value: i32);
    fn set_scan_duration(&mut self, value: i32);
    fn set_result_view_duration(&mut self, value: i32);
    fn set_marker_color(&mut self, value: String);
    fn set_history_size(&mut self, value: i32);
    fn set_scan_on_start(&mut self, value: bool);
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Beep on a successful scan
    pub sound: bool,
    pub digital_zoom: i32,
    /// Seconds before an unsuccessful scan gives up
    pub scan_duration: i32,
    /// Seconds the result stays on screen
    pub result_view_duration: i32,
    pub marker_color: String,
    /// Maximum number of history records kept
    pub history_size: i32,
    pub scan_on_start: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound: DEFAULT_SOUND,
            digital_zoom: DEFAULT_DIGITAL_ZOOM,
            scan_duration: DEFAULT_SCAN_DURATION,
            result_view_duration: DEFAULT_RESULT_VIEW_DURATION,
            marker_color: DEFAULT_MARKER_COLOR.to_string(),
            history_size: DEFAULT_HISTORY_SIZE,
            scan_on_start: DEFAULT_SCAN_ON_START,
        }
    }
}

impl SettingsSink for Settings {
    fn set_sound(&mut self, value: bool) {
        self.sound = value;
    }

    fn set_digital_zoom(&mut self, value: i32) {
        self.digital_zoom = value;
    }

    fn set_scan_duration(&mut self, value: i32) {
        self.scan_duration = value;
    }

    fn set_result_view_duration(&mut self, value: i32) {
        self.result_view_duration = value;
    }

    fn set_marker_color(&mut self, value: String) {
        self.marker_color = value;
    }

    fn set_history_size(&mut self, value: i32) {
        self.history_size = value;
    }

    fn set_scan_on_start(&mut self, value: bool) {
        self.scan_on_start = value;
    }
}
