//! Decoding of the legacy key/value `settings` table.
//!
//! Old releases kept settings as text rows in the database. Each known key
//! maps to one typed setter; the setter's variant decides how the stored
//! value is decoded.

use super::types::*;
use rusqlite::types::Value;

/// Typed setter for one legacy key
#[derive(Clone, Copy)]
pub enum LegacySetter {
    Bool(fn(&mut dyn SettingsSink, bool)),
    Int(fn(&mut dyn SettingsSink, i32)),
    Text(fn(&mut dyn SettingsSink, String)),
}

/// A legacy settings key and where its value goes
#[derive(Clone, Copy)]
pub struct LegacyKey {
    pub key: &'static str,
    pub setter: LegacySetter,
}

/// Every key the legacy table is known to contain, in migration order
pub const LEGACY_KEYS: &[LegacyKey] = &[
    LegacyKey {
        key: KEY_SOUND,
        setter: LegacySetter::Bool(|s, v| s.set_sound(v)),
    },
    LegacyKey {
        key: KEY_DIGITAL_ZOOM,
        setter: LegacySetter::Int(|s, v| s.set_digital_zoom(v)),
    },
    LegacyKey {
        key: KEY_SCAN_DURATION,
        setter: LegacySetter::Int(|s, v| s.set_scan_duration(v)),
    },
    LegacyKey {
        key: KEY_RESULT_VIEW_DURATION,
        setter: LegacySetter::Int(|s, v| s.set_result_view_duration(v)),
    },
    LegacyKey {
        key: KEY_MARKER_COLOR,
        setter: LegacySetter::Text(|s, v| s.set_marker_color(v)),
    },
    LegacyKey {
        key: KEY_HISTORY_SIZE,
        setter: LegacySetter::Int(|s, v| s.set_history_size(v)),
    },
    LegacyKey {
        key: KEY_SCAN_ON_START,
        setter: LegacySetter::Bool(|s, v| s.set_scan_on_start(v)),
    },
];

impl LegacyKey {
    /// Decode `value` and pass it to the setter.
    ///
    /// Returns a description of the value on success, or why it could
    /// not be converted.
    pub fn apply(&self, sink: &mut dyn SettingsSink, value: &Value) -> Result<String, String> {
        match self.setter {
            LegacySetter::Bool(set) => {
                let v = decode_bool(value);
                set(sink, v);
                Ok(v.to_string())
            }
            LegacySetter::Int(set) => {
                let v = decode_int(value)
                    .ok_or_else(|| format!("Can't convert {} to int", decode_text(value)))?;
                set(sink, v);
                Ok(v.to_string())
            }
            LegacySetter::Text(set) => {
                let v = decode_text(value);
                set(sink, v.clone());
                Ok(v)
            }
        }
    }
}

/// Empty text, "0" and "false" are false, any other text is true
pub fn decode_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Integer(i) => *i != 0,
        Value::Real(f) => *f != 0.0,
        Value::Text(_) | Value::Blob(_) => {
            let text = decode_text(value);
            let text = text.trim();
            !(text.is_empty() || text == "0" || text.eq_ignore_ascii_case("false"))
        }
    }
}

/// Integers as-is, reals and float text rounded
pub fn decode_int(value: &Value) -> Option<i32> {
    match value {
        Value::Integer(i) => i32::try_from(*i).ok(),
        Value::Real(f) => round_to_i32(*f),
        Value::Text(_) | Value::Blob(_) => {
            let text = decode_text(value);
            let text = text.trim();
            // Some integers were written as floating point, e.g. "4.0"
            text.parse::<i32>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(round_to_i32))
        }
        Value::Null => None,
    }
}

pub fn decode_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => String::from_utf8_lossy(b).into_owned(),
    }
}

fn round_to_i32(value: f64) -> Option<i32> {
    let rounded = value.round();
    if rounded.is_finite() && rounded >= i32::MIN as f64 && rounded <= i32::MAX as f64 {
        Some(rounded as i32)
    } else {
        None
    }
}
