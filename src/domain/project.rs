//! Project records as returned by the Projects API

use serde_json::{Map, Value};

/// A project as defined by the external API. The shape is not interpreted.
pub type ProjectRecord = Map<String, Value>;

/// Body of a project creation request, built from the dialog form.
pub type ProjectPayload = Map<String, Value>;

/// Keys tried, in order, when picking a label to show for a record
const LABEL_KEYS: [&str; 3] = ["name", "title", "id"];

/// Best-effort display label for a record.
pub fn display_label(record: &ProjectRecord) -> String {
    for key in LABEL_KEYS {
        match record.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return s.clone(),
            Some(Value::Number(n)) => return format!("#{n}"),
            _ => {}
        }
    }
    if record.is_empty() {
        "(empty record)".to_string()
    } else {
        Value::Object(record.clone()).to_string()
    }
}
