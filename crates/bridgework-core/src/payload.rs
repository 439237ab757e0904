//! Event payloads carried by native custom events.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared shape of an event's `detail`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    /// No detail
    #[default]
    Void,
    /// A bare number
    Number,
    /// The originating keyboard event
    Keyboard,
    /// A named detail object (e.g., "CheckboxChangeEventDetail")
    Detail(String),
}

impl PayloadKind {
    /// Loose shape check used for diagnostics; forwarding never depends on it.
    pub fn accepts(&self, detail: &EventDetail) -> bool {
        match self {
            PayloadKind::Void => detail.value.is_null(),
            PayloadKind::Number => detail.value.is_number(),
            PayloadKind::Keyboard | PayloadKind::Detail(_) => detail.value.is_object(),
        }
    }

    /// Name of the detail type, if the payload has one.
    pub fn detail_type(&self) -> Option<&str> {
        match self {
            PayloadKind::Detail(name) => Some(name),
            _ => None,
        }
    }
}

/// The `detail` of a dispatched event, forwarded to callbacks unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventDetail {
    value: Value,
}

impl EventDetail {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// Detail of an event dispatched without a payload.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Deserialize into a typed detail.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.value)
    }
}

impl From<Value> for EventDetail {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

/// Detail of `myChange` on a checkbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckboxChangeEventDetail {
    pub checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// Detail of `myChange` on an input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputChangeEventDetail {
    #[serde(default)]
    pub value: Option<String>,
}

/// Detail of the popover dismiss events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlayEventDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Detail of `myChange` on a radio group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadioGroupChangeEventDetail {
    pub value: Value,
}

/// Detail of `myChange` on a range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeChangeEventDetail {
    pub value: RangeValue,
}

/// A range is either a single knob or a dual-knob pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeValue {
    Single(f64),
    Dual { lower: f64, upper: f64 },
}

/// The fields of a keyboard event that survive serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyboardDetail {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub alt_key: bool,
    #[serde(default)]
    pub ctrl_key: bool,
    #[serde(default)]
    pub meta_key: bool,
    #[serde(default)]
    pub shift_key: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_checkbox_detail() {
        let detail = EventDetail::new(json!({ "checked": true }));
        let decoded: CheckboxChangeEventDetail = detail.decode().unwrap();

        assert!(decoded.checked);
        assert_eq!(decoded.value, None);
    }

    #[test]
    fn decodes_both_range_shapes() {
        let single: RangeChangeEventDetail = EventDetail::new(json!({ "value": 40 }))
            .decode()
            .unwrap();
        assert_eq!(single.value, RangeValue::Single(40.0));

        let dual: RangeChangeEventDetail =
            EventDetail::new(json!({ "value": { "lower": 10, "upper": 90 } }))
                .decode()
                .unwrap();
        assert_eq!(
            dual.value,
            RangeValue::Dual {
                lower: 10.0,
                upper: 90.0
            }
        );
    }

    #[test]
    fn checks_payload_shapes() {
        assert!(PayloadKind::Void.accepts(&EventDetail::empty()));
        assert!(PayloadKind::Number.accepts(&EventDetail::new(json!(7))));
        assert!(!PayloadKind::Number.accepts(&EventDetail::new(json!("7"))));
        assert!(PayloadKind::Detail("OverlayEventDetail".into())
            .accepts(&EventDetail::new(json!({ "role": "backdrop" }))));
    }

    #[test]
    fn parses_payload_kinds_from_toml() {
        #[derive(Deserialize)]
        struct Row {
            payload: PayloadKind,
        }

        let row: Row = toml::from_str(r#"payload = "keyboard""#).unwrap();
        assert_eq!(row.payload, PayloadKind::Keyboard);

        let row: Row = toml::from_str(r#"payload = { detail = "RangeChangeEventDetail" }"#).unwrap();
        assert_eq!(row.payload.detail_type(), Some("RangeChangeEventDetail"));
    }
}
