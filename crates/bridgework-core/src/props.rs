//! Props passed to an adapter: element properties plus callback props.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::payload::EventDetail;

/// Function invoked when the mapped native event fires.
pub type Callback = Rc<dyn Fn(&EventDetail)>;

/// A property value assigned to an element.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// String literal: label="Accept"
    String(String),
    /// Boolean: checked
    Boolean(bool),
    /// Number: value=40
    Number(f64),
    /// Anything richer (arrays, objects)
    Json(Value),
}

impl PropValue {
    /// Get as string if it's a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Build from a JSON value, keeping scalars as scalars.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(s) => PropValue::String(s),
            Value::Bool(b) => PropValue::Boolean(b),
            Value::Number(n) => match n.as_f64() {
                Some(f) => PropValue::Number(f),
                None => PropValue::Json(Value::Number(n)),
            },
            other => PropValue::Json(other),
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::String(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::String(s)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Boolean(b)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}

impl From<i32> for PropValue {
    fn from(n: i32) -> Self {
        PropValue::Number(f64::from(n))
    }
}

impl From<Value> for PropValue {
    fn from(value: Value) -> Self {
        PropValue::from_json(value)
    }
}

/// Everything a consumer passes to an adapter.
#[derive(Clone, Default)]
pub struct ElementProps {
    properties: BTreeMap<String, PropValue>,
    callbacks: HashMap<String, Callback>,
    text: Option<String>,
}

impl ElementProps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an element property.
    pub fn prop(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Set a callback prop (e.g., "onMyChange").
    pub fn on(mut self, prop: impl Into<String>, callback: impl Fn(&EventDetail) + 'static) -> Self {
        self.callbacks.insert(prop.into(), Rc::new(callback));
        self
    }

    /// Set text children.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn properties(&self) -> &BTreeMap<String, PropValue> {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropValue> {
        self.properties.get(name)
    }

    pub fn callback(&self, prop: &str) -> Option<&Callback> {
        self.callbacks.get(prop)
    }

    /// Callback prop names, sorted.
    pub fn callback_props(&self) -> Vec<&str> {
        let mut props: Vec<&str> = self.callbacks.keys().map(String::as_str).collect();
        props.sort_unstable();
        props
    }

    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl fmt::Debug for ElementProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementProps")
            .field("properties", &self.properties)
            .field("callbacks", &self.callback_props())
            .field("text", &self.text)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_json_scalars() {
        assert_eq!(PropValue::from(json!("a")), PropValue::String("a".into()));
        assert_eq!(PropValue::from(json!(true)), PropValue::Boolean(true));
        assert_eq!(PropValue::from(json!(3)), PropValue::Number(3.0));
        assert_eq!(
            PropValue::from(json!([1, 2])),
            PropValue::Json(json!([1, 2]))
        );
    }

    #[test]
    fn builder_collects_props_and_callbacks() {
        let props = ElementProps::new()
            .prop("checked", true)
            .prop("label", "Accept")
            .on("onMyChange", |_| {})
            .on("onMyBlur", |_| {})
            .text("terms");

        assert_eq!(props.property("checked"), Some(&PropValue::Boolean(true)));
        assert_eq!(props.callback_props(), vec!["onMyBlur", "onMyChange"]);
        assert_eq!(props.text_content(), Some("terms"));
        assert!(format!("{props:?}").contains("onMyChange"));
    }
}
