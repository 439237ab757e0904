//! Static rendering for contexts without a live host.
//!
//! Native events cannot be observed here: callback props are validated
//! against the event map and then ignored.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::descriptor::{is_valid_tag, ElementDescriptor};
use crate::props::{ElementProps, PropValue};
use crate::traits::{check_callbacks, AdapterError, Render};

/// Serializes an element to markup.
pub trait Serializer: Send + Sync {
    fn render_to_string(&self, tag: &str, props: &ElementProps) -> Result<String, RenderError>;
}

impl<F> Serializer for F
where
    F: Fn(&str, &ElementProps) -> Result<String, RenderError> + Send + Sync,
{
    fn render_to_string(&self, tag: &str, props: &ElementProps) -> Result<String, RenderError> {
        self(tag, props)
    }
}

/// Default serializer: a single element with attributes and escaped text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupSerializer;

impl Serializer for MarkupSerializer {
    fn render_to_string(&self, tag: &str, props: &ElementProps) -> Result<String, RenderError> {
        render_markup(tag, props)
    }
}

/// Errors raised while serializing an element.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid custom element tag: {0}")]
    InvalidTag(String),

    #[error("Invalid attribute name: {0}")]
    InvalidAttribute(String),

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: String, reason: String },

    #[error("Serializer failed: {0}")]
    Custom(String),
}

/// Render `<tag attrs>text</tag>`.
///
/// Property names become kebab-case attributes. `true` renders as a bare
/// attribute and `false` is omitted.
pub fn render_markup(tag: &str, props: &ElementProps) -> Result<String, RenderError> {
    if !is_valid_tag(tag) {
        return Err(RenderError::InvalidTag(tag.to_string()));
    }

    let mut attrs = Vec::new();
    let mut seen = HashSet::new();

    for (name, value) in props.properties() {
        let attr = attribute_name(name);
        if !is_valid_attribute(&attr) {
            return Err(RenderError::InvalidAttribute(name.clone()));
        }
        // `maxLength` and `max-length` name the same attribute.
        if !seen.insert(attr.clone()) {
            return Err(RenderError::InvalidAttribute(name.clone()));
        }

        match value {
            PropValue::String(s) => {
                attrs.push(format!(r#"{}="{}""#, attr, html_escape(s)));
            }
            PropValue::Boolean(true) => {
                attrs.push(attr);
            }
            PropValue::Boolean(false) => {}
            PropValue::Number(n) => {
                if !n.is_finite() {
                    return Err(RenderError::InvalidValue {
                        name: name.clone(),
                        reason: format!("{n} is not a finite number"),
                    });
                }
                attrs.push(format!(r#"{}="{}""#, attr, n));
            }
            PropValue::Json(v) => {
                attrs.push(format!(r#"{}="{}""#, attr, html_escape(&v.to_string())));
            }
        }
    }

    let attrs_str = if attrs.is_empty() {
        String::new()
    } else {
        format!(" {}", attrs.join(" "))
    };
    let text = props.text_content().map(html_escape).unwrap_or_default();

    Ok(format!("<{tag}{attrs_str}>{text}</{tag}>"))
}

/// `maxLength` -> `max-length`.
fn attribute_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn is_valid_attribute(name: &str) -> bool {
    static RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[a-zA-Z_:][-a-zA-Z0-9_:.]*$").expect("Invalid attribute regex")
    });
    RE.is_match(name)
}

/// Escape HTML special characters including single quotes for XSS prevention.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Adapter for non-interactive contexts: renders markup, binds nothing.
#[derive(Clone)]
pub struct StaticAdapter {
    descriptor: ElementDescriptor,
    serializer: Arc<dyn Serializer>,
}

impl StaticAdapter {
    pub fn new(descriptor: ElementDescriptor, serializer: Arc<dyn Serializer>) -> Self {
        Self {
            descriptor,
            serializer,
        }
    }

    /// Serialize the element. Serializer errors are returned as-is.
    pub fn render_to_string(&self, props: &ElementProps) -> Result<String, AdapterError> {
        check_callbacks(&self.descriptor, props)?;

        let ignored = props.callback_props();
        if !ignored.is_empty() {
            tracing::trace!(tag = %self.descriptor.tag, ?ignored, "Callback props ignored in static rendering");
        }

        Ok(self
            .serializer
            .render_to_string(&self.descriptor.tag, props)?)
    }
}

impl Render for StaticAdapter {
    type Output = String;

    fn descriptor(&self) -> &ElementDescriptor {
        &self.descriptor
    }

    fn render(&self, props: &ElementProps) -> Result<String, AdapterError> {
        self.render_to_string(props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::payload::EventDetail;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn adapter(tag: &str) -> StaticAdapter {
        StaticAdapter::new(
            catalog::find(tag).unwrap().clone(),
            Arc::new(MarkupSerializer),
        )
    }

    #[test]
    fn renders_attributes_in_order() {
        let html = adapter("my-range")
            .render(
                &ElementProps::new()
                    .prop("value", 40)
                    .prop("dualKnobs", false)
                    .prop("disabled", true)
                    .prop("label", "Volume"),
            )
            .unwrap();

        assert_eq!(
            html,
            r#"<my-range disabled label="Volume" value="40"></my-range>"#
        );
    }

    #[test]
    fn every_builtin_element_renders_its_tag() {
        for descriptor in catalog::builtin() {
            let html = adapter(&descriptor.tag)
                .render(&ElementProps::new().prop("label", "x"))
                .unwrap();
            assert!(html.starts_with(&format!("<{} ", descriptor.tag)));
            assert!(html.ends_with(&format!("</{}>", descriptor.tag)));
        }
    }

    #[test]
    fn escapes_values_and_text() {
        let html = adapter("my-button")
            .render(
                &ElementProps::new()
                    .prop("ariaLabel", r#"say "hi" <now>"#)
                    .text("Tom & Jerry's"),
            )
            .unwrap();

        assert_eq!(
            html,
            r#"<my-button aria-label="say &quot;hi&quot; &lt;now&gt;">Tom &amp; Jerry&#x27;s</my-button>"#
        );
    }

    #[test]
    fn serializes_json_props() {
        let html = adapter("my-radio-group")
            .render(&ElementProps::new().prop("options", json!(["a", "b"])))
            .unwrap();

        assert!(html.contains(r#"options="[&quot;a&quot;,&quot;b&quot;]""#));
    }

    #[test]
    fn ignores_declared_callbacks() {
        let html = adapter("my-checkbox")
            .render(
                &ElementProps::new()
                    .prop("checked", true)
                    .on("onMyChange", |_: &EventDetail| {}),
            )
            .unwrap();

        assert_eq!(html, "<my-checkbox checked></my-checkbox>");
    }

    #[test]
    fn rejects_malformed_props() {
        let result = adapter("my-range").render(&ElementProps::new().prop("value", f64::NAN));
        assert!(matches!(
            result,
            Err(AdapterError::Render(RenderError::InvalidValue { .. }))
        ));

        let result = adapter("my-input").render(&ElementProps::new().prop("bad name", "x"));
        assert!(matches!(
            result,
            Err(AdapterError::Render(RenderError::InvalidAttribute(_)))
        ));
    }

    #[test]
    fn rejects_props_naming_the_same_attribute() {
        let result = render_markup(
            "my-input",
            &ElementProps::new().prop("maxLength", 3).prop("max-length", 5),
        );

        assert!(matches!(result, Err(RenderError::InvalidAttribute(_))));
    }

    #[test]
    fn propagates_custom_serializer_errors() {
        let failing = StaticAdapter::new(
            catalog::find("my-popover").unwrap().clone(),
            Arc::new(|_: &str, _: &ElementProps| -> Result<String, RenderError> {
                Err(RenderError::Custom("hydrate unavailable".to_string()))
            }),
        );

        let err = failing.render(&ElementProps::new()).unwrap_err();
        assert_eq!(err.to_string(), "Serializer failed: hydrate unavailable");
    }

    #[test]
    fn converts_camel_case_attributes() {
        assert_eq!(attribute_name("maxLength"), "max-length");
        assert_eq!(attribute_name("value"), "value");
        assert_eq!(attribute_name("aria-label"), "aria-label");
    }
}
