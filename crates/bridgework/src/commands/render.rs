//! Static render command.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use bridgework_core::{AdapterSet, ElementProps, Manifest, MarkupSerializer, PropValue};

/// Run the render command.
pub fn run(config: &Path, tag: &str, props: &[String], text: Option<String>) -> Result<()> {
    let manifest = Manifest::load(config)?;
    let adapters = AdapterSet::server(manifest.elements, Arc::new(MarkupSerializer))?;

    let mut element_props = ElementProps::new();
    for raw in props {
        let (name, value) = parse_prop(raw)?;
        element_props = element_props.prop(name, value);
    }
    if let Some(text) = text {
        element_props = element_props.text(text);
    }

    let html = adapters
        .render(tag, &element_props)
        .with_context(|| format!("Failed to render <{tag}>"))?
        .into_markup()
        .context("Server adapters always render markup")?;

    println!("{html}");
    Ok(())
}

/// Parse `name=value`. The value is JSON if it parses as JSON, else a string.
fn parse_prop(raw: &str) -> Result<(String, PropValue)> {
    let (name, value) = raw
        .split_once('=')
        .with_context(|| format!("Expected NAME=VALUE, got '{raw}'"))?;

    if name.is_empty() {
        anyhow::bail!("Property name is empty in '{raw}'");
    }

    let value = match serde_json::from_str::<serde_json::Value>(value) {
        Ok(json) => PropValue::from_json(json),
        Err(_) => PropValue::String(value.to_string()),
    };

    Ok((name.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_and_plain_values() {
        assert_eq!(
            parse_prop("checked=true").unwrap(),
            ("checked".to_string(), PropValue::Boolean(true))
        );
        assert_eq!(
            parse_prop("value=40").unwrap(),
            ("value".to_string(), PropValue::Number(40.0))
        );
        assert_eq!(
            parse_prop("label=Accept terms").unwrap(),
            ("label".to_string(), PropValue::String("Accept terms".to_string()))
        );
        assert_eq!(
            parse_prop("note=a=b").unwrap(),
            ("note".to_string(), PropValue::String("a=b".to_string()))
        );
    }

    #[test]
    fn rejects_malformed_props() {
        assert!(parse_prop("checked").is_err());
        assert!(parse_prop("=1").is_err());
    }
}
