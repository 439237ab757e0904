//! List configured elements.

use std::path::Path;

use anyhow::Result;
use bridgework_core::{ElementDescriptor, Manifest};

/// Run the list command.
pub fn run(config: &Path) -> Result<()> {
    let manifest = Manifest::load(config)?;

    for element in &manifest.elements {
        println!("{}", describe(element));
    }

    Ok(())
}

/// `MyCheckbox <my-checkbox> onMyChange→myChange, onMyFocus→myFocus`
fn describe(element: &ElementDescriptor) -> String {
    let events = element
        .events
        .iter()
        .map(|b| format!("{}→{}", b.prop, b.event))
        .collect::<Vec<_>>()
        .join(", ");

    if events.is_empty() {
        format!("{} <{}>", element.export_name(), element.tag)
    } else {
        format!("{} <{}> {}", element.export_name(), element.tag, events)
    }
}
