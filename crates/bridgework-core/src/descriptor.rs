//! Element descriptors: the static shape of a wrapped custom element.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::payload::PayloadKind;

/// Static description of one custom element and the events it emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDescriptor {
    /// Custom element tag name (e.g., "my-checkbox")
    pub tag: String,

    /// Native element type name, also used as the export name
    #[serde(rename = "class")]
    pub class_name: String,

    /// Callback prop to native event mapping, in declaration order
    #[serde(default)]
    pub events: Vec<EventBinding>,
}

/// Binds a framework-facing callback prop to a native event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBinding {
    /// Callback prop name (e.g., "onMyChange")
    pub prop: String,

    /// Native event name the element dispatches (e.g., "myChange")
    pub event: String,

    /// Shape of the event detail
    #[serde(default)]
    pub payload: PayloadKind,
}

impl EventBinding {
    /// Binding whose prop name is derived from the event: `myChange` -> `onMyChange`.
    pub fn for_event(event: impl Into<String>, payload: PayloadKind) -> Self {
        let event = event.into();
        Self {
            prop: callback_prop_name(&event),
            event,
            payload,
        }
    }
}

impl ElementDescriptor {
    /// Create a descriptor with no events.
    pub fn new(tag: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            class_name: class_name.into(),
            events: Vec::new(),
        }
    }

    /// Create a descriptor whose class name is derived from the tag.
    pub fn from_tag(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let class_name = to_pascal_case(&tag);
        Self::new(tag, class_name)
    }

    /// Append an event binding.
    pub fn event(
        mut self,
        prop: impl Into<String>,
        event: impl Into<String>,
        payload: PayloadKind,
    ) -> Self {
        self.events.push(EventBinding {
            prop: prop.into(),
            event: event.into(),
            payload,
        });
        self
    }

    /// Name the adapter is exported under.
    pub fn export_name(&self) -> &str {
        &self.class_name
    }

    pub fn binding_for_prop(&self, prop: &str) -> Option<&EventBinding> {
        self.events.iter().find(|b| b.prop == prop)
    }

    pub fn binding_for_event(&self, event: &str) -> Option<&EventBinding> {
        self.events.iter().find(|b| b.event == event)
    }

    /// Check the tag, class name and event map.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        if !is_valid_tag(&self.tag) {
            return Err(DescriptorError::InvalidTag(self.tag.clone()));
        }

        if self.class_name.is_empty() {
            return Err(DescriptorError::MissingClass(self.tag.clone()));
        }

        let mut props = HashSet::new();
        for binding in &self.events {
            if binding.event.is_empty() {
                return Err(DescriptorError::EmptyEvent {
                    tag: self.tag.clone(),
                    prop: binding.prop.clone(),
                });
            }
            if !props.insert(binding.prop.as_str()) {
                return Err(DescriptorError::DuplicateProp {
                    tag: self.tag.clone(),
                    prop: binding.prop.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Hyphenated names already taken by SVG and MathML.
const RESERVED_TAGS: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// Whether `tag` is a valid custom element name.
pub fn is_valid_tag(tag: &str) -> bool {
    static RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[a-z][a-z0-9._]*(-[a-z0-9._]*)+$").expect("Invalid tag regex")
    });
    RE.is_match(tag) && !RESERVED_TAGS.contains(&tag)
}

/// `myPopoverDidPresent` -> `onMyPopoverDidPresent`.
pub fn callback_prop_name(event: &str) -> String {
    let mut chars = event.chars();
    match chars.next() {
        Some(c) => format!("on{}{}", c.to_uppercase(), chars.as_str()),
        None => "on".to_string(),
    }
}

/// Convert kebab-case to PascalCase.
pub fn to_pascal_case(s: &str) -> String {
    s.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Errors in an element descriptor.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    #[error("Invalid custom element tag: {0}")]
    InvalidTag(String),

    #[error("Element <{0}> has no class name")]
    MissingClass(String),

    #[error("Element <{tag}> declares callback prop {prop} more than once")]
    DuplicateProp { tag: String, prop: String },

    #[error("Element <{tag}> maps {prop} to an empty event name")]
    EmptyEvent { tag: String, prop: String },
}
