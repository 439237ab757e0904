//! Manifest loading (bridgework.toml).

use std::collections::HashSet;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::catalog;
use crate::descriptor::{to_pascal_case, DescriptorError, ElementDescriptor, EventBinding};
use crate::environment::EnvironmentSetting;
use crate::payload::PayloadKind;

/// Resolved manifest: runtime settings, generation options and elements.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub runtime: RuntimeConfig,
    pub generate: GenerateOptions,
    pub elements: Vec<ElementDescriptor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub environment: EnvironmentSetting,
}

/// Options for the generated wrapper module.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateOptions {
    /// Package exporting the element classes and detail types
    #[serde(default = "default_package")]
    pub package: String,

    /// Module providing `createComponent` and friends
    #[serde(default = "default_runtime")]
    pub runtime: String,

    /// Module prefix for per-element imports (defaults to "<package>/components")
    #[serde(default)]
    pub components: Option<String>,

    /// Module exporting `renderToString` (defaults to "<package>/hydrate")
    #[serde(default)]
    pub hydrate: Option<String>,

    /// Where `bridgework generate` writes by default
    #[serde(default)]
    pub output: Option<PathBuf>,
}

fn default_package() -> String {
    "component-library".to_string()
}

fn default_runtime() -> String {
    "@stencil/react-output-target/runtime".to_string()
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            package: default_package(),
            runtime: default_runtime(),
            components: None,
            hydrate: None,
            output: None,
        }
    }
}

impl GenerateOptions {
    pub fn components_module(&self) -> String {
        self.components
            .clone()
            .unwrap_or_else(|| format!("{}/components", self.package))
    }

    pub fn hydrate_module(&self) -> String {
        self.hydrate
            .clone()
            .unwrap_or_else(|| format!("{}/hydrate", self.package))
    }
}

/// Manifest file structure.
#[derive(Debug, Deserialize, Default)]
struct ManifestFile {
    #[serde(default)]
    runtime: RuntimeConfig,
    #[serde(default)]
    generate: GenerateOptions,
    #[serde(default)]
    elements: Vec<ElementEntry>,
}

#[derive(Debug, Deserialize)]
struct ElementEntry {
    tag: String,
    #[serde(default, rename = "class")]
    class_name: Option<String>,
    #[serde(default)]
    events: Vec<EventEntry>,
}

#[derive(Debug, Deserialize)]
struct EventEntry {
    event: String,
    #[serde(default)]
    prop: Option<String>,
    #[serde(default)]
    payload: PayloadKind,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            runtime: RuntimeConfig::default(),
            generate: GenerateOptions::default(),
            elements: catalog::builtin().to_vec(),
        }
    }
}

impl Manifest {
    /// Load from `path`. A missing file yields the built-in catalog;
    /// a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            tracing::debug!("No manifest at {}, using built-in catalog", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest = Self::from_toml(&content)?;
        tracing::info!(
            "Loaded manifest from {} ({} elements)",
            path.display(),
            manifest.elements.len()
        );
        Ok(manifest)
    }

    pub fn from_toml(content: &str) -> Result<Self, ManifestError> {
        let file: ManifestFile = toml::from_str(content)?;

        let elements = if file.elements.is_empty() {
            catalog::builtin().to_vec()
        } else {
            file.elements.into_iter().map(ElementEntry::into_descriptor).collect()
        };

        let mut tags = HashSet::new();
        let mut exports = HashSet::new();
        for element in &elements {
            element.validate()?;
            if !tags.insert(element.tag.as_str()) {
                return Err(ManifestError::DuplicateElement(element.tag.clone()));
            }
            if !exports.insert(element.export_name()) {
                return Err(ManifestError::DuplicateExport(element.export_name().to_string()));
            }
        }

        Ok(Self {
            runtime: file.runtime,
            generate: file.generate,
            elements,
        })
    }

    /// A manifest listing `elements`, in the format `from_toml` reads.
    pub fn render_default(elements: &[ElementDescriptor]) -> String {
        let mut out = String::from(DEFAULT_HEADER);

        for element in elements {
            let _ = writeln!(out, "\n[[elements]]");
            let _ = writeln!(out, "tag = {}", quote(&element.tag));
            let _ = writeln!(out, "class = {}", quote(&element.class_name));
            if element.events.is_empty() {
                let _ = writeln!(out, "events = []");
                continue;
            }
            let _ = writeln!(out, "events = [");
            for binding in &element.events {
                let _ = writeln!(
                    out,
                    "    {{ prop = {}, event = {}, payload = {} }},",
                    quote(&binding.prop),
                    quote(&binding.event),
                    payload_literal(&binding.payload)
                );
            }
            let _ = writeln!(out, "]");
        }

        out
    }
}

impl ElementEntry {
    fn into_descriptor(self) -> ElementDescriptor {
        let class_name = self
            .class_name
            .unwrap_or_else(|| to_pascal_case(&self.tag));
        let mut descriptor = ElementDescriptor::new(self.tag, class_name);
        descriptor.events = self
            .events
            .into_iter()
            .map(|entry| match entry.prop {
                Some(prop) => EventBinding {
                    prop,
                    event: entry.event,
                    payload: entry.payload,
                },
                None => EventBinding::for_event(entry.event, entry.payload),
            })
            .collect();
        descriptor
    }
}

fn quote(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

fn payload_literal(payload: &PayloadKind) -> String {
    match payload {
        PayloadKind::Void => quote("void"),
        PayloadKind::Number => quote("number"),
        PayloadKind::Keyboard => quote("keyboard"),
        PayloadKind::Detail(name) => format!("{{ detail = {} }}", quote(name)),
    }
}

const DEFAULT_HEADER: &str = r#"# bridgework configuration

[runtime]
# auto | browser | server
environment = "auto"

[generate]
package = "component-library"
runtime = "@stencil/react-output-target/runtime"
# output = "src/components.ts"
"#;

/// Errors that can occur while loading a manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error("Element <{0}> is declared more than once")]
    DuplicateElement(String),

    #[error("Export name {0} is used by more than one element")]
    DuplicateExport(String),
}
