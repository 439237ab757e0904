//! Framework adapters for custom elements.
//!
//! Each element is described once by an [`ElementDescriptor`]. An
//! [`AdapterSet`] turns the descriptors into live adapters, which drive a
//! [`Host`] and bridge callback props to native events, or into static
//! adapters, which serialize the element to markup.

pub mod adapter;
pub mod catalog;
pub mod codegen;
pub mod descriptor;
pub mod environment;
pub mod host;
pub mod live;
pub mod manifest;
pub mod memory;
pub mod payload;
pub mod props;
pub mod render;
pub mod traits;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use adapter::{Adapter, AdapterSet, Rendered};
pub use codegen::{generate_wrappers, CodegenError};
pub use descriptor::{DescriptorError, ElementDescriptor, EventBinding};
pub use environment::{Environment, EnvironmentSetting};
pub use host::{Definition, Handler, Host, HostError};
pub use live::{LiveAdapter, Mounted};
pub use manifest::{GenerateOptions, Manifest, ManifestError, RuntimeConfig};
pub use memory::{ElementId, MemoryHost};
pub use payload::{EventDetail, PayloadKind};
pub use props::{Callback, ElementProps, PropValue};
pub use render::{render_markup, MarkupSerializer, RenderError, Serializer, StaticAdapter};
pub use traits::{AdapterError, Render};
#[cfg(target_arch = "wasm32")]
pub use web::BrowserHost;
