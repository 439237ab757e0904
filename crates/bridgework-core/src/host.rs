//! The runtime a live adapter drives.

use std::rc::Rc;

use crate::descriptor::ElementDescriptor;
use crate::payload::EventDetail;
use crate::props::PropValue;

/// Listener installed on an element for one native event.
pub type Handler = Rc<dyn Fn(&EventDetail)>;

/// Outcome of registering a custom element definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Definition {
    /// The tag was registered by this call
    Registered,
    /// The tag was already registered; nothing changed
    AlreadyDefined,
}

/// DOM-like runtime: definitions, elements, properties and event listeners.
///
/// Methods take `&self`; implementations are single-threaded and use
/// interior mutability.
pub trait Host {
    /// Handle to a created element.
    type Element: Clone;

    /// Handle to an installed listener, returned to `unlisten`.
    type Listener;

    /// Register the element definition. Must succeed when the tag is already defined.
    fn define(&self, descriptor: &ElementDescriptor) -> Result<Definition, HostError>;

    fn create_element(&self, tag: &str) -> Result<Self::Element, HostError>;

    fn set_property(
        &self,
        element: &Self::Element,
        name: &str,
        value: &PropValue,
    ) -> Result<(), HostError>;

    fn remove_property(&self, element: &Self::Element, name: &str) -> Result<(), HostError>;

    fn set_text(&self, element: &Self::Element, text: Option<&str>) -> Result<(), HostError>;

    /// Subscribe `handler` to `event` on `element`.
    fn listen(
        &self,
        element: &Self::Element,
        event: &str,
        handler: Handler,
    ) -> Result<Self::Listener, HostError>;

    /// Release a subscription made by `listen`.
    fn unlisten(&self, element: &Self::Element, listener: Self::Listener);

    /// Detach the element from the document.
    fn remove(&self, element: &Self::Element);
}

/// Errors raised by a host.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Host runtime unavailable: {0}")]
    Unavailable(&'static str),

    #[error("No constructor available for <{0}>")]
    MissingConstructor(String),

    #[error("Failed to define <{tag}>: {message}")]
    Define { tag: String, message: String },

    #[error("Failed to create <{tag}>: {message}")]
    CreateElement { tag: String, message: String },

    #[error("Failed to set property {name}: {message}")]
    Property { name: String, message: String },

    #[error("Failed to listen for {event}: {message}")]
    Listen { event: String, message: String },

    #[error("Unknown element handle")]
    UnknownElement,
}
