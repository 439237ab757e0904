//! Trait definitions shared by live and static adapters.

use crate::descriptor::{DescriptorError, ElementDescriptor};
use crate::host::HostError;
use crate::props::ElementProps;
use crate::render::RenderError;

/// The capability both adapter kinds share: turn props into a rendered element.
pub trait Render {
    /// A mounted element for live adapters, markup for static ones.
    type Output;

    /// Descriptor of the wrapped element.
    fn descriptor(&self) -> &ElementDescriptor;

    /// Render the element with the given props.
    fn render(&self, props: &ElementProps) -> Result<Self::Output, AdapterError>;
}

/// Errors that can occur while building or rendering adapters.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error("<{tag}> has no event mapped to callback prop {prop}")]
    UnknownCallback { tag: String, prop: String },

    #[error("Unknown element: {0}")]
    UnknownElement(String),

    #[error("Element <{0}> is declared more than once")]
    DuplicateElement(String),

    #[error("Export name {0} is used by more than one element")]
    DuplicateExport(String),
}

/// Reject callback props the element's event map does not declare.
pub(crate) fn check_callbacks(
    descriptor: &ElementDescriptor,
    props: &ElementProps,
) -> Result<(), AdapterError> {
    for prop in props.callback_props() {
        if descriptor.binding_for_prop(prop).is_none() {
            return Err(AdapterError::UnknownCallback {
                tag: descriptor.tag.clone(),
                prop: prop.to_string(),
            });
        }
    }
    Ok(())
}
