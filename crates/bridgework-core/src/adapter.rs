//! One adapter per element kind, built once for the chosen environment.

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use crate::descriptor::ElementDescriptor;
use crate::environment::Environment;
use crate::host::Host;
use crate::live::{LiveAdapter, Mounted};
use crate::props::ElementProps;
use crate::render::{Serializer, StaticAdapter};
use crate::traits::{AdapterError, Render};

/// Either adapter kind, chosen when the set is built.
pub enum Adapter<H: Host> {
    Live(LiveAdapter<H>),
    Static(StaticAdapter),
}

/// What rendering produced.
pub enum Rendered<H: Host> {
    Mounted(Mounted<H>),
    Markup(String),
}

impl<H: Host> Rendered<H> {
    pub fn into_markup(self) -> Option<String> {
        match self {
            Rendered::Markup(html) => Some(html),
            Rendered::Mounted(_) => None,
        }
    }

    pub fn into_mounted(self) -> Option<Mounted<H>> {
        match self {
            Rendered::Mounted(mounted) => Some(mounted),
            Rendered::Markup(_) => None,
        }
    }
}

impl<H: Host> Adapter<H> {
    pub fn descriptor(&self) -> &ElementDescriptor {
        match self {
            Adapter::Live(adapter) => adapter.descriptor(),
            Adapter::Static(adapter) => adapter.descriptor(),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Adapter::Live(_))
    }

    pub fn render(&self, props: &ElementProps) -> Result<Rendered<H>, AdapterError> {
        match self {
            Adapter::Live(adapter) => adapter.render(props).map(Rendered::Mounted),
            Adapter::Static(adapter) => adapter.render(props).map(Rendered::Markup),
        }
    }
}

/// The adapters for a set of elements. Immutable once built.
pub struct AdapterSet<H: Host> {
    environment: Environment,
    adapters: Vec<Adapter<H>>,
    by_tag: HashMap<String, usize>,
    by_export: HashMap<String, usize>,
}

impl<H: Host> AdapterSet<H> {
    /// Build one adapter per descriptor for `environment`.
    ///
    /// `host` is only invoked for [`Environment::Browser`].
    pub fn new<I, F>(
        environment: Environment,
        descriptors: I,
        host: F,
        serializer: Arc<dyn Serializer>,
    ) -> Result<Self, AdapterError>
    where
        I: IntoIterator<Item = ElementDescriptor>,
        F: FnOnce() -> Rc<H>,
    {
        let descriptors: Vec<ElementDescriptor> = descriptors.into_iter().collect();

        // Checked before anything is defined on the host.
        let mut by_tag = HashMap::new();
        let mut by_export = HashMap::new();
        for (i, descriptor) in descriptors.iter().enumerate() {
            if by_tag.insert(descriptor.tag.clone(), i).is_some() {
                return Err(AdapterError::DuplicateElement(descriptor.tag.clone()));
            }
            if by_export.insert(descriptor.export_name().to_string(), i).is_some() {
                return Err(AdapterError::DuplicateExport(descriptor.export_name().to_string()));
            }
        }

        let mut adapters = Vec::with_capacity(descriptors.len());

        match environment {
            Environment::Browser => {
                let host = host();
                for descriptor in descriptors {
                    adapters.push(Adapter::Live(LiveAdapter::new(descriptor, Rc::clone(&host))?));
                }
            }
            Environment::Server => {
                for descriptor in descriptors {
                    descriptor.validate()?;
                    adapters.push(Adapter::Static(StaticAdapter::new(
                        descriptor,
                        Arc::clone(&serializer),
                    )));
                }
            }
        }

        tracing::debug!(%environment, elements = adapters.len(), "Built adapter set");

        Ok(Self {
            environment,
            adapters,
            by_tag,
            by_export,
        })
    }

    /// Live adapters bound to `host`.
    pub fn live<I>(descriptors: I, host: Rc<H>) -> Result<Self, AdapterError>
    where
        I: IntoIterator<Item = ElementDescriptor>,
    {
        Self::new(
            Environment::Browser,
            descriptors,
            move || host,
            Arc::new(crate::render::MarkupSerializer),
        )
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn get(&self, tag: &str) -> Option<&Adapter<H>> {
        self.by_tag.get(tag).map(|&i| &self.adapters[i])
    }

    /// Look up by export name (e.g., "MyCheckbox").
    pub fn by_export(&self, name: &str) -> Option<&Adapter<H>> {
        self.by_export.get(name).map(|&i| &self.adapters[i])
    }

    /// Render the element registered under `tag`.
    pub fn render(&self, tag: &str, props: &ElementProps) -> Result<Rendered<H>, AdapterError> {
        self.get(tag)
            .ok_or_else(|| AdapterError::UnknownElement(tag.to_string()))?
            .render(props)
    }

    /// Adapters in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Adapter<H>> {
        self.adapters.iter()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl AdapterSet<crate::memory::MemoryHost> {
    /// Static adapters; no host is ever created.
    pub fn server<I>(descriptors: I, serializer: Arc<dyn Serializer>) -> Result<Self, AdapterError>
    where
        I: IntoIterator<Item = ElementDescriptor>,
    {
        Self::new(
            Environment::Server,
            descriptors,
            || Rc::new(crate::memory::MemoryHost::new()),
            serializer,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::memory::MemoryHost;
    use crate::payload::EventDetail;
    use crate::render::MarkupSerializer;
    use serde_json::json;
    use std::cell::{Cell, RefCell};

    fn builtin() -> Vec<ElementDescriptor> {
        catalog::builtin().to_vec()
    }

    #[test]
    fn server_environment_never_builds_a_host() {
        let built = Cell::new(false);
        let set = AdapterSet::<MemoryHost>::new(
            Environment::Server,
            builtin(),
            || {
                built.set(true);
                Rc::new(MemoryHost::new())
            },
            Arc::new(MarkupSerializer),
        )
        .unwrap();

        assert!(!built.get());
        assert_eq!(set.len(), 8);
        assert!(set.iter().all(|a| !a.is_live()));
    }

    #[test]
    fn server_render_returns_markup_for_every_element() {
        let set = AdapterSet::server(builtin(), Arc::new(MarkupSerializer)).unwrap();

        for adapter in set.iter() {
            let tag = adapter.descriptor().tag.clone();
            let html = set
                .render(&tag, &ElementProps::new())
                .unwrap()
                .into_markup()
                .unwrap();
            assert_eq!(html, format!("<{tag}></{tag}>"));
        }
    }

    #[test]
    fn browser_environment_defines_every_element_once() {
        let host = Rc::new(MemoryHost::new());
        let set = AdapterSet::live(builtin(), Rc::clone(&host)).unwrap();
        let again = AdapterSet::live(builtin(), Rc::clone(&host)).unwrap();

        assert_eq!(set.environment(), Environment::Browser);
        assert_eq!(again.len(), 8);
        assert_eq!(host.definition_count(), 8);
    }

    #[test]
    fn checkbox_scenario_through_the_set() {
        let host = Rc::new(MemoryHost::new());
        let set = AdapterSet::live(builtin(), Rc::clone(&host)).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let mounted = set
            .by_export("MyCheckbox")
            .unwrap()
            .render(&ElementProps::new().on("onMyChange", move |d: &EventDetail| {
                sink.borrow_mut().push(d.value().clone())
            }))
            .unwrap()
            .into_mounted()
            .unwrap();
        let el = *mounted.element();

        host.dispatch(&el, "myChange", json!({ "checked": true }));
        mounted.unmount();
        host.dispatch(&el, "myChange", json!({ "checked": true }));

        assert_eq!(*seen.borrow(), vec![json!({ "checked": true })]);
    }

    #[test]
    fn rejects_duplicate_tags() {
        let mut descriptors = builtin();
        descriptors.push(ElementDescriptor::from_tag("my-button"));

        let result = AdapterSet::server(descriptors, Arc::new(MarkupSerializer));
        assert!(matches!(result, Err(AdapterError::DuplicateElement(tag)) if tag == "my-button"));
    }

    #[test]
    fn rejects_duplicate_export_names() {
        let descriptors = vec![
            ElementDescriptor::from_tag("my-ab"),
            ElementDescriptor::from_tag("my--ab"),
        ];

        let result = AdapterSet::server(descriptors, Arc::new(MarkupSerializer));
        assert!(matches!(result, Err(AdapterError::DuplicateExport(name)) if name == "MyAb"));
    }

    #[test]
    fn rejected_set_defines_nothing() {
        let host = Rc::new(MemoryHost::new());
        let mut descriptors = builtin();
        descriptors.push(ElementDescriptor::from_tag("my-button"));

        assert!(AdapterSet::live(descriptors, Rc::clone(&host)).is_err());
        assert_eq!(host.definition_count(), 0);
    }

    #[test]
    fn unknown_tags_are_reported() {
        let set = AdapterSet::server(builtin(), Arc::new(MarkupSerializer)).unwrap();

        assert!(matches!(
            set.render("my-slider", &ElementProps::new()),
            Err(AdapterError::UnknownElement(_))
        ));
    }
}
