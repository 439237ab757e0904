//! In-process host for tests and headless use.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::descriptor::ElementDescriptor;
use crate::host::{Definition, Handler, Host, HostError};
use crate::payload::EventDetail;
use crate::props::PropValue;

/// Handle to an element created by a [`MemoryHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

/// Handle to a listener installed on a [`MemoryHost`] element.
#[derive(Debug, PartialEq, Eq)]
pub struct ListenerId(u64);

#[derive(Default)]
struct Node {
    tag: String,
    properties: BTreeMap<String, PropValue>,
    text: Option<String>,
    listeners: Vec<(u64, String, Handler)>,
    connected: bool,
}

#[derive(Default)]
struct Inner {
    /// Defined tag -> class name
    definitions: HashMap<String, String>,
    nodes: Vec<Node>,
    next_listener: u64,
    /// Events whose `listen` calls fail
    failing: HashSet<String>,
}

/// A DOM double: a definition registry plus a flat element arena.
#[derive(Default)]
pub struct MemoryHost {
    inner: RefCell<Inner>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch `event` on `element`, returning how many handlers ran.
    pub fn dispatch(&self, element: &ElementId, event: &str, detail: impl Into<EventDetail>) -> usize {
        let detail = detail.into();

        // Handlers may re-enter the host, so none of them run under the borrow.
        let handlers: Vec<Handler> = {
            let inner = self.inner.borrow();
            match inner.nodes.get(element.0) {
                Some(node) => node
                    .listeners
                    .iter()
                    .filter(|(_, name, _)| name == event)
                    .map(|(_, _, handler)| handler.clone())
                    .collect(),
                None => Vec::new(),
            }
        };

        for handler in &handlers {
            handler(&detail);
        }

        handlers.len()
    }

    /// Make every later `listen` for `event` fail.
    pub fn fail_listen_on(&self, event: impl Into<String>) {
        self.inner.borrow_mut().failing.insert(event.into());
    }

    pub fn is_defined(&self, tag: &str) -> bool {
        self.inner.borrow().definitions.contains_key(tag)
    }

    pub fn definition_count(&self) -> usize {
        self.inner.borrow().definitions.len()
    }

    pub fn tag(&self, element: &ElementId) -> Option<String> {
        self.inner.borrow().nodes.get(element.0).map(|n| n.tag.clone())
    }

    pub fn property(&self, element: &ElementId, name: &str) -> Option<PropValue> {
        self.inner
            .borrow()
            .nodes
            .get(element.0)
            .and_then(|n| n.properties.get(name).cloned())
    }

    pub fn text(&self, element: &ElementId) -> Option<String> {
        self.inner
            .borrow()
            .nodes
            .get(element.0)
            .and_then(|n| n.text.clone())
    }

    /// Listeners on one element.
    pub fn listener_count(&self, element: &ElementId) -> usize {
        self.inner
            .borrow()
            .nodes
            .get(element.0)
            .map_or(0, |n| n.listeners.len())
    }

    /// Listeners across every element.
    pub fn total_listeners(&self) -> usize {
        self.inner
            .borrow()
            .nodes
            .iter()
            .map(|n| n.listeners.len())
            .sum()
    }

    pub fn is_connected(&self, element: &ElementId) -> bool {
        self.inner
            .borrow()
            .nodes
            .get(element.0)
            .is_some_and(|n| n.connected)
    }

    fn with_node<T>(
        &self,
        element: &ElementId,
        f: impl FnOnce(&mut Node) -> T,
    ) -> Result<T, HostError> {
        let mut inner = self.inner.borrow_mut();
        let node = inner
            .nodes
            .get_mut(element.0)
            .ok_or(HostError::UnknownElement)?;
        Ok(f(node))
    }
}

impl Host for MemoryHost {
    type Element = ElementId;
    type Listener = ListenerId;

    fn define(&self, descriptor: &ElementDescriptor) -> Result<Definition, HostError> {
        let mut inner = self.inner.borrow_mut();
        if inner.definitions.contains_key(&descriptor.tag) {
            return Ok(Definition::AlreadyDefined);
        }
        inner
            .definitions
            .insert(descriptor.tag.clone(), descriptor.class_name.clone());
        Ok(Definition::Registered)
    }

    fn create_element(&self, tag: &str) -> Result<ElementId, HostError> {
        let mut inner = self.inner.borrow_mut();
        inner.nodes.push(Node {
            tag: tag.to_string(),
            connected: true,
            ..Node::default()
        });
        Ok(ElementId(inner.nodes.len() - 1))
    }

    fn set_property(
        &self,
        element: &ElementId,
        name: &str,
        value: &PropValue,
    ) -> Result<(), HostError> {
        self.with_node(element, |node| {
            node.properties.insert(name.to_string(), value.clone());
        })
    }

    fn remove_property(&self, element: &ElementId, name: &str) -> Result<(), HostError> {
        self.with_node(element, |node| {
            node.properties.remove(name);
        })
    }

    fn set_text(&self, element: &ElementId, text: Option<&str>) -> Result<(), HostError> {
        self.with_node(element, |node| {
            node.text = text.map(str::to_string);
        })
    }

    fn listen(
        &self,
        element: &ElementId,
        event: &str,
        handler: Handler,
    ) -> Result<ListenerId, HostError> {
        let mut inner = self.inner.borrow_mut();
        if inner.failing.contains(event) {
            return Err(HostError::Listen {
                event: event.to_string(),
                message: "listen refused".to_string(),
            });
        }
        let id = inner.next_listener;
        let node = inner
            .nodes
            .get_mut(element.0)
            .ok_or_else(|| HostError::Listen {
                event: event.to_string(),
                message: "unknown element".to_string(),
            })?;
        node.listeners.push((id, event.to_string(), handler));
        inner.next_listener += 1;
        Ok(ListenerId(id))
    }

    fn unlisten(&self, element: &ElementId, listener: ListenerId) {
        if let Some(node) = self.inner.borrow_mut().nodes.get_mut(element.0) {
            node.listeners.retain(|(id, _, _)| *id != listener.0);
        }
    }

    fn remove(&self, element: &ElementId) {
        if let Some(node) = self.inner.borrow_mut().nodes.get_mut(element.0) {
            node.connected = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn defining_twice_is_not_an_error() {
        let host = MemoryHost::new();
        let descriptor = ElementDescriptor::from_tag("my-button");

        assert_eq!(host.define(&descriptor).unwrap(), Definition::Registered);
        assert_eq!(host.define(&descriptor).unwrap(), Definition::AlreadyDefined);
        assert_eq!(host.definition_count(), 1);
    }

    #[test]
    fn dispatch_reaches_matching_listeners_only() {
        let host = MemoryHost::new();
        let el = host.create_element("my-input").unwrap();
        let hits = Rc::new(Cell::new(0));

        let counter = hits.clone();
        let listener = host
            .listen(&el, "myChange", Rc::new(move |_: &EventDetail| counter.set(counter.get() + 1)))
            .unwrap();

        assert_eq!(host.dispatch(&el, "myChange", json!({ "value": "a" })), 1);
        assert_eq!(host.dispatch(&el, "myBlur", EventDetail::empty()), 0);
        assert_eq!(hits.get(), 1);

        host.unlisten(&el, listener);
        assert_eq!(host.dispatch(&el, "myChange", EventDetail::empty()), 0);
        assert_eq!(host.total_listeners(), 0);
    }

    #[test]
    fn handlers_may_reenter_the_host() {
        let host = Rc::new(MemoryHost::new());
        let el = host.create_element("my-popover").unwrap();

        let inner = host.clone();
        host.listen(
            &el,
            "myPopoverDidDismiss",
            Rc::new(move |_: &EventDetail| inner.remove(&el)),
        )
        .unwrap();

        host.dispatch(&el, "myPopoverDidDismiss", EventDetail::empty());
        assert!(!host.is_connected(&el));
    }

    #[test]
    fn refused_listens_are_errors() {
        let host = MemoryHost::new();
        let el = host.create_element("my-input").unwrap();
        host.fail_listen_on("myBlur");

        let result = host.listen(&el, "myBlur", Rc::new(|_: &EventDetail| {}));
        assert!(matches!(result, Err(HostError::Listen { .. })));
        assert!(host.listen(&el, "myFocus", Rc::new(|_: &EventDetail| {})).is_ok());
        assert_eq!(host.listener_count(&el), 1);
    }

    #[test]
    fn unknown_elements_are_reported() {
        let host = MemoryHost::new();
        let result = host.set_property(&ElementId(9), "value", &PropValue::Number(1.0));

        assert!(matches!(result, Err(HostError::UnknownElement)));
    }
}
