//! Live adapter: binds a custom element to a host and bridges its events.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::descriptor::{ElementDescriptor, EventBinding};
use crate::host::{Definition, Handler, Host};
use crate::payload::{EventDetail, PayloadKind};
use crate::props::{Callback, ElementProps, PropValue};
use crate::traits::{check_callbacks, AdapterError, Render};

/// Adapter for interactive contexts, bound to a host runtime.
pub struct LiveAdapter<H: Host> {
    descriptor: Rc<ElementDescriptor>,
    host: Rc<H>,
}

impl<H: Host> LiveAdapter<H> {
    /// Validate the descriptor and register the element definition.
    ///
    /// An already-defined tag is not an error.
    pub fn new(descriptor: ElementDescriptor, host: Rc<H>) -> Result<Self, AdapterError> {
        descriptor.validate()?;

        match host.define(&descriptor)? {
            Definition::Registered => {
                tracing::debug!(tag = %descriptor.tag, "Defined custom element");
            }
            Definition::AlreadyDefined => {
                tracing::debug!(tag = %descriptor.tag, "Custom element already defined");
            }
        }

        Ok(Self {
            descriptor: Rc::new(descriptor),
            host,
        })
    }

    pub fn host(&self) -> &Rc<H> {
        &self.host
    }

    /// Create the element, apply props and subscribe the mapped events.
    pub fn mount(&self, props: &ElementProps) -> Result<Mounted<H>, AdapterError> {
        check_callbacks(&self.descriptor, props)?;

        let element = self.host.create_element(&self.descriptor.tag)?;
        let mut mounted = Mounted {
            host: Rc::clone(&self.host),
            descriptor: Rc::clone(&self.descriptor),
            element,
            applied: BTreeMap::new(),
            text: None,
            slots: self.descriptor.events.iter().map(EventSlot::new).collect(),
            released: false,
        };

        // On failure `mounted` drops here and releases whatever was subscribed.
        mounted.sync(props)?;

        tracing::debug!(
            tag = %self.descriptor.tag,
            subscriptions = mounted.subscription_count(),
            "Mounted element"
        );

        Ok(mounted)
    }
}

impl<H: Host> Render for LiveAdapter<H> {
    type Output = Mounted<H>;

    fn descriptor(&self) -> &ElementDescriptor {
        &self.descriptor
    }

    fn render(&self, props: &ElementProps) -> Result<Mounted<H>, AdapterError> {
        self.mount(props)
    }
}

/// One declared event: the current callback and, while one is set, its listener.
struct EventSlot<L> {
    prop: String,
    event: String,
    payload: PayloadKind,
    callback: Rc<RefCell<Option<Callback>>>,
    listener: Option<L>,
}

impl<L> EventSlot<L> {
    fn new(binding: &EventBinding) -> Self {
        Self {
            prop: binding.prop.clone(),
            event: binding.event.clone(),
            payload: binding.payload.clone(),
            callback: Rc::new(RefCell::new(None)),
            listener: None,
        }
    }

    /// Listener that forwards the native detail to whatever callback is current.
    fn handler(&self, tag: &str) -> Handler {
        let slot = Rc::clone(&self.callback);
        let payload = self.payload.clone();
        let event = self.event.clone();
        let tag = tag.to_string();

        Rc::new(move |detail: &EventDetail| {
            // Released before the call so the callback may update or unmount.
            let callback = slot.borrow().clone();
            let Some(callback) = callback else {
                return;
            };
            if !payload.accepts(detail) {
                tracing::trace!(%tag, %event, ?payload, "Event detail does not match declared payload");
            }
            tracing::trace!(%tag, %event, "Forwarding event");
            callback(detail);
        })
    }
}

/// A mounted element. Dropping it releases every subscription and detaches the element.
pub struct Mounted<H: Host> {
    host: Rc<H>,
    descriptor: Rc<ElementDescriptor>,
    element: H::Element,
    applied: BTreeMap<String, PropValue>,
    text: Option<String>,
    slots: Vec<EventSlot<H::Listener>>,
    released: bool,
}

impl<H: Host> Mounted<H> {
    pub fn element(&self) -> &H::Element {
        &self.element
    }

    pub fn descriptor(&self) -> &ElementDescriptor {
        &self.descriptor
    }

    /// Number of native events currently subscribed.
    pub fn subscription_count(&self) -> usize {
        self.slots.iter().filter(|s| s.listener.is_some()).count()
    }

    /// Bring the element in line with a new set of props.
    pub fn update(&mut self, props: &ElementProps) -> Result<(), AdapterError> {
        check_callbacks(&self.descriptor, props)?;
        self.sync(props)?;
        tracing::debug!(tag = %self.descriptor.tag, "Updated element");
        Ok(())
    }

    /// Release every subscription and detach the element.
    pub fn unmount(mut self) {
        self.release();
    }

    fn sync(&mut self, props: &ElementProps) -> Result<(), AdapterError> {
        let host = &self.host;
        let element = &self.element;

        for (name, value) in props.properties() {
            if self.applied.get(name) != Some(value) {
                host.set_property(element, name, value)?;
                self.applied.insert(name.clone(), value.clone());
            }
        }

        let stale: Vec<String> = self
            .applied
            .keys()
            .filter(|name| props.property(name).is_none())
            .cloned()
            .collect();
        for name in stale {
            host.remove_property(element, &name)?;
            self.applied.remove(&name);
        }

        if props.text_content() != self.text.as_deref() {
            host.set_text(element, props.text_content())?;
            self.text = props.text_content().map(str::to_string);
        }

        let tag = &self.descriptor.tag;
        for slot in &mut self.slots {
            let next = props.callback(&slot.prop).cloned();
            let subscribe = next.is_some() && slot.listener.is_none();
            let unsubscribe = next.is_none() && slot.listener.is_some();

            *slot.callback.borrow_mut() = next;

            if subscribe {
                let listener = host.listen(element, &slot.event, slot.handler(tag))?;
                slot.listener = Some(listener);
            } else if unsubscribe {
                if let Some(listener) = slot.listener.take() {
                    host.unlisten(element, listener);
                }
            }
        }

        Ok(())
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        for slot in &mut self.slots {
            if let Some(listener) = slot.listener.take() {
                self.host.unlisten(&self.element, listener);
            }
            slot.callback.borrow_mut().take();
        }
        self.host.remove(&self.element);

        tracing::debug!(tag = %self.descriptor.tag, "Unmounted element");
    }
}

impl<H: Host> Drop for Mounted<H> {
    fn drop(&mut self) {
        self.release();
    }
}
