//! Browser host backed by the real DOM.

use std::cell::RefCell;
use std::collections::HashMap;

use js_sys::{Function, Reflect, JSON};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomElementRegistry, CustomEvent, Document, Element, Event, KeyboardEvent};

use crate::descriptor::ElementDescriptor;
use crate::host::{Definition, Handler, Host, HostError};
use crate::payload::{EventDetail, KeyboardDetail};
use crate::props::PropValue;

/// Host that defines, creates and wires elements through `web-sys`.
#[derive(Default)]
pub struct BrowserHost {
    constructors: RefCell<HashMap<String, Function>>,
}

/// An installed `addEventListener` callback. Dropping it frees the closure.
pub struct BrowserListener {
    event: String,
    closure: Closure<dyn FnMut(Event)>,
}

impl BrowserHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the class constructor used when `tag` is not yet defined.
    ///
    /// Without one, the constructor is looked up on `window` by class name.
    pub fn with_constructor(self, tag: impl Into<String>, constructor: Function) -> Self {
        self.constructors.borrow_mut().insert(tag.into(), constructor);
        self
    }

    fn window() -> Result<web_sys::Window, HostError> {
        web_sys::window().ok_or(HostError::Unavailable("window"))
    }

    fn document() -> Result<Document, HostError> {
        Self::window()?
            .document()
            .ok_or(HostError::Unavailable("document"))
    }

    fn registry() -> Result<CustomElementRegistry, HostError> {
        Ok(Self::window()?.custom_elements())
    }

    fn constructor(&self, descriptor: &ElementDescriptor) -> Result<Function, HostError> {
        if let Some(ctor) = self.constructors.borrow().get(&descriptor.tag) {
            return Ok(ctor.clone());
        }

        let window = Self::window()?;
        Reflect::get(&window, &JsValue::from_str(&descriptor.class_name))
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok())
            .ok_or_else(|| HostError::MissingConstructor(descriptor.tag.clone()))
    }
}

impl Host for BrowserHost {
    type Element = Element;
    type Listener = BrowserListener;

    fn define(&self, descriptor: &ElementDescriptor) -> Result<Definition, HostError> {
        let registry = Self::registry()?;
        if !registry.get(&descriptor.tag).is_undefined() {
            return Ok(Definition::AlreadyDefined);
        }

        let ctor = self.constructor(descriptor)?;
        registry
            .define(&descriptor.tag, &ctor)
            .map_err(|err| HostError::Define {
                tag: descriptor.tag.clone(),
                message: describe(err),
            })?;

        Ok(Definition::Registered)
    }

    fn create_element(&self, tag: &str) -> Result<Element, HostError> {
        Self::document()?
            .create_element(tag)
            .map_err(|err| HostError::CreateElement {
                tag: tag.to_string(),
                message: describe(err),
            })
    }

    fn set_property(&self, element: &Element, name: &str, value: &PropValue) -> Result<(), HostError> {
        let property_error = |err: JsValue| HostError::Property {
            name: name.to_string(),
            message: describe(err),
        };

        let value = to_js(value).map_err(property_error)?;
        Reflect::set(element, &JsValue::from_str(name), &value).map_err(property_error)?;
        Ok(())
    }

    fn remove_property(&self, element: &Element, name: &str) -> Result<(), HostError> {
        Reflect::set(element, &JsValue::from_str(name), &JsValue::UNDEFINED).map_err(|err| {
            HostError::Property {
                name: name.to_string(),
                message: describe(err),
            }
        })?;
        Ok(())
    }

    fn set_text(&self, element: &Element, text: Option<&str>) -> Result<(), HostError> {
        element.set_text_content(text);
        Ok(())
    }

    fn listen(
        &self,
        element: &Element,
        event: &str,
        handler: Handler,
    ) -> Result<BrowserListener, HostError> {
        let closure = Closure::<dyn FnMut(Event)>::new(move |e: Event| {
            handler(&detail_of(&e));
        });

        element
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|err| HostError::Listen {
                event: event.to_string(),
                message: describe(err),
            })?;

        Ok(BrowserListener {
            event: event.to_string(),
            closure,
        })
    }

    fn unlisten(&self, element: &Element, listener: BrowserListener) {
        if let Err(err) = element
            .remove_event_listener_with_callback(&listener.event, listener.closure.as_ref().unchecked_ref())
        {
            tracing::debug!(event = %listener.event, "removeEventListener failed: {}", describe(err));
        }
    }

    fn remove(&self, element: &Element) {
        element.remove();
    }
}

/// Read `CustomEvent.detail` as JSON. Keyboard events are not serializable
/// by `JSON.stringify`, so their fields are copied out explicitly.
fn detail_of(event: &Event) -> EventDetail {
    let Some(custom) = event.dyn_ref::<CustomEvent>() else {
        return EventDetail::empty();
    };
    let detail = custom.detail();
    if detail.is_undefined() || detail.is_null() {
        return EventDetail::empty();
    }

    if let Some(key) = detail.dyn_ref::<KeyboardEvent>() {
        let keyboard = KeyboardDetail {
            key: key.key(),
            code: key.code(),
            alt_key: key.alt_key(),
            ctrl_key: key.ctrl_key(),
            meta_key: key.meta_key(),
            shift_key: key.shift_key(),
        };
        return serde_json::to_value(keyboard)
            .map(EventDetail::new)
            .unwrap_or_default();
    }

    JSON::stringify(&detail)
        .ok()
        .map(String::from)
        .and_then(|text| serde_json::from_str(&text).ok())
        .map(EventDetail::new)
        .unwrap_or_default()
}

fn to_js(value: &PropValue) -> Result<JsValue, JsValue> {
    Ok(match value {
        PropValue::String(s) => JsValue::from_str(s),
        PropValue::Boolean(b) => JsValue::from_bool(*b),
        PropValue::Number(n) => JsValue::from_f64(*n),
        PropValue::Json(v) => JSON::parse(&v.to_string())?,
    })
}

fn describe(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
