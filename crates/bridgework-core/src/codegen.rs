//! Wrapper module generator.
//!
//! Emits the host-framework module that exposes one component per element,
//! switching between the live and server-rendered constructors on
//! `typeof window`.

use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use minijinja::{context, Environment};
use regex::Regex;
use serde::Serialize;

use crate::descriptor::ElementDescriptor;
use crate::manifest::GenerateOptions;
use crate::payload::PayloadKind;

#[derive(Debug, Serialize)]
struct ElementContext {
    class_name: String,
    tag: String,
    events: Vec<EventContext>,
}

#[derive(Debug, Serialize)]
struct EventContext {
    prop: String,
    event: String,
    ts_type: String,
}

/// Generate the wrapper module for `elements`.
pub fn generate_wrappers(
    elements: &[ElementDescriptor],
    options: &GenerateOptions,
) -> Result<String, CodegenError> {
    let components = options.components_module();
    let hydrate = options.hydrate_module();
    for module in [&options.package, &options.runtime, &components, &hydrate] {
        check_module(module)?;
    }

    let mut type_imports = BTreeSet::new();
    let mut exports = HashSet::new();
    let mut contexts = Vec::with_capacity(elements.len());

    for element in elements {
        check_identifier(&element.class_name)?;
        if !exports.insert(element.class_name.as_str()) {
            return Err(CodegenError::DuplicateExport(element.class_name.clone()));
        }

        let mut events = Vec::with_capacity(element.events.len());
        for binding in &element.events {
            check_identifier(&binding.prop)?;
            if binding.event.contains(['\'', '\\', '\n']) {
                return Err(CodegenError::InvalidEventName(binding.event.clone()));
            }
            if let Some(detail) = binding.payload.detail_type() {
                check_identifier(detail)?;
                type_imports.insert(detail.to_string());
            }
            if matches!(binding.payload, PayloadKind::Keyboard | PayloadKind::Detail(_)) {
                type_imports.insert(format!("{}CustomEvent", element.class_name));
            }
            events.push(EventContext {
                prop: binding.prop.clone(),
                event: binding.event.clone(),
                ts_type: event_type(&element.class_name, &binding.payload),
            });
        }

        contexts.push(ElementContext {
            class_name: element.class_name.clone(),
            tag: element.tag.clone(),
            events,
        });
    }

    // Element imports are ordered by module path, declarations by input order.
    let mut imports: Vec<&ElementContext> = contexts.iter().collect();
    imports.sort_by(|a, b| format!("{}.js", a.tag).cmp(&format!("{}.js", b.tag)));

    let mut env = Environment::new();
    env.add_template("components.ts", WRAPPER_TEMPLATE)?;
    let tmpl = env.get_template("components.ts")?;

    let mut output = tmpl.render(context! {
        runtime => &options.runtime,
        package => &options.package,
        components => components,
        hydrate => hydrate,
        type_imports => &type_imports,
        imports => &imports,
        elements => &contexts,
    })?;

    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

/// TypeScript type of the event passed to a callback prop.
fn event_type(class_name: &str, payload: &PayloadKind) -> String {
    match payload {
        PayloadKind::Void => "CustomEvent<void>".to_string(),
        PayloadKind::Number => "CustomEvent<number>".to_string(),
        PayloadKind::Keyboard => format!("{class_name}CustomEvent<KeyboardEvent>"),
        PayloadKind::Detail(detail) => format!("{class_name}CustomEvent<{detail}>"),
    }
}

fn check_identifier(name: &str) -> Result<(), CodegenError> {
    static RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("Invalid identifier regex")
    });
    if RE.is_match(name) {
        Ok(())
    } else {
        Err(CodegenError::InvalidIdentifier(name.to_string()))
    }
}

/// Module specifiers are emitted inside quotes.
fn check_module(specifier: &str) -> Result<(), CodegenError> {
    if specifier.is_empty() || specifier.contains(['\'', '"', '\\', '\n', '\r']) {
        return Err(CodegenError::InvalidModule(specifier.to_string()));
    }
    Ok(())
}

/// Errors that can occur during generation.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    #[error("Not a valid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Event name cannot be quoted: {0}")]
    InvalidEventName(String),

    #[error("Module specifier cannot be quoted: {0}")]
    InvalidModule(String),

    #[error("Export name {0} is used by more than one element")]
    DuplicateExport(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

const WRAPPER_TEMPLATE: &str = r#"/**
 * This file was automatically generated by bridgework.
 * Changes to this file may cause incorrect behavior and will be lost if the code is regenerated.
 */

/* eslint-disable */

import type { EventName } from '{{ runtime }}';
import { createComponent, createComponentForServerSideRendering } from '{{ runtime }}';
{% if type_imports %}import { {% for t in type_imports %}type {{ t }}{% if not loop.last %}, {% endif %}{% endfor %} } from "{{ package }}";
{% endif %}{% for el in imports %}import { {{ el.class_name }} as {{ el.class_name }}Element, defineCustomElement as define{{ el.class_name }} } from "{{ components }}/{{ el.tag }}.js";
{% endfor %}import { renderToString } from "{{ hydrate }}";
import React from 'react';
{% for el in elements %}
{% if el.events | length == 0 %}type {{ el.class_name }}Events = NonNullable<unknown>;
{% elif el.events | length == 1 %}type {{ el.class_name }}Events = { {{ el.events[0].prop }}: EventName<{{ el.events[0].ts_type }}> };
{% else %}type {{ el.class_name }}Events = {
{% for ev in el.events %}    {{ ev.prop }}: EventName<{{ ev.ts_type }}>{% if not loop.last %},{% endif %}
{% endfor %}};
{% endif %}
export const {{ el.class_name }} = typeof window !== 'undefined'
    ? /*@__PURE__*/ createComponent<{{ el.class_name }}Element, {{ el.class_name }}Events>({
        tagName: '{{ el.tag }}',
        elementClass: {{ el.class_name }}Element,
        react: React,
{% if el.events | length == 0 %}        events: {} as {{ el.class_name }}Events,
{% elif el.events | length == 1 %}        events: { {{ el.events[0].prop }}: '{{ el.events[0].event }}' } as {{ el.class_name }}Events,
{% else %}        events: {
{% for ev in el.events %}            {{ ev.prop }}: '{{ ev.event }}'{% if not loop.last %},{% endif %}
{% endfor %}        } as {{ el.class_name }}Events,
{% endif %}        defineCustomElement: define{{ el.class_name }}
    })
    : /*@__PURE__*/ createComponentForServerSideRendering<{{ el.class_name }}Element, {{ el.class_name }}Events>({
        tagName: '{{ el.tag }}',
        renderToString,
    });
{% endfor %}"#;
