//! The `_links` codec.
//!
//! Rendering drops the relation name from every link object because the
//! enclosing key already carries it. Parsing has to put it back, and has to
//! decide for every key whether the value is a single link or a list: a
//! relation declared array valued always decodes to a [`LinkList`], even when
//! the document holds a bare object for it.

use crate::definition::LinkRegistry;
use crate::error::{ConfigurationError, MalformedLinkError};
use crate::link::{Hyperlink, LinkCollection, LinkList, LinkValue};
use crate::link_builder;
use crate::utils::{is_scalar, json_kind};
use log::trace;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Builds the links of `instance` for every definition, in declaration order.
pub fn collect<T>(
    registry: &LinkRegistry<T>,
    instance: &T,
) -> Result<LinkCollection, ConfigurationError> {
    let mut links = LinkCollection::new();
    for definition in registry.definitions() {
        if let Some(value) = link_builder::build(definition, instance)? {
            links.insert(definition.rel(), value);
        }
    }
    Ok(links)
}

/// Renders a collection as the JSON object found under `_links`.
pub fn to_value(links: &LinkCollection) -> Value {
    let mut object = Map::new();
    for (rel, value) in links.iter() {
        let rendered = match value {
            LinkValue::Single(link) => link_object(link),
            LinkValue::List(list) => Value::Array(list.iter().map(link_object).collect()),
        };
        object.insert(rel.to_string(), rendered);
    }
    Value::Object(object)
}

fn link_object(link: &Hyperlink) -> Value {
    let mut object = Map::new();
    object.insert("href".to_string(), Value::String(link.href.clone()));
    for (name, value) in &link.attrs {
        if name != "rel" && name != "href" {
            object.insert(name.clone(), value.clone());
        }
    }
    Value::Object(object)
}

impl Serialize for LinkCollection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        to_value(self).serialize(serializer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Shape {
    List,
    Single,
    /// Undeclared relation: take whatever the document holds.
    Any,
}

/// Parses a raw `_links` object.
///
/// `array_rels` and `single_rels` are the shapes declared for the representer.
/// Relations that appear in neither keep the shape found in the document.
pub fn from_value(
    raw: &Value,
    array_rels: &BTreeSet<String>,
    single_rels: &BTreeSet<String>,
) -> Result<LinkCollection, MalformedLinkError> {
    let object = raw
        .as_object()
        .ok_or_else(|| MalformedLinkError::NotAnObject {
            found: json_kind(raw),
        })?;

    // First pass: decode every entry without knowing its relation.
    let mut decoded = Vec::with_capacity(object.len());
    for (key, value) in object {
        let shape = if array_rels.contains(key) {
            Shape::List
        } else if single_rels.contains(key) {
            Shape::Single
        } else {
            Shape::Any
        };
        decoded.push((key, decode_entry(key, value, shape)?));
    }

    // Second pass: the key is the relation.
    let mut links = LinkCollection::new();
    for (key, mut value) in decoded {
        value.set_rel(key.as_str());
        links.insert(key.as_str(), value);
    }
    Ok(links)
}

fn decode_entry(key: &str, value: &Value, shape: Shape) -> Result<LinkValue, MalformedLinkError> {
    match (shape, value) {
        (Shape::List | Shape::Any, Value::Array(items)) => decode_list(key, items),
        (Shape::List, Value::Object(_)) => {
            trace!("coercing single link object under `{key}` into a list");
            decode_list(key, std::slice::from_ref(value))
        }
        (Shape::Single | Shape::Any, Value::Object(_)) => Ok(LinkValue::Single(decode_link(key, value)?)),
        (Shape::List, other) => Err(invalid_shape(key, "a link object or an array", other)),
        (Shape::Single, other) => Err(invalid_shape(key, "a link object", other)),
        (Shape::Any, other) => Err(invalid_shape(key, "a link object or an array", other)),
    }
}

fn decode_list(key: &str, items: &[Value]) -> Result<LinkValue, MalformedLinkError> {
    let mut list = LinkList::new(String::new());
    for item in items {
        if !item.is_object() {
            return Err(invalid_shape(key, "a link object", item));
        }
        list.push(decode_link(key, item)?);
    }
    Ok(LinkValue::List(list))
}

/// Decodes `{href, ...attrs}`. The relation stays empty; `key` only names the
/// entry in errors.
fn decode_link(key: &str, value: &Value) -> Result<Hyperlink, MalformedLinkError> {
    let Some(object) = value.as_object() else {
        return Err(invalid_shape(key, "a link object", value));
    };
    let href = match object.get("href") {
        Some(Value::String(href)) => href.clone(),
        Some(other) => {
            return Err(MalformedLinkError::InvalidHref {
                rel: key.to_string(),
                found: json_kind(other),
            })
        }
        None => {
            return Err(MalformedLinkError::MissingHref {
                rel: key.to_string(),
            })
        }
    };

    let mut attrs = Map::new();
    for (name, attr) in object {
        if name == "href" || name == "rel" {
            continue;
        }
        if !is_scalar(attr) {
            return Err(MalformedLinkError::InvalidAttribute {
                rel: key.to_string(),
                attr: name.clone(),
                found: json_kind(attr),
            });
        }
        attrs.insert(name.clone(), attr.clone());
    }

    Ok(Hyperlink {
        rel: String::new(),
        href,
        attrs,
    })
}

fn invalid_shape(key: &str, expected: &'static str, found: &Value) -> MalformedLinkError {
    MalformedLinkError::InvalidShape {
        rel: key.to_string(),
        expected,
        found: json_kind(found),
    }
}
