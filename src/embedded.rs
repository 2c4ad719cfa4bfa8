//! Nested resources and the `_embedded` block.
//!
//! A nested property is rendered through its own [`Representer`], so a nested
//! resource is a full HAL document with its own links. Properties flagged
//! embedded live under `_embedded`; the others stay at the document root.

use crate::api::Representer;
use crate::config::{HalOptions, UnknownEmbeddedPolicy};
use crate::error::{DocumentError, HalError, UnknownEmbeddedPropertyError};
use crate::utils::json_kind;
use log::{trace, warn};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

type RenderFn<T> = Box<dyn Fn(&T) -> Result<Option<Value>, HalError> + Send + Sync>;
type DecodeFn<T> = Box<dyn Fn(&Value) -> Result<Assignment<T>, HalError> + Send + Sync>;

/// A decoded nested value waiting to be written onto its parent.
pub(crate) type Assignment<T> = Box<dyn FnOnce(&mut T)>;

/// A property of `T` holding one nested resource or a collection of them.
pub struct NestedProperty<T> {
    name: String,
    embedded: bool,
    render: RenderFn<T>,
    decode: DecodeFn<T>,
}

impl<T: 'static> NestedProperty<T> {
    /// A single nested resource. A getter returning `None` leaves the property out.
    pub fn resource<U, G, S>(
        name: impl Into<String>,
        representer: Arc<Representer<U>>,
        get: G,
        set: S,
    ) -> Self
    where
        U: 'static,
        G: Fn(&T) -> Option<&U> + Send + Sync + 'static,
        S: Fn(&mut T, U) + Send + Sync + 'static,
    {
        let render_with = Arc::clone(&representer);
        let set = Arc::new(set);
        NestedProperty {
            name: name.into(),
            embedded: false,
            render: Box::new(move |instance: &T| -> Result<Option<Value>, HalError> {
                get(instance).map(|nested| render_with.render(nested)).transpose()
            }),
            decode: Box::new(move |raw: &Value| -> Result<Assignment<T>, HalError> {
                if raw.is_null() {
                    return Ok(Box::new(|_: &mut T| {}) as Assignment<T>);
                }
                let nested = representer.parse(raw)?;
                let set = Arc::clone(&set);
                Ok(Box::new(move |instance: &mut T| set(instance, nested)) as Assignment<T>)
            }),
        }
    }

    /// An ordered collection of nested resources, always rendered as an array.
    pub fn collection<U, G, S>(
        name: impl Into<String>,
        representer: Arc<Representer<U>>,
        get: G,
        set: S,
    ) -> Self
    where
        U: 'static,
        G: Fn(&T) -> &[U] + Send + Sync + 'static,
        S: Fn(&mut T, Vec<U>) + Send + Sync + 'static,
    {
        let name = name.into();
        let context = format!("nested property `{name}`");
        let render_with = Arc::clone(&representer);
        let set = Arc::new(set);
        NestedProperty {
            name,
            embedded: false,
            render: Box::new(move |instance: &T| -> Result<Option<Value>, HalError> {
                let items = get(instance)
                    .iter()
                    .map(|item| render_with.render(item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Some(Value::Array(items)))
            }),
            decode: Box::new(move |raw: &Value| -> Result<Assignment<T>, HalError> {
                let items = match raw {
                    Value::Null => return Ok(Box::new(|_: &mut T| {}) as Assignment<T>),
                    Value::Array(items) => items
                        .iter()
                        .map(|item| representer.parse(item))
                        .collect::<Result<Vec<_>, _>>()?,
                    Value::Object(_) => vec![representer.parse(raw)?],
                    other => {
                        return Err(DocumentError::NotAnObject {
                            context: context.clone(),
                            found: json_kind(other),
                        }
                        .into())
                    }
                };
                let set = Arc::clone(&set);
                Ok(Box::new(move |instance: &mut T| set(instance, items)) as Assignment<T>)
            }),
        }
    }
}

impl<T> NestedProperty<T> {
    /// Moves the property under `_embedded`.
    #[must_use]
    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_embedded(&self) -> bool {
        self.embedded
    }
}

impl<T> fmt::Debug for NestedProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NestedProperty")
            .field("name", &self.name)
            .field("embedded", &self.embedded)
            .finish()
    }
}

/// Writes every nested property of `instance` into `root`, diverting embedded
/// ones into the embedded block.
pub(crate) fn compile<T>(
    properties: &[NestedProperty<T>],
    instance: &T,
    root: &mut Map<String, Value>,
    embedded_key: &str,
) -> Result<(), HalError> {
    let mut embedded = Map::new();
    for property in properties {
        let rendered = (property.render)(instance)?;
        if property.embedded {
            root.shift_remove(&property.name);
            if let Some(value) = rendered {
                embedded.insert(property.name.clone(), value);
            }
        } else if let Some(value) = rendered {
            root.insert(property.name.clone(), value);
        }
    }
    if !embedded.is_empty() {
        root.insert(embedded_key.to_string(), Value::Object(embedded));
    }
    Ok(())
}

/// Takes every nested property out of `root` and decodes it.
///
/// Nothing is written to an instance here; the returned assignments are applied
/// once the whole document has decoded.
pub(crate) fn uncompile<T>(
    properties: &[NestedProperty<T>],
    root: &mut Map<String, Value>,
    options: &HalOptions,
) -> Result<Vec<Assignment<T>>, HalError> {
    let mut embedded = match root.shift_remove(&options.embedded_key) {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(DocumentError::NotAnObject {
                context: format!("`{}`", options.embedded_key),
                found: json_kind(&other),
            }
            .into())
        }
    };

    check_unknown(properties, &embedded, options.unknown_embedded)?;

    let mut assignments = Vec::new();
    for property in properties {
        let at_root = root.shift_remove(&property.name);
        let raw = if property.embedded {
            embedded.shift_remove(&property.name)
        } else {
            at_root
        };
        if let Some(raw) = raw {
            trace!("decoding nested property `{}`", property.name);
            assignments.push((property.decode)(&raw)?);
        }
    }
    Ok(assignments)
}

fn check_unknown<T>(
    properties: &[NestedProperty<T>],
    embedded: &Map<String, Value>,
    policy: UnknownEmbeddedPolicy,
) -> Result<(), UnknownEmbeddedPropertyError> {
    let unknown = embedded
        .keys()
        .filter(|key| !properties.iter().any(|p| p.embedded && p.name == **key));
    for key in unknown {
        match policy {
            UnknownEmbeddedPolicy::Ignore => {}
            UnknownEmbeddedPolicy::Warn => warn!("ignoring undeclared embedded property `{key}`"),
            UnknownEmbeddedPolicy::Reject => {
                return Err(UnknownEmbeddedPropertyError {
                    property: key.clone(),
                })
            }
        }
    }
    Ok(())
}
