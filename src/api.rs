use crate::codec;
use crate::config::HalOptions;
use crate::definition::{LinkDefinition, LinkRegistry, LinkTarget};
use crate::embedded::{self, NestedProperty};
use crate::error::{ConfigurationError, DocumentError, HalError};
use crate::link::LinkCollection;
use crate::serialization::{PropertyCodec, SerdeProperties};
use crate::utils::json_kind;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;

type LinksBinding<T> = Box<dyn Fn(&mut T, LinkCollection) + Send + Sync>;

/// Renders and parses HAL documents for one resource type.
///
/// A representer is declared once through [`RepresenterBuilder`] and is
/// immutable afterwards; it is `Send + Sync`, so a single instance (usually kept
/// in a `static`) can serve any number of threads.
///
/// Rendering runs three stages in order: the property codec writes the plain
/// properties, nested resources are added at the root or under `_embedded`,
/// and the declared links are written under `_links`. Parsing runs them in
/// reverse and only hands back an instance once every stage has succeeded.
pub struct Representer<T> {
    properties: Box<dyn PropertyCodec<T>>,
    links: LinkRegistry<T>,
    nested: Vec<NestedProperty<T>>,
    links_binding: Option<LinksBinding<T>>,
    options: HalOptions,
}

impl<T: 'static> Representer<T> {
    /// Starts declaring a representer whose plain properties go through `properties`.
    pub fn builder(properties: impl PropertyCodec<T> + 'static) -> RepresenterBuilder<T> {
        RepresenterBuilder {
            properties: Box::new(properties),
            links: LinkRegistry::new(),
            nested: Vec::new(),
            links_binding: None,
            options: HalOptions::default(),
        }
    }
}

impl<T> Representer<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    /// Starts declaring a representer for a serde type.
    pub fn serde() -> RepresenterBuilder<T> {
        Self::builder(SerdeProperties::new())
    }
}

impl<T> Representer<T> {
    /// Renders `instance` as a HAL document.
    ///
    /// # Errors
    /// Returns a `HalError` if the property codec fails or writes a plain
    /// property under the links or embedded key, if a nested resource fails to
    /// render, or if a link producer returns the wrong shape.
    pub fn render(&self, instance: &T) -> Result<Value, HalError> {
        let mut root = self.properties.encode(instance)?;
        for key in [&self.options.links_key, &self.options.embedded_key] {
            if root.contains_key(key) {
                return Err(ConfigurationError::ReservedKey { name: key.clone() }.into());
            }
        }

        embedded::compile(&self.nested, instance, &mut root, &self.options.embedded_key)?;

        let links = self.render_links(instance)?;
        debug!("rendered {} link relations", links.len());
        if !links.is_empty() {
            root.insert(self.options.links_key.clone(), codec::to_value(&links));
        }
        Ok(Value::Object(root))
    }

    /// Builds the links of `instance` without rendering the rest of the document.
    ///
    /// # Errors
    /// Returns a `ConfigurationError` if a producer returns the wrong shape.
    pub fn render_links(&self, instance: &T) -> Result<LinkCollection, ConfigurationError> {
        codec::collect(&self.links, instance)
    }

    /// Parses a HAL document into a new instance.
    ///
    /// # Errors
    /// Returns a `HalError` if the document is not an object, a link is
    /// malformed, an embedded property is rejected, or the property codec fails.
    /// On error no instance is produced.
    pub fn parse(&self, document: &Value) -> Result<T, HalError> {
        let mut root = self.root_object(document)?.clone();

        let links = match root.shift_remove(&self.options.links_key) {
            None | Some(Value::Null) => LinkCollection::new(),
            Some(raw) => self.decode_links(&raw)?,
        };
        let assignments = embedded::uncompile(&self.nested, &mut root, &self.options)?;
        let mut instance = self.properties.decode(root)?;
        debug!(
            "parsed resource with {} link relations and {} nested properties",
            links.len(),
            assignments.len()
        );

        for assign in assignments {
            assign(&mut instance);
        }
        for (rel, value) in links.iter() {
            if let Some(definition) = self.links.get(rel) {
                definition.assign(&mut instance, value);
            }
        }
        if let Some(binding) = &self.links_binding {
            binding(&mut instance, links);
        }
        Ok(instance)
    }

    /// Parses only the links block of `document`. A document without links
    /// yields an empty collection.
    ///
    /// # Errors
    /// Returns a `HalError` if the document is not an object or a link is malformed.
    pub fn parse_links(&self, document: &Value) -> Result<LinkCollection, HalError> {
        match self.root_object(document)?.get(&self.options.links_key) {
            None | Some(Value::Null) => Ok(LinkCollection::new()),
            Some(raw) => self.decode_links(raw),
        }
    }

    /// # Errors
    /// Returns a `HalError` if rendering fails.
    pub fn to_json(&self, instance: &T) -> Result<String, HalError> {
        let document = self.render(instance)?;
        Ok(serde_json::to_string(&document).map_err(DocumentError::from)?)
    }

    /// # Errors
    /// Returns a `HalError` if rendering fails.
    pub fn to_json_pretty(&self, instance: &T) -> Result<String, HalError> {
        let document = self.render(instance)?;
        Ok(serde_json::to_string_pretty(&document).map_err(DocumentError::from)?)
    }

    /// # Errors
    /// Returns a `HalError` if `source` is not JSON or parsing fails.
    pub fn from_json(&self, source: &str) -> Result<T, HalError> {
        let document: Value = serde_json::from_str(source).map_err(DocumentError::from)?;
        self.parse(&document)
    }

    pub fn registry(&self) -> &LinkRegistry<T> {
        &self.links
    }

    pub fn array_rels(&self) -> &BTreeSet<String> {
        self.links.array_rels()
    }

    pub fn options(&self) -> &HalOptions {
        &self.options
    }

    fn root_object<'a>(&self, document: &'a Value) -> Result<&'a Map<String, Value>, DocumentError> {
        document.as_object().ok_or_else(|| DocumentError::NotAnObject {
            context: "the document".to_string(),
            found: json_kind(document),
        })
    }

    fn decode_links(&self, raw: &Value) -> Result<LinkCollection, HalError> {
        Ok(codec::from_value(
            raw,
            self.links.array_rels(),
            self.links.single_rels(),
        )?)
    }
}

impl<T> fmt::Debug for Representer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Representer")
            .field("links", &self.links)
            .field("nested", &self.nested)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Declares the schema of a [`Representer`].
pub struct RepresenterBuilder<T> {
    properties: Box<dyn PropertyCodec<T>>,
    links: LinkRegistry<T>,
    nested: Vec<NestedProperty<T>>,
    links_binding: Option<LinksBinding<T>>,
    options: HalOptions,
}

impl<T: 'static> RepresenterBuilder<T> {
    /// Declares a singular relation.
    #[must_use]
    pub fn link<F, R>(self, rel: impl Into<String>, producer: F) -> Self
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
        R: Into<LinkTarget> + 'static,
    {
        self.define(LinkDefinition::single(rel, producer))
    }

    /// Declares an array-valued relation; it always renders as a JSON array.
    #[must_use]
    pub fn links<F, R>(self, rel: impl Into<String>, producer: F) -> Self
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
        R: Into<LinkTarget> + 'static,
    {
        self.define(LinkDefinition::array(rel, producer))
    }

    /// Hands the whole parsed link collection to the instance.
    #[must_use]
    pub fn bind_links<F>(mut self, binding: F) -> Self
    where
        F: Fn(&mut T, LinkCollection) + Send + Sync + 'static,
    {
        self.links_binding = Some(Box::new(binding));
        self
    }
}

impl<T> RepresenterBuilder<T> {
    #[must_use]
    pub fn define(mut self, definition: LinkDefinition<T>) -> Self {
        self.links.define(definition);
        self
    }

    #[must_use]
    pub fn nested(mut self, property: NestedProperty<T>) -> Self {
        self.nested.push(property);
        self
    }

    #[must_use]
    pub fn options(mut self, options: HalOptions) -> Self {
        self.options = options;
        self
    }

    /// Freezes the declaration.
    ///
    /// # Errors
    /// Returns a `ConfigurationError` for duplicate relations or properties, a
    /// nested property named like the links or embedded key, or options whose
    /// links and embedded keys are empty or equal.
    pub fn build(mut self) -> Result<Representer<T>, ConfigurationError> {
        self.options.validate()?;
        self.links.freeze()?;

        let mut names = BTreeSet::new();
        for property in &self.nested {
            let name = property.name();
            if name == self.options.links_key || name == self.options.embedded_key {
                return Err(ConfigurationError::ReservedKey {
                    name: name.to_string(),
                });
            }
            if !names.insert(name) {
                return Err(ConfigurationError::DuplicateProperty {
                    name: name.to_string(),
                });
            }
        }

        debug!(
            "declared representer with {} links ({} array valued) and {} nested properties",
            self.links.definitions().len(),
            self.links.array_rels().len(),
            self.nested.len()
        );

        Ok(Representer {
            properties: self.properties,
            links: self.links,
            nested: self.nested,
            links_binding: self.links_binding,
            options: self.options,
        })
    }
}
