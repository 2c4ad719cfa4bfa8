//! Link definitions recorded when a representer is declared.

use crate::error::ConfigurationError;
use crate::link::LinkValue;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;

type Producer<T> = Box<dyn Fn(&T) -> LinkTarget + Send + Sync>;
type Binding<T> = Box<dyn Fn(&mut T, &LinkValue) + Send + Sync>;

/// A link target as a producer returns it: an href and its attributes, no relation.
#[derive(Debug, Clone, PartialEq)]
pub struct Href {
    pub href: String,
    pub attrs: Map<String, Value>,
}

impl Href {
    pub fn new(href: impl Into<String>) -> Self {
        Href {
            href: href.into(),
            attrs: Map::new(),
        }
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }
}

impl From<String> for Href {
    fn from(href: String) -> Self {
        Href::new(href)
    }
}

impl From<&str> for Href {
    fn from(href: &str) -> Self {
        Href::new(href)
    }
}

/// The shape a producer hands back for one instance.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkTarget {
    /// No link for this instance; the relation is left out of the output.
    None,
    Single(Href),
    Array(Vec<Href>),
}

impl LinkTarget {
    pub(crate) fn shape(&self) -> &'static str {
        match self {
            LinkTarget::None => "nothing",
            LinkTarget::Single(_) => "a single href",
            LinkTarget::Array(_) => "a list of hrefs",
        }
    }
}

impl From<Href> for LinkTarget {
    fn from(href: Href) -> Self {
        LinkTarget::Single(href)
    }
}

impl From<String> for LinkTarget {
    fn from(href: String) -> Self {
        LinkTarget::Single(href.into())
    }
}

impl From<&str> for LinkTarget {
    fn from(href: &str) -> Self {
        LinkTarget::Single(href.into())
    }
}

impl<H: Into<Href>> From<Option<H>> for LinkTarget {
    fn from(href: Option<H>) -> Self {
        href.map_or(LinkTarget::None, |h| LinkTarget::Single(h.into()))
    }
}

impl<H: Into<Href>> From<Vec<H>> for LinkTarget {
    fn from(hrefs: Vec<H>) -> Self {
        LinkTarget::Array(hrefs.into_iter().map(Into::into).collect())
    }
}

/// One declared relation of a representer.
pub struct LinkDefinition<T> {
    rel: String,
    array_valued: bool,
    producer: Producer<T>,
    binding: Option<Binding<T>>,
}

impl<T: 'static> LinkDefinition<T> {
    pub fn new<F, R>(rel: impl Into<String>, array_valued: bool, producer: F) -> Self
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
        R: Into<LinkTarget> + 'static,
    {
        LinkDefinition {
            rel: rel.into(),
            array_valued,
            producer: Box::new(move |instance: &T| producer(instance).into()),
            binding: None,
        }
    }

    /// A relation producing one href per instance.
    pub fn single<F, R>(rel: impl Into<String>, producer: F) -> Self
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
        R: Into<LinkTarget> + 'static,
    {
        Self::new(rel, false, producer)
    }

    /// A relation producing an ordered list of hrefs per instance.
    pub fn array<F, R>(rel: impl Into<String>, producer: F) -> Self
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
        R: Into<LinkTarget> + 'static,
    {
        Self::new(rel, true, producer)
    }

    /// Binds the parsed value of this relation back onto the instance.
    #[must_use]
    pub fn bind<F>(mut self, binding: F) -> Self
    where
        F: Fn(&mut T, &LinkValue) + Send + Sync + 'static,
    {
        self.binding = Some(Box::new(binding));
        self
    }
}

impl<T> LinkDefinition<T> {
    pub fn rel(&self) -> &str {
        &self.rel
    }

    pub fn is_array_valued(&self) -> bool {
        self.array_valued
    }

    pub(crate) fn produce(&self, instance: &T) -> LinkTarget {
        (self.producer)(instance)
    }

    pub(crate) fn assign(&self, instance: &mut T, value: &LinkValue) {
        if let Some(binding) = &self.binding {
            binding(instance, value);
        }
    }
}

impl<T> fmt::Debug for LinkDefinition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkDefinition")
            .field("rel", &self.rel)
            .field("array_valued", &self.array_valued)
            .field("bound", &self.binding.is_some())
            .finish()
    }
}

/// The link definitions of one representer, in declaration order.
///
/// The registry is filled while the representer is declared and frozen by
/// [`LinkRegistry::freeze`]; after that it is only ever read.
pub struct LinkRegistry<T> {
    definitions: Vec<LinkDefinition<T>>,
    array_rels: BTreeSet<String>,
    single_rels: BTreeSet<String>,
}

impl<T> Default for LinkRegistry<T> {
    fn default() -> Self {
        LinkRegistry {
            definitions: Vec::new(),
            array_rels: BTreeSet::new(),
            single_rels: BTreeSet::new(),
        }
    }
}

impl<T> LinkRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, definition: LinkDefinition<T>) {
        self.definitions.push(definition);
    }

    /// Checks for duplicate relations and computes the relation shape sets.
    pub(crate) fn freeze(&mut self) -> Result<(), ConfigurationError> {
        let mut seen = BTreeSet::new();
        for definition in &self.definitions {
            if !seen.insert(definition.rel.as_str()) {
                return Err(ConfigurationError::DuplicateRelation {
                    rel: definition.rel.clone(),
                });
            }
        }
        let (arrays, singles): (Vec<_>, Vec<_>) =
            self.definitions.iter().partition(|d| d.array_valued);
        self.array_rels = arrays.into_iter().map(|d| d.rel.clone()).collect();
        self.single_rels = singles.into_iter().map(|d| d.rel.clone()).collect();
        Ok(())
    }

    pub fn definitions(&self) -> &[LinkDefinition<T>] {
        &self.definitions
    }

    pub fn get(&self, rel: &str) -> Option<&LinkDefinition<T>> {
        self.definitions.iter().find(|d| d.rel == rel)
    }

    /// Relations declared array valued. Only meaningful once frozen.
    pub fn array_rels(&self) -> &BTreeSet<String> {
        &self.array_rels
    }

    /// Relations declared singular. Only meaningful once frozen.
    pub fn single_rels(&self) -> &BTreeSet<String> {
        &self.single_rels
    }
}

impl<T> fmt::Debug for LinkRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkRegistry")
            .field("definitions", &self.definitions)
            .field("array_rels", &self.array_rels)
            .field("single_rels", &self.single_rels)
            .finish()
    }
}
