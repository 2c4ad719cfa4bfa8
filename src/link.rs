//! The in-memory hyperlink model.
//!
//! A [`Hyperlink`] always knows its relation name even though the wire format
//! never stores it inside the link object: the enclosing `_links` key carries
//! it. Relations that hold several links share one [`LinkList`], and a
//! [`LinkCollection`] maps each relation to either shape through the tagged
//! [`LinkValue`].

use serde_json::{Map, Value};

/// A single hyperlink: relation, target and extra scalar attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Hyperlink {
    pub rel: String,
    pub href: String,
    pub attrs: Map<String, Value>,
}

impl Hyperlink {
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Hyperlink {
            rel: rel.into(),
            href: href.into(),
            attrs: Map::new(),
        }
    }

    /// Adds an attribute such as `title` or `templated`.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name)
    }
}

/// An ordered list of hyperlinks sharing one relation.
///
/// The relation is stored on the list itself, so an empty list still has one.
/// Every link inside the list carries the same `rel` as the list.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkList {
    rel: String,
    links: Vec<Hyperlink>,
}

impl LinkList {
    pub fn new(rel: impl Into<String>) -> Self {
        LinkList {
            rel: rel.into(),
            links: Vec::new(),
        }
    }

    /// Builds a list from existing links, restamping each with `rel`.
    pub fn from_links(rel: impl Into<String>, links: Vec<Hyperlink>) -> Self {
        let mut list = LinkList { rel: rel.into(), links };
        let rel = list.rel.clone();
        list.set_rel(rel);
        list
    }

    pub fn rel(&self) -> &str {
        &self.rel
    }

    /// Renames the relation of the list and of every link in it.
    pub fn set_rel(&mut self, rel: impl Into<String>) {
        self.rel = rel.into();
        for link in &mut self.links {
            link.rel.clone_from(&self.rel);
        }
    }

    pub fn push(&mut self, mut link: Hyperlink) {
        link.rel.clone_from(&self.rel);
        self.links.push(link);
    }

    pub fn links(&self) -> &[Hyperlink] {
        &self.links
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hyperlink> {
        self.links.iter()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn hrefs(&self) -> Vec<&str> {
        self.links.iter().map(|l| l.href.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a LinkList {
    type Item = &'a Hyperlink;
    type IntoIter = std::slice::Iter<'a, Hyperlink>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}

impl IntoIterator for LinkList {
    type Item = Hyperlink;
    type IntoIter = std::vec::IntoIter<Hyperlink>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.into_iter()
    }
}

/// What a relation maps to: one link or an ordered list of links.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkValue {
    Single(Hyperlink),
    List(LinkList),
}

impl LinkValue {
    pub fn rel(&self) -> &str {
        match self {
            LinkValue::Single(link) => &link.rel,
            LinkValue::List(list) => list.rel(),
        }
    }

    pub fn set_rel(&mut self, rel: impl Into<String>) {
        match self {
            LinkValue::Single(link) => link.rel = rel.into(),
            LinkValue::List(list) => list.set_rel(rel),
        }
    }

    pub fn as_single(&self) -> Option<&Hyperlink> {
        match self {
            LinkValue::Single(link) => Some(link),
            LinkValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&LinkList> {
        match self {
            LinkValue::List(list) => Some(list),
            LinkValue::Single(_) => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, LinkValue::List(_))
    }
}

impl From<Hyperlink> for LinkValue {
    fn from(link: Hyperlink) -> Self {
        LinkValue::Single(link)
    }
}

impl From<LinkList> for LinkValue {
    fn from(list: LinkList) -> Self {
        LinkValue::List(list)
    }
}

/// Relation name to link value, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkCollection {
    entries: Vec<(String, LinkValue)>,
}

impl LinkCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `rel`. An existing entry keeps its position and is
    /// replaced; the previous value is returned.
    pub fn insert(&mut self, rel: impl Into<String>, value: impl Into<LinkValue>) -> Option<LinkValue> {
        let rel = rel.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == rel) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((rel, value));
                None
            }
        }
    }

    /// Looks up a relation. An absent relation is `None`, not an error.
    pub fn get(&self, rel: &str) -> Option<&LinkValue> {
        self.entries.iter().find(|(k, _)| k == rel).map(|(_, v)| v)
    }

    /// The singular link stored under `rel`, if that is its shape.
    pub fn link(&self, rel: &str) -> Option<&Hyperlink> {
        self.get(rel).and_then(LinkValue::as_single)
    }

    /// The link list stored under `rel`, if that is its shape.
    pub fn list(&self, rel: &str) -> Option<&LinkList> {
        self.get(rel).and_then(LinkValue::as_list)
    }

    pub fn contains(&self, rel: &str) -> bool {
        self.get(rel).is_some()
    }

    pub fn rels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LinkValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for LinkCollection {
    type Item = (String, LinkValue);
    type IntoIter = std::vec::IntoIter<(String, LinkValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
