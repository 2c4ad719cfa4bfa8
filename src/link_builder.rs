use crate::definition::{Href, LinkDefinition, LinkTarget};
use crate::error::ConfigurationError;
use crate::link::{Hyperlink, LinkList, LinkValue};

/// Evaluates `definition` against `instance`.
///
/// Returns `Ok(None)` when a singular producer yields no link. A producer whose
/// shape disagrees with the declaration is a configuration error.
pub fn build<T>(
    definition: &LinkDefinition<T>,
    instance: &T,
) -> Result<Option<LinkValue>, ConfigurationError> {
    let rel = definition.rel();
    match (definition.is_array_valued(), definition.produce(instance)) {
        (false, LinkTarget::Single(href)) => Ok(Some(LinkValue::Single(to_hyperlink(rel, href)))),
        (false, LinkTarget::None) => Ok(None),
        (true, LinkTarget::Array(hrefs)) => {
            let mut list = LinkList::new(rel);
            for href in hrefs {
                list.push(to_hyperlink(rel, href));
            }
            Ok(Some(LinkValue::List(list)))
        }
        (true, LinkTarget::None) => Ok(Some(LinkValue::List(LinkList::new(rel)))),
        (array_valued, produced) => Err(ConfigurationError::ShapeMismatch {
            rel: rel.to_string(),
            declared: if array_valued { "array valued" } else { "singular" },
            produced: produced.shape(),
        }),
    }
}

fn to_hyperlink(rel: &str, href: Href) -> Hyperlink {
    Hyperlink {
        rel: rel.to_string(),
        href: href.href,
        attrs: href.attrs,
    }
}
