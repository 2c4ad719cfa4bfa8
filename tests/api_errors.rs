// Error paths of the public API: every failure is a returned error, never a
// partially built instance.

mod common;

use common::{order_representer, song_representer, Item, Order};
use hal_core::error::{
    ConfigurationError, DocumentError, HalError, MalformedLinkError, PropertyError,
};
use hal_core::{HalOptions, LinkDefinition, NestedProperty, Representer};
use miette::Report;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[test]
fn test_from_json_invalid_syntax() {
    let result = order_representer().from_json("{ invalid");
    if let Err(HalError::Document(DocumentError::Json(_))) = result {
        // Success
    } else {
        panic!("Expected JSON document error");
    }
}

#[test]
fn test_parse_missing_required_property() {
    let result = order_representer().parse(&json!({"_links": {"self": {"href": "http://orders/1"}}}));
    assert!(matches!(result, Err(HalError::Property(PropertyError::Serde(_)))));
}

#[test]
fn test_links_block_not_an_object() {
    let result = order_representer().parse(&json!({"id": 1, "_links": "http://orders/1"}));
    assert!(matches!(
        result,
        Err(HalError::MalformedLink(MalformedLinkError::NotAnObject { found: "a string" }))
    ));
}

#[test]
fn test_non_string_href() {
    let result = song_representer().parse_links(&json!({"_links": {"self": {"href": 42}}}));
    assert!(matches!(
        result,
        Err(HalError::MalformedLink(MalformedLinkError::InvalidHref { found: "a number", .. }))
    ));
}

#[test]
fn test_array_relation_with_scalar_element() {
    let result = song_representer().parse_links(&json!({"_links": {"tags": ["http://t/a"]}}));
    assert!(matches!(
        result,
        Err(HalError::MalformedLink(MalformedLinkError::InvalidShape { .. }))
    ));
}

#[test]
fn test_error_in_embedded_item_discards_whole_document() {
    // The second item is broken; the first must not leak out anywhere.
    let document = json!({
        "id": 1,
        "_embedded": {"items": [{"value": "Beer"}, {"value": 12}]},
        "_links": {"self": {"href": "http://orders/1"}}
    });
    let result: Result<Order, _> = order_representer().parse(&document);
    assert!(result.is_err());
}

#[test]
fn test_duplicate_relation_rejected_at_build() {
    #[derive(Serialize, Deserialize)]
    struct Thing {
        id: u8,
    }

    let result = Representer::<Thing>::serde()
        .link("self", |_: &Thing| "http://a")
        .define(LinkDefinition::array("self", |_: &Thing| vec!["http://b"]))
        .build();
    assert!(matches!(
        result,
        Err(ConfigurationError::DuplicateRelation { ref rel }) if rel == "self"
    ));
}

#[test]
fn test_duplicate_nested_property_rejected_at_build() {
    let result = Representer::<Order>::serde()
        .nested(NestedProperty::collection(
            "items",
            common::item_representer(),
            |o: &Order| o.items.as_slice(),
            |o: &mut Order, items: Vec<Item>| o.items = items,
        ))
        .nested(
            NestedProperty::collection(
                "items",
                common::item_representer(),
                |o: &Order| o.items.as_slice(),
                |o: &mut Order, items: Vec<Item>| o.items = items,
            )
            .embedded(),
        )
        .build();
    assert!(matches!(result, Err(ConfigurationError::DuplicateProperty { .. })));
}

#[test]
fn test_reserved_key_follows_options() {
    let result = Representer::<Order>::serde()
        .nested(NestedProperty::collection(
            "links",
            common::item_representer(),
            |o: &Order| o.items.as_slice(),
            |o: &mut Order, items: Vec<Item>| o.items = items,
        ))
        .options(HalOptions::links_only())
        .build();
    assert!(matches!(result, Err(ConfigurationError::ReservedKey { .. })));
}

#[test]
fn test_equal_links_and_embedded_keys_rejected() {
    let options = HalOptions::from_yaml_str("embedded_key: _links\n").unwrap();
    let result = Representer::<Order>::serde()
        .nested(
            NestedProperty::collection(
                "items",
                common::item_representer(),
                |o: &Order| o.items.as_slice(),
                |o: &mut Order, items: Vec<Item>| o.items = items,
            )
            .embedded(),
        )
        .link("self", |o: &Order| format!("http://orders/{}", o.id))
        .options(options)
        .build();
    assert!(matches!(
        result,
        Err(ConfigurationError::ConflictingKeys { ref key }) if key == "_links"
    ));
}

#[test]
fn test_empty_key_rejected() {
    let options = HalOptions::from_json_str(r#"{"links_key": ""}"#).unwrap();
    let result = Representer::<Order>::serde().options(options).build();
    assert!(matches!(
        result,
        Err(ConfigurationError::EmptyKey { option: "links_key" })
    ));
}

#[test]
fn test_plain_property_under_links_key_fails_render() {
    #[derive(Serialize, Deserialize)]
    struct Bookmark {
        links: Vec<String>,
    }

    let bookmarks = Representer::<Bookmark>::serde()
        .link("self", |_: &Bookmark| "http://bookmarks/1")
        .options(HalOptions::links_only())
        .build()
        .unwrap();
    let result = bookmarks.render(&Bookmark {
        links: vec!["http://a".into()],
    });
    assert!(matches!(
        result,
        Err(HalError::Configuration(ConfigurationError::ReservedKey { ref name })) if name == "links"
    ));
}

#[test]
fn test_scalar_collection_names_the_property() {
    let err = order_representer()
        .parse(&json!({"id": 1, "_embedded": {"items": 5}}))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Expected nested property `items` to be an object, found a number"
    );
}

#[test]
fn test_property_codec_must_produce_object() {
    let numbers = Representer::<u32>::serde().build().unwrap();
    assert!(matches!(
        numbers.render(&7),
        Err(HalError::Property(PropertyError::NotAnObject { found: "a number" }))
    ));
}

#[test]
fn test_error_display_and_diagnostics() {
    let err = song_representer()
        .parse_links(&json!({"_links": {"self": {}}}))
        .unwrap_err();
    let message = format!("{err}");
    assert_eq!(message, "Link `self` has no `href`");

    let report = format!("{:?}", Report::new(err));
    assert!(report.contains("link::missing_href"));
}
