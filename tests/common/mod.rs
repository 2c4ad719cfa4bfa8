#![allow(dead_code)]

use hal_core::{Href, LinkCollection, LinkDefinition, LinkValue, NestedProperty, Representer};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u32,
    #[serde(skip)]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: u32,
    pub title: String,
    #[serde(skip)]
    pub tags: Vec<String>,
    #[serde(skip)]
    pub next: Option<String>,
    #[serde(skip)]
    pub tracks: Vec<Item>,
    #[serde(skip)]
    pub artist: Option<Artist>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Song {
    pub id: u32,
    #[serde(skip)]
    pub tag_names: Vec<String>,
    #[serde(skip)]
    pub links: LinkCollection,
}

pub fn item_representer() -> Arc<Representer<Item>> {
    static REPRESENTER: OnceLock<Arc<Representer<Item>>> = OnceLock::new();
    REPRESENTER
        .get_or_init(|| {
            Arc::new(
                Representer::<Item>::serde()
                    .link("self", |item: &Item| format!("http://items/{}", item.value))
                    .build()
                    .expect("item representer"),
            )
        })
        .clone()
}

pub fn order_representer() -> &'static Representer<Order> {
    static REPRESENTER: OnceLock<Representer<Order>> = OnceLock::new();
    REPRESENTER.get_or_init(|| {
        Representer::<Order>::serde()
            .nested(
                NestedProperty::collection(
                    "items",
                    item_representer(),
                    |order: &Order| order.items.as_slice(),
                    |order: &mut Order, items| order.items = items,
                )
                .embedded(),
            )
            .link("self", |order: &Order| format!("http://orders/{}", order.id))
            .build()
            .expect("order representer")
    })
}

pub fn artist_representer() -> Arc<Representer<Artist>> {
    Arc::new(
        Representer::<Artist>::serde()
            .link("self", |artist: &Artist| format!("http://artists/{}", artist.name))
            .build()
            .expect("artist representer"),
    )
}

/// Album exercises every shape: a singular link, an optional link, an array
/// link, an embedded collection and a nested resource kept at the root.
pub fn album_representer() -> &'static Representer<Album> {
    static REPRESENTER: OnceLock<Representer<Album>> = OnceLock::new();
    REPRESENTER.get_or_init(|| {
        Representer::<Album>::serde()
            .nested(NestedProperty::resource(
                "artist",
                artist_representer(),
                |album: &Album| album.artist.as_ref(),
                |album: &mut Album, artist| album.artist = Some(artist),
            ))
            .nested(
                NestedProperty::collection(
                    "tracks",
                    item_representer(),
                    |album: &Album| album.tracks.as_slice(),
                    |album: &mut Album, tracks| album.tracks = tracks,
                )
                .embedded(),
            )
            .link("self", |album: &Album| format!("http://albums/{}", album.id))
            .define(
                LinkDefinition::single("next", |album: &Album| album.next.clone()).bind(
                    |album: &mut Album, value: &LinkValue| {
                        album.next = value.as_single().map(|link| link.href.clone());
                    },
                ),
            )
            .define(
                LinkDefinition::array("tags", |album: &Album| {
                    album
                        .tags
                        .iter()
                        .map(|tag| Href::new(tag.as_str()))
                        .collect::<Vec<_>>()
                })
                .bind(|album: &mut Album, value: &LinkValue| {
                    if let Some(list) = value.as_list() {
                        album.tags = list.iter().map(|link| link.href.clone()).collect();
                    }
                }),
            )
            .build()
            .expect("album representer")
    })
}

pub fn song_representer() -> &'static Representer<Song> {
    static REPRESENTER: OnceLock<Representer<Song>> = OnceLock::new();
    REPRESENTER.get_or_init(|| {
        Representer::<Song>::serde()
            .link("self", |song: &Song| format!("http://x/{}", song.id))
            .links("tags", |song: &Song| {
                song.tag_names
                    .iter()
                    .map(|name| format!("http://t/{name}"))
                    .collect::<Vec<_>>()
            })
            .bind_links(|song: &mut Song, links| song.links = links)
            .build()
            .expect("song representer")
    })
}

pub fn album(tags: &[&str]) -> Album {
    Album {
        id: 3,
        title: "Synchronicity".into(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        next: Some("http://albums/4".into()),
        tracks: vec![
            Item {
                value: "Roxanne".into(),
            },
            Item {
                value: "Message".into(),
            },
        ],
        artist: Some(Artist {
            name: "Police".into(),
        }),
    }
}
