//! Render domain objects as HAL JSON documents and parse them back.
//!
//! ```
//! use hal_core::Representer;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Order {
//!     id: u32,
//! }
//!
//! let orders = Representer::<Order>::serde()
//!     .link("self", |o: &Order| format!("http://orders/{}", o.id))
//!     .build()
//!     .unwrap();
//!
//! let json = orders.to_json(&Order { id: 1 }).unwrap();
//! assert_eq!(json, r#"{"id":1,"_links":{"self":{"href":"http://orders/1"}}}"#);
//! ```

pub mod api;
pub mod codec;
pub mod config;
pub mod definition;
pub mod embedded;
pub mod error;
pub mod link;
pub mod link_builder;
pub mod serialization;
pub mod utils;

pub use api::{Representer, RepresenterBuilder};
pub use config::{HalOptions, UnknownEmbeddedPolicy};
pub use definition::{Href, LinkDefinition, LinkRegistry, LinkTarget};
pub use embedded::NestedProperty;
pub use error::HalError;
pub use link::{Hyperlink, LinkCollection, LinkList, LinkValue};
pub use serialization::{FnProperties, PropertyCodec, SerdeProperties};
