use crate::error::PropertyError;
use crate::utils::json_kind;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::marker::PhantomData;

/// Maps the plain properties of a resource to and from a JSON object.
///
/// Links and nested resources are handled by the representer; a codec only
/// ever sees root-level data.
pub trait PropertyCodec<T>: Send + Sync {
    fn encode(&self, instance: &T) -> Result<Map<String, Value>, PropertyError>;
    fn decode(&self, object: Map<String, Value>) -> Result<T, PropertyError>;
}

/// The default codec: whatever `serde` makes of the type.
///
/// Fields holding links or nested resources should be `#[serde(skip)]` (and
/// therefore `Default`), the representer fills them in after decoding.
pub struct SerdeProperties<T>(PhantomData<fn() -> T>);

impl<T> SerdeProperties<T> {
    pub fn new() -> Self {
        SerdeProperties(PhantomData)
    }
}

impl<T> Default for SerdeProperties<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PropertyCodec<T> for SerdeProperties<T>
where
    T: Serialize + DeserializeOwned,
{
    fn encode(&self, instance: &T) -> Result<Map<String, Value>, PropertyError> {
        match serde_json::to_value(instance)? {
            Value::Object(map) => Ok(map),
            other => Err(PropertyError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }

    fn decode(&self, object: Map<String, Value>) -> Result<T, PropertyError> {
        Ok(serde_json::from_value(Value::Object(object))?)
    }
}

/// A codec built from two closures, for types that do not implement serde.
pub struct FnProperties<E, D> {
    encode: E,
    decode: D,
}

impl<E, D> FnProperties<E, D> {
    pub fn new(encode: E, decode: D) -> Self {
        FnProperties { encode, decode }
    }
}

impl<T, E, D> PropertyCodec<T> for FnProperties<E, D>
where
    E: Fn(&T) -> Result<Map<String, Value>, PropertyError> + Send + Sync,
    D: Fn(Map<String, Value>) -> Result<T, PropertyError> + Send + Sync,
{
    fn encode(&self, instance: &T) -> Result<Map<String, Value>, PropertyError> {
        (self.encode)(instance)
    }

    fn decode(&self, object: Map<String, Value>) -> Result<T, PropertyError> {
        (self.decode)(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Order {
        id: u32,
        #[serde(skip)]
        note: String,
    }

    #[test]
    fn test_serde_round_trip() {
        let codec = SerdeProperties::<Order>::new();
        let order = Order {
            id: 1,
            note: "skipped".into(),
        };
        let encoded = codec.encode(&order).unwrap();
        assert_eq!(Value::Object(encoded.clone()), json!({"id": 1}));

        let decoded = codec.decode(encoded).unwrap();
        assert_eq!(decoded, Order { id: 1, note: String::new() });
    }

    #[test]
    fn test_serde_rejects_non_object() {
        let codec = SerdeProperties::<Vec<u8>>::new();
        assert!(matches!(
            codec.encode(&vec![1, 2]),
            Err(PropertyError::NotAnObject { found: "an array" })
        ));
    }

    #[test]
    fn test_fn_properties() {
        let codec = FnProperties::new(
            |n: &u64| -> Result<Map<String, Value>, PropertyError> {
                let mut map = Map::new();
                map.insert("count".into(), json!(n));
                Ok(map)
            },
            |map: Map<String, Value>| -> Result<u64, PropertyError> {
                map.get("count")
                    .and_then(Value::as_u64)
                    .ok_or_else(|| PropertyError::Custom("missing count".into()))
            },
        );
        let map = PropertyCodec::<u64>::encode(&codec, &3).unwrap();
        assert_eq!(PropertyCodec::<u64>::decode(&codec, map).unwrap(), 3);
    }
}
