//! Decoding of flattened variant payloads
//!
//! Serde decodes a flattened `Option<Enum>` leniently: any error inside the
//! payload turns into `None`. Entity variant fields go through [`deserialize`]
//! instead, so a payload key that is present must decode or the whole entity
//! fails.

use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

/// Externally tagged enum and the wire keys of its variants
pub(crate) trait VariantKeys {
    const KEYS: &'static [&'static str];
}

/// Decode the variant payload among the entity's remaining keys
///
/// No variant key (or only `null` payloads) yields `None`. Two variant keys
/// at once is an error, as is a payload that does not fit its variant.
pub(crate) fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + VariantKeys,
{
    let rest = Map::<String, JsonValue>::deserialize(deserializer)?;
    let mut present = rest
        .into_iter()
        .filter(|(key, payload)| T::KEYS.contains(&key.as_str()) && !payload.is_null());

    let Some((key, payload)) = present.next() else {
        return Ok(None);
    };
    if let Some((other, _)) = present.next() {
        return Err(D::Error::custom(format_args!(
            "expected a single variant, found both `{key}` and `{other}`"
        )));
    }

    let tagged = JsonValue::Object(Map::from_iter([(key, payload)]));
    T::deserialize(tagged).map(Some).map_err(D::Error::custom)
}
