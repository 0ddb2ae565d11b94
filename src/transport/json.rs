use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Serialize a request body with every `null` object member removed.
///
/// The API treats an explicit `null` differently from an absent member, so
/// unset optional fields and `Unspecified` enum values are never sent.
pub fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<String, serde_json::Error> {
    let mut value = serde_json::to_value(body)?;
    strip_nulls(&mut value);
    serde_json::to_string(&value)
}

fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, member| !member.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}

/// `deserialize_with` helper mapping an explicit `null` to `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
