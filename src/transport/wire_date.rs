//! Optional timestamps on the wire.
//!
//! Use with `#[serde(default, with = "crate::transport::wire_date")]` on an
//! `Option<DateTime<Utc>>`. Unparseable or non-string tokens decode to `None`.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserializer, Serializer};

pub fn serialize<S: Serializer>(
    value: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => serializer.serialize_str(&format_datetime(value)),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    deserializer.deserialize_any(DateVisitor)
}

/// Wire form of a timestamp: RFC 3339 in UTC with whole seconds.
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse the formats the API emits; `None` for anything else.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|parsed| parsed.and_utc())
}

struct DateVisitor;

impl<'de> Visitor<'de> for DateVisitor {
    type Value = Option<DateTime<Utc>>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a date string")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        let parsed = parse_datetime(value);
        if parsed.is_none() && !value.trim().is_empty() {
            tracing::debug!(value, "unparseable date on the wire");
        }
        Ok(parsed)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(None)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    struct Holder {
        #[serde(default, with = "crate::transport::wire_date")]
        at: Option<DateTime<Utc>>,
    }

    fn decode(raw: serde_json::Value) -> Option<DateTime<Utc>> {
        serde_json::from_value::<Holder>(raw).unwrap().at
    }

    #[test]
    fn parses_supported_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap();
        assert_eq!(decode(json!({ "at": "2024-03-15T10:30:00Z" })), Some(expected));
        assert_eq!(decode(json!({ "at": "2024-03-15T12:30:00+02:00" })), Some(expected));
        assert_eq!(decode(json!({ "at": "2024-03-15T10:30:00" })), Some(expected));
        assert_eq!(decode(json!({ "at": "2024-03-15T10:30:00.000" })), Some(expected));
        assert_eq!(
            decode(json!({ "at": "2024-03-15" })),
            Some(Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn bad_or_missing_dates_decode_to_none() {
        assert_eq!(decode(json!({ "at": "not a date" })), None);
        assert_eq!(decode(json!({ "at": "" })), None);
        assert_eq!(decode(json!({ "at": null })), None);
        assert_eq!(decode(json!({ "at": 1_700_000_000 })), None);
        assert_eq!(decode(json!({ "at": ["2024-03-15"] })), None);
        assert_eq!(decode(json!({})), None);
    }

    #[test]
    fn encodes_rfc3339_or_null() {
        let at = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap();
        let holder = Holder { at: Some(at) };
        assert_eq!(
            serde_json::to_value(&holder).unwrap(),
            json!({ "at": "2024-03-15T10:30:00Z" })
        );
        assert_eq!(
            serde_json::to_value(Holder { at: None }).unwrap(),
            json!({ "at": null })
        );
    }
}
