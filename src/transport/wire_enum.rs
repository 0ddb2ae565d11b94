//! Enumerated values ↔ wire strings.
//!
//! Decoding is total: unknown strings, `null`, numbers, booleans and even
//! nested structures decode to the enum's `Unspecified` variant instead of
//! failing the surrounding payload.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use serde::de::{self, DeserializeSeed, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserializer, Serializer};

use crate::transport::lookup::BiLookup;

/// An enumeration with a fixed wire table.
///
/// `Default` is the "no mapping" sentinel and never appears in the table.
pub trait WireEnum: Copy + Eq + Hash + Default + fmt::Debug + 'static {
    /// Type name used in diagnostics.
    const NAME: &'static str;

    /// The wire table for this type, built once on first use.
    fn lookup() -> &'static BiLookup<Self, &'static str>;

    /// Wire string for this value, `None` for the sentinel.
    fn wire(self) -> Option<&'static str> {
        Self::lookup().find_by_key(&self).copied()
    }

    /// Value for a wire string, the sentinel when unmapped.
    fn from_wire(value: &str) -> Self {
        Self::lookup().get_by_second(value)
    }

    fn is_unspecified(self) -> bool {
        self == Self::default()
    }
}

/// Declares a [`WireEnum`] with an `Unspecified` default variant, its wire
/// table, and `Serialize`/`Deserialize` impls going through this module.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$variant_meta:meta])* $variant:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis enum $name {
            /// No mapping: the value was absent or unknown on the wire.
            #[default]
            Unspecified,
            $( $(#[$variant_meta])* $variant, )+
        }

        impl $crate::transport::WireEnum for $name {
            const NAME: &'static str = stringify!($name);

            fn lookup() -> &'static $crate::transport::BiLookup<Self, &'static str> {
                static LOOKUP: std::sync::LazyLock<$crate::transport::BiLookup<$name, &'static str>> =
                    std::sync::LazyLock::new(|| {
                        $crate::transport::BiLookup::from_pairs([
                            $( ($name::$variant, $wire), )+
                        ])
                        .unwrap_or_else(|err| {
                            panic!("wire table for {} is inconsistent: {err}", stringify!($name))
                        })
                    });
                &LOOKUP
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                $crate::transport::wire_enum::serialize(self, serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                $crate::transport::wire_enum::deserialize(deserializer)
            }
        }
    };
}

pub(crate) use wire_enum;

/// Encode a scalar: the wire string, or `null` when unmapped.
pub fn serialize<E, S>(value: &E, serializer: S) -> Result<S::Ok, S::Error>
where
    E: WireEnum,
    S: Serializer,
{
    match value.wire() {
        Some(wire) => serializer.serialize_str(wire),
        None => serializer.serialize_none(),
    }
}

/// Decode a scalar, degrading anything unmapped to `E::default()`.
pub fn deserialize<'de, E, D>(deserializer: D) -> Result<E, D::Error>
where
    E: WireEnum,
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(ScalarVisitor(PhantomData))
}

/// Adapter for list-valued fields: `#[serde(with = "wire_enum::list")]`.
pub mod list {
    use super::*;

    /// Encode each mapped element; unmapped elements are omitted.
    pub fn serialize<E, S>(values: &[E], serializer: S) -> Result<S::Ok, S::Error>
    where
        E: WireEnum,
        S: Serializer,
    {
        let mapped = values.iter().filter_map(|value| value.wire());
        let mut seq = serializer.serialize_seq(None)?;
        for wire in mapped {
            seq.serialize_element(wire)?;
        }
        seq.end()
    }

    /// Decode an array element-wise; a bare string becomes a one-element list.
    pub fn deserialize<'de, E, D>(deserializer: D) -> Result<Vec<E>, D::Error>
    where
        E: WireEnum,
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ListVisitor(PhantomData))
    }
}

struct ScalarVisitor<E>(PhantomData<E>);

impl<'de, E: WireEnum> Visitor<'de> for ScalarVisitor<E> {
    type Value = E;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a {} wire string", E::NAME)
    }

    fn visit_str<Err: de::Error>(self, value: &str) -> Result<E, Err> {
        let decoded = E::from_wire(value);
        if decoded.is_unspecified() && !value.is_empty() {
            tracing::debug!(kind = E::NAME, value, "unmapped wire value");
        }
        Ok(decoded)
    }

    fn visit_bool<Err: de::Error>(self, _: bool) -> Result<E, Err> {
        Ok(E::default())
    }

    fn visit_i64<Err: de::Error>(self, _: i64) -> Result<E, Err> {
        Ok(E::default())
    }

    fn visit_u64<Err: de::Error>(self, _: u64) -> Result<E, Err> {
        Ok(E::default())
    }

    fn visit_f64<Err: de::Error>(self, _: f64) -> Result<E, Err> {
        Ok(E::default())
    }

    fn visit_none<Err: de::Error>(self) -> Result<E, Err> {
        Ok(E::default())
    }

    fn visit_unit<Err: de::Error>(self) -> Result<E, Err> {
        Ok(E::default())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<E, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<E, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(E::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<E, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(E::default())
    }
}

struct ScalarSeed<E>(PhantomData<E>);

impl<'de, E: WireEnum> DeserializeSeed<'de> for ScalarSeed<E> {
    type Value = E;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<E, D::Error> {
        deserialize(deserializer)
    }
}

struct ListVisitor<E>(PhantomData<E>);

impl<'de, E: WireEnum> Visitor<'de> for ListVisitor<E> {
    type Value = Vec<E>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an array of {} wire strings", E::NAME)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Vec<E>, A::Error> {
        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(value) = seq.next_element_seed(ScalarSeed(PhantomData))? {
            values.push(value);
        }
        Ok(values)
    }

    fn visit_str<Err: de::Error>(self, value: &str) -> Result<Vec<E>, Err> {
        if value.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![E::from_wire(value)])
    }

    fn visit_bool<Err: de::Error>(self, _: bool) -> Result<Vec<E>, Err> {
        Ok(Vec::new())
    }

    fn visit_i64<Err: de::Error>(self, _: i64) -> Result<Vec<E>, Err> {
        Ok(Vec::new())
    }

    fn visit_u64<Err: de::Error>(self, _: u64) -> Result<Vec<E>, Err> {
        Ok(Vec::new())
    }

    fn visit_f64<Err: de::Error>(self, _: f64) -> Result<Vec<E>, Err> {
        Ok(Vec::new())
    }

    fn visit_none<Err: de::Error>(self) -> Result<Vec<E>, Err> {
        Ok(Vec::new())
    }

    fn visit_unit<Err: de::Error>(self) -> Result<Vec<E>, Err> {
        Ok(Vec::new())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Vec<E>, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Vec<E>, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Vec::new())
    }
}
