//! Board coordinates.
//!
//! A [`HexCoord`] is always encoded as a two element array. Decoding also
//! accepts the `{"i": .., "j": ..}` object form found in older map files.

use core::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeTuple, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CodecError;

/// A board cell, addressed by column `i` and row `j`.
///
/// No bounds are enforced here; bounds are a property of a particular map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HexCoord {
    pub i: i32,
    pub j: i32,
}

impl HexCoord {
    pub const ORIGIN: Self = Self { i: 0, j: 0 };

    pub const fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }

    /// Cells sharing an edge with this one, using the odd/even column offset
    /// rule. Neighbours with a negative component are omitted.
    pub fn neighbors(self) -> impl Iterator<Item = HexCoord> {
        let shift = self.i.rem_euclid(2);
        [
            (-1, -1 + shift),
            (-1, shift),
            (0, -1),
            (0, 1),
            (1, -1 + shift),
            (1, shift),
        ]
        .into_iter()
        .map(move |(di, dj)| HexCoord::new(self.i + di, self.j + dj))
        .filter(|coord| coord.i >= 0 && coord.j >= 0)
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.i, self.j)
    }
}

impl From<(i32, i32)> for HexCoord {
    fn from((i, j): (i32, i32)) -> Self {
        Self::new(i, j)
    }
}

impl From<HexCoord> for [i32; 2] {
    fn from(coord: HexCoord) -> Self {
        [coord.i, coord.j]
    }
}

/// Decodes a coordinate from an already-parsed JSON value.
pub fn decode_coord(value: &Value) -> Result<HexCoord, CodecError> {
    match value {
        Value::Array(items) => {
            if items.len() != 2 {
                return Err(CodecError::coordinate_len(items.len()));
            }
            let component = |v: &Value| {
                v.as_i64()
                    .and_then(|n| i32::try_from(n).ok())
                    .ok_or_else(|| CodecError::coordinate_shape(format!("non-integer {v}")))
            };
            Ok(HexCoord::new(component(&items[0])?, component(&items[1])?))
        }
        Value::Object(_) => HexCoord::deserialize(value)
            .map_err(|e| CodecError::coordinate_shape(e.to_string())),
        other => Err(CodecError::coordinate_shape(describe(other))),
    }
}

/// Encodes a coordinate in its canonical array form.
pub fn encode_coord(coord: HexCoord) -> Value {
    Value::from(vec![coord.i, coord.j])
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Serialize for HexCoord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.i)?;
        tuple.serialize_element(&self.j)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for HexCoord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(HexCoordVisitor)
    }
}

struct HexCoordVisitor;

impl HexCoordVisitor {
    fn reject<E: de::Error>(found: &str) -> E {
        E::custom(CodecError::coordinate_shape(found))
    }
}

impl<'de> Visitor<'de> for HexCoordVisitor {
    type Value = HexCoord;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a [i, j] array or an {i, j} object")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<HexCoord, A::Error> {
        let mut components = Vec::with_capacity(2);
        while let Some(value) = seq.next_element::<i32>()? {
            components.push(value);
        }
        match components[..] {
            [i, j] => Ok(HexCoord::new(i, j)),
            _ => Err(de::Error::custom(CodecError::coordinate_len(
                components.len(),
            ))),
        }
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<HexCoord, A::Error> {
        let mut i = None;
        let mut j = None;
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "i" => i = Some(map.next_value::<i32>()?),
                "j" => j = Some(map.next_value::<i32>()?),
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        match (i, j) {
            (Some(i), Some(j)) => Ok(HexCoord::new(i, j)),
            _ => Err(Self::reject("an object without both i and j")),
        }
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<HexCoord, E> {
        Err(Self::reject("a boolean"))
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<HexCoord, E> {
        Err(Self::reject("a number"))
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<HexCoord, E> {
        Err(Self::reject("a number"))
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<HexCoord, E> {
        Err(Self::reject("a number"))
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<HexCoord, E> {
        Err(Self::reject("a string"))
    }

    fn visit_unit<E: de::Error>(self) -> Result<HexCoord, E> {
        Err(Self::reject("null"))
    }
}
