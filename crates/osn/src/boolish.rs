use core::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A legacy flag written either as a JSON boolean or as an integer
/// (non-zero is true). Always serialized as a boolean.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Boolish(pub bool);

impl From<Boolish> for bool {
    fn from(value: Boolish) -> Self {
        value.0
    }
}

impl Serialize for Boolish {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.0)
    }
}

impl<'de> Deserialize<'de> for Boolish {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(BoolishVisitor)
    }
}

struct BoolishVisitor;

impl Visitor<'_> for BoolishVisitor {
    type Value = Boolish;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean or an integer")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Boolish, E> {
        Ok(Boolish(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Boolish, E> {
        Ok(Boolish(value != 0))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Boolish, E> {
        Ok(Boolish(value != 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bools_and_ints() {
        for (raw, expected) in [("true", true), ("false", false), ("0", false), ("1", true), ("-2", true)] {
            let value: Boolish = serde_json::from_str(raw).unwrap();
            assert_eq!(bool::from(value), expected, "{raw}");
        }
        assert!(serde_json::from_str::<Boolish>(r#""yes""#).is_err());
        assert_eq!(serde_json::to_string(&Boolish(true)).unwrap(), "true");
    }
}
