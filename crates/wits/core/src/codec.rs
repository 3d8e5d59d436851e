//! Integer-or-name codec for small closed enumerations.
//!
//! Archive records spell the same enum either as its integer discriminant or
//! as its upper-case name. Decoding accepts both; encoding always emits the
//! name. Out-of-range integers and unknown names are errors, never a silent
//! fallback to `UNKNOWN`.

use core::fmt;
use core::marker::PhantomData;

use serde::de::{self, Visitor};
use serde_json::Value;

use crate::error::CodecError;

/// A closed enumeration with an integer and a string wire form.
pub trait EnumCodec: Sized + Copy + 'static {
    /// Name used in error messages, e.g. `"unit class"`.
    const KIND: &'static str;

    fn from_int(value: i64) -> Option<Self>;

    fn from_name(name: &str) -> Option<Self>;

    /// Canonical wire name.
    fn name(self) -> &'static str;

    fn decode_int(value: i64) -> Result<Self, CodecError> {
        Self::from_int(value).ok_or_else(|| CodecError::invalid_enum(Self::KIND, value))
    }

    fn decode_name(name: &str) -> Result<Self, CodecError> {
        Self::from_name(name).ok_or_else(|| CodecError::invalid_enum(Self::KIND, format!("{name:?}")))
    }

    /// Decodes from an already-parsed JSON value.
    fn decode(value: &Value) -> Result<Self, CodecError> {
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(n) => Self::decode_int(n),
                None => Err(CodecError::invalid_enum(Self::KIND, n)),
            },
            Value::String(s) => Self::decode_name(s),
            other => Err(CodecError::invalid_enum(Self::KIND, other)),
        }
    }
}

/// serde visitor backing [`enum_codec_serde!`].
pub struct EnumVisitor<T>(PhantomData<T>);

impl<T> EnumVisitor<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for EnumVisitor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'de, T: EnumCodec> Visitor<'de> for EnumVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a {} as an integer or a name", T::KIND)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<T, E> {
        T::decode_int(value).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<T, E> {
        match i64::try_from(value) {
            Ok(value) => self.visit_i64(value),
            Err(_) => Err(E::custom(CodecError::invalid_enum(T::KIND, value))),
        }
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<T, E> {
        T::decode_name(value).map_err(E::custom)
    }
}

/// Implements `Serialize` (as the name) and `Deserialize` (integer or name)
/// for a type implementing [`EnumCodec`].
#[macro_export]
macro_rules! enum_codec_serde {
    ($ty:ty) => {
        impl ::serde::Serialize for $ty {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str($crate::codec::EnumCodec::name(*self))
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $ty {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer.deserialize_any($crate::codec::EnumVisitor::<$ty>::new())
            }
        }
    };
}
