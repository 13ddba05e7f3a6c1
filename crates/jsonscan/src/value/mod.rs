//! JSON value types.
//!
//! This module defines the [`Value`] enum, which represents any JSON value,
//! and the [`Object`] map type with its strict and lenient accessors.

mod hash;
mod object;

use core::fmt;

use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive};
pub use object::Object;

use crate::{
    error::{ValueError, WriteError},
    options::WriterOptions,
    writer::Writer,
};

pub type Array = Vec<Value>;

/// A JSON value as defined by [RFC 8259], plus a `BigInt` variant for integer
/// literals that `f64` cannot hold exactly.
///
/// # Examples
///
/// ```
/// use jsonscan::{Object, Value};
///
/// let mut object = Object::new();
/// object.insert("key", "value");
/// let v = Value::Object(object);
/// assert_eq!(v.to_string(), r#"{"key":"value"}"#);
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    BigInt(BigInt),
    String(String),
    Array(Array),
    Object(Object),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::from(BigInt::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::from(BigInt::from(v))
    }
}

/// Big integers that `f64` holds exactly become `Number`, matching what the
/// parser produces for the same literal.
impl From<BigInt> for Value {
    fn from(v: BigInt) -> Self {
        match v.to_f64() {
            Some(f) if f.is_finite() && BigInt::from_f64(f).as_ref() == Some(&v) => {
                Self::Number(f)
            }
            _ => Self::BigInt(v),
        }
    }
}

/// Numbers compare by value across `Number` and `BigInt`, so `BigInt(12)`
/// equals `Number(12.0)`.
impl PartialEq for Value {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::BigInt(a), Self::BigInt(b)) => a == b,
            (Self::Number(f), Self::BigInt(n)) | (Self::BigInt(n), Self::Number(f)) => {
                exact_integer(*f).as_ref() == Some(n)
            }
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            _ => false,
        }
    }
}

/// The integer an integral, finite float stands for.
pub(crate) fn exact_integer(f: f64) -> Option<BigInt> {
    if f.is_finite() && f.fract() == 0.0 {
        BigInt::from_f64(f)
    } else {
        None
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

/// A missing string becomes the empty string.
impl From<Option<&str>> for Value {
    fn from(v: Option<&str>) -> Self {
        Self::String(v.unwrap_or_default().to_owned())
    }
}

impl From<Option<String>> for Value {
    fn from(v: Option<String>) -> Self {
        Self::String(v.unwrap_or_default())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Self::Object(v)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::Array(iter.into_iter().collect())
    }
}

impl Value {
    /// Builds a `BigInt` from an integral float.
    ///
    /// # Errors
    ///
    /// [`ValueError::NonIntegral`] if `v` has a fractional part or is not
    /// finite.
    pub fn big_int_from_f64(v: f64) -> Result<Self, ValueError> {
        exact_integer(v)
            .map(Self::BigInt)
            .ok_or(ValueError::NonIntegral(v))
    }

    /// Returns `true` for scalars (string, number, big integer, boolean,
    /// null), `false` for objects and arrays.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        !matches!(self, Self::Array(_) | Self::Object(_))
    }

    /// A stable name for the variant, used in diagnostics.
    #[must_use]
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::BigInt(_) => "bigint",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` for `Number` and `BigInt`.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(..) | Self::BigInt(..))
    }

    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_big_int(&self) -> Option<&BigInt> {
        match self {
            Self::BigInt(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Unwraps an object.
    ///
    /// # Errors
    ///
    /// [`ValueError::WrongType`] naming the actual variant.
    pub fn expect_object(self) -> Result<Object, ValueError> {
        match self {
            Self::Object(o) => Ok(o),
            other => Err(ValueError::WrongType {
                path: "/".into(),
                expected: "object",
                found: other.type_tag(),
            }),
        }
    }

    /// Writes this value through `writer`, honouring its layout options.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors and on non-finite numbers.
    pub fn write<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<(), WriteError> {
        writer.write_value(self)
    }

    /// Renders the value sorted and indented (see [`WriterOptions::neat`]).
    ///
    /// # Errors
    ///
    /// Fails on non-finite numbers.
    pub fn to_neat_string(&self) -> Result<String, WriteError> {
        crate::writer::to_string_with(self, WriterOptions::neat())
    }
}

/// Compact rendering. Non-finite numbers cannot be represented and surface as
/// a formatting error.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = crate::writer::to_string_with(self, WriterOptions::compact())
            .map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

// Serialization for downstream crates that want to hand a tree to serde.
#[cfg(feature = "serde")]
mod serde_impls {
    use num_traits::ToPrimitive;
    use serde::{
        Serialize, Serializer,
        ser::{SerializeMap, SerializeSeq},
    };

    use super::{Object, Value};

    /// 2^63: integral numbers in `-2^63..2^63` serialize as integers.
    const I64_EDGE: f64 = 9_223_372_036_854_775_808.0;

    impl Serialize for Value {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match self {
                Value::Null => serializer.serialize_unit(),
                Value::Boolean(b) => serializer.serialize_bool(*b),
                #[expect(clippy::cast_possible_truncation)]
                Value::Number(n) if n.fract() == 0.0 && (-I64_EDGE..I64_EDGE).contains(n) => {
                    serializer.serialize_i64(*n as i64)
                }
                Value::Number(n) => serializer.serialize_f64(*n),
                Value::BigInt(n) => match (n.to_i128(), n.to_u128()) {
                    (Some(i), _) => serializer.serialize_i128(i),
                    (None, Some(u)) => serializer.serialize_u128(u),
                    (None, None) => serializer.serialize_str(&n.to_string()),
                },
                Value::String(s) => serializer.serialize_str(s),
                Value::Array(a) => {
                    let mut seq = serializer.serialize_seq(Some(a.len()))?;
                    for v in a {
                        seq.serialize_element(v)?;
                    }
                    seq.end()
                }
                Value::Object(o) => o.serialize(serializer),
            }
        }
    }

    impl Serialize for Object {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (k, v) in self {
                map.serialize_entry(k, v)?;
            }
            map.end()
        }
    }
}
