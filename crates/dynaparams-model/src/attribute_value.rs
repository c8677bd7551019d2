//! Document values bound into requests and returned in responses.
//!
//! `AttributeValue` is the value of a single stored field. On the wire it is
//! a single-key object such as `{"S": "hello"}` or `{"L": [...]}`.

use std::collections::HashMap;
use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A stored item: field name to field value.
pub type Item = HashMap<String, AttributeValue>;

/// Value of one document field.
///
/// Numbers are string-encoded so that no precision is lost between the
/// caller and the database.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// String value.
    S(String),
    /// Number value (string-encoded).
    N(String),
    /// Binary value (base64-encoded in JSON).
    B(Bytes),
    /// String set.
    Ss(Vec<String>),
    /// Number set (string-encoded).
    Ns(Vec<String>),
    /// Binary set (base64-encoded in JSON).
    Bs(Vec<Bytes>),
    /// Boolean value.
    Bool(bool),
    /// Null value.
    Null(bool),
    /// Ordered list of values.
    L(Vec<AttributeValue>),
    /// Nested document.
    M(HashMap<String, AttributeValue>),
}

impl AttributeValue {
    /// Build a number value from anything that formats as a number.
    #[must_use]
    pub fn number(n: impl fmt::Display) -> Self {
        Self::N(n.to_string())
    }

    /// The string of an `S` value.
    #[must_use]
    pub fn as_s(&self) -> Option<&str> {
        if let Self::S(s) = self { Some(s) } else { None }
    }

    /// The elements of an `L` value.
    #[must_use]
    pub fn as_l(&self) -> Option<&[AttributeValue]> {
        if let Self::L(l) = self { Some(l) } else { None }
    }

    /// The fields of an `M` value.
    #[must_use]
    pub fn as_m(&self) -> Option<&HashMap<String, AttributeValue>> {
        if let Self::M(m) = self { Some(m) } else { None }
    }

    /// Whether the value counts as "set" for identifier purposes.
    ///
    /// Only null values and empty strings are treated as unset. Falsy
    /// scalars such as `N("0")` and `Bool(false)` count as set, so an item
    /// whose id is the number zero keeps it.
    #[must_use]
    pub fn is_present(&self) -> bool {
        match self {
            Self::Null(_) => false,
            Self::S(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Wire type key (`"S"`, `"N"`, `"BOOL"`, ...).
    #[must_use]
    pub fn type_descriptor(&self) -> &'static str {
        match self {
            Self::S(_) => "S",
            Self::N(_) => "N",
            Self::B(_) => "B",
            Self::Ss(_) => "SS",
            Self::Ns(_) => "NS",
            Self::Bs(_) => "BS",
            Self::Bool(_) => "BOOL",
            Self::Null(_) => "NULL",
            Self::L(_) => "L",
            Self::M(_) => "M",
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        Self::S(s.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        Self::S(s)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

const TYPE_KEYS: &[&str] = &["S", "N", "B", "SS", "NS", "BS", "BOOL", "NULL", "L", "M"];

fn encode_binary(data: &[u8]) -> String {
    BASE64.encode(data)
}

fn decode_binary<E: de::Error>(encoded: &str) -> Result<Bytes, E> {
    BASE64.decode(encoded).map(Bytes::from).map_err(E::custom)
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let key = self.type_descriptor();
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::S(text) | Self::N(text) => map.serialize_entry(key, text)?,
            Self::Ss(set) | Self::Ns(set) => map.serialize_entry(key, set)?,
            Self::B(data) => map.serialize_entry(key, &encode_binary(data))?,
            Self::Bs(set) => {
                let encoded: Vec<String> = set.iter().map(|data| encode_binary(data)).collect();
                map.serialize_entry(key, &encoded)?;
            }
            Self::Bool(flag) | Self::Null(flag) => map.serialize_entry(key, flag)?,
            Self::L(list) => map.serialize_entry(key, list)?,
            Self::M(fields) => map.serialize_entry(key, fields)?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TaggedValueVisitor)
    }
}

struct TaggedValueVisitor;

impl<'de> Visitor<'de> for TaggedValueVisitor {
    type Value = AttributeValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a single-key object such as {\"S\": \"text\"}")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
        let key: String = map
            .next_key()?
            .ok_or_else(|| <M::Error as de::Error>::invalid_length(0, &self))?;

        let value = match key.as_str() {
            "S" => AttributeValue::S(map.next_value()?),
            "N" => AttributeValue::N(map.next_value()?),
            "B" => AttributeValue::B(decode_binary::<M::Error>(&map.next_value::<String>()?)?),
            "SS" => AttributeValue::Ss(map.next_value()?),
            "NS" => AttributeValue::Ns(map.next_value()?),
            "BS" => AttributeValue::Bs(
                map.next_value::<Vec<String>>()?
                    .iter()
                    .map(|encoded| decode_binary::<M::Error>(encoded))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            "BOOL" => AttributeValue::Bool(map.next_value()?),
            "NULL" => AttributeValue::Null(map.next_value()?),
            "L" => AttributeValue::L(map.next_value()?),
            "M" => AttributeValue::M(map.next_value()?),
            other => return Err(de::Error::unknown_field(other, TYPE_KEYS)),
        };

        if map.next_key::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::custom("attribute value has more than one type key"));
        }
        Ok(value)
    }
}
