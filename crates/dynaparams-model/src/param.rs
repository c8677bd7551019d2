//! Tagged request parameter values.
//!
//! Every value inside a [`RequestFragment`](crate::RequestFragment) is one of
//! three shapes: a scalar, a sequence, or a mapping. Merging fragments
//! dispatches on that shape alone, so callers construct the shape explicitly
//! instead of relying on runtime inspection of the payload.

use std::collections::{BTreeMap, HashMap};

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::attribute_value::AttributeValue;

/// A request parameter value.
///
/// `Text`, `Int`, `Bool` and `Attribute` are scalars. `Sequence` and
/// `Mapping` are composite.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Protocol string: table name, expression text, placeholder target.
    Text(String),
    /// Protocol integer: capacity units, limits.
    Int(i64),
    /// Protocol flag.
    Bool(bool),
    /// Document value bound into the request (key values, items, placeholder values).
    Attribute(AttributeValue),
    /// Ordered sequence of parameter values.
    Sequence(Vec<ParamValue>),
    /// Keyed parameter values.
    Mapping(BTreeMap<String, ParamValue>),
}

/// Shape tag used by the merge rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamShape {
    /// Plain value, overwritten on merge.
    Scalar,
    /// Concatenated on merge.
    Sequence,
    /// Unioned on merge.
    Mapping,
}

impl ParamValue {
    /// Build a `Text` value.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Build a `Mapping` from `(key, value)` pairs.
    #[must_use]
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ParamValue)>,
    {
        Self::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build a `Mapping` of document values, e.g. a primary key or an item.
    #[must_use]
    pub fn attributes<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, AttributeValue)>,
    {
        Self::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), Self::Attribute(v)))
                .collect(),
        )
    }

    /// The merge shape of this value.
    #[must_use]
    pub fn shape(&self) -> ParamShape {
        match self {
            Self::Sequence(_) => ParamShape::Sequence,
            Self::Mapping(_) => ParamShape::Mapping,
            Self::Text(_) | Self::Int(_) | Self::Bool(_) | Self::Attribute(_) => {
                ParamShape::Scalar
            }
        }
    }

    /// Returns the text if this is a `Text` value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is an `Int` value.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the document value if this is an `Attribute` value.
    #[must_use]
    pub fn as_attribute(&self) -> Option<&AttributeValue> {
        match self {
            Self::Attribute(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the entries if this is a `Mapping`.
    #[must_use]
    pub fn as_mapping(&self) -> Option<&BTreeMap<String, ParamValue>> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the elements if this is a `Sequence`.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[ParamValue]> {
        match self {
            Self::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// Collect a mapping of `Attribute` entries into an item.
    ///
    /// Entries that are not document values are skipped. Returns `None` when
    /// this is not a mapping.
    #[must_use]
    pub fn to_item(&self) -> Option<HashMap<String, AttributeValue>> {
        let map = self.as_mapping()?;
        Some(
            map.iter()
                .filter_map(|(k, v)| v.as_attribute().map(|a| (k.clone(), a.clone())))
                .collect(),
        )
    }

    /// Collect a mapping of `Text` entries, e.g. a placeholder name map.
    #[must_use]
    pub fn to_text_map(&self) -> Option<HashMap<String, String>> {
        let map = self.as_mapping()?;
        Some(
            map.iter()
                .filter_map(|(k, v)| v.as_text().map(|t| (k.clone(), t.to_owned())))
                .collect(),
        )
    }
}

impl From<AttributeValue> for ParamValue {
    fn from(v: AttributeValue) -> Self {
        Self::Attribute(v)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<ParamValue>> for ParamValue {
    fn from(v: Vec<ParamValue>) -> Self {
        Self::Sequence(v)
    }
}

impl From<BTreeMap<String, ParamValue>> for ParamValue {
    fn from(m: BTreeMap<String, ParamValue>) -> Self {
        Self::Mapping(m)
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Attribute(v) => v.serialize(serializer),
            Self::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}
