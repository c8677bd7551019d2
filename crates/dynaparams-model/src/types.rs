//! Table definition types used when describing a table's key schema.
//!
//! These only appear in table-creation fragments; they convert into
//! [`ParamValue`] mappings with the protocol's `PascalCase` field names and
//! `SCREAMING_SNAKE_CASE` enum strings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::param::ParamValue;

/// Role of a key attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyType {
    /// Partition key.
    #[serde(rename = "HASH")]
    Hash,
    /// Sort key.
    #[serde(rename = "RANGE")]
    Range,
}

impl KeyType {
    /// Wire string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hash => "HASH",
            Self::Range => "RANGE",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type of a key attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScalarAttributeType {
    /// String.
    #[default]
    S,
    /// Number.
    N,
    /// Binary.
    B,
}

impl ScalarAttributeType {
    /// Wire string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::S => "S",
            Self::N => "N",
            Self::B => "B",
        }
    }
}

impl fmt::Display for ScalarAttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read/write capacity of a provisioned table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProvisionedThroughput {
    /// Read capacity units.
    pub read_capacity_units: i64,
    /// Write capacity units.
    pub write_capacity_units: i64,
}

impl Default for ProvisionedThroughput {
    fn default() -> Self {
        Self {
            read_capacity_units: 10,
            write_capacity_units: 10,
        }
    }
}

impl From<ProvisionedThroughput> for ParamValue {
    fn from(t: ProvisionedThroughput) -> Self {
        ParamValue::mapping([
            ("ReadCapacityUnits", ParamValue::Int(t.read_capacity_units)),
            ("WriteCapacityUnits", ParamValue::Int(t.write_capacity_units)),
        ])
    }
}

/// One element of a key schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchemaElement {
    /// Key attribute name.
    pub attribute_name: String,
    /// Partition or sort key.
    pub key_type: KeyType,
}

impl From<KeySchemaElement> for ParamValue {
    fn from(e: KeySchemaElement) -> Self {
        ParamValue::mapping([
            ("AttributeName", ParamValue::Text(e.attribute_name)),
            ("KeyType", ParamValue::text(e.key_type.as_str())),
        ])
    }
}

/// Declared type of a key attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDefinition {
    /// Attribute name.
    pub attribute_name: String,
    /// Attribute type.
    pub attribute_type: ScalarAttributeType,
}

impl From<AttributeDefinition> for ParamValue {
    fn from(d: AttributeDefinition) -> Self {
        ParamValue::mapping([
            ("AttributeName", ParamValue::Text(d.attribute_name)),
            ("AttributeType", ParamValue::text(d.attribute_type.as_str())),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_default_to_ten_capacity_units() {
        let t = ProvisionedThroughput::default();
        assert_eq!(t.read_capacity_units, 10);
        assert_eq!(t.write_capacity_units, 10);
    }

    #[test]
    fn test_should_convert_key_schema_element_to_param() {
        let value = ParamValue::from(KeySchemaElement {
            attribute_name: "id".to_owned(),
            key_type: KeyType::Hash,
        });
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"AttributeName":"id","KeyType":"HASH"}"#
        );
    }
}
