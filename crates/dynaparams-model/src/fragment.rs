//! Request fragments and the protocol's fixed parameter names.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::Serialize;

use crate::attribute_value::{AttributeValue, Item};
use crate::param::ParamValue;

// ---------------------------------------------------------------------------
// Protocol parameter names
// ---------------------------------------------------------------------------

/// Target table.
pub const TABLE_NAME: &str = "TableName";
/// Primary key of the addressed item.
pub const KEY: &str = "Key";
/// Full item for a put.
pub const ITEM: &str = "Item";
/// Fields a read should return.
pub const PROJECTION_EXPRESSION: &str = "ProjectionExpression";
/// Filter applied to scanned or queried items.
pub const FILTER_EXPRESSION: &str = "FilterExpression";
/// Key condition of a query.
pub const KEY_CONDITION_EXPRESSION: &str = "KeyConditionExpression";
/// In-place mutation of an item.
pub const UPDATE_EXPRESSION: &str = "UpdateExpression";
/// Guard that must hold for a write to be applied.
pub const CONDITION_EXPRESSION: &str = "ConditionExpression";
/// Placeholder to field-name map.
pub const EXPRESSION_ATTRIBUTE_NAMES: &str = "ExpressionAttributeNames";
/// Placeholder to literal-value map.
pub const EXPRESSION_ATTRIBUTE_VALUES: &str = "ExpressionAttributeValues";
/// Continuation cursor of a resumed listing.
pub const EXCLUSIVE_START_KEY: &str = "ExclusiveStartKey";
/// Index to read from instead of the base table.
pub const INDEX_NAME: &str = "IndexName";
/// Page size hint for listings.
pub const LIMIT: &str = "Limit";
/// Key schema of a table definition.
pub const KEY_SCHEMA: &str = "KeySchema";
/// Attribute type definitions of a table definition.
pub const ATTRIBUTE_DEFINITIONS: &str = "AttributeDefinitions";
/// Capacity settings of a table definition.
pub const PROVISIONED_THROUGHPUT: &str = "ProvisionedThroughput";

/// One request, or a piece of one, keyed by protocol parameter name.
///
/// Fragments are built per call, combined with
/// `dynaparams_core::merge::merge_params`, and handed to a client. Keys are
/// kept ordered so that the serialized request is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RequestFragment {
    params: BTreeMap<String, ParamValue>,
}

impl RequestFragment {
    /// An empty fragment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Fragment addressing a table.
    #[must_use]
    pub fn for_table(table: impl Into<String>) -> Self {
        Self::new().with(TABLE_NAME, ParamValue::Text(table.into()))
    }

    /// Fragment addressing one item of a table by primary key.
    #[must_use]
    pub fn for_key<K, I>(table: impl Into<String>, key: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, AttributeValue)>,
    {
        Self::for_table(table).with(KEY, ParamValue::attributes(key))
    }

    /// Insert a parameter, returning the value it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.params.insert(key.into(), value.into())
    }

    /// Remove a parameter.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.params.remove(key)
    }

    /// Look up a parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    /// Entry API for in-place combination of values.
    pub fn entry(&mut self, key: String) -> btree_map::Entry<'_, String, ParamValue> {
        self.params.entry(key)
    }

    /// Whether the parameter is set.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether no parameter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate over parameters in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, ParamValue> {
        self.params.iter()
    }

    /// A `Text` parameter, e.g. the table name or an expression.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ParamValue::as_text)
    }

    /// A mapping of document values, e.g. `Key`, `Item` or `ExclusiveStartKey`.
    #[must_use]
    pub fn item(&self, key: &str) -> Option<Item> {
        self.get(key).and_then(ParamValue::to_item)
    }

    /// A mapping of text values, e.g. `ExpressionAttributeNames`.
    #[must_use]
    pub fn text_map(&self, key: &str) -> Option<std::collections::HashMap<String, String>> {
        self.get(key).and_then(ParamValue::to_text_map)
    }

    /// The table this fragment addresses.
    #[must_use]
    pub fn table_name(&self) -> Option<&str> {
        self.text(TABLE_NAME)
    }

    /// Serialize to the protocol's JSON request body.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl IntoIterator for RequestFragment {
    type Item = (String, ParamValue);
    type IntoIter = btree_map::IntoIter<String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.into_iter()
    }
}

impl<'a> IntoIterator for &'a RequestFragment {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = btree_map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, ParamValue)> for RequestFragment {
    fn from_iter<I: IntoIterator<Item = (K, ParamValue)>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
