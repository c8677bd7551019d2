//! Table-definition fragments for bootstrapping tables.
//!
//! These are static descriptions handed to whatever provisions the tables;
//! nothing here talks to a client.

use dynaparams_model::fragment::{
    ATTRIBUTE_DEFINITIONS, KEY_SCHEMA, PROVISIONED_THROUGHPUT, TABLE_NAME,
};
use dynaparams_model::types::{
    AttributeDefinition, KeySchemaElement, KeyType, ProvisionedThroughput, ScalarAttributeType,
};
use dynaparams_model::{ParamValue, RequestFragment};

/// Table with a single partition key.
#[must_use]
pub fn table_params(
    table: &str,
    key_name: &str,
    key_type: ScalarAttributeType,
    throughput: ProvisionedThroughput,
) -> RequestFragment {
    table_definition(table, &[(key_name, KeyType::Hash, key_type)], throughput)
}

/// Table with a partition key and a sort key.
#[must_use]
pub fn table_params_with_composite_key(
    table: &str,
    hash_name: &str,
    range_name: &str,
    hash_type: ScalarAttributeType,
    range_type: ScalarAttributeType,
    throughput: ProvisionedThroughput,
) -> RequestFragment {
    table_definition(
        table,
        &[
            (hash_name, KeyType::Hash, hash_type),
            (range_name, KeyType::Range, range_type),
        ],
        throughput,
    )
}

fn table_definition(
    table: &str,
    keys: &[(&str, KeyType, ScalarAttributeType)],
    throughput: ProvisionedThroughput,
) -> RequestFragment {
    let key_schema = keys
        .iter()
        .map(|(name, key_type, _)| {
            ParamValue::from(KeySchemaElement {
                attribute_name: (*name).to_owned(),
                key_type: *key_type,
            })
        })
        .collect::<Vec<_>>();
    let definitions = keys
        .iter()
        .map(|(name, _, attribute_type)| {
            ParamValue::from(AttributeDefinition {
                attribute_name: (*name).to_owned(),
                attribute_type: *attribute_type,
            })
        })
        .collect::<Vec<_>>();

    RequestFragment::new()
        .with(TABLE_NAME, table)
        .with(KEY_SCHEMA, key_schema)
        .with(ATTRIBUTE_DEFINITIONS, definitions)
        .with(PROVISIONED_THROUGHPUT, throughput)
}
