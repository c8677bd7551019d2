//! Collection configuration.
//!
//! Configuration is plain data handed to [`Collection::with_config`](crate::collection::Collection::with_config).
//! Nothing is read from the environment.

use dynaparams_model::types::ProvisionedThroughput;
use serde::{Deserialize, Serialize};

/// Settings shared by every operation of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreConfig {
    /// Field that carries an item's identifier.
    pub id_field: String,
    /// Prefix of generated identifiers. Keeps ids starting with a letter.
    pub id_prefix: String,
    /// Capacity used by the table-definition builders when none is given.
    pub default_throughput: ProvisionedThroughput,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            id_field: "id".to_owned(),
            id_prefix: "a".to_owned(),
            default_throughput: ProvisionedThroughput::default(),
        }
    }
}
