//! Integration tests for dynaparams against a DynamoDB-compatible server.
//!
//! These tests require a server at `localhost:4566` (or `DYNAMODB_ENDPOINT_URL`).
//! They are marked `#[ignore]` so they don't run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p dynaparams-integration -- --ignored
//! ```

use std::sync::Once;

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType,
};
use dynaparams_core::Collection;
use dynaparams_core::sdk::SdkDocumentClient;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Endpoint URL for the server.
fn endpoint_url() -> String {
    std::env::var("DYNAMODB_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:4566".to_owned())
}

/// Create a configured DynamoDB client pointing at the local server.
#[must_use]
pub fn dynamodb_client() -> aws_sdk_dynamodb::Client {
    init_tracing();

    let creds = Credentials::new("test", "test", None, None, "integration-test");

    let config = aws_sdk_dynamodb::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(creds)
        .endpoint_url(endpoint_url())
        .build();

    aws_sdk_dynamodb::Client::from_conf(config)
}

/// A collection over the local server.
#[must_use]
pub fn collection() -> Collection<SdkDocumentClient> {
    Collection::new(SdkDocumentClient::new(dynamodb_client()))
}

/// Generate a unique table name for a test.
#[must_use]
pub fn test_table_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

/// Create a table keyed by `hash` (and `range`, if given), all string keys.
pub async fn create_table(
    client: &aws_sdk_dynamodb::Client,
    table_name: &str,
    hash: &str,
    range: Option<&str>,
) -> anyhow::Result<()> {
    let mut request = client
        .create_table()
        .table_name(table_name)
        .billing_mode(BillingMode::PayPerRequest);
    for (name, key_type) in std::iter::once((hash, KeyType::Hash))
        .chain(range.map(|name| (name, KeyType::Range)))
    {
        request = request
            .key_schema(
                KeySchemaElement::builder()
                    .attribute_name(name)
                    .key_type(key_type)
                    .build()?,
            )
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name(name)
                    .attribute_type(ScalarAttributeType::S)
                    .build()?,
            );
    }
    request.send().await?;
    Ok(())
}

/// Drop a test table, ignoring failures.
pub async fn delete_table(client: &aws_sdk_dynamodb::Client, table_name: &str) {
    let _ = client.delete_table().table_name(table_name).send().await;
}

mod test_collection;
mod test_pagination;
