//! [`DocumentClient`] backed by the AWS SDK DynamoDB client.
//!
//! Requests are decoded from their fragments parameter by parameter and fed
//! to the SDK's fluent builders. SDK failures become [`ClientError`]s carrying
//! the service error code, with the SDK error kept as the source.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue as SdkAttributeValue;
use dynaparams_model::fragment::{
    CONDITION_EXPRESSION, EXCLUSIVE_START_KEY, EXPRESSION_ATTRIBUTE_NAMES,
    EXPRESSION_ATTRIBUTE_VALUES, FILTER_EXPRESSION, INDEX_NAME, ITEM, KEY,
    KEY_CONDITION_EXPRESSION, LIMIT, PROJECTION_EXPRESSION, TABLE_NAME, UPDATE_EXPRESSION,
};
use dynaparams_model::{
    AttributeValue, ClientError, ClientErrorCode, GetOutput, Item, PageOutput, ParamValue,
    RequestFragment,
};

use crate::client::DocumentClient;

/// Adapter from [`aws_sdk_dynamodb::Client`] to [`DocumentClient`].
#[derive(Debug, Clone)]
pub struct SdkDocumentClient {
    client: aws_sdk_dynamodb::Client,
}

impl SdkDocumentClient {
    /// Wrap a configured SDK client.
    #[must_use]
    pub fn new(client: aws_sdk_dynamodb::Client) -> Self {
        Self { client }
    }

    /// The wrapped SDK client, for operations outside [`DocumentClient`].
    #[must_use]
    pub fn inner(&self) -> &aws_sdk_dynamodb::Client {
        &self.client
    }
}

#[async_trait]
impl DocumentClient for SdkDocumentClient {
    async fn get(&self, request: RequestFragment) -> Result<GetOutput, ClientError> {
        let output = self
            .client
            .get_item()
            .set_table_name(text(&request, TABLE_NAME))
            .set_key(sdk_item(&request, KEY))
            .set_projection_expression(text(&request, PROJECTION_EXPRESSION))
            .set_expression_attribute_names(names(&request))
            .send()
            .await
            .map_err(map_sdk_error)?;

        Ok(GetOutput {
            item: output.item().map(from_sdk_item),
        })
    }

    async fn put(&self, request: RequestFragment) -> Result<(), ClientError> {
        self.client
            .put_item()
            .set_table_name(text(&request, TABLE_NAME))
            .set_item(sdk_item(&request, ITEM))
            .set_condition_expression(text(&request, CONDITION_EXPRESSION))
            .set_expression_attribute_names(names(&request))
            .set_expression_attribute_values(values(&request))
            .send()
            .await
            .map_err(map_sdk_error)?;
        Ok(())
    }

    async fn update(&self, request: RequestFragment) -> Result<(), ClientError> {
        self.client
            .update_item()
            .set_table_name(text(&request, TABLE_NAME))
            .set_key(sdk_item(&request, KEY))
            .set_update_expression(text(&request, UPDATE_EXPRESSION))
            .set_condition_expression(text(&request, CONDITION_EXPRESSION))
            .set_expression_attribute_names(names(&request))
            .set_expression_attribute_values(values(&request))
            .send()
            .await
            .map_err(map_sdk_error)?;
        Ok(())
    }

    async fn scan(&self, request: RequestFragment) -> Result<PageOutput, ClientError> {
        let output = self
            .client
            .scan()
            .set_table_name(text(&request, TABLE_NAME))
            .set_index_name(text(&request, INDEX_NAME))
            .set_filter_expression(text(&request, FILTER_EXPRESSION))
            .set_projection_expression(text(&request, PROJECTION_EXPRESSION))
            .set_expression_attribute_names(names(&request))
            .set_expression_attribute_values(values(&request))
            .set_exclusive_start_key(sdk_item(&request, EXCLUSIVE_START_KEY))
            .set_limit(limit(&request))
            .send()
            .await
            .map_err(map_sdk_error)?;

        Ok(PageOutput {
            items: output.items().iter().map(from_sdk_item).collect(),
            last_evaluated_key: output.last_evaluated_key().map(from_sdk_item),
        })
    }

    async fn query(&self, request: RequestFragment) -> Result<PageOutput, ClientError> {
        let output = self
            .client
            .query()
            .set_table_name(text(&request, TABLE_NAME))
            .set_index_name(text(&request, INDEX_NAME))
            .set_key_condition_expression(text(&request, KEY_CONDITION_EXPRESSION))
            .set_filter_expression(text(&request, FILTER_EXPRESSION))
            .set_projection_expression(text(&request, PROJECTION_EXPRESSION))
            .set_expression_attribute_names(names(&request))
            .set_expression_attribute_values(values(&request))
            .set_exclusive_start_key(sdk_item(&request, EXCLUSIVE_START_KEY))
            .set_limit(limit(&request))
            .send()
            .await
            .map_err(map_sdk_error)?;

        Ok(PageOutput {
            items: output.items().iter().map(from_sdk_item).collect(),
            last_evaluated_key: output.last_evaluated_key().map(from_sdk_item),
        })
    }
}

fn text(request: &RequestFragment, key: &str) -> Option<String> {
    request.text(key).map(str::to_owned)
}

fn sdk_item(request: &RequestFragment, key: &str) -> Option<HashMap<String, SdkAttributeValue>> {
    request.item(key).map(to_sdk_item)
}

// The service rejects empty placeholder maps, so they are omitted.
fn names(request: &RequestFragment) -> Option<HashMap<String, String>> {
    request
        .text_map(EXPRESSION_ATTRIBUTE_NAMES)
        .filter(|names| !names.is_empty())
}

fn values(request: &RequestFragment) -> Option<HashMap<String, SdkAttributeValue>> {
    sdk_item(request, EXPRESSION_ATTRIBUTE_VALUES).filter(|values| !values.is_empty())
}

fn limit(request: &RequestFragment) -> Option<i32> {
    request
        .get(LIMIT)
        .and_then(ParamValue::as_int)
        .and_then(|limit| i32::try_from(limit).ok())
}

/// Convert a stored item to the SDK representation.
#[must_use]
pub fn to_sdk_item(item: Item) -> HashMap<String, SdkAttributeValue> {
    item.into_iter()
        .map(|(name, value)| (name, to_sdk_value(value)))
        .collect()
}

/// Convert an SDK item to the stored representation.
#[must_use]
pub fn from_sdk_item(item: &HashMap<String, SdkAttributeValue>) -> Item {
    item.iter()
        .map(|(name, value)| (name.clone(), from_sdk_value(value)))
        .collect()
}

/// Convert one document value to the SDK representation.
#[must_use]
pub fn to_sdk_value(value: AttributeValue) -> SdkAttributeValue {
    match value {
        AttributeValue::S(s) => SdkAttributeValue::S(s),
        AttributeValue::N(n) => SdkAttributeValue::N(n),
        AttributeValue::B(b) => SdkAttributeValue::B(Blob::new(b.to_vec())),
        AttributeValue::Ss(v) => SdkAttributeValue::Ss(v),
        AttributeValue::Ns(v) => SdkAttributeValue::Ns(v),
        AttributeValue::Bs(v) => {
            SdkAttributeValue::Bs(v.into_iter().map(|b| Blob::new(b.to_vec())).collect())
        }
        AttributeValue::Bool(b) => SdkAttributeValue::Bool(b),
        AttributeValue::Null(b) => SdkAttributeValue::Null(b),
        AttributeValue::L(list) => SdkAttributeValue::L(list.into_iter().map(to_sdk_value).collect()),
        AttributeValue::M(map) => SdkAttributeValue::M(to_sdk_item(map)),
    }
}

/// Convert one SDK value to the stored representation.
///
/// Value types this crate does not model decode as `NULL`.
#[must_use]
pub fn from_sdk_value(value: &SdkAttributeValue) -> AttributeValue {
    match value {
        SdkAttributeValue::S(s) => AttributeValue::S(s.clone()),
        SdkAttributeValue::N(n) => AttributeValue::N(n.clone()),
        SdkAttributeValue::B(b) => AttributeValue::B(b.as_ref().to_vec().into()),
        SdkAttributeValue::Ss(v) => AttributeValue::Ss(v.clone()),
        SdkAttributeValue::Ns(v) => AttributeValue::Ns(v.clone()),
        SdkAttributeValue::Bs(v) => {
            AttributeValue::Bs(v.iter().map(|b| b.as_ref().to_vec().into()).collect())
        }
        SdkAttributeValue::Bool(b) => AttributeValue::Bool(*b),
        SdkAttributeValue::Null(b) => AttributeValue::Null(*b),
        SdkAttributeValue::L(list) => AttributeValue::L(list.iter().map(from_sdk_value).collect()),
        SdkAttributeValue::M(map) => AttributeValue::M(from_sdk_item(map)),
        _ => AttributeValue::Null(true),
    }
}

fn map_sdk_error<E, R>(err: SdkError<E, R>) -> ClientError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: fmt::Debug + Send + Sync + 'static,
{
    let message = err
        .message()
        .map_or_else(|| DisplayErrorContext(&err).to_string(), str::to_owned);
    let error = match err.code() {
        Some(code) => ClientError::with_message(ClientErrorCode::from_code(code), message),
        None => ClientError::transport(message),
    };
    tracing::debug!(code = %error.code, message = %error.message, "document client call failed");
    error.with_source(err)
}
