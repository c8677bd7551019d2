//! High-level collection operations over a [`DocumentClient`].
//!
//! Each operation builds its request from the expression builders, merges it
//! with the caller's key or table parameters, and submits it. Listings are
//! paged to exhaustion. Client failures come back as
//! [`StoreError::Transport`] carrying the client's error unchanged; a missing
//! item is `Ok(None)`.

use std::sync::Arc;

use dynaparams_model::fragment::{CONDITION_EXPRESSION, EXPRESSION_ATTRIBUTE_NAMES, ITEM};
use dynaparams_model::types::ScalarAttributeType;
use dynaparams_model::{AttributeValue, Item, ParamValue, RequestFragment};
use tracing::debug;

use crate::client::{DocumentClient, ListOperation};
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::expression::{
    EQ_NAME_PLACEHOLDER, absent_fields_condition, filter_params, key_condition_params, projection_expression,
    set_field_params, update_set_params,
};
use crate::id::{IdGenerator, UuidIdGenerator, with_id};
use crate::list_ops::{append_to_list_params, remove_at_index_params};
use crate::merge::merge_params;
use crate::paginate::drive_pagination;
use crate::schema;

/// Document operations bound to one client.
///
/// # Examples
///
/// ```no_run
/// use dynaparams_core::client::DocumentClient;
/// use dynaparams_core::collection::Collection;
/// use dynaparams_model::{AttributeValue, RequestFragment};
///
/// async fn rename<C: DocumentClient>(users: &Collection<C>) -> dynaparams_core::StoreResult<()> {
///     let key = RequestFragment::for_key("users", [("id", AttributeValue::from("a1"))]);
///     users.set_field(key, "name", AttributeValue::from("Ann")).await
/// }
/// ```
#[derive(Debug)]
pub struct Collection<C> {
    client: C,
    ids: Arc<dyn IdGenerator>,
    config: StoreConfig,
}

impl<C: DocumentClient> Collection<C> {
    /// Collection with the default configuration.
    #[must_use]
    pub fn new(client: C) -> Self {
        Self::with_config(client, StoreConfig::default())
    }

    /// Collection with an explicit configuration.
    #[must_use]
    pub fn with_config(client: C, config: StoreConfig) -> Self {
        Self {
            client,
            ids: Arc::new(UuidIdGenerator::new(config.id_prefix.clone())),
            config,
        }
    }

    /// Replace the identifier generator.
    #[must_use]
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    /// The underlying client.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Every item of `table`, optionally projected onto `fields`.
    pub async fn get_all(&self, table: &str, fields: Option<&[&str]>) -> StoreResult<Vec<Item>> {
        let request = merge_params([
            RequestFragment::for_table(table),
            projection_expression(fields),
        ]);
        self.list_all(ListOperation::Scan, request).await
    }

    /// Every item of `table` whose `field` equals `value` (filtered scan).
    ///
    /// The filter binds `#a`, so projecting a field literally named `a` is
    /// rejected with [`StoreError::PlaceholderCollision`] before any request
    /// is sent.
    pub async fn find_by(
        &self,
        table: &str,
        field: &str,
        value: AttributeValue,
        fields: Option<&[&str]>,
    ) -> StoreResult<Vec<Item>> {
        let projection = projection_expression(fields);
        if projection
            .text_map(EXPRESSION_ATTRIBUTE_NAMES)
            .is_some_and(|names| names.contains_key(EQ_NAME_PLACEHOLDER))
        {
            return Err(StoreError::PlaceholderCollision {
                placeholder: EQ_NAME_PLACEHOLDER,
            });
        }
        let request = merge_params([
            RequestFragment::for_table(table),
            projection,
            filter_params(field, value),
        ]);
        self.list_all(ListOperation::Scan, request).await
    }

    /// Every item of `table` whose partition key `key` equals `value`.
    pub async fn query_by_key(
        &self,
        table: &str,
        key: &str,
        value: AttributeValue,
    ) -> StoreResult<Vec<Item>> {
        let request = merge_params([
            RequestFragment::for_table(table),
            key_condition_params(key, value),
        ]);
        self.list_all(ListOperation::Query, request).await
    }

    /// Page through `op` starting from `request` and collect all rows.
    pub async fn list_all(
        &self,
        op: ListOperation,
        request: RequestFragment,
    ) -> StoreResult<Vec<Item>> {
        debug!(
            operation = %op,
            table = request.table_name().unwrap_or_default(),
            "listing all items"
        );
        let client = &self.client;
        let rows = drive_pagination(move |req| op.submit(client, req), request).await?;
        Ok(rows)
    }

    /// The item addressed by `key_params`, or `None` if there is none.
    pub async fn get_by_key(
        &self,
        key_params: RequestFragment,
        fields: Option<&[&str]>,
    ) -> StoreResult<Option<Item>> {
        let request = merge_params([key_params, projection_expression(fields)]);
        let table = request.table_name().unwrap_or_default().to_owned();
        let output = self.client.get(request).await?;
        if output.item.is_none() {
            debug!(table = %table, "item not found");
        }
        Ok(output.item)
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert or replace `item` in `table`.
    pub async fn put(&self, table: &str, item: Item) -> StoreResult<()> {
        debug!(table, "putting item");
        let request = RequestFragment::for_table(table).with(ITEM, ParamValue::attributes(item));
        self.client.put(request).await?;
        Ok(())
    }

    /// Insert `item` only if none of `guard_fields` exist on the stored item.
    ///
    /// With no guard fields this is a plain put.
    pub async fn put_if_absent(
        &self,
        table: &str,
        item: Item,
        guard_fields: &[&str],
    ) -> StoreResult<()> {
        let condition = absent_fields_condition(guard_fields);
        let mut request =
            RequestFragment::for_table(table).with(ITEM, ParamValue::attributes(item));
        if !condition.is_empty() {
            request.insert(CONDITION_EXPRESSION, condition);
        }
        debug!(table, guards = guard_fields.len(), "putting item if absent");
        self.client.put(request).await?;
        Ok(())
    }

    /// Replace one field of the addressed item.
    pub async fn set_field(
        &self,
        key_params: RequestFragment,
        field: &str,
        value: AttributeValue,
    ) -> StoreResult<()> {
        self.submit_update(key_params, set_field_params(field, value))
            .await
    }

    /// Replace several fields of the addressed item in one request.
    pub async fn set_fields<K, I>(&self, key_params: RequestFragment, fields: I) -> StoreResult<()>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, AttributeValue)>,
    {
        let update = update_set_params(fields)?;
        self.submit_update(key_params, update).await
    }

    /// Append `items` after the existing elements of `list_field`.
    pub async fn append_to_list(
        &self,
        key_params: RequestFragment,
        list_field: &str,
        items: Vec<AttributeValue>,
    ) -> StoreResult<()> {
        self.submit_update(key_params, append_to_list_params(list_field, items))
            .await
    }

    /// Append one element to `list_field`.
    pub async fn push_to_list(
        &self,
        key_params: RequestFragment,
        list_field: &str,
        item: AttributeValue,
    ) -> StoreResult<()> {
        self.append_to_list(key_params, list_field, vec![item]).await
    }

    /// Remove the element at `index` of `list_field`.
    pub async fn remove_from_list_at(
        &self,
        key_params: RequestFragment,
        list_field: &str,
        index: usize,
    ) -> StoreResult<()> {
        self.submit_update(key_params, remove_at_index_params(list_field, index))
            .await
    }

    async fn submit_update(
        &self,
        key_params: RequestFragment,
        update: RequestFragment,
    ) -> StoreResult<()> {
        let request = merge_params([key_params, update]);
        debug!(
            table = request.table_name().unwrap_or_default(),
            "updating item"
        );
        self.client.update(request).await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Identifiers and table definitions
    // -----------------------------------------------------------------------

    /// A fresh identifier.
    #[must_use]
    pub fn new_id(&self) -> String {
        self.ids.generate()
    }

    /// `item` with an identifier in the configured id field, keeping an
    /// existing one.
    #[must_use]
    pub fn with_id(&self, item: Item) -> Item {
        with_id(item, &self.config.id_field, self.ids.as_ref())
    }

    /// Definition of a table keyed by the configured id field.
    #[must_use]
    pub fn table_params(&self, table: &str, key_type: ScalarAttributeType) -> RequestFragment {
        schema::table_params(
            table,
            &self.config.id_field,
            key_type,
            self.config.default_throughput,
        )
    }
}
