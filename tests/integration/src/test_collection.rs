//! Collection round-trips against a running server.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use dynaparams_model::{AttributeValue, ClientErrorCode, Item, RequestFragment};

    use crate::{collection, create_table, delete_table, test_table_name};

    fn user(id: &str, name: &str) -> Item {
        HashMap::from([
            ("id".to_owned(), AttributeValue::from(id)),
            ("name".to_owned(), AttributeValue::from(name)),
            ("tags".to_owned(), AttributeValue::L(vec![])),
        ])
    }

    fn key(table: &str, id: &str) -> RequestFragment {
        RequestFragment::for_key(table, [("id", AttributeValue::from(id))])
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_put_and_get_item() -> anyhow::Result<()> {
        let users = collection();
        let table = test_table_name("put-get");
        create_table(users.client().inner(), &table, "id", None).await?;

        users.put(&table, user("u1", "Ann")).await?;
        let item = users.get_by_key(key(&table, "u1"), Some(&["name"][..])).await?;
        assert_eq!(
            item.as_ref()
                .and_then(|i| i.get("name"))
                .and_then(AttributeValue::as_s),
            Some("Ann")
        );
        assert!(item.is_some_and(|i| !i.contains_key("tags")));

        let missing = users.get_by_key(key(&table, "nobody"), None).await?;
        assert!(missing.is_none());

        delete_table(users.client().inner(), &table).await;
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_update_fields_and_lists() -> anyhow::Result<()> {
        let users = collection();
        let table = test_table_name("update");
        create_table(users.client().inner(), &table, "id", None).await?;

        users.put(&table, user("u1", "Ann")).await?;
        users
            .set_fields(
                key(&table, "u1"),
                [
                    ("name", AttributeValue::from("Bea")),
                    ("age", AttributeValue::number(41)),
                ],
            )
            .await?;
        users
            .append_to_list(
                key(&table, "u1"),
                "tags",
                vec![AttributeValue::from("x"), AttributeValue::from("y")],
            )
            .await?;
        users
            .push_to_list(key(&table, "u1"), "tags", AttributeValue::from("z"))
            .await?;
        users.remove_from_list_at(key(&table, "u1"), "tags", 0).await?;

        let item = users
            .get_by_key(key(&table, "u1"), None)
            .await?
            .unwrap_or_default();
        assert_eq!(item.get("name").and_then(AttributeValue::as_s), Some("Bea"));
        assert_eq!(item.get("age"), Some(&AttributeValue::number(41)));
        assert_eq!(
            item.get("tags").and_then(AttributeValue::as_l),
            Some(&[AttributeValue::from("y"), AttributeValue::from("z")][..])
        );

        delete_table(users.client().inner(), &table).await;
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_put_over_existing_item() -> anyhow::Result<()> {
        let users = collection();
        let table = test_table_name("guard");
        create_table(users.client().inner(), &table, "id", None).await?;

        users.put_if_absent(&table, user("u1", "Ann"), &["id"]).await?;
        let err = users
            .put_if_absent(&table, user("u1", "Bea"), &["id"])
            .await
            .expect_err("second insert must fail");
        assert_eq!(
            err.as_client_error().map(|e| e.code),
            Some(ClientErrorCode::ConditionalCheckFailedException)
        );

        delete_table(users.client().inner(), &table).await;
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_assign_generated_ids() -> anyhow::Result<()> {
        let users = collection();
        let table = test_table_name("ids");
        create_table(users.client().inner(), &table, "id", None).await?;

        let item = users.with_id(HashMap::from([(
            "name".to_owned(),
            AttributeValue::from("Cy"),
        )]));
        let id = item
            .get("id")
            .and_then(AttributeValue::as_s)
            .unwrap_or_default()
            .to_owned();
        assert!(id.starts_with('a'));
        users.put(&table, item).await?;

        let found = users
            .find_by(&table, "name", AttributeValue::from("Cy"), None)
            .await?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get("id").and_then(AttributeValue::as_s), Some(id.as_str()));

        delete_table(users.client().inner(), &table).await;
        Ok(())
    }
}
