//! Paged listings against a running server.

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use dynaparams_core::ListOperation;
    use dynaparams_model::fragment::LIMIT;
    use dynaparams_model::{AttributeValue, ParamValue, RequestFragment};

    use crate::{collection, create_table, delete_table, test_table_name};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_collect_every_page_of_scan() -> anyhow::Result<()> {
        let store = collection();
        let table = test_table_name("scan");
        create_table(store.client().inner(), &table, "id", None).await?;

        for n in 0..23 {
            let item = HashMap::from([
                ("id".to_owned(), AttributeValue::from(format!("item-{n:02}"))),
                ("n".to_owned(), AttributeValue::number(n)),
            ]);
            store.put(&table, item).await?;
        }

        let request = RequestFragment::for_table(&table).with(LIMIT, ParamValue::Int(5));
        let rows = store.list_all(ListOperation::Scan, request).await?;
        let ids: HashSet<&str> = rows
            .iter()
            .filter_map(|row| row.get("id").and_then(AttributeValue::as_s))
            .collect();
        assert_eq!(rows.len(), 23);
        assert_eq!(ids.len(), 23);

        let all = store.get_all(&table, Some(&["id"][..])).await?;
        assert_eq!(all.len(), 23);
        assert!(all.iter().all(|row| row.len() == 1));

        delete_table(store.client().inner(), &table).await;
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_query_one_partition() -> anyhow::Result<()> {
        let store = collection();
        let table = test_table_name("query");
        create_table(store.client().inner(), &table, "owner", Some("seq")).await?;

        for (owner, seq) in [("ann", "1"), ("ann", "2"), ("ann", "3"), ("bea", "1")] {
            let item = HashMap::from([
                ("owner".to_owned(), AttributeValue::from(owner)),
                ("seq".to_owned(), AttributeValue::from(seq)),
            ]);
            store.put(&table, item).await?;
        }

        let rows = store
            .query_by_key(&table, "owner", AttributeValue::from("ann"))
            .await?;
        let seqs: Vec<&str> = rows
            .iter()
            .filter_map(|row| row.get("seq").and_then(AttributeValue::as_s))
            .collect();
        assert_eq!(seqs, ["1", "2", "3"]);

        delete_table(store.client().inner(), &table).await;
        Ok(())
    }
}
