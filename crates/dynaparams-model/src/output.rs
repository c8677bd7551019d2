//! Response envelopes returned by a document client.
//!
//! Field naming follows the protocol's `PascalCase` JSON. An absent or empty
//! `LastEvaluatedKey` means the listing is exhausted.

use serde::{Deserialize, Serialize};

use crate::attribute_value::Item;

/// Response of a point lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetOutput {
    /// The item, or `None` when no item has the requested key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
}

impl GetOutput {
    /// An envelope carrying `item`.
    #[must_use]
    pub fn found(item: Item) -> Self {
        Self { item: Some(item) }
    }

    /// An empty envelope.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// One page of a scan or query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PageOutput {
    /// Items on this page, in server order.
    #[serde(default)]
    pub items: Vec<Item>,

    /// Key to resume from. Absent on the last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_evaluated_key: Option<Item>,
}

impl PageOutput {
    /// A page followed by more results.
    #[must_use]
    pub fn with_cursor(items: Vec<Item>, cursor: Item) -> Self {
        Self {
            items,
            last_evaluated_key: Some(cursor),
        }
    }

    /// The final page.
    #[must_use]
    pub fn last(items: Vec<Item>) -> Self {
        Self {
            items,
            last_evaluated_key: None,
        }
    }

    /// The continuation cursor, if more results remain.
    ///
    /// An empty key map is treated the same as an absent one.
    #[must_use]
    pub fn cursor(&self) -> Option<&Item> {
        self.last_evaluated_key.as_ref().filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::attribute_value::AttributeValue;

    #[test]
    fn test_should_deserialize_empty_get_envelope() {
        let out: GetOutput = serde_json::from_str("{}").unwrap();
        assert!(out.item.is_none());
    }

    #[test]
    fn test_should_deserialize_page_with_cursor() {
        let json = r#"{"Items":[{"id":{"S":"a1"}}],"LastEvaluatedKey":{"id":{"S":"a1"}}}"#;
        let page: PageOutput = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(
            page.cursor().and_then(|k| k.get("id")),
            Some(&AttributeValue::from("a1"))
        );
    }

    #[test]
    fn test_should_treat_empty_cursor_as_exhausted() {
        let page = PageOutput::with_cursor(vec![], HashMap::new());
        assert!(page.cursor().is_none());
    }
}
