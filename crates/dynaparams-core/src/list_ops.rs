//! Update fragments for list-valued fields.
//!
//! Both builders bind the list field through the `#listName` placeholder so
//! the field name may be a reserved word. Ordering of appended items and the
//! handling of an out-of-range index are left to the server.

use dynaparams_model::fragment::{
    EXPRESSION_ATTRIBUTE_NAMES, EXPRESSION_ATTRIBUTE_VALUES, UPDATE_EXPRESSION,
};
use dynaparams_model::{AttributeValue, ParamValue, RequestFragment};

const LIST_NAME_PLACEHOLDER: &str = "#listName";
const MERGE_LIST_PLACEHOLDER: &str = ":mergeList";

/// `set #listName = list_append(#listName, :mergeList)`.
///
/// A single push is a one-element `items`.
#[must_use]
pub fn append_to_list_params(list_field: &str, items: Vec<AttributeValue>) -> RequestFragment {
    RequestFragment::new()
        .with(
            UPDATE_EXPRESSION,
            format!(
                "set {LIST_NAME_PLACEHOLDER} = list_append({LIST_NAME_PLACEHOLDER}, {MERGE_LIST_PLACEHOLDER})"
            ),
        )
        .with(EXPRESSION_ATTRIBUTE_NAMES, list_name(list_field))
        .with(
            EXPRESSION_ATTRIBUTE_VALUES,
            ParamValue::attributes([(MERGE_LIST_PLACEHOLDER, AttributeValue::L(items))]),
        )
}

/// `remove #listName[index]`.
///
/// No bounds check is performed.
#[must_use]
pub fn remove_at_index_params(list_field: &str, index: usize) -> RequestFragment {
    RequestFragment::new()
        .with(
            UPDATE_EXPRESSION,
            format!("remove {LIST_NAME_PLACEHOLDER}[{index}]"),
        )
        .with(EXPRESSION_ATTRIBUTE_NAMES, list_name(list_field))
}

fn list_name(list_field: &str) -> ParamValue {
    ParamValue::mapping([(LIST_NAME_PLACEHOLDER, ParamValue::text(list_field))])
}
