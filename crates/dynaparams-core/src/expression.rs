//! Expression synthesis from field lists.
//!
//! Every builder returns a [`RequestFragment`] carrying the expression text
//! together with the placeholder maps it references, so that the result can
//! be merged straight into a request with [`merge_params`](crate::merge::merge_params).
//!
//! Placeholder conventions:
//!
//! - a simple field `name` is referenced as `#name` and bound in
//!   `ExpressionAttributeNames`;
//! - a literal bound to `name` is referenced as `:name` and bound in
//!   `ExpressionAttributeValues`;
//! - a path (`address.city`, `tags[0]`) is emitted verbatim and never bound.

use std::collections::HashSet;

use dynaparams_model::fragment::{
    EXPRESSION_ATTRIBUTE_NAMES, EXPRESSION_ATTRIBUTE_VALUES, FILTER_EXPRESSION,
    KEY_CONDITION_EXPRESSION, PROJECTION_EXPRESSION, UPDATE_EXPRESSION,
};
use dynaparams_model::{AttributeValue, ParamValue, RequestFragment};

use crate::error::{StoreError, StoreResult};

/// Name placeholder of the single-field equality condition.
///
/// Not namespaced per field: two equality conditions merged into one request
/// would bind the same placeholder twice.
pub const EQ_NAME_PLACEHOLDER: &str = "#a";
/// Value placeholder of the single-field equality condition.
pub const EQ_VALUE_PLACEHOLDER: &str = ":aa";

const SET_FIELD_NAME_PLACEHOLDER: &str = "#value";
const SET_FIELD_VALUE_PLACEHOLDER: &str = ":newValue";

/// Ordered expression tokens joined with a separator.
///
/// Joining zero tokens yields an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<String>,
}

impl TokenList {
    /// An empty token list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a token.
    pub fn push(&mut self, token: impl Into<String>) {
        self.tokens.push(token.into());
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether no token was pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Join all tokens with `separator`.
    #[must_use]
    pub fn join(&self, separator: &str) -> String {
        self.tokens.join(separator)
    }
}

impl<S: Into<String>> FromIterator<S> for TokenList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// A field reference, classified for placeholder substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRef<'a> {
    /// Top-level attribute name, referenced through a `#name` placeholder.
    Simple(&'a str),
    /// Nested or indexed path, used literally.
    Path(&'a str),
}

impl<'a> FieldRef<'a> {
    /// Classify a field name. Anything with a `.` or `[` is a path.
    #[must_use]
    pub fn classify(field: &'a str) -> Self {
        if field.contains(['.', '[']) {
            Self::Path(field)
        } else {
            Self::Simple(field)
        }
    }

    /// Token to emit into expression text.
    #[must_use]
    pub fn token(&self) -> String {
        match self {
            Self::Simple(name) => name_placeholder(name),
            Self::Path(path) => (*path).to_owned(),
        }
    }
}

/// `#name`
#[must_use]
pub fn name_placeholder(name: &str) -> String {
    format!("#{name}")
}

/// `:name`
#[must_use]
pub fn value_placeholder(name: &str) -> String {
    format!(":{name}")
}

/// Build a projection over `fields`.
///
/// `None` and an empty list both yield an empty fragment, which leaves the
/// protocol default (all fields) in effect. The names map is emitted only
/// when at least one simple field is present.
#[must_use]
pub fn projection_expression<S: AsRef<str>>(fields: Option<&[S]>) -> RequestFragment {
    let Some(fields) = fields.filter(|f| !f.is_empty()) else {
        return RequestFragment::new();
    };

    let refs: Vec<FieldRef<'_>> = fields.iter().map(|f| FieldRef::classify(f.as_ref())).collect();
    let tokens: TokenList = refs.iter().map(FieldRef::token).collect();
    let names: Vec<(String, ParamValue)> = refs
        .iter()
        .filter_map(|r| match r {
            FieldRef::Simple(name) => Some((name_placeholder(name), ParamValue::text(*name))),
            FieldRef::Path(_) => None,
        })
        .collect();

    let fragment = RequestFragment::new().with(PROJECTION_EXPRESSION, tokens.join(", "));
    if names.is_empty() {
        fragment
    } else {
        fragment.with(EXPRESSION_ATTRIBUTE_NAMES, ParamValue::mapping(names))
    }
}

/// Key condition `#a = :aa` for an indexed lookup (query).
#[must_use]
pub fn key_condition_params(key: &str, value: AttributeValue) -> RequestFragment {
    equality_params(KEY_CONDITION_EXPRESSION, key, value)
}

/// Filter `#a = :aa` for a scan.
#[must_use]
pub fn filter_params(key: &str, value: AttributeValue) -> RequestFragment {
    equality_params(FILTER_EXPRESSION, key, value)
}

fn equality_params(clause: &str, key: &str, value: AttributeValue) -> RequestFragment {
    RequestFragment::new()
        .with(
            clause,
            format!("{EQ_NAME_PLACEHOLDER} = {EQ_VALUE_PLACEHOLDER}"),
        )
        .with(
            EXPRESSION_ATTRIBUTE_NAMES,
            ParamValue::mapping([(EQ_NAME_PLACEHOLDER, ParamValue::text(key))]),
        )
        .with(
            EXPRESSION_ATTRIBUTE_VALUES,
            ParamValue::attributes([(EQ_VALUE_PLACEHOLDER, value)]),
        )
}

/// Build `set #f1 = :f1, #f2 = :f2, ...` for every `(field, value)` pair, in
/// iteration order.
///
/// An empty input is rejected: an update with no clause is not a request the
/// protocol accepts. So is a field named twice, since the server rejects
/// overlapping update paths.
pub fn update_set_params<K, I>(fields: I) -> StoreResult<RequestFragment>
where
    K: AsRef<str>,
    I: IntoIterator<Item = (K, AttributeValue)>,
{
    let mut clauses = TokenList::new();
    let mut names = Vec::new();
    let mut values = Vec::new();
    let mut seen = HashSet::new();

    for (field, value) in fields {
        let field = field.as_ref();
        if !seen.insert(field.to_owned()) {
            return Err(StoreError::DuplicateField {
                field: field.to_owned(),
            });
        }
        let name_ph = name_placeholder(field);
        let value_ph = value_placeholder(field);
        clauses.push(format!("{name_ph} = {value_ph}"));
        names.push((name_ph, ParamValue::text(field)));
        values.push((value_ph, value));
    }

    if clauses.is_empty() {
        return Err(StoreError::EmptyFieldList {
            builder: "update_set_params",
        });
    }

    Ok(RequestFragment::new()
        .with(UPDATE_EXPRESSION, format!("set {}", clauses.join(", ")))
        .with(EXPRESSION_ATTRIBUTE_NAMES, ParamValue::mapping(names))
        .with(EXPRESSION_ATTRIBUTE_VALUES, ParamValue::attributes(values)))
}

/// Build `set #value = :newValue` replacing one field.
#[must_use]
pub fn set_field_params(field: &str, value: AttributeValue) -> RequestFragment {
    RequestFragment::new()
        .with(
            UPDATE_EXPRESSION,
            format!("set {SET_FIELD_NAME_PLACEHOLDER} = {SET_FIELD_VALUE_PLACEHOLDER}"),
        )
        .with(
            EXPRESSION_ATTRIBUTE_NAMES,
            ParamValue::mapping([(SET_FIELD_NAME_PLACEHOLDER, ParamValue::text(field))]),
        )
        .with(
            EXPRESSION_ATTRIBUTE_VALUES,
            ParamValue::attributes([(SET_FIELD_VALUE_PLACEHOLDER, value)]),
        )
}

/// Conjunction of `attribute_not_exists(field)` over `fields`.
///
/// Field names are emitted literally. An empty list yields `""`, which is
/// vacuously true and should be left out of the request.
#[must_use]
pub fn absent_fields_condition<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| format!("attribute_not_exists({})", f.as_ref()))
        .collect::<TokenList>()
        .join(" and ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names_of(fragment: &RequestFragment) -> std::collections::HashMap<String, String> {
        fragment
            .text_map(EXPRESSION_ATTRIBUTE_NAMES)
            .unwrap_or_default()
    }

    #[test]
    fn test_should_reconstruct_simple_projection_from_names() {
        let fields = ["name", "email", "createdAt"];
        let fragment = projection_expression(Some(&fields[..]));
        let names = names_of(&fragment);

        let expression = fragment.text(PROJECTION_EXPRESSION).unwrap();
        let substituted: Vec<&str> = expression
            .split(", ")
            .map(|token| names.get(token).map_or(token, String::as_str))
            .collect();
        assert_eq!(substituted.join(", "), "name, email, createdAt");
    }

    #[test]
    fn test_should_keep_paths_literal_and_out_of_names() {
        let fields = ["name", "address.city", "tags[0]"];
        let fragment = projection_expression(Some(&fields[..]));
        assert_eq!(
            fragment.text(PROJECTION_EXPRESSION),
            Some("#name, address.city, tags[0]")
        );
        let names = names_of(&fragment);
        assert_eq!(names.len(), 1);
        assert_eq!(names.get("#name").map(String::as_str), Some("name"));
        assert!(names.values().all(|v| !v.contains('.')));
    }

    #[test]
    fn test_should_omit_names_map_for_paths_only() {
        let fragment = projection_expression(Some(&["a.b", "c.d"][..]));
        assert_eq!(fragment.text(PROJECTION_EXPRESSION), Some("a.b, c.d"));
        assert!(!fragment.contains(EXPRESSION_ATTRIBUTE_NAMES));
    }

    #[test]
    fn test_should_return_empty_fragment_for_absent_or_empty_fields() {
        assert!(projection_expression(None::<&[&str]>).is_empty());
        assert!(projection_expression(Some(&[] as &[&str])).is_empty());
    }

    #[test]
    fn test_should_build_key_condition_and_filter_variants() {
        let key = key_condition_params("userId", AttributeValue::from("u1"));
        assert_eq!(key.text(KEY_CONDITION_EXPRESSION), Some("#a = :aa"));
        assert!(!key.contains(FILTER_EXPRESSION));

        let filter = filter_params("status", AttributeValue::from("open"));
        assert_eq!(filter.text(FILTER_EXPRESSION), Some("#a = :aa"));
        assert_eq!(
            names_of(&filter).get("#a").map(String::as_str),
            Some("status")
        );
        assert_eq!(
            filter
                .item(EXPRESSION_ATTRIBUTE_VALUES)
                .and_then(|v| v.get(":aa").cloned()),
            Some(AttributeValue::from("open"))
        );
    }

    #[test]
    fn test_should_build_update_set_in_input_order() {
        let fragment = update_set_params([
            ("name", AttributeValue::from("Ann")),
            ("age", AttributeValue::number(31)),
        ])
        .unwrap();
        assert_eq!(
            fragment.text(UPDATE_EXPRESSION),
            Some("set #name = :name, #age = :age")
        );
        let names = names_of(&fragment);
        assert_eq!(names.get("#age").map(String::as_str), Some("age"));
        let values = fragment.item(EXPRESSION_ATTRIBUTE_VALUES).unwrap();
        assert_eq!(values.get(":name"), Some(&AttributeValue::from("Ann")));
        assert_eq!(values.get(":age"), Some(&AttributeValue::number(31)));
    }

    #[test]
    fn test_should_reject_empty_update_set() {
        let result = update_set_params(Vec::<(String, AttributeValue)>::new());
        assert!(matches!(
            result,
            Err(StoreError::EmptyFieldList {
                builder: "update_set_params"
            })
        ));
    }

    #[test]
    fn test_should_reject_repeated_update_field() {
        let result = update_set_params([
            ("name", AttributeValue::from("Ann")),
            ("age", AttributeValue::number(31)),
            ("name", AttributeValue::from("Bea")),
        ]);
        assert!(matches!(
            result,
            Err(StoreError::DuplicateField { field }) if field == "name"
        ));
    }

    #[test]
    fn test_should_build_single_field_update() {
        let fragment = set_field_params("status", AttributeValue::from("done"));
        assert_eq!(
            fragment.text(UPDATE_EXPRESSION),
            Some("set #value = :newValue")
        );
        assert_eq!(
            names_of(&fragment).get("#value").map(String::as_str),
            Some("status")
        );
    }

    #[test]
    fn test_should_join_absent_field_predicates() {
        assert_eq!(
            absent_fields_condition(&["a", "b"]),
            "attribute_not_exists(a) and attribute_not_exists(b)"
        );
        assert_eq!(absent_fields_condition(&["id"]), "attribute_not_exists(id)");
        assert_eq!(absent_fields_condition::<&str>(&[]), "");
    }

    #[test]
    fn test_should_join_zero_tokens_to_empty_string() {
        assert_eq!(TokenList::new().join(", "), "");
        let tokens: TokenList = ["x"].into_iter().collect();
        assert_eq!(tokens.join(", "), "x");
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        fn arb_simple() -> impl Strategy<Value = String> {
            "[a-z][a-zA-Z0-9_]{0,8}"
        }

        fn arb_path() -> impl Strategy<Value = String> {
            prop_oneof![
                "[a-z]{1,5}\\.[a-z]{1,5}",
                "[a-z]{1,5}\\[[0-9]{1,2}\\]",
            ]
        }

        fn substitute(fragment: &RequestFragment) -> String {
            let names = names_of(fragment);
            fragment
                .text(PROJECTION_EXPRESSION)
                .unwrap_or_default()
                .split(", ")
                .map(|token| names.get(token).map_or(token, String::as_str))
                .collect::<Vec<_>>()
                .join(", ")
        }

        proptest! {
            #[test]
            fn test_should_rebuild_any_simple_field_list(
                fields in prop::collection::vec(arb_simple(), 1..8),
            ) {
                let fragment = projection_expression(Some(&fields[..]));
                prop_assert_eq!(substitute(&fragment), fields.join(", "));
            }

            #[test]
            fn test_should_never_bind_paths_as_names(
                fields in prop::collection::vec(prop_oneof![arb_simple(), arb_path()], 1..8),
            ) {
                let fragment = projection_expression(Some(&fields[..]));
                let names = names_of(&fragment);
                for field in fields.iter().filter(|f| f.contains(['.', '['])) {
                    prop_assert!(!names.contains_key(&name_placeholder(field)));
                    prop_assert!(names.values().all(|v| v != field));
                }
                prop_assert_eq!(substitute(&fragment), fields.join(", "));
            }
        }
    }
}
