//! Combining partial request fragments into one request.
//!
//! Fragments are folded left to right over an empty fragment. For every
//! parameter that two fragments both set:
//!
//! - sequence + sequence: concatenated, earlier elements first;
//! - mapping + mapping: unioned, the later fragment winning shared keys;
//! - anything else: the later value replaces the earlier one.
//!
//! The union is shallow. Nested mappings under a shared key are replaced,
//! not merged.

use std::collections::btree_map::Entry;

use dynaparams_model::{ParamValue, RequestFragment};

/// Merge fragments in argument order.
///
/// # Examples
///
/// ```
/// use dynaparams_core::merge::merge_params;
/// use dynaparams_model::{ParamValue, RequestFragment};
///
/// let a = RequestFragment::new().with("x", ParamValue::Sequence(vec![ParamValue::Int(1)]));
/// let b = RequestFragment::new().with("x", ParamValue::Sequence(vec![ParamValue::Int(2)]));
/// let merged = merge_params([a, b]);
/// assert_eq!(
///     merged.get("x"),
///     Some(&ParamValue::Sequence(vec![ParamValue::Int(1), ParamValue::Int(2)]))
/// );
/// ```
#[must_use]
pub fn merge_params<I>(fragments: I) -> RequestFragment
where
    I: IntoIterator<Item = RequestFragment>,
{
    fragments
        .into_iter()
        .fold(RequestFragment::new(), |mut acc, fragment| {
            merge_into(&mut acc, fragment);
            acc
        })
}

/// Merge `source` into `target` in place.
pub fn merge_into(target: &mut RequestFragment, source: RequestFragment) {
    for (key, incoming) in source {
        match target.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(incoming);
            }
            Entry::Occupied(mut slot) => merge_value(slot.get_mut(), incoming),
        }
    }
}

fn merge_value(existing: &mut ParamValue, incoming: ParamValue) {
    match (existing, incoming) {
        (ParamValue::Sequence(acc), ParamValue::Sequence(more)) => acc.extend(more),
        (ParamValue::Mapping(acc), ParamValue::Mapping(more)) => acc.extend(more),
        (slot, value) => *slot = value,
    }
}
