//! Identifier generation for new items.

use std::fmt;

use dynaparams_model::{AttributeValue, Item};

/// Source of fresh, unique identifier strings.
pub trait IdGenerator: fmt::Debug + Send + Sync {
    /// Produce an identifier not produced before.
    fn generate(&self) -> String;
}

/// Random v4 UUIDs in simple (dash-free) form behind a fixed prefix.
///
/// # Examples
///
/// ```
/// use dynaparams_core::id::{IdGenerator, UuidIdGenerator};
///
/// let id = UuidIdGenerator::default().generate();
/// assert!(id.starts_with('a'));
/// assert_eq!(id.len(), 33);
/// ```
#[derive(Debug, Clone)]
pub struct UuidIdGenerator {
    prefix: String,
}

impl UuidIdGenerator {
    /// Generator emitting `<prefix><32 hex digits>`.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for UuidIdGenerator {
    fn default() -> Self {
        Self::new("a")
    }
}

impl IdGenerator for UuidIdGenerator {
    fn generate(&self) -> String {
        format!("{}{}", self.prefix, uuid::Uuid::new_v4().simple())
    }
}

/// Return `item` with `field` set to a fresh id, unless it already has one.
///
/// A missing field, a null, or an empty string all count as "no id". Any
/// other value, including `0` and `false`, is kept.
#[must_use]
pub fn with_id(mut item: Item, field: &str, ids: &dyn IdGenerator) -> Item {
    if item.get(field).is_some_and(AttributeValue::is_present) {
        return item;
    }
    item.insert(field.to_owned(), AttributeValue::S(ids.generate()));
    item
}
