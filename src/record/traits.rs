use crate::core::{FromValue, Result, Value};

use super::DynamicMap;

/// An immutable record made of a dynamic key/value mapping plus any
/// fields the implementing type declares itself.
///
/// Implementors provide access to their mapping and a copy constructor,
/// [`rebuild`](DynamicRecord::rebuild), that produces the same concrete
/// type with a replacement mapping and every declared field copied from
/// `self`. All updating operations go through it, so they return `Self`
/// and never reset declared fields.
///
/// The trait is usually derived:
///
/// ```
/// use dynobj::{DynamicMap, DynamicRecord};
///
/// #[derive(DynamicRecord, Debug, Clone, Default, PartialEq, Eq)]
/// struct Tagged {
///     label: i64,
///     #[dynamic]
///     entries: DynamicMap,
/// }
///
/// # fn main() -> dynobj::Result<()> {
/// let tagged = Tagged { label: 100500, ..Default::default() };
/// let next = tagged.with_entry("aaa", 5)?.without_entry("aaa");
///
/// assert_eq!(next.label, 100500);
/// assert_eq!(next, tagged);
/// # Ok(())
/// # }
/// ```
pub trait DynamicRecord: Sized {
    /// The dynamic part of the record.
    fn entries(&self) -> &DynamicMap;

    /// Same concrete record, new mapping, declared fields copied.
    fn rebuild(&self, entries: DynamicMap) -> Self;

    /// Copy with `key` set to `value`, replacing any previous value.
    fn with_entry(&self, key: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        let entries = self.entries().with_entry(key, value)?;
        Ok(self.rebuild(entries))
    }

    /// Copy without `key`. Removing a missing key is not an error.
    fn without_entry(&self, key: &str) -> Self {
        self.rebuild(self.entries().without_entry(key))
    }

    fn add_item(&self, key: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        self.with_entry(key, value)
    }

    fn remove_item(&self, key: &str) -> Self {
        self.without_entry(key)
    }

    fn with_entries<I, K, V>(&self, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let entries = self.entries().with_entries(entries)?;
        Ok(self.rebuild(entries))
    }

    fn without_entries<I, K>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        self.rebuild(self.entries().without_entries(keys))
    }

    /// Value stored under `key`, or `KeyNotFound`.
    fn lookup(&self, key: &str) -> Result<&Value> {
        self.entries().lookup(key)
    }

    fn lookup_as<T: FromValue>(&self, key: &str) -> Result<T> {
        self.entries().lookup_as(key)
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.entries().get(key)
    }

    fn contains_key(&self, key: &str) -> bool {
        self.entries().contains_key(key)
    }

    fn len(&self) -> usize {
        self.entries().len()
    }

    fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}
