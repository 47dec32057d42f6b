use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use tracing::{debug, trace};

use crate::core::{DynObjError, FromValue, KeyPolicy, Result, Value};

/// Persistent string-keyed mapping backing every dynamic record.
///
/// Every update returns a new map; unchanged structure is shared with
/// the source map, so copies stay cheap. The key policy travels with the
/// map but takes no part in equality or hashing.
#[derive(Clone, Default)]
pub struct DynamicMap {
    entries: im::HashMap<String, Value>,
    policy: KeyPolicy,
}

impl DynamicMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the key policy used by subsequent additions.
    ///
    /// Entries already present are kept as they are.
    pub fn with_policy(mut self, policy: KeyPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &KeyPolicy {
        &self.policy
    }

    /// Build a map from `(key, value)` pairs. Later pairs win on duplicate keys.
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::new().with_entries(entries)
    }

    pub fn with_entry(&self, key: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        let key = key.into();
        self.check_key(&key)?;

        let entries = self.entries.update(key, value.into());
        trace!(len = entries.len(), "dynamic entry set");
        Ok(Self {
            entries,
            policy: self.policy,
        })
    }

    /// Copy without `key`. A missing key yields an equal copy.
    pub fn without_entry(&self, key: &str) -> Self {
        if !self.entries.contains_key(key) {
            trace!(key, "dynamic entry absent, nothing to remove");
            return self.clone();
        }

        let entries = self.entries.without(key);
        trace!(key, len = entries.len(), "dynamic entry removed");
        Self {
            entries,
            policy: self.policy,
        }
    }

    /// Add several entries at once. Nothing is produced if any key is rejected.
    pub fn with_entries<I, K, V>(&self, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut next = self.entries.clone();
        for (key, value) in entries {
            let key = key.into();
            self.check_key(&key)?;
            next.insert(key, value.into());
        }

        trace!(len = next.len(), "dynamic entries set");
        Ok(Self {
            entries: next,
            policy: self.policy,
        })
    }

    pub fn without_entries<I, K>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut next = self.entries.clone();
        for key in keys {
            next.remove(key.as_ref());
        }

        trace!(len = next.len(), "dynamic entries removed");
        Self {
            entries: next,
            policy: self.policy,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn lookup(&self, key: &str) -> Result<&Value> {
        self.entries
            .get(key)
            .ok_or_else(|| DynObjError::KeyNotFound(key.to_string()))
    }

    pub fn lookup_as<T: FromValue>(&self, key: &str) -> Result<T> {
        let value = self.lookup(key)?;
        T::from_value(value).ok_or_else(|| DynObjError::TypeMismatch {
            key: key.to_string(),
            expected: T::TYPE_NAME,
            found: value.type_name(),
        })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Entries sorted by key, for stable output.
    pub fn sorted_entries(&self) -> Vec<(&str, &Value)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        entries
    }

    fn check_key(&self, key: &str) -> Result<()> {
        self.policy.validate(key).inspect_err(|err| {
            debug!(error = %err, "dynamic key rejected");
        })
    }
}

impl PartialEq for DynamicMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for DynamicMap {}

impl Hash for DynamicMap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Iteration order is unspecified, so entry hashes are combined
        // with a commutative operation.
        let combined = self
            .entries
            .iter()
            .map(|(key, value)| {
                let mut hasher = DefaultHasher::new();
                key.hash(&mut hasher);
                value.hash(&mut hasher);
                hasher.finish()
            })
            .fold(0u64, u64::wrapping_add);

        self.entries.len().hash(state);
        combined.hash(state);
    }
}

impl fmt::Debug for DynamicMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.sorted_entries()).finish()
    }
}

impl fmt::Display for DynamicMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (idx, (key, value)) in self.sorted_entries().into_iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}

impl<'a> IntoIterator for &'a DynamicMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = im::hashmap::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash_of(map: &DynamicMap) -> u64 {
        let mut hasher = DefaultHasher::new();
        map.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_with_entry_leaves_source_untouched() {
        let base = DynamicMap::new().with_entry("aa", 4).unwrap();
        let next = base.with_entry("bb", 10).unwrap();

        assert_eq!(base.len(), 1);
        assert!(base.get("bb").is_none());
        assert_eq!(next.len(), 2);
        assert_eq!(next.lookup("bb").unwrap(), &Value::Integer(10));
    }

    #[test]
    fn test_overwrite_keeps_single_entry() {
        let map = DynamicMap::new()
            .with_entry("k", 1)
            .unwrap()
            .with_entry("k", 2)
            .unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(map.lookup_as::<i64>("k").unwrap(), 2);
    }

    #[test]
    fn test_without_missing_key_is_noop() {
        let map = DynamicMap::new().with_entry("aa", 4).unwrap();
        assert_eq!(map.without_entry("zz"), map);
    }

    #[test]
    fn test_lookup_missing_key() {
        let map = DynamicMap::new();
        assert_eq!(
            map.lookup("aa"),
            Err(DynObjError::KeyNotFound("aa".to_string()))
        );
    }

    #[test]
    fn test_lookup_as_type_mismatch() {
        let map = DynamicMap::new().with_entry("name", "bob").unwrap();
        let err = map.lookup_as::<i64>("name").unwrap_err();
        assert_eq!(
            err,
            DynObjError::TypeMismatch {
                key: "name".into(),
                expected: "INTEGER",
                found: "TEXT",
            }
        );
    }

    #[test]
    fn test_empty_key_rejected_by_default() {
        let err = DynamicMap::new().with_entry("", 1).unwrap_err();
        assert!(err.is_invalid_key());

        let permissive = DynamicMap::new().with_policy(KeyPolicy::permissive());
        assert!(permissive.with_entry("", 1).is_ok());
    }

    #[test]
    fn test_policy_is_inherited_and_ignored_by_equality() {
        let strict = DynamicMap::new().with_policy(KeyPolicy::new().max_len(2));
        let derived = strict.with_entry("ab", 1).unwrap();

        assert!(derived.with_entry("abc", 1).is_err());
        assert_eq!(derived, DynamicMap::from_entries([("ab", 1)]).unwrap());
    }

    #[test]
    fn test_with_entries_is_all_or_nothing() {
        let base = DynamicMap::new().with_entry("x", 1).unwrap();
        let result = base.with_entries([("y", 2), ("", 3)]);

        assert!(result.is_err());
        assert_eq!(base.len(), 1);
    }

    #[test]
    fn test_without_entries() {
        let map = DynamicMap::from_entries([("a", 1), ("b", 2), ("c", 3)]).unwrap();
        let trimmed = map.without_entries(["a", "c", "missing"]);

        assert_eq!(trimmed, DynamicMap::from_entries([("b", 2)]).unwrap());
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let left = DynamicMap::from_entries([("a", 1), ("b", 2)]).unwrap();
        let right = DynamicMap::from_entries([("b", 2), ("a", 1)]).unwrap();

        assert_eq!(left, right);
        assert_eq!(hash_of(&left), hash_of(&right));
    }

    #[test]
    fn test_display_is_sorted() {
        let map = DynamicMap::from_entries([("b", Value::from("x")), ("a", Value::from(1))]).unwrap();
        assert_eq!(map.to_string(), "{a: 1, b: \"x\"}");
    }
}
