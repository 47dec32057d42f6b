use std::fmt;

use crate::core::{KeyPolicy, Result, Value};

use super::{DynamicMap, DynamicRecord};

/// Record with no declared fields: just the dynamic mapping.
///
/// ```
/// use dynobj::{DynamicRecord, ImmutableDynamicObj};
///
/// # fn main() -> dynobj::Result<()> {
/// let left = ImmutableDynamicObj::new()
///     .with_entry("aa", 4)?
///     .with_entry("bb", 10)?
///     .without_entry("aa");
/// let right = ImmutableDynamicObj::new().with_entry("bb", 10)?;
///
/// assert_eq!(left, right);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ImmutableDynamicObj {
    entries: DynamicMap,
}

impl ImmutableDynamicObj {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty object whose keys are checked against `policy`.
    pub fn with_policy(policy: KeyPolicy) -> Self {
        Self {
            entries: DynamicMap::new().with_policy(policy),
        }
    }

    pub fn from_entries<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Ok(Self {
            entries: DynamicMap::from_entries(entries)?,
        })
    }

    pub fn into_entries(self) -> DynamicMap {
        self.entries
    }
}

impl DynamicRecord for ImmutableDynamicObj {
    fn entries(&self) -> &DynamicMap {
        &self.entries
    }

    fn rebuild(&self, entries: DynamicMap) -> Self {
        Self { entries }
    }
}

impl From<DynamicMap> for ImmutableDynamicObj {
    fn from(entries: DynamicMap) -> Self {
        Self { entries }
    }
}

impl fmt::Display for ImmutableDynamicObj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DynObjError;

    #[test]
    fn test_add_then_remove_equals_direct_build() {
        let obj1 = ImmutableDynamicObj::new()
            .with_entry("aa", 4)
            .unwrap()
            .with_entry("bb", 10)
            .unwrap()
            .without_entry("aa");
        let obj2 = ImmutableDynamicObj::new().with_entry("bb", 10).unwrap();

        assert_eq!(obj1, obj2);
    }

    #[test]
    fn test_aliases_match_primary_operations() {
        let obj = ImmutableDynamicObj::new();
        assert_eq!(
            obj.add_item("k", 1).unwrap(),
            obj.with_entry("k", 1).unwrap()
        );

        let filled = obj.add_item("k", 1).unwrap();
        assert_eq!(filled.remove_item("k"), filled.without_entry("k"));
    }

    #[test]
    fn test_lookup() {
        let obj = ImmutableDynamicObj::from_entries([("aaa", 5)]).unwrap();

        assert_eq!(obj.lookup("aaa").unwrap(), &Value::Integer(5));
        assert_eq!(
            obj.lookup("bbb").unwrap_err(),
            DynObjError::KeyNotFound("bbb".to_string())
        );
    }

    #[test]
    fn test_policy_survives_updates() {
        let obj = ImmutableDynamicObj::with_policy(KeyPolicy::permissive());
        let next = obj.with_entry("", 1).unwrap().with_entry("x", 2).unwrap();

        assert_eq!(next.len(), 2);
        assert_eq!(next.entries().policy(), &KeyPolicy::permissive());
    }

    #[test]
    fn test_display() {
        let obj = ImmutableDynamicObj::from_entries([("bb", 10), ("aa", 4)]).unwrap();
        assert_eq!(obj.to_string(), "{aa: 4, bb: 10}");
    }
}
