//! Runtime-polymorphic view over records.
//!
//! `Box<dyn AnyRecord>` lets heterogeneous record types share one
//! collection while updates still produce the receiver's concrete type.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use dyn_clone::DynClone;

use crate::core::{FromValue, Result, Value};

use super::{DynamicMap, DynamicRecord};

pub trait AnyRecord: DynClone + fmt::Debug + Send + Sync + 'static {
    fn dyn_entries(&self) -> &DynamicMap;

    /// Name of the concrete record type.
    fn type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    fn dyn_with_entry(&self, key: String, value: Value) -> Result<Box<dyn AnyRecord>>;

    fn dyn_without_entry(&self, key: &str) -> Box<dyn AnyRecord>;

    /// Equal only to a record of the same concrete type with equal state.
    fn dyn_eq(&self, other: &dyn AnyRecord) -> bool;

    fn dyn_hash(&self, state: &mut dyn Hasher);
}

dyn_clone::clone_trait_object!(AnyRecord);

impl<T> AnyRecord for T
where
    T: DynamicRecord + Clone + PartialEq + Hash + fmt::Debug + Send + Sync + 'static,
{
    fn dyn_entries(&self) -> &DynamicMap {
        self.entries()
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn dyn_with_entry(&self, key: String, value: Value) -> Result<Box<dyn AnyRecord>> {
        Ok(Box::new(self.with_entry(key, value)?))
    }

    fn dyn_without_entry(&self, key: &str) -> Box<dyn AnyRecord> {
        Box::new(self.without_entry(key))
    }

    fn dyn_eq(&self, other: &dyn AnyRecord) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<T>().hash(&mut state);
        self.hash(&mut state);
    }
}

impl dyn AnyRecord {
    pub fn is<T: AnyRecord>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: AnyRecord>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn with_entry(
        &self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Box<dyn AnyRecord>> {
        self.dyn_with_entry(key.into(), value.into())
    }

    pub fn without_entry(&self, key: &str) -> Box<dyn AnyRecord> {
        self.dyn_without_entry(key)
    }

    pub fn lookup(&self, key: &str) -> Result<&Value> {
        self.dyn_entries().lookup(key)
    }

    pub fn lookup_as<T: FromValue>(&self, key: &str) -> Result<T> {
        self.dyn_entries().lookup_as(key)
    }
}

impl PartialEq for dyn AnyRecord {
    fn eq(&self, other: &Self) -> bool {
        self.dyn_eq(other)
    }
}

impl Eq for dyn AnyRecord {}

impl Hash for dyn AnyRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dyn_hash(state);
    }
}
