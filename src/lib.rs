// ============================================================================
// dynobj Library
// ============================================================================

//! Immutable dynamic objects.
//!
//! A record is a string-keyed mapping of [`Value`]s that can sit next to
//! ordinary struct fields. Updates never modify the receiver: they return
//! a new record of the same concrete type with its declared fields copied.
//!
//! ```
//! use dynobj::{DynamicRecord, ImmutableDynamicObj};
//!
//! # fn main() -> dynobj::Result<()> {
//! let obj = ImmutableDynamicObj::new().with_entry("aa", 4)?;
//! assert_eq!(obj.lookup("aa")?.as_i64(), Some(4));
//! assert!(obj.lookup("bb").is_err());
//! assert_eq!(obj.without_entry("bb"), obj);
//! # Ok(())
//! # }
//! ```

// Lets `#[derive(DynamicRecord)]` expand to `::dynobj::...` inside this crate too.
extern crate self as dynobj;

pub mod core;
pub mod json;
pub mod record;

pub use crate::core::{DynObjError, FromValue, KeyPolicy, Result, Value};
pub use crate::record::{AnyRecord, DynamicMap, DynamicRecord, ImmutableDynamicObj};

pub use dynobj_derive::DynamicRecord;

pub mod prelude {
    //! Everything needed to define and use records.
    pub use crate::{
        AnyRecord, DynObjError, DynamicMap, DynamicRecord, FromValue, ImmutableDynamicObj,
        KeyPolicy, Value,
    };
}
