//! JSON interop
//!
//! Seeds dynamic records from `serde_json` objects and exports them back.
//! Nested objects become nested [`Value::Record`](crate::Value::Record)s and
//! their keys pass through the same [`KeyPolicy`](crate::KeyPolicy) as the
//! top-level map.

mod converter;

pub use converter::{JsonToValueConverter, ValueToJsonConverter};
