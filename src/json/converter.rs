use serde_json::{Map as JsonMap, Number, Value as JsonValue};

use crate::core::{DynObjError, KeyPolicy, Result, Value};
use crate::record::{DynamicMap, DynamicRecord, ImmutableDynamicObj};

/// Converts JSON values to record values
pub struct JsonToValueConverter;

impl JsonToValueConverter {
    pub fn convert(json_value: JsonValue, policy: &KeyPolicy) -> Result<Value> {
        match json_value {
            JsonValue::Null => Ok(Value::Null),
            JsonValue::Bool(b) => Ok(Value::Boolean(b)),
            JsonValue::Number(n) => Ok(Self::convert_number(&n)),
            JsonValue::String(s) => Ok(Value::Text(s)),
            JsonValue::Array(items) => items
                .into_iter()
                .map(|item| Self::convert(item, policy))
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
            JsonValue::Object(object) => Self::convert_object(object, policy).map(Value::Record),
        }
    }

    /// Convert a JSON object into a map governed by `policy`.
    pub fn convert_object(object: JsonMap<String, JsonValue>, policy: &KeyPolicy) -> Result<DynamicMap> {
        let entries = object
            .into_iter()
            .map(|(key, value)| Ok((key, Self::convert(value, policy)?)))
            .collect::<Result<Vec<_>>>()?;

        DynamicMap::new().with_policy(*policy).with_entries(entries)
    }

    fn convert_number(n: &Number) -> Value {
        match n.as_i64() {
            Some(i) => Value::Integer(i),
            // u64 beyond i64::MAX and real numbers
            None => n.as_f64().map_or(Value::Null, Value::Float),
        }
    }
}

/// Converts record values to JSON values
pub struct ValueToJsonConverter;

impl ValueToJsonConverter {
    /// Non-finite floats have no JSON form and become `null`.
    pub fn convert(value: &Value) -> JsonValue {
        match value {
            Value::Null => JsonValue::Null,
            Value::Boolean(b) => JsonValue::Bool(*b),
            Value::Integer(i) => JsonValue::Number(Number::from(*i)),
            Value::Float(f) => Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number),
            Value::Text(s) => JsonValue::String(s.clone()),
            Value::List(items) => JsonValue::Array(items.iter().map(Self::convert).collect()),
            Value::Record(map) => JsonValue::Object(Self::convert_map(map)),
        }
    }

    pub fn convert_map(map: &DynamicMap) -> JsonMap<String, JsonValue> {
        map.iter()
            .map(|(key, value)| (key.to_string(), Self::convert(value)))
            .collect()
    }
}

impl DynamicMap {
    /// Seed a map from a JSON object using the default key policy.
    pub fn from_json(json: JsonValue) -> Result<Self> {
        Self::from_json_with_policy(json, KeyPolicy::default())
    }

    pub fn from_json_with_policy(json: JsonValue, policy: KeyPolicy) -> Result<Self> {
        match json {
            JsonValue::Object(object) => JsonToValueConverter::convert_object(object, &policy),
            other => Err(DynObjError::InvalidSeed(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(ValueToJsonConverter::convert_map(self))
    }
}

impl ImmutableDynamicObj {
    pub fn from_json(json: JsonValue) -> Result<Self> {
        DynamicMap::from_json(json).map(Self::from)
    }

    pub fn to_json(&self) -> JsonValue {
        self.entries().to_json()
    }
}

impl TryFrom<JsonValue> for Value {
    type Error = DynObjError;

    fn try_from(json: JsonValue) -> Result<Self> {
        JsonToValueConverter::convert(json, &KeyPolicy::default())
    }
}

impl TryFrom<JsonValue> for DynamicMap {
    type Error = DynObjError;

    fn try_from(json: JsonValue) -> Result<Self> {
        Self::from_json(json)
    }
}

impl From<&Value> for JsonValue {
    fn from(value: &Value) -> Self {
        ValueToJsonConverter::convert(value)
    }
}

fn json_kind(json: &JsonValue) -> &'static str {
    match json {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
