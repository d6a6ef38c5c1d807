use crate::{ModelError, ModelResult};
use interpose_facade::{BackingStore, Key};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// A named-field record whose fields keep insertion order.
///
/// Records are what the validation and transform models consume and
/// produce. A record converts to and from a [`BackingStore`], so a
/// transformed record can be wrapped in a facade directly.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: BackingStore<Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from a JSON object, keeping the fields in the order
    /// they were written.
    pub fn from_json(value: Value) -> ModelResult<Self> {
        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(ModelError::NotAnObject(json_kind(&other))),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(&Key::from(field))
    }

    /// Extract a string value from a field using a JSON pointer into it
    /// (e.g. `("meta", "/author")`). An empty pointer addresses the field itself.
    pub fn get_str(&self, field: &str, pointer: &str) -> Option<&str> {
        self.get(field)?.pointer(pointer).and_then(Value::as_str)
    }

    pub fn get_bool(&self, field: &str, pointer: &str) -> Option<bool> {
        self.get(field)?.pointer(pointer).and_then(Value::as_bool)
    }

    pub fn get_number(&self, field: &str, pointer: &str) -> Option<f64> {
        self.get(field)?.pointer(pointer).and_then(Value::as_f64)
    }

    /// Sets a field, returning the previous value.
    pub fn set(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.set(field.into(), value)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.has_key(&Key::from(field))
    }

    /// Field names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = String> + '_ {
        self.fields.keys().map(ToString::to_string)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Converts to a JSON object.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        Value::Object(map)
    }

    /// Hands the fields over as a backing store, ready for a facade.
    pub fn into_store(self) -> BackingStore<Value> {
        self.fields
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl From<BackingStore<Value>> for Record {
    fn from(fields: BackingStore<Value>) -> Self {
        Self { fields }
    }
}

impl<S: Into<String>> FromIterator<(S, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (S, Value)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (field, value) in iter {
            record.set(field, value);
        }
        record
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.fields.iter().eq(other.fields.iter())
    }
}

/// Serializes as a map in insertion order.
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in self.fields.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
