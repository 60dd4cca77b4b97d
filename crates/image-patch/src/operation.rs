use json_pointer::{JsonPointer, ParseJsonPointerError};
use serde::{de::Error, ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{MalformedOperation, OperationKind, UnrecognizedKind};

/// A single patch instruction against one attribute path of an image.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Operation {
    kind: OperationKind,
    path: String,
    value: Option<Value>,
}

impl Operation {
    /// Any `value` given for a `remove` is dropped. A hand-built
    /// `Unrecognized` raw string naming a known verb is matched to that verb.
    pub fn new(kind: OperationKind, path: impl Into<String>, value: Option<Value>) -> Self {
        let kind = kind.normalize();
        let value = value.filter(|_| kind.carries_value());
        Self {
            kind,
            path: path.into(),
            value,
        }
    }

    pub fn add(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(OperationKind::Add, path, Some(value.into()))
    }

    pub fn replace(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(OperationKind::Replace, path, Some(value.into()))
    }

    pub fn remove(path: impl Into<String>) -> Self {
        Self::new(OperationKind::Remove, path, None)
    }

    #[inline]
    pub fn kind(&self) -> &OperationKind {
        &self.kind
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Structured view of [`path`](Self::path). Parsing never depends on this.
    pub fn pointer(&self) -> Result<JsonPointer, ParseJsonPointerError> {
        self.path.parse()
    }

    #[inline]
    pub fn to_json(&self) -> Value {
        self.to_json_with(UnrecognizedKind::Preserve)
    }

    pub fn to_json_with(&self, unrecognized: UnrecognizedKind) -> Value {
        let mut obj = Map::new();
        if let Some(op) = self.kind.wire_name(unrecognized) {
            obj.insert("op".to_string(), Value::String(op.to_string()));
        }
        obj.insert("path".to_string(), Value::String(self.path.clone()));
        if let Some(value) = &self.value {
            obj.insert("value".to_string(), value.clone());
        }
        Value::Object(obj)
    }

    pub fn from_json(node: &Value) -> Result<Operation, MalformedOperation> {
        let obj = node.as_object().ok_or(MalformedOperation::NotAnObject)?;
        let path = obj
            .get("path")
            .ok_or(MalformedOperation::MissingPath)?
            .as_str()
            .ok_or(MalformedOperation::PathNotAString)?;
        let kind = OperationKind::from_json(obj.get("op"));

        if let OperationKind::Unrecognized(raw) = &kind {
            tracing::debug!(op = ?raw, path, "unrecognized patch operation kind");
        }

        Ok(Operation::new(kind, path, obj.get("value").cloned()))
    }
}

impl Serialize for Operation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let op = self.kind.wire_name(UnrecognizedKind::Preserve);
        let len = 1 + usize::from(op.is_some()) + usize::from(self.value.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(op) = op {
            map.serialize_entry("op", op)?;
        }
        map.serialize_entry("path", &self.path)?;
        if let Some(value) = &self.value {
            map.serialize_entry("value", value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let node = Value::deserialize(deserializer)?;
        Operation::from_json(&node).map_err(|err| D::Error::custom(err.to_string()))
    }
}
