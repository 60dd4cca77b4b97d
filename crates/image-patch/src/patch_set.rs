use std::{slice::Iter, str::FromStr};

use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::{Operation, PatchError, PatchSetBuilder, UnrecognizedKind};

/// An ordered, immutable list of patch operations forming one update request.
///
/// The service applies operations in sequence, so order is part of the value:
/// two sets are equal only when they hold the same operations in the same order.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct PatchSet {
    ops: Vec<Operation>,
}

impl PatchSet {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_operations(ops: Vec<Operation>) -> Self {
        Self { ops }
    }

    /// Parses a wire array. Fails on the first malformed element; unknown
    /// operation kinds are kept.
    pub fn from_json(node: &Value) -> Result<PatchSet, PatchError> {
        let elements = node.as_array().ok_or(PatchError::NotAnArray)?;
        let ops = elements
            .iter()
            .enumerate()
            .map(|(index, element)| {
                Operation::from_json(element)
                    .map_err(|source| PatchError::MalformedOperation { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::trace!(operations = ops.len(), "parsed patch");
        Ok(Self { ops })
    }

    pub fn from_slice(bytes: &[u8]) -> Result<PatchSet, PatchError> {
        Self::from_json(&serde_json::from_slice(bytes)?)
    }

    #[inline]
    pub fn to_json(&self) -> Value {
        self.to_json_with(UnrecognizedKind::Preserve)
    }

    pub fn to_json_with(&self, unrecognized: UnrecognizedKind) -> Value {
        Value::Array(
            self.ops
                .iter()
                .map(|op| op.to_json_with(unrecognized))
                .collect(),
        )
    }

    #[inline]
    pub fn operations(&self) -> &[Operation] {
        &self.ops
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, Operation> {
        self.ops.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn unrecognized(&self) -> impl Iterator<Item = &Operation> {
        self.ops.iter().filter(|op| !op.kind().is_recognized())
    }

    pub fn into_operations(self) -> Vec<Operation> {
        self.ops
    }

    pub fn to_builder(&self) -> PatchSetBuilder {
        PatchSetBuilder::from(self)
    }
}

impl FromStr for PatchSet {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(&serde_json::from_str(s)?)
    }
}

impl<'a> IntoIterator for &'a PatchSet {
    type Item = &'a Operation;
    type IntoIter = Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for PatchSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(&self.ops)
    }
}

impl<'de> Deserialize<'de> for PatchSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let node = Value::deserialize(deserializer)?;
        PatchSet::from_json(&node).map_err(|err| D::Error::custom(err.to_string()))
    }
}
