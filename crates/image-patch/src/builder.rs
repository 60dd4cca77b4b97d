use json_pointer::JsonPointer;
use serde::Serialize;

use crate::{Operation, OperationKind, PatchError, PatchSet};

/// Mutable companion of [`PatchSet`].
///
/// Values handed to [`add`](Self::add) and friends are serialized eagerly; the
/// first failure is kept and reported by [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct PatchSetBuilder {
    res: Result<Vec<Operation>, PatchError>,
}

impl Default for PatchSetBuilder {
    fn default() -> Self {
        Self { res: Ok(vec![]) }
    }
}

impl From<PatchSet> for PatchSetBuilder {
    fn from(patch: PatchSet) -> Self {
        Self {
            res: Ok(patch.into_operations()),
        }
    }
}

impl From<&PatchSet> for PatchSetBuilder {
    fn from(patch: &PatchSet) -> Self {
        Self {
            res: Ok(patch.operations().to_vec()),
        }
    }
}

impl PatchSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every pending operation, clearing any deferred error.
    #[must_use]
    pub fn set_operations(mut self, ops: impl IntoIterator<Item = Operation>) -> Self {
        self.res = Ok(ops.into_iter().collect());
        self
    }

    #[must_use]
    pub fn push(mut self, op: Operation) -> Self {
        if let Ok(patch_list) = &mut self.res {
            patch_list.push(op);
        }
        self
    }

    #[must_use]
    pub fn add<T: Serialize + ?Sized>(self, path: impl Into<String>, value: &T) -> Self {
        self.push_value(OperationKind::Add, path.into(), value)
    }

    #[must_use]
    pub fn replace<T: Serialize + ?Sized>(self, path: impl Into<String>, value: &T) -> Self {
        self.push_value(OperationKind::Replace, path.into(), value)
    }

    #[must_use]
    pub fn remove(self, path: impl Into<String>) -> Self {
        self.push(Operation::remove(path))
    }

    /// Adds a top-level image attribute or custom property. `key` is raw and
    /// gets pointer-escaped, so `"a/b"` targets `/a~1b`.
    #[must_use]
    pub fn add_property<T: Serialize + ?Sized>(self, key: &str, value: &T) -> Self {
        self.add(property_path(key), value)
    }

    #[must_use]
    pub fn replace_property<T: Serialize + ?Sized>(self, key: &str, value: &T) -> Self {
        self.replace(property_path(key), value)
    }

    #[must_use]
    pub fn remove_property(self, key: &str) -> Self {
        self.remove(property_path(key))
    }

    /// The operations queued so far, or the first value that failed to serialize.
    pub fn pending(&self) -> Result<&[Operation], &PatchError> {
        self.res.as_deref()
    }

    /// Snapshots the pending operations. The builder stays usable and later
    /// changes never reach an already built set.
    pub fn build(&self) -> Result<PatchSet, PatchError> {
        self.res.clone().map(PatchSet::from_operations)
    }

    fn push_value<T: Serialize + ?Sized>(
        mut self,
        kind: OperationKind,
        path: String,
        value: &T,
    ) -> Self {
        self.res = self.res.and_then(|mut patch_list| {
            let value = serde_json::to_value(value).map_err(|err| {
                tracing::debug!(path = path.as_str(), error = %err, "patch value rejected");
                PatchError::InvalidValue {
                    path: path.clone(),
                    message: err.to_string(),
                }
            })?;
            patch_list.push(Operation::new(kind, path, Some(value)));
            Ok(patch_list)
        });
        self
    }
}

fn property_path(key: &str) -> String {
    JsonPointer::root().push(key).to_string()
}
