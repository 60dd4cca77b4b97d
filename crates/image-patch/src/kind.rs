use std::{
    convert::Infallible,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

const UNRECOGNIZED: &str = "unrecognized";

/// The verb of a patch operation.
///
/// Names the service does not know yet parse to [`OperationKind::Unrecognized`]
/// and keep the raw wire string, so newer servers never break older clients.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum OperationKind {
    Add,
    Replace,
    Remove,
    /// `None` when the `op` field was null, missing or not a string.
    Unrecognized(Option<String>),
}

/// How an unrecognized kind is written back to the wire.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum UnrecognizedKind {
    /// Emit the raw string that was parsed.
    #[default]
    Preserve,
    /// Emit the fixed `"unrecognized"` literal.
    Placeholder,
}

impl OperationKind {
    pub fn parse(raw: Option<&str>) -> OperationKind {
        let raw = match raw {
            Some(raw) => raw,
            None => return OperationKind::Unrecognized(None),
        };

        if raw.eq_ignore_ascii_case("add") {
            OperationKind::Add
        } else if raw.eq_ignore_ascii_case("replace") {
            OperationKind::Replace
        } else if raw.eq_ignore_ascii_case("remove") {
            OperationKind::Remove
        } else {
            OperationKind::Unrecognized(Some(raw.to_string()))
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.as_str_with(UnrecognizedKind::Preserve)
    }

    pub fn as_str_with(&self, unrecognized: UnrecognizedKind) -> &str {
        match (self, unrecognized) {
            (OperationKind::Add, _) => "add",
            (OperationKind::Replace, _) => "replace",
            (OperationKind::Remove, _) => "remove",
            (OperationKind::Unrecognized(Some(raw)), UnrecognizedKind::Preserve) => raw,
            (OperationKind::Unrecognized(_), _) => UNRECOGNIZED,
        }
    }

    /// The `op` string to put on the wire. `None` means the key is left out,
    /// which is how an operation that arrived without a string `op` goes back.
    pub(crate) fn wire_name(&self, unrecognized: UnrecognizedKind) -> Option<&str> {
        match (self, unrecognized) {
            (OperationKind::Unrecognized(None), UnrecognizedKind::Preserve) => None,
            _ => Some(self.as_str_with(unrecognized)),
        }
    }

    /// Re-matches a hand-built raw string, so `Unrecognized(Some("add"))`
    /// becomes `Add` and only unmatched names stay unrecognized.
    pub(crate) fn normalize(self) -> OperationKind {
        match self {
            OperationKind::Unrecognized(Some(raw)) => OperationKind::parse(Some(&raw)),
            kind => kind,
        }
    }

    #[inline]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, OperationKind::Unrecognized(_))
    }

    /// Whether operations of this kind carry a `value` on the wire.
    #[inline]
    pub(crate) fn carries_value(&self) -> bool {
        !matches!(self, OperationKind::Remove)
    }

    pub(crate) fn from_json(op: Option<&Value>) -> OperationKind {
        OperationKind::parse(op.and_then(Value::as_str))
    }
}

impl Display for OperationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(OperationKind::parse(Some(s)))
    }
}

impl Serialize for OperationKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OperationKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(OperationKind::from_json(Some(&value)))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parse_case_insensitive() {
        for raw in ["ADD", "Add", "add", "aDd"] {
            assert_eq!(OperationKind::parse(Some(raw)), OperationKind::Add);
        }
        assert_eq!(
            OperationKind::parse(Some("REPLACE")),
            OperationKind::Replace
        );
        assert_eq!(OperationKind::parse(Some("Remove")), OperationKind::Remove);
    }

    #[test]
    fn parse_unrecognized() {
        assert_eq!(OperationKind::parse(None), OperationKind::Unrecognized(None));
        assert_eq!(
            OperationKind::parse(Some("frobnicate")),
            OperationKind::Unrecognized(Some("frobnicate".to_string()))
        );
        // excluded verbs are not silently accepted
        assert!(!OperationKind::parse(Some("move")).is_recognized());
        assert!(!OperationKind::parse(Some("test")).is_recognized());
        assert!(!OperationKind::parse(Some("")).is_recognized());
    }

    #[test]
    fn emit() {
        assert_eq!(OperationKind::parse(Some("ADD")).as_str(), "add");
        assert_eq!(OperationKind::Replace.to_string(), "replace");

        let frob = OperationKind::parse(Some("Frobnicate"));
        assert_eq!(frob.as_str(), "Frobnicate");
        assert_eq!(
            frob.as_str_with(UnrecognizedKind::Placeholder),
            "unrecognized"
        );
        assert_eq!(OperationKind::Unrecognized(None).as_str(), "unrecognized");
    }

    #[test]
    fn wire_name() {
        assert_eq!(
            OperationKind::Unrecognized(None).wire_name(UnrecognizedKind::Preserve),
            None
        );
        assert_eq!(
            OperationKind::Unrecognized(None).wire_name(UnrecognizedKind::Placeholder),
            Some("unrecognized")
        );
        assert_eq!(
            OperationKind::Remove.wire_name(UnrecognizedKind::Preserve),
            Some("remove")
        );
    }

    #[test]
    fn normalize() {
        assert_eq!(
            OperationKind::Unrecognized(Some("ADD".to_string())).normalize(),
            OperationKind::Add
        );
        assert_eq!(
            OperationKind::Unrecognized(Some("frob".to_string())).normalize(),
            OperationKind::Unrecognized(Some("frob".to_string()))
        );
        assert_eq!(
            OperationKind::Unrecognized(None).normalize(),
            OperationKind::Unrecognized(None)
        );
    }

    #[test]
    fn serde() {
        let kind: OperationKind = serde_json::from_value(json!("Replace")).unwrap();
        assert_eq!(kind, OperationKind::Replace);

        let kind: OperationKind = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(kind, OperationKind::Unrecognized(None));

        let kind: OperationKind = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(kind, OperationKind::Unrecognized(None));

        assert_eq!(
            serde_json::to_value(OperationKind::Remove).unwrap(),
            json!("remove")
        );
        assert_eq!(
            "copy".parse::<OperationKind>().unwrap(),
            OperationKind::Unrecognized(Some("copy".to_string()))
        );
    }
}
