use std::{
    fmt::{self, Debug, Display, Formatter},
    str::FromStr,
};

use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    parser::{escape, parse_json_pointer},
    ParseJsonPointerError,
};

/// An RFC 6901 pointer held as unescaped reference tokens.
#[derive(Clone, Eq, PartialEq, Hash, Default)]
pub struct JsonPointer(Vec<String>);

impl Display for JsonPointer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            f.write_str("/")?;
            f.write_str(&escape(segment))?;
        }

        Ok(())
    }
}

impl Debug for JsonPointer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl FromStr for JsonPointer {
    type Err = ParseJsonPointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_json_pointer(s).map(Self)
    }
}

impl Serialize for JsonPointer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for JsonPointer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        parse_json_pointer(&String::deserialize(deserializer)?)
            .map(Self)
            .map_err(|err| D::Error::custom(err.to_string()))
    }
}

impl<S: Into<String>> FromIterator<S> for JsonPointer {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl JsonPointer {
    #[inline]
    pub fn root() -> JsonPointer {
        JsonPointer(Vec::new())
    }

    /// Builds a pointer from raw, unescaped segments.
    pub fn from_segments<I, S>(segments: I) -> JsonPointer
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        segments.into_iter().collect()
    }

    #[must_use]
    pub fn push(mut self, segment: impl Into<String>) -> Self {
        self.0.push(segment.into());
        self
    }

    #[inline]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json_pointer;

    #[test]
    fn display_escapes() {
        let pointer = JsonPointer::from_segments(["properties", "a/b~c"]);
        assert_eq!(pointer.to_string(), "/properties/a~1b~0c");

        let parsed: JsonPointer = pointer.to_string().parse().unwrap();
        assert_eq!(parsed, pointer);
        assert_eq!(parsed.segments(), ["properties", "a/b~c"]);
    }

    #[test]
    fn push() {
        let pointer = JsonPointer::root().push("tags").push("-");
        assert_eq!(pointer.to_string(), "/tags/-");
        assert_eq!(pointer.segments(), ["tags", "-"]);
        assert!(!pointer.is_root());
        assert!(JsonPointer::root().is_root());
    }

    #[test]
    fn serde() {
        let pointer: JsonPointer = serde_json::from_str(r#""/min_disk""#).unwrap();
        assert_eq!(pointer, json_pointer!("/min_disk"));
        assert_eq!(
            serde_json::to_string(&pointer).unwrap(),
            r#""/min_disk""#.to_string()
        );
        assert!(serde_json::from_str::<JsonPointer>(r#""min_disk""#).is_err());
    }
}
