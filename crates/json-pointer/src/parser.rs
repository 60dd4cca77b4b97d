use std::borrow::Cow;

use crate::ParseJsonPointerError;

/// Splits a pointer into unescaped reference tokens.
pub(crate) struct SegmentIter<'a> {
    input: &'a [u8],
}

impl<'a> SegmentIter<'a> {
    #[inline]
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
        }
    }
}

impl<'a> Iterator for SegmentIter<'a> {
    type Item = Cow<'a, str>;

    fn next(&mut self) -> Option<Self::Item> {
        // callers check the leading `/` before iterating
        let rest = self.input.strip_prefix(b"/")?;

        let (raw, tail) = match memchr::memchr(b'/', rest) {
            Some(idx) => rest.split_at(idx),
            None => (rest, &[][..]),
        };
        self.input = tail;
        Some(unescape(raw))
    }
}

fn unescape(raw: &[u8]) -> Cow<'_, str> {
    // input came from a &str and `/` is ascii, so every split lands on a char boundary
    let text = String::from_utf8_lossy(raw);
    if memchr::memchr(b'~', raw).is_none() {
        return text;
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '~' {
            out.push(ch);
            continue;
        }
        match chars.peek() {
            Some('0') => {
                chars.next();
                out.push('~');
            }
            Some('1') => {
                chars.next();
                out.push('/');
            }
            _ => out.push('~'),
        }
    }
    Cow::Owned(out)
}

pub(crate) fn escape(segment: &str) -> Cow<'_, str> {
    if !segment.contains(['~', '/']) {
        return Cow::Borrowed(segment);
    }
    Cow::Owned(segment.replace('~', "~0").replace('/', "~1"))
}

pub(crate) fn parse_json_pointer(input: &str) -> Result<Vec<String>, ParseJsonPointerError> {
    if !input.is_empty() && !input.starts_with('/') {
        return Err(ParseJsonPointerError {
            input: input.to_string(),
        });
    }

    Ok(SegmentIter::new(input).map(Cow::into_owned).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! segments {
        ($($value:literal),*) => {
            &[$($value.to_string()),*]
        }
    }

    fn check(input: &str, segments: &[String]) {
        assert_eq!(parse_json_pointer(input).unwrap(), segments);
    }

    #[test]
    fn test_parser() {
        check("", segments!());
        check("/name", segments!("name"));
        check("/tags/0", segments!("tags", "0"));
        check("/", segments!(""));
        check("/tags/", segments!("tags", ""));
        check("/a~1b", segments!("a/b"));
        check("/m~0n", segments!("m~n"));
        check("/hw_disk~01bus", segments!("hw_disk~1bus"));
        check("/a~c/~1bc/~2d", segments!("a~c", "/bc", "~2d"));
        check("/os_distro/é", segments!("os_distro", "é"));
    }

    #[test]
    fn rejects_relative() {
        let err = parse_json_pointer("name").unwrap_err();
        assert_eq!(err.input, "name");
        assert!(parse_json_pointer("tags/0").is_err());
    }

    #[test]
    fn escape_segment() {
        assert_eq!(escape("min_ram"), "min_ram");
        assert_eq!(escape("a/b"), "a~1b");
        assert_eq!(escape("~/"), "~0~1");
    }
}
