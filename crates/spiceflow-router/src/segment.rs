//! Path segment classification.
//!
//! Patterns and request paths share one splitting rule: a single leading `/`
//! is dropped and the rest is cut at every `/`. `"/"` and `""` therefore have
//! no segments, while `"/foo/"` has two (`"foo"` and `""`), which keeps a
//! trailing slash significant.

use std::fmt;

/// One `/`-delimited unit of a route pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment<'a> {
    /// Matches only the identical literal text.
    Static(&'a str),
    /// `:name`, matches one non-empty segment.
    Param(&'a str),
    /// `:name?`, only valid in trailing position; expanded before insertion.
    OptionalParam(&'a str),
    /// `*`, matches the remainder of the path.
    Wildcard,
}

impl Segment<'_> {
    /// The parameter name, if this segment captures one.
    #[must_use]
    pub fn param_name(&self) -> Option<&str> {
        match *self {
            Self::Param(name) | Self::OptionalParam(name) => Some(name),
            Self::Static(_) | Self::Wildcard => None,
        }
    }
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(text) => f.write_str(text),
            Self::Param(name) => write!(f, ":{name}"),
            Self::OptionalParam(name) => write!(f, ":{name}?"),
            Self::Wildcard => f.write_str("*"),
        }
    }
}

/// Classify a single segment of a pattern.
///
/// There is no escape syntax, so a literal segment starting with `:` cannot be
/// expressed.
#[must_use]
pub fn classify(text: &str) -> Segment<'_> {
    if text == "*" {
        return Segment::Wildcard;
    }
    match text.strip_prefix(':') {
        Some(rest) => match rest.strip_suffix('?') {
            Some(name) => Segment::OptionalParam(name),
            None => Segment::Param(rest),
        },
        None => Segment::Static(text),
    }
}

/// Split and classify a whole pattern.
#[must_use]
pub fn parse_pattern(pattern: &str) -> Vec<Segment<'_>> {
    split_path(pattern).map(|(_, text)| classify(text)).collect()
}

/// Render segments back into pattern syntax.
#[must_use]
pub fn render(segments: &[Segment<'_>]) -> String {
    if segments.is_empty() {
        return String::from("/");
    }
    let mut out = String::new();
    for segment in segments {
        out.push('/');
        out.push_str(&segment.to_string());
    }
    out
}

/// Iterate over the segments of `path` with their byte offsets.
pub(crate) fn split_path(path: &str) -> Segments<'_> {
    let start = usize::from(path.starts_with('/'));
    Segments {
        path,
        pos: start,
        done: start >= path.len(),
    }
}

/// Iterator returned by [`split_path`].
pub(crate) struct Segments<'a> {
    path: &'a str,
    pos: usize,
    done: bool,
}

impl<'a> Iterator for Segments<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let start = self.pos;
        match memchr::memchr(b'/', &self.path.as_bytes()[start..]) {
            Some(len) => {
                self.pos = start + len + 1;
                Some((start, &self.path[start..start + len]))
            }
            None => {
                self.done = true;
                Some((start, &self.path[start..]))
            }
        }
    }
}
