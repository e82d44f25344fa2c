//! Router error types.
//!
//! Only registration can fail. A request that matches nothing is reported
//! through [`MatchResult::NotFound`](crate::MatchResult::NotFound), never as
//! an error.

use std::fmt;

/// Why a pattern was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidPatternKind {
    /// An optional parameter is followed by a required segment.
    OptionalNotTrailing {
        /// The optional segment as written, e.g. `:type?`.
        segment: String,
    },
    /// A `*` segment appears before the end of the pattern.
    WildcardNotTrailing,
    /// A `:` or `:?` segment without a name.
    EmptyParamName,
    /// The same parameter name occurs twice in one pattern.
    DuplicateParam {
        /// The repeated name.
        name: String,
    },
}

impl fmt::Display for InvalidPatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OptionalNotTrailing { segment } => {
                write!(f, "optional segment '{segment}' must be trailing")
            }
            Self::WildcardNotTrailing => f.write_str("wildcard '*' must be the last segment"),
            Self::EmptyParamName => f.write_str("parameter name must not be empty"),
            Self::DuplicateParam { name } => {
                write!(f, "parameter '{name}' appears more than once")
            }
        }
    }
}

/// A route pattern could not be registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPatternError {
    pattern: String,
    kind: InvalidPatternKind,
}

impl InvalidPatternError {
    /// Create an error for `pattern`.
    #[must_use]
    pub fn new(pattern: impl Into<String>, kind: InvalidPatternKind) -> Self {
        Self {
            pattern: pattern.into(),
            kind,
        }
    }

    /// The pattern as passed to `insert`.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The reason for rejection.
    #[must_use]
    pub fn kind(&self) -> &InvalidPatternKind {
        &self.kind
    }
}

impl fmt::Display for InvalidPatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid route pattern '{}': {}", self.pattern, self.kind)
    }
}

impl std::error::Error for InvalidPatternError {}

/// Router configuration could not be parsed.
#[derive(Debug)]
pub struct ConfigError {
    source: serde_json::Error,
}

impl ConfigError {
    pub(crate) fn new(source: serde_json::Error) -> Self {
        Self { source }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid router configuration: {}", self.source)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_pattern_and_reason() {
        let err = InvalidPatternError::new(
            "/a/:b?/c",
            InvalidPatternKind::OptionalNotTrailing {
                segment: ":b?".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "invalid route pattern '/a/:b?/c': optional segment ':b?' must be trailing"
        );
        assert_eq!(err.pattern(), "/a/:b?/c");
    }

    #[test]
    fn config_error_exposes_source() {
        use std::error::Error as _;

        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ConfigError::new(source);
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("invalid router configuration"));
    }
}
