//! Optional parameter expansion.
//!
//! `/api/animals/:type?` is registered as the two concrete patterns
//! `/api/animals` and `/api/animals/:type`. Every optional segment must be
//! trailing; each one adds a variant one segment longer than the last.

use crate::error::{InvalidPatternError, InvalidPatternKind};
use crate::segment::{Segment, parse_pattern, render};

/// Expand `pattern` into the optional-free patterns it covers.
///
/// A pattern with no optional segment expands to itself.
///
/// ```
/// use spiceflow_router::expand;
///
/// assert_eq!(
///     expand("/api/animals/:type?").unwrap(),
///     vec!["/api/animals", "/api/animals/:type"],
/// );
/// assert_eq!(expand("/:lang?").unwrap(), vec!["/", "/:lang"]);
/// ```
pub fn expand(pattern: &str) -> Result<Vec<String>, InvalidPatternError> {
    let segments = parse_pattern(pattern);
    let variants =
        expand_segments(&segments).map_err(|kind| InvalidPatternError::new(pattern, kind))?;
    Ok(variants.iter().map(|variant| render(variant)).collect())
}

/// Segment-level expansion. Optional segments come back as required params.
pub(crate) fn expand_segments<'a>(
    segments: &[Segment<'a>],
) -> Result<Vec<Vec<Segment<'a>>>, InvalidPatternKind> {
    let Some(pivot) = segments
        .iter()
        .position(|segment| matches!(segment, Segment::OptionalParam(_)))
    else {
        return Ok(vec![segments.to_vec()]);
    };

    let mut current = segments[..pivot].to_vec();
    let mut variants = vec![current.clone()];
    let mut last_optional = segments[pivot];

    for &segment in &segments[pivot..] {
        match segment {
            Segment::OptionalParam(name) => {
                current.push(Segment::Param(name));
                variants.push(current.clone());
                last_optional = segment;
            }
            Segment::Static(_) | Segment::Param(_) | Segment::Wildcard => {
                return Err(InvalidPatternKind::OptionalNotTrailing {
                    segment: last_optional.to_string(),
                });
            }
        }
    }

    variants.dedup();
    Ok(variants)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_optional_is_identity() {
        assert_eq!(expand("/users/:id").unwrap(), vec!["/users/:id"]);
        assert_eq!(expand("/").unwrap(), vec!["/"]);
        assert_eq!(expand("/files/*").unwrap(), vec!["/files/*"]);
    }

    #[test]
    fn single_trailing_optional() {
        assert_eq!(
            expand("/api/animals/:type?").unwrap(),
            vec!["/api/animals", "/api/animals/:type"]
        );
    }

    #[test]
    fn optional_at_root_yields_slash() {
        assert_eq!(expand("/:lang?").unwrap(), vec!["/", "/:lang"]);
    }

    #[test]
    fn multiple_trailing_optionals_grow_in_order() {
        assert_eq!(
            expand("/a/:b/:c?/:d?").unwrap(),
            vec!["/a/:b", "/a/:b/:c", "/a/:b/:c/:d"]
        );
    }

    #[test]
    fn non_trailing_optional_is_rejected() {
        let err = expand("/a/:b?/c").unwrap_err();
        assert_eq!(
            err.kind(),
            &InvalidPatternKind::OptionalNotTrailing {
                segment: ":b?".to_string()
            }
        );
        assert_eq!(err.pattern(), "/a/:b?/c");
    }

    #[test]
    fn optional_before_wildcard_is_rejected() {
        assert!(expand("/a/:b?/*").is_err());
    }

    #[test]
    fn reports_the_optional_closest_to_the_offender() {
        let err = expand("/:a?/:b?/:c").unwrap_err();
        assert_eq!(
            err.kind(),
            &InvalidPatternKind::OptionalNotTrailing {
                segment: ":b?".to_string()
            }
        );
    }
}
