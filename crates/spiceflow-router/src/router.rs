//! Route registration and lookup.
//!
//! Routes are registered on a [`RouterBuilder`], which is consumed by
//! [`RouterBuilder::build`] into a read-only [`Router`]. Lookups take `&self`
//! and only allocate per-call scratch space, so a built router can be shared
//! across threads behind an `Arc`. Reloading routes means building a new
//! router and swapping the reference.

use std::sync::Arc;

use serde::Serialize;
use spiceflow_types::Method;

use crate::config::{DuplicateParams, RouterConfig};
use crate::error::{InvalidPatternError, InvalidPatternKind};
use crate::expand::expand_segments;
use crate::r#match::{AllowedMethods, MatchResult, Params, RouteLookup, RouteMatch};
use crate::node::{MethodSlot, Node, Registration};
use crate::segment::{Segment, parse_pattern, render, split_path};

/// Method name that registers a route for every method.
///
/// Such registrations are only used when the node has none for the requested
/// method.
pub const METHOD_ALL: &str = "ALL";

/// Name under which a wildcard's remainder is reported.
pub const WILDCARD_PARAM: &str = "*";

/// A registered route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    /// HTTP method, or [`METHOD_ALL`].
    pub method: String,
    /// Pattern as registered.
    pub pattern: String,
    /// Concrete patterns inserted after optional expansion.
    pub variants: Vec<String>,
}

/// Mutable route table, frozen into a [`Router`] by [`build`](Self::build).
pub struct RouterBuilder<H> {
    root: Node<H>,
    routes: Vec<RouteInfo>,
    config: RouterConfig,
}

impl<H> RouterBuilder<H> {
    /// Create an empty builder with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    /// Create an empty builder.
    #[must_use]
    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            root: Node::default(),
            routes: Vec::new(),
            config,
        }
    }

    /// Register `handler` for `method` on `pattern`.
    ///
    /// Patterns with trailing optional segments are inserted once per
    /// expansion, all sharing the one handler. On error nothing is inserted.
    pub fn insert(
        &mut self,
        method: impl AsRef<str>,
        pattern: &str,
        handler: H,
    ) -> Result<(), InvalidPatternError> {
        let method = method.as_ref();
        let invalid = |kind: InvalidPatternKind| InvalidPatternError::new(pattern, kind);

        let segments = parse_pattern(pattern);
        param_slots(&segments, self.config.duplicate_params).map_err(invalid)?;
        let variants = expand_segments(&segments).map_err(invalid)?;
        let mut compiled = Vec::with_capacity(variants.len());
        for variant in &variants {
            let slots = param_slots(variant, self.config.duplicate_params).map_err(invalid)?;
            compiled.push((variant.as_slice(), slots));
        }

        let route = self.routes.len();
        let handler = Arc::new(handler);
        let method_slot = if method == METHOD_ALL {
            MethodSlot::Any
        } else {
            MethodSlot::Specific(method)
        };
        for (variant, params) in compiled {
            let registration = Registration {
                handler: Arc::clone(&handler),
                params,
                route,
            };
            self.root.insert(variant, &method_slot, registration);
        }

        self.routes.push(RouteInfo {
            method: method.to_string(),
            pattern: pattern.to_string(),
            variants: variants.iter().map(|variant| render(variant)).collect(),
        });
        tracing::debug!(
            method,
            pattern,
            variants = variants.len(),
            "registered route"
        );
        Ok(())
    }

    /// Chaining form of [`insert`](Self::insert).
    pub fn route(
        mut self,
        method: impl AsRef<str>,
        pattern: &str,
        handler: H,
    ) -> Result<Self, InvalidPatternError> {
        self.insert(method, pattern, handler)?;
        Ok(self)
    }

    /// Routes registered so far.
    #[must_use]
    pub fn routes(&self) -> &[RouteInfo] {
        &self.routes
    }

    /// Freeze the table.
    #[must_use]
    pub fn build(self) -> Router<H> {
        tracing::debug!(routes = self.routes.len(), "router built");
        Router {
            root: self.root,
            routes: self.routes,
            config: self.config,
        }
    }
}

impl<H> Default for RouterBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only segment trie router.
///
/// ```
/// use spiceflow_router::{MatchResult, Router};
/// use spiceflow_types::Method;
///
/// let router = Router::builder()
///     .route(Method::Get, "/users/:id", "show_user")?
///     .route(Method::Get, "/users/me", "show_me")?
///     .build();
///
/// let MatchResult::Found(matches) = router.match_path("GET", "/users/42") else {
///     panic!("expected a match");
/// };
/// assert_eq!(*matches[0].handler, "show_user");
/// assert_eq!(matches[0].get_param("id"), Some("42"));
/// # Ok::<(), spiceflow_router::InvalidPatternError>(())
/// ```
pub struct Router<H> {
    root: Node<H>,
    routes: Vec<RouteInfo>,
    config: RouterConfig,
}

impl<H> Router<H> {
    /// Start building a router.
    #[must_use]
    pub fn builder() -> RouterBuilder<H> {
        RouterBuilder::new()
    }

    /// Find the registrations answering `method` on `path`.
    ///
    /// Static children win over the parametric child, which wins over the
    /// wildcard; a branch that dead-ends is abandoned for the next one. Every
    /// input produces a result; malformed paths simply do not match.
    #[must_use]
    pub fn match_path<'a>(&'a self, method: &str, path: &'a str) -> MatchResult<'a, H> {
        let segments: Vec<_> = split_path(path).collect();
        let mut captures = Vec::with_capacity(segments.len());

        let mut found = self.root.search(&segments, path, method, &mut captures);
        if found.is_none() && self.config.head_falls_back_to_get && method == Method::Head.as_str()
        {
            found = self
                .root
                .search(&segments, path, Method::Get.as_str(), &mut captures);
        }

        let Some(registrations) = found else {
            tracing::trace!(method, path, "no route matched");
            return MatchResult::NotFound;
        };
        MatchResult::Found(
            registrations
                .iter()
                .map(|registration| RouteMatch {
                    route: &self.routes[registration.route],
                    handler: &*registration.handler,
                    params: Params::from_slots(&registration.params, &captures),
                })
                .collect(),
        )
    }

    /// Like [`match_path`](Self::match_path), but tells a path that exists
    /// under other methods apart from one that does not exist at all.
    #[must_use]
    pub fn lookup<'a>(&'a self, method: &str, path: &'a str) -> RouteLookup<'a, H> {
        match self.match_path(method, path) {
            MatchResult::Found(matches) => RouteLookup::Found(matches),
            MatchResult::NotFound => {
                let allowed = self.allowed_methods(path);
                if allowed.is_empty() {
                    RouteLookup::NotFound
                } else {
                    RouteLookup::MethodNotAllowed { allowed }
                }
            }
        }
    }

    /// Methods registered on any node `path` reaches.
    ///
    /// Catch-all registrations are not listed.
    #[must_use]
    pub fn allowed_methods(&self, path: &str) -> AllowedMethods {
        let segments: Vec<&str> = split_path(path).map(|(_, text)| text).collect();
        let mut names = Vec::new();
        self.root.collect_methods(&segments, &mut names);
        let allowed = AllowedMethods::new(names);
        if self.config.head_falls_back_to_get {
            allowed.with_implicit_head()
        } else {
            allowed
        }
    }

    /// All registrations in insertion order.
    #[must_use]
    pub fn routes(&self) -> &[RouteInfo] {
        &self.routes
    }

    /// The configuration this router was built with.
    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }
}

/// Assign capture slots to the params and wildcard of a pattern, validating
/// it along the way.
fn param_slots(
    segments: &[Segment<'_>],
    policy: DuplicateParams,
) -> Result<Box<[(Box<str>, usize)]>, InvalidPatternKind> {
    let mut slots: Vec<(Box<str>, usize)> = Vec::new();
    let mut next_slot = 0;
    for (idx, segment) in segments.iter().enumerate() {
        let name = match *segment {
            Segment::Static(_) => continue,
            Segment::Wildcard if idx + 1 != segments.len() => {
                return Err(InvalidPatternKind::WildcardNotTrailing);
            }
            Segment::Wildcard => WILDCARD_PARAM,
            Segment::Param("") | Segment::OptionalParam("") => {
                return Err(InvalidPatternKind::EmptyParamName);
            }
            Segment::Param(name) | Segment::OptionalParam(name) => name,
        };
        let slot = next_slot;
        next_slot += 1;
        match slots.iter_mut().find(|(existing, _)| &**existing == name) {
            Some(entry) if policy == DuplicateParams::LastWins => entry.1 = slot,
            Some(_) => {
                return Err(InvalidPatternKind::DuplicateParam {
                    name: name.to_string(),
                });
            }
            None => slots.push((name.into(), slot)),
        }
    }
    Ok(slots.into_boxed_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(pattern: &str, policy: DuplicateParams) -> Vec<(String, usize)> {
        param_slots(&parse_pattern(pattern), policy)
            .unwrap()
            .iter()
            .map(|(name, slot)| (name.to_string(), *slot))
            .collect()
    }

    #[test]
    fn slots_count_only_capturing_segments() {
        assert_eq!(
            slots("/users/:id/posts/:slug", DuplicateParams::Reject),
            vec![("id".to_string(), 0), ("slug".to_string(), 1)]
        );
        assert_eq!(
            slots("/static/:dir/*", DuplicateParams::Reject),
            vec![("dir".to_string(), 0), ("*".to_string(), 1)]
        );
    }

    #[test]
    fn duplicate_last_wins_keeps_first_position() {
        assert_eq!(
            slots("/:a/:b/:a", DuplicateParams::LastWins),
            vec![("a".to_string(), 2), ("b".to_string(), 1)]
        );
    }

    #[test]
    fn invalid_patterns() {
        let reject = DuplicateParams::Reject;
        assert_eq!(
            param_slots(&parse_pattern("/a/*/b"), reject).unwrap_err(),
            InvalidPatternKind::WildcardNotTrailing
        );
        assert_eq!(
            param_slots(&parse_pattern("/a/:"), reject).unwrap_err(),
            InvalidPatternKind::EmptyParamName
        );
        assert_eq!(
            param_slots(&parse_pattern("/a/:?"), reject).unwrap_err(),
            InvalidPatternKind::EmptyParamName
        );
        assert_eq!(
            param_slots(&parse_pattern("/:a/:a"), reject).unwrap_err(),
            InvalidPatternKind::DuplicateParam {
                name: "a".to_string()
            }
        );
    }

    #[test]
    fn failed_insert_leaves_builder_untouched() {
        let mut builder = RouterBuilder::new();
        assert!(builder.insert("GET", "/a/:b?/c", "h").is_err());
        assert!(builder.routes().is_empty());
        let router = builder.build();
        assert!(!router.match_path("GET", "/a").is_found());
    }

    #[test]
    fn route_info_lists_variants() {
        let router = Router::builder()
            .route("GET", "/api/animals/:type?", ())
            .unwrap()
            .build();
        assert_eq!(
            router.routes(),
            [RouteInfo {
                method: "GET".to_string(),
                pattern: "/api/animals/:type?".to_string(),
                variants: vec!["/api/animals".to_string(), "/api/animals/:type".to_string()],
            }]
        );
    }
}
