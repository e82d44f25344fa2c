//! Route matching results.

use std::collections::HashMap;

use spiceflow_types::Method;

use crate::router::RouteInfo;

/// Path parameters captured for one matched registration.
///
/// Names borrow from the router and values from the request path; nothing is
/// decoded or copied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params<'a> {
    entries: Vec<(&'a str, &'a str)>,
}

impl<'a> Params<'a> {
    pub(crate) fn from_slots(names: &'a [(Box<str>, usize)], captures: &[&'a str]) -> Self {
        let entries = names
            .iter()
            .filter_map(|(name, slot)| captures.get(*slot).map(|value| (&**name, *value)))
            .collect();
        Self { entries }
    }

    /// Get a parameter value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    /// Iterate over `(name, value)` pairs in pattern order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of captured parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy the parameters into an owned map.
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.entries
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect()
    }
}

/// A matched registration with its extracted parameters.
#[derive(Debug, PartialEq)]
pub struct RouteMatch<'a, H> {
    /// The route this registration came from.
    pub route: &'a RouteInfo,
    /// The registered handler chain.
    pub handler: &'a H,
    /// Extracted path parameters.
    pub params: Params<'a>,
}

impl<'a, H> RouteMatch<'a, H> {
    /// Get a parameter value by name.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&'a str> {
        self.params.get(name)
    }
}

/// Outcome of [`Router::match_path`](crate::Router::match_path).
#[derive(Debug, PartialEq)]
pub enum MatchResult<'a, H> {
    /// No registration answers this method and path.
    NotFound,
    /// Every registration on the matched node, in insertion order.
    Found(Vec<RouteMatch<'a, H>>),
}

impl<'a, H> MatchResult<'a, H> {
    /// Returns true for [`MatchResult::Found`].
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The matches, empty when not found.
    #[must_use]
    pub fn matches(&self) -> &[RouteMatch<'a, H>] {
        match self {
            Self::Found(matches) => matches,
            Self::NotFound => &[],
        }
    }

    /// Consume the result, returning the matches.
    #[must_use]
    pub fn into_matches(self) -> Vec<RouteMatch<'a, H>> {
        match self {
            Self::Found(matches) => matches,
            Self::NotFound => Vec::new(),
        }
    }

    /// The handler chains in order, without parameters.
    pub fn handlers(&self) -> impl Iterator<Item = &'a H> + '_ {
        self.matches().iter().map(|m| m.handler)
    }
}

/// Result of attempting to locate a route by path and method.
#[derive(Debug, PartialEq)]
pub enum RouteLookup<'a, H> {
    /// Registrations matched by path and method.
    Found(Vec<RouteMatch<'a, H>>),
    /// Path matched, but method is not allowed.
    MethodNotAllowed { allowed: AllowedMethods },
    /// No route matched the path.
    NotFound,
}

/// Allowed methods for a matched path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedMethods {
    methods: Vec<String>,
}

impl AllowedMethods {
    /// Create a normalized allow list.
    ///
    /// Standard methods are sorted in [`Method::ALL`] order, extension methods
    /// after them alphabetically, and duplicates are removed.
    #[must_use]
    pub fn new<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut methods: Vec<String> = methods.into_iter().map(Into::into).collect();
        methods.sort_by(|a, b| method_order(a).cmp(&method_order(b)));
        methods.dedup();
        Self { methods }
    }

    /// Add `HEAD` if `GET` is present.
    #[must_use]
    pub fn with_implicit_head(self) -> Self {
        if self.contains(Method::Get.as_str()) && !self.contains(Method::Head.as_str()) {
            let mut methods = self.methods;
            methods.push(Method::Head.as_str().to_string());
            return Self::new(methods);
        }
        self
    }

    /// Access the normalized methods.
    #[must_use]
    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    /// Check whether a method is allowed.
    #[must_use]
    pub fn contains(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m == method)
    }

    /// Returns true if no method is allowed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Format as an HTTP Allow header value.
    #[must_use]
    pub fn header_value(&self) -> String {
        self.methods.join(", ")
    }
}

fn method_order(method: &str) -> (u8, &str) {
    match Method::from_bytes(method.as_bytes()) {
        Some(known) => (known.order(), ""),
        None => (u8::MAX, method),
    }
}
