//! Segment trie HTTP router.
//!
//! This crate maps a method and a request path to the handler chains
//! registered for it, capturing path parameters along the way.
//!
//! # Features
//!
//! - One trie level per `/`-delimited segment
//! - Named parameters (`/users/:id`)
//! - Trailing optional parameters (`/api/animals/:type?`)
//! - Wildcard remainder capture (`/files/*`)
//! - Static over parametric over wildcard priority, with backtracking
//! - Per-method and catch-all ([`METHOD_ALL`]) registration lists
//!
//! Routes are registered on a [`RouterBuilder`] and frozen into an immutable
//! [`Router`] that can be queried from any number of threads.

#![forbid(unsafe_code)]

mod config;
mod error;
mod expand;
mod r#match;
mod node;
mod router;
mod segment;

pub use config::{DuplicateParams, RouterConfig};
pub use error::{ConfigError, InvalidPatternError, InvalidPatternKind};
pub use expand::expand;
pub use r#match::{AllowedMethods, MatchResult, Params, RouteLookup, RouteMatch};
pub use router::{METHOD_ALL, RouteInfo, Router, RouterBuilder, WILDCARD_PARAM};
pub use segment::{Segment, classify, parse_pattern};
