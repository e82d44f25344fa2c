//! Segment trie.
//!
//! Each node stands for one segment position. Children are split by kind:
//! literal children keyed by text, at most one parametric child shared by
//! every `:name` at that position, and at most one wildcard child. Parameter
//! names are not stored on nodes; each [`Registration`] maps its own names to
//! capture slots, so `/a/:x` and `/a/:y` share a node without conflict.

use std::collections::HashMap;
use std::sync::Arc;

use crate::segment::Segment;

/// A handler chain registered at a node for one method.
pub(crate) struct Registration<H> {
    pub(crate) handler: Arc<H>,
    /// Parameter name to capture slot.
    pub(crate) params: Box<[(Box<str>, usize)]>,
    /// Index into the router's route table.
    pub(crate) route: usize,
}

pub(crate) struct Node<H> {
    statics: HashMap<Box<str>, Node<H>>,
    param: Option<Box<Node<H>>>,
    wildcard: Option<Box<Node<H>>>,
    methods: HashMap<Box<str>, Vec<Registration<H>>>,
    any: Vec<Registration<H>>,
}

impl<H> Default for Node<H> {
    fn default() -> Self {
        Self {
            statics: HashMap::new(),
            param: None,
            wildcard: None,
            methods: HashMap::new(),
            any: Vec::new(),
        }
    }
}

/// Where a registration goes on its terminal node.
pub(crate) enum MethodSlot<'m> {
    Specific(&'m str),
    Any,
}

impl<H> Node<H> {
    /// Descend along `segments`, creating nodes as needed, and append
    /// `registration` at the end. `segments` must already be validated: no
    /// optional segment and a wildcard only in last position.
    pub(crate) fn insert(
        &mut self,
        segments: &[Segment<'_>],
        method: &MethodSlot<'_>,
        registration: Registration<H>,
    ) {
        let mut node = self;
        for segment in segments {
            node = match *segment {
                Segment::Static(text) => node.statics.entry(text.into()).or_default(),
                Segment::Param(_) | Segment::OptionalParam(_) => {
                    &mut **node.param.get_or_insert_with(Box::default)
                }
                Segment::Wildcard => &mut **node.wildcard.get_or_insert_with(Box::default),
            };
        }
        match method {
            MethodSlot::Specific(name) => node
                .methods
                .entry((*name).into())
                .or_default()
                .push(registration),
            MethodSlot::Any => node.any.push(registration),
        }
    }

    /// Registrations that answer `method` here: the method's own list, or the
    /// catch-all list when that is empty.
    fn registrations(&self, method: &str) -> Option<&[Registration<H>]> {
        match self.methods.get(method) {
            Some(list) if !list.is_empty() => Some(list),
            _ if !self.any.is_empty() => Some(&self.any),
            _ => None,
        }
    }

    /// Depth-first search with backtracking.
    ///
    /// Children are tried static, then parametric, then wildcard. On success
    /// `captures` holds one value per param/wildcard edge on the winning path;
    /// on failure it is left as it was on entry.
    pub(crate) fn search<'a>(
        &'a self,
        segments: &[(usize, &'a str)],
        path: &'a str,
        method: &str,
        captures: &mut Vec<&'a str>,
    ) -> Option<&'a [Registration<H>]> {
        let Some((&(offset, segment), rest)) = segments.split_first() else {
            if let Some(found) = self.registrations(method) {
                return Some(found);
            }
            // A bare prefix still satisfies a wildcard, with an empty remainder.
            let found = self.wildcard.as_deref()?.registrations(method)?;
            captures.push("");
            return Some(found);
        };

        if let Some(child) = self.statics.get(segment) {
            if let Some(found) = child.search(rest, path, method, captures) {
                return Some(found);
            }
        }

        if !segment.is_empty() {
            if let Some(child) = self.param.as_deref() {
                captures.push(segment);
                if let Some(found) = child.search(rest, path, method, captures) {
                    return Some(found);
                }
                captures.pop();
            }
        }

        let found = self.wildcard.as_deref()?.registrations(method)?;
        captures.push(&path[offset..]);
        Some(found)
    }

    /// Collect every specific method registered on a node `segments` can
    /// reach, ignoring priority.
    pub(crate) fn collect_methods<'a>(&'a self, segments: &[&str], out: &mut Vec<&'a str>) {
        let Some((&segment, rest)) = segments.split_first() else {
            self.push_methods(out);
            if let Some(wildcard) = self.wildcard.as_deref() {
                wildcard.push_methods(out);
            }
            return;
        };
        if let Some(child) = self.statics.get(segment) {
            child.collect_methods(rest, out);
        }
        if !segment.is_empty() {
            if let Some(child) = self.param.as_deref() {
                child.collect_methods(rest, out);
            }
        }
        if let Some(wildcard) = self.wildcard.as_deref() {
            wildcard.push_methods(out);
        }
    }

    fn push_methods<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.extend(
            self.methods
                .iter()
                .filter(|(_, list)| !list.is_empty())
                .map(|(name, _)| &**name),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{parse_pattern, split_path};

    fn registration(route: usize, params: &[(&str, usize)]) -> Registration<&'static str> {
        Registration {
            handler: Arc::new("h"),
            params: params
                .iter()
                .map(|&(name, slot)| (Box::from(name), slot))
                .collect(),
            route,
        }
    }

    fn insert(root: &mut Node<&'static str>, method: &str, pattern: &str, route: usize) {
        root.insert(
            &parse_pattern(pattern),
            &MethodSlot::Specific(method),
            registration(route, &[]),
        );
    }

    fn search<'a>(
        root: &'a Node<&'static str>,
        method: &str,
        path: &'a str,
    ) -> Option<(usize, Vec<&'a str>)> {
        let segments: Vec<_> = split_path(path).collect();
        let mut captures = Vec::new();
        root.search(&segments, path, method, &mut captures)
            .map(|found| (found[0].route, captures))
    }

    #[test]
    fn params_share_one_child() {
        let mut root = Node::default();
        insert(&mut root, "GET", "/a/:x", 0);
        insert(&mut root, "GET", "/a/:y/z", 1);
        let a = root.statics.get("a").unwrap();
        assert!(a.param.is_some());
        assert!(a.param.as_ref().unwrap().statics.contains_key("z"));
    }

    #[test]
    fn static_beats_param() {
        let mut root = Node::default();
        insert(&mut root, "GET", "/users/:id", 0);
        insert(&mut root, "GET", "/users/me", 1);
        assert_eq!(search(&root, "GET", "/users/me"), Some((1, vec![])));
        assert_eq!(search(&root, "GET", "/users/7"), Some((0, vec!["7"])));
    }

    #[test]
    fn failed_branch_leaves_captures_clean() {
        let mut root = Node::default();
        insert(&mut root, "GET", "/a/:x/c", 0);
        insert(&mut root, "GET", "/:p/:q/d", 1);
        assert_eq!(search(&root, "GET", "/a/b/d"), Some((1, vec!["a", "b"])));
    }

    #[test]
    fn wildcard_captures_remainder() {
        let mut root = Node::default();
        insert(&mut root, "GET", "/files/*", 0);
        assert_eq!(search(&root, "GET", "/files/a/b"), Some((0, vec!["a/b"])));
        assert_eq!(search(&root, "GET", "/files/"), Some((0, vec![""])));
        assert_eq!(search(&root, "GET", "/files"), Some((0, vec![""])));
        assert_eq!(search(&root, "GET", "/other"), None);
    }

    #[test]
    fn param_rejects_empty_segment() {
        let mut root = Node::default();
        insert(&mut root, "GET", "/a/:x", 0);
        assert_eq!(search(&root, "GET", "/a/"), None);
    }

    #[test]
    fn catch_all_used_only_when_method_list_empty() {
        let mut root = Node::default();
        root.insert(&parse_pattern("/x"), &MethodSlot::Any, registration(0, &[]));
        insert(&mut root, "GET", "/x", 1);
        assert_eq!(search(&root, "GET", "/x"), Some((1, vec![])));
        assert_eq!(search(&root, "DELETE", "/x"), Some((0, vec![])));
    }

    #[test]
    fn collects_methods_across_branches() {
        let mut root = Node::default();
        insert(&mut root, "GET", "/users/me", 0);
        insert(&mut root, "DELETE", "/users/:id", 1);
        insert(&mut root, "PUT", "/users/*", 2);
        let mut out = Vec::new();
        root.collect_methods(&["users", "me"], &mut out);
        out.sort_unstable();
        assert_eq!(out, vec!["DELETE", "GET", "PUT"]);
    }
}
