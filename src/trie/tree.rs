use std::sync::Arc;

use super::node::{RouteId, TrieNode};
use crate::pattern::{CompiledPattern, SegmentPattern};
use crate::types::HttpMethod;

// root is copied on write; snapshots are searched without locking
#[derive(Debug, Clone, Default)]
pub struct RouteTrie {
    root: Arc<TrieNode>,
    len: usize,
}

impl RouteTrie {
    pub fn new() -> Self {
        Self::default()
    }

    #[tracing::instrument(level = "trace", skip(self, method, pattern), fields(method=%method, pattern=%pattern.raw(), route_id=id as u64))]
    pub fn insert(&mut self, method: HttpMethod, pattern: &CompiledPattern, id: RouteId) {
        let mut current = Arc::make_mut(&mut self.root);
        for segment in pattern.segments() {
            current = current.descend_mut(segment);
            if matches!(segment, SegmentPattern::Wildcard { .. }) {
                break;
            }
        }
        current.set_route(method, id);
        self.len += 1;
    }

    pub fn find<S: AsRef<str>>(&self, method: HttpMethod, path: &[S]) -> Option<RouteId> {
        search(&self.root, method, path, 0)
    }

    pub fn snapshot(&self) -> Arc<TrieNode> {
        self.root.clone()
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.root = Arc::new(TrieNode::default());
        self.len = 0;
    }
}

/// Depth-first backtracking search: static child, then parameter children
/// (consuming a segment, then skipping one for optionals), then wildcard.
pub fn search<S: AsRef<str>>(
    node: &TrieNode,
    method: HttpMethod,
    path: &[S],
    idx: usize,
) -> Option<RouteId> {
    let current = path.get(idx).map(|s| s.as_ref());

    match current {
        None => {
            if node.is_end()
                && let Some(id) = node.route(method)
            {
                return Some(id);
            }
        }
        Some(segment) => {
            if let Some(child) = node.static_children.get(segment)
                && let Some(id) = search(child, method, path, idx + 1)
            {
                return Some(id);
            }
        }
    }

    for child in node.param_children.iter() {
        if let Some(segment) = current {
            let accepted = match child.constraint.as_ref() {
                Some(constraint) => constraint.is_match(segment),
                None => true,
            };
            if accepted && let Some(id) = search(child, method, path, idx + 1) {
                return Some(id);
            }
        }
        if child.is_optional()
            && let Some(id) = search(child, method, path, idx)
        {
            return Some(id);
        }
    }

    match node.wildcard_child.as_deref() {
        Some(wildcard) if wildcard.is_end() => wildcard.route(method),
        _ => None,
    }
}
