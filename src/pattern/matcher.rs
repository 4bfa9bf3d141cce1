use smallvec::SmallVec;
use std::sync::Arc;

use super::{CompiledPattern, ConstraintCache, PatternResult, SegmentPattern, parse_segment};
use crate::path::PathSegmenter;
use crate::types::RouteParams;

pub type CapturedParam = (Box<str>, String);
pub type CaptureList = SmallVec<[CapturedParam; 4]>;

/// Matches parsed pattern segments against path segments, returning bindings
/// in pattern order.
///
/// When the direct walk fails and the path is exactly one segment shorter than
/// the pattern, one interior optional parameter is elided (bound to `""`) and
/// the walk retried.
pub fn match_segments<S: AsRef<str>>(
    pattern: &[SegmentPattern],
    path: &[S],
) -> Option<CaptureList> {
    if let Some(captures) = walk(pattern, path, None) {
        return Some(captures);
    }

    if path.len() + 1 != pattern.len() {
        return None;
    }

    let last = pattern.len() - 1;
    pattern
        .iter()
        .enumerate()
        .take(last)
        .filter(|(_, segment)| segment.is_optional())
        .find_map(|(idx, _)| walk(pattern, path, Some(idx)))
}

fn walk<S: AsRef<str>>(
    pattern: &[SegmentPattern],
    path: &[S],
    elided: Option<usize>,
) -> Option<CaptureList> {
    let mut captures = CaptureList::new();
    let mut pos = 0usize;

    for (idx, segment) in pattern.iter().enumerate() {
        if elided == Some(idx) {
            if let Some(name) = segment.param_name() {
                captures.push((name.into(), String::new()));
            }
            continue;
        }

        if let SegmentPattern::Wildcard { name } = segment {
            captures.push((name.clone(), join_rest(path, pos)));
            return Some(captures);
        }

        let Some(value) = path.get(pos).map(|s| s.as_ref()) else {
            if let SegmentPattern::Param {
                name,
                optional: true,
                ..
            } = segment
            {
                captures.push((name.clone(), String::new()));
                continue;
            }
            return None;
        };

        if !segment.matches(value) {
            return None;
        }
        if let Some(name) = segment.param_name() {
            captures.push((name.into(), value.to_string()));
        }
        pos += 1;
    }

    (pos == path.len()).then_some(captures)
}

fn join_rest<S: AsRef<str>>(path: &[S], from: usize) -> String {
    let Some(rest) = path.get(from..) else {
        return String::new();
    };
    let mut out = String::with_capacity(rest.iter().map(|s| s.as_ref().len() + 1).sum());
    for (i, segment) in rest.iter().enumerate() {
        if i > 0 {
            out.push('/');
        }
        out.push_str(segment.as_ref());
    }
    out
}

pub fn captures_to_params(captures: CaptureList) -> RouteParams {
    captures
        .into_iter()
        .map(|(name, value)| (name.into_string(), value))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentMatch {
    pub matched: bool,
    pub param: Option<String>,
}

impl SegmentMatch {
    fn miss() -> Self {
        Self {
            matched: false,
            param: None,
        }
    }
}

/// String-level matching API backed by a router's segment and regex caches.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    segmenter: Arc<PathSegmenter>,
    constraints: Arc<ConstraintCache>,
}

impl PatternMatcher {
    pub fn new(segmenter: Arc<PathSegmenter>, constraints: Arc<ConstraintCache>) -> Self {
        Self {
            segmenter,
            constraints,
        }
    }

    /// Matches a single segment. An empty `path_segment` means "absent".
    pub fn segment_match(&self, pattern_segment: &str, path_segment: &str) -> SegmentMatch {
        let Ok(mut parsed) = parse_segment(pattern_segment) else {
            return SegmentMatch::miss();
        };
        if self
            .constraints
            .hydrate(std::slice::from_mut(&mut parsed), false)
            .is_err()
        {
            return SegmentMatch::miss();
        }

        let matched = match &parsed {
            SegmentPattern::Wildcard { .. } => true,
            SegmentPattern::Param { optional, .. } if path_segment.is_empty() => *optional,
            other => other.matches(path_segment),
        };

        SegmentMatch {
            matched,
            param: if matched {
                parsed.param_name().map(str::to_string)
            } else {
                None
            },
        }
    }

    pub fn compile(&self, pattern: &str) -> PatternResult<CompiledPattern> {
        let mut compiled = CompiledPattern::parse(pattern)?;
        compiled.hydrate(&self.constraints, false)?;
        Ok(compiled)
    }

    pub fn path_match(&self, pattern: &str, path: &str) -> bool {
        self.captures(pattern, path).is_some()
    }

    pub fn extract(&self, pattern: &str, path: &str) -> RouteParams {
        self.captures(pattern, path)
            .map(captures_to_params)
            .unwrap_or_default()
    }

    fn captures(&self, pattern: &str, path: &str) -> Option<CaptureList> {
        let compiled = self.compile(pattern).ok()?;
        let segments = self.segmenter.split(path);
        compiled.match_path(&*segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> PatternMatcher {
        PatternMatcher::new(
            Arc::new(PathSegmenter::new(64, 10)),
            Arc::new(ConstraintCache::new()),
        )
    }

    #[test]
    fn static_segment_requires_byte_equality() {
        let m = matcher();
        assert!(m.segment_match("users", "users").matched);
        assert!(!m.segment_match("users", "Users").matched);
        assert_eq!(m.segment_match("users", "users").param, None);
    }

    #[test]
    fn absent_segment_only_matches_optional_parameter() {
        let m = matcher();
        let optional = m.segment_match(":page?", "");
        assert!(optional.matched);
        assert_eq!(optional.param.as_deref(), Some("page"));
        assert!(!m.segment_match(":page", "").matched);
    }

    #[test]
    fn wildcard_segment_always_matches() {
        let m = matcher();
        let hit = m.segment_match("*rest", "");
        assert!(hit.matched);
        assert_eq!(hit.param.as_deref(), Some("rest"));
    }

    #[test]
    fn malformed_constraint_never_matches() {
        let m = matcher();
        assert!(!m.segment_match(":id<[>", "[").matched);
        assert!(!m.path_match("/users/:id<(>", "/users/("));
    }

    #[test]
    fn trailing_optionals_bind_empty_strings() {
        let m = matcher();
        let params = m.extract("/archive/:year?/:month?", "/archive");
        assert_eq!(params.len(), 2);
        assert_eq!(params["year"], "");
        assert_eq!(params["month"], "");
    }

    #[test]
    fn path_longer_than_pattern_does_not_match() {
        let m = matcher();
        assert!(!m.path_match("/users/:id", "/users/1/extra"));
        assert!(m.extract("/users/:id", "/users/1/extra").is_empty());
    }

    #[test]
    fn elision_tries_each_interior_optional() {
        let m = matcher();
        let params = m.extract("/:lang?/docs/:section?/intro", "/en/docs/intro");
        assert_eq!(params["lang"], "en");
        assert_eq!(params["section"], "");
    }

    #[test]
    fn elision_only_removes_one_segment() {
        let m = matcher();
        assert!(!m.path_match("/a/:b?/:c?/d", "/a/d"));
    }

    #[test]
    fn elision_requires_path_one_segment_short() {
        let m = matcher();
        assert!(!m.path_match("/a/:b?/c/:d?", "/a/c"));
        assert!(m.extract("/a/:b?/c/:d?", "/a/c").is_empty());
        assert!(m.path_match("/a/:b?/c/:d?", "/a/c/x"));
        assert!(m.path_match("/a/:b?/c/:d?", "/a/b/c"));
    }
}
