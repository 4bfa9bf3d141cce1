use super::matcher::{CaptureList, captures_to_params, match_segments};
use super::{ConstraintCache, PatternResult, SegmentPattern, parse_segment};
use crate::path::split_segments;
use crate::types::RouteParams;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    raw: Box<str>,
    segments: Vec<SegmentPattern>,
}

impl CompiledPattern {
    pub fn parse(raw: &str) -> PatternResult<Self> {
        let segments = split_segments(raw)
            .iter()
            .map(|segment| parse_segment(segment))
            .collect::<PatternResult<Vec<_>>>()?;

        Ok(Self {
            raw: raw.into(),
            segments,
        })
    }

    pub fn hydrate(&mut self, cache: &ConstraintCache, strict: bool) -> PatternResult<()> {
        cache.hydrate(&mut self.segments, strict)
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[SegmentPattern] {
        &self.segments
    }

    pub fn is_static(&self) -> bool {
        self.segments
            .iter()
            .all(|segment| matches!(segment, SegmentPattern::Static(_)))
    }

    pub fn match_path<S: AsRef<str>>(&self, path: &[S]) -> Option<CaptureList> {
        match_segments(&self.segments, path)
    }

    pub fn extract<S: AsRef<str>>(&self, path: &[S]) -> RouteParams {
        self.match_path(path)
            .map(captures_to_params)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compiled(raw: &str) -> CompiledPattern {
        let mut pattern = CompiledPattern::parse(raw).unwrap();
        pattern.hydrate(&ConstraintCache::new(), true).unwrap();
        pattern
    }

    #[test]
    fn static_patterns_match_themselves() {
        for raw in ["/", "/health", "/api/v1/users", "/a.b/c-d/e_f"] {
            let pattern = compiled(raw);
            assert!(pattern.is_static());
            assert!(pattern.match_path(&split_segments(raw)).is_some(), "{raw}");
        }
    }

    #[test]
    fn regex_constraint_filters_values() {
        let pattern = compiled(r"/users/:id<\d+>");
        assert!(pattern.match_path(&["users", "123"]).is_some());
        assert!(pattern.match_path(&["users", "abc"]).is_none());
    }

    #[test]
    fn wildcard_captures_remainder_or_empty() {
        let pattern = compiled("/files/*filepath");
        let params = pattern.extract(&["files", "images", "logo.png"]);
        assert_eq!(params["filepath"], "images/logo.png");

        let params = pattern.extract(&["files"]);
        assert_eq!(params["filepath"], "");
    }

    #[test]
    fn segments_after_wildcard_are_ignored() {
        let pattern = compiled("/files/*rest/ignored");
        let params = pattern.extract(&["files", "a", "b"]);
        assert_eq!(params.len(), 1);
        assert_eq!(params["rest"], "a/b");
    }

    #[test]
    fn interior_optional_is_elided() {
        let pattern = compiled("/api/:version?/users");
        assert_eq!(pattern.extract(&["api", "users"])["version"], "");
        assert_eq!(pattern.extract(&["api", "v1", "users"])["version"], "v1");
    }

    #[test]
    fn optional_constrained_parameter_round_trips() {
        let pattern = compiled(r"/posts/:id<\d+>?");
        assert_eq!(pattern.extract(&["posts", "42"])["id"], "42");
        assert_eq!(pattern.extract(&["posts"])["id"], "");
        assert!(pattern.match_path(&["posts", "x"]).is_none());
    }

    #[test]
    fn strict_hydration_rejects_malformed_regex() {
        let mut pattern = CompiledPattern::parse("/users/:id<[>").unwrap();
        assert!(pattern.hydrate(&ConstraintCache::new(), true).is_err());
        assert!(pattern.hydrate(&ConstraintCache::new(), false).is_ok());
        assert!(pattern.match_path(&["users", "["]).is_none());
    }
}
