use regex::Regex;
use std::sync::Arc;

pub const WILDCARD_DEFAULT_NAME: &str = "*";

#[derive(Debug, Clone)]
pub struct ParamConstraint {
    raw: Box<str>,
    compiled: Option<Arc<Regex>>,
}

impl ParamConstraint {
    pub fn new(raw: String) -> Self {
        Self {
            raw: raw.into_boxed_str(),
            compiled: None,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn compiled(&self) -> Option<&Arc<Regex>> {
        self.compiled.as_ref()
    }

    pub fn set_compiled(&mut self, regex: Arc<Regex>) {
        self.compiled = Some(regex);
    }

    /// A constraint whose regex failed to compile never matches.
    pub fn is_match(&self, value: &str) -> bool {
        self.compiled
            .as_ref()
            .is_some_and(|regex| regex.is_match(value))
    }
}

impl PartialEq for ParamConstraint {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for ParamConstraint {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentPattern {
    Static(Box<str>),
    Param {
        name: Box<str>,
        constraint: Option<ParamConstraint>,
        optional: bool,
    },
    Wildcard {
        name: Box<str>,
    },
}

impl SegmentPattern {
    pub fn is_optional(&self) -> bool {
        matches!(self, SegmentPattern::Param { optional: true, .. })
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, SegmentPattern::Wildcard { .. })
    }

    pub fn param_name(&self) -> Option<&str> {
        match self {
            SegmentPattern::Static(_) => None,
            SegmentPattern::Param { name, .. } | SegmentPattern::Wildcard { name } => Some(name),
        }
    }

    pub fn matches(&self, segment: &str) -> bool {
        match self {
            SegmentPattern::Static(literal) => literal.as_ref() == segment,
            SegmentPattern::Param { constraint, .. } => match constraint {
                Some(constraint) => constraint.is_match(segment),
                None => !segment.is_empty(),
            },
            SegmentPattern::Wildcard { .. } => true,
        }
    }
}
