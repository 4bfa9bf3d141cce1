mod compiled;
mod constraint;
mod error;
mod lexer;
mod matcher;
mod segment;

pub use compiled::CompiledPattern;
pub use constraint::ConstraintCache;
pub use error::{PatternError, PatternResult};
pub use lexer::parse_segment;
pub use matcher::{
    CaptureList, CapturedParam, PatternMatcher, SegmentMatch, captures_to_params, match_segments,
};
pub use segment::{ParamConstraint, SegmentPattern, WILDCARD_DEFAULT_NAME};
