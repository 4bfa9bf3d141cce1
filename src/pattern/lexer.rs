use super::segment::WILDCARD_DEFAULT_NAME;
use super::{ParamConstraint, PatternError, PatternResult, SegmentPattern};

/// Parses `literal`, `:name`, `:name?`, `:name<regex>`, `:name<regex>?` or `*name`.
/// Constraints are returned uncompiled.
#[tracing::instrument(level = "trace", skip(seg), fields(segment=%seg))]
pub fn parse_segment(seg: &str) -> PatternResult<SegmentPattern> {
    if let Some(name) = seg.strip_prefix('*') {
        let name = if name.is_empty() {
            WILDCARD_DEFAULT_NAME
        } else {
            name
        };
        return Ok(SegmentPattern::Wildcard { name: name.into() });
    }

    let Some(body) = seg.strip_prefix(':') else {
        return Ok(SegmentPattern::Static(seg.into()));
    };

    let (body, optional) = match body.strip_suffix('?') {
        Some(rest) => (rest, true),
        None => (body, false),
    };

    let (name, constraint) = match body.find('<') {
        Some(open) => {
            let Some(inner) = body[open + 1..].strip_suffix('>') else {
                return Err(PatternError::UnterminatedConstraint {
                    segment: seg.to_string(),
                });
            };
            if inner.is_empty() {
                return Err(PatternError::EmptyConstraint {
                    segment: seg.to_string(),
                });
            }
            (&body[..open], Some(ParamConstraint::new(inner.to_string())))
        }
        None => (body, None),
    };

    if name.is_empty() {
        return Err(PatternError::ParameterMissingName {
            segment: seg.to_string(),
        });
    }

    Ok(SegmentPattern::Param {
        name: name.into(),
        constraint,
        optional,
    })
}
