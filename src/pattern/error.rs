use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("parameter segment '{segment}' is missing a name")]
    ParameterMissingName { segment: String },
    #[error("parameter segment '{segment}' has an unterminated '<' constraint")]
    UnterminatedConstraint { segment: String },
    #[error("parameter segment '{segment}' has an empty constraint")]
    EmptyConstraint { segment: String },
    #[error("invalid regex constraint for parameter '{name}' in '{pattern}': {error}")]
    RegexConstraintInvalid {
        pattern: String,
        name: String,
        error: String,
    },
}

pub type PatternResult<T> = Result<T, PatternError>;
