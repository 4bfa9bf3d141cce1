use crate::handler::HandlerError;
use crate::path::PathError;
use crate::pattern::PatternError;
use crate::router::RouterConfigError;
use crate::types::HttpMethod;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("no route matched for method {method:?} and path '{path}'")]
    RouteNotFound { method: HttpMethod, path: String },
    #[error("unsupported http method '{method}'")]
    InvalidMethod { method: String },
    #[error(transparent)]
    Config(#[from] RouterConfigError),
    #[error(transparent)]
    Handler(#[from] HandlerError),
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

pub type RouterResult<T> = Result<T, RouterError>;
