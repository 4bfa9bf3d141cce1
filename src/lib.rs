pub mod context;
pub mod errors;
pub mod handler;
pub mod path;
pub mod pattern;
pub mod router;
pub mod trie;
pub mod types;

pub use context::{ContextStore, PARAM_KEY_PREFIX, RequestContext};
pub use errors::{RouterError, RouterResult};
pub use handler::{
    BoxedHandler, FileServer, Handler, HandlerChain, HandlerError, HandlerResult, handler,
};
pub use pattern::PatternMatcher;
pub use router::{Route, RouteMatch, Router, RouterOptions, RouterOptionsBuilder};
pub use types::{HttpMethod, RouteParams};
