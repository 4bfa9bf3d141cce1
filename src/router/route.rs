use crate::handler::HandlerChain;
use crate::pattern::CompiledPattern;
use crate::types::{HttpMethod, RouteParams};
use std::sync::Arc;

/// A registered route. Immutable once created; `path` is absolute.
#[derive(Debug, Clone)]
pub struct Route {
    method: HttpMethod,
    pattern: CompiledPattern,
    handlers: HandlerChain,
}

impl Route {
    pub(crate) fn new(method: HttpMethod, pattern: CompiledPattern, handlers: HandlerChain) -> Self {
        Self {
            method,
            pattern,
            handlers,
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        self.pattern.raw()
    }

    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    pub fn handlers(&self) -> &HandlerChain {
        &self.handlers
    }
}

#[derive(Debug, Clone)]
pub struct RouteMatch {
    pub route: Arc<Route>,
    pub params: RouteParams,
}

impl RouteMatch {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn handlers(&self) -> &HandlerChain {
        self.route.handlers()
    }
}
