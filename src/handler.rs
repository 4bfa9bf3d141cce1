use std::fmt;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::context::RequestContext;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("access to '{path}' is forbidden")]
    Forbidden { path: String },
    #[error("file '{path}' not found")]
    FileNotFound { path: String },
    #[error("handler failed: {message}")]
    Failed { message: String },
}

pub type HandlerResult = Result<(), HandlerError>;

pub trait Handler: Send + Sync {
    fn call(&self, ctx: &mut dyn RequestContext) -> HandlerResult;
}

impl<F> Handler for F
where
    F: Fn(&mut dyn RequestContext) -> HandlerResult + Send + Sync,
{
    fn call(&self, ctx: &mut dyn RequestContext) -> HandlerResult {
        self(ctx)
    }
}

pub type BoxedHandler = Arc<dyn Handler>;

pub fn handler<F>(f: F) -> BoxedHandler
where
    F: Fn(&mut dyn RequestContext) -> HandlerResult + Send + Sync + 'static,
{
    Arc::new(f)
}

#[derive(Clone)]
pub struct HandlerChain {
    handlers: Arc<[BoxedHandler]>,
}

impl HandlerChain {
    pub fn new(handlers: Vec<BoxedHandler>) -> Self {
        Self {
            handlers: handlers.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoxedHandler> {
        self.handlers.iter()
    }

    /// Stops at the first handler that fails.
    pub fn run(&self, ctx: &mut dyn RequestContext) -> HandlerResult {
        for handler in self.handlers.iter() {
            handler.call(ctx)?;
        }
        Ok(())
    }
}

impl Default for HandlerChain {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl fmt::Debug for HandlerChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerChain")
            .field("len", &self.handlers.len())
            .finish()
    }
}

/// Reads files for static routes. The router resolves the path and applies
/// the traversal check before calling in.
pub trait FileServer: Send + Sync {
    fn serve_file(&self, ctx: &mut dyn RequestContext, path: &Path) -> HandlerResult;
}
