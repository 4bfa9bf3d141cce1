use parking_lot::RwLock;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use super::route::{Route, RouteMatch};
use crate::context::{RequestContext, param_key};
use crate::errors::{RouterError, RouterResult};
use crate::handler::{BoxedHandler, FileServer, HandlerChain, HandlerError, handler};
use crate::path::{PathSegmenter, SegmentCacheStats, join_paths, resolve_static_path};
use crate::pattern::{
    CaptureList, CompiledPattern, ConstraintCache, PatternMatcher, captures_to_params,
};
use crate::router::RouterOptions;
use crate::trie::{RouteId, RouteTrie, TrieNode, search};
use crate::types::HttpMethod;

pub const STATIC_FILE_PARAM: &str = "filepath";

/// Caches and options shared by a root router and all of its groups.
#[derive(Debug)]
struct Shared {
    options: RouterOptions,
    segmenter: Arc<PathSegmenter>,
    constraints: Arc<ConstraintCache>,
}

#[derive(Default)]
struct RouterState {
    routes: Arc<Vec<Arc<Route>>>,
    trie: RouteTrie,
    middlewares: Vec<BoxedHandler>,
    children: Vec<Router>,
}

struct RouterNode {
    base_path: String,
    shared: Arc<Shared>,
    state: RwLock<RouterState>,
}

/// A router or route group. Cloning yields another handle to the same node.
#[derive(Clone)]
pub struct Router {
    inner: Arc<RouterNode>,
}

impl Router {
    pub fn new(options: Option<RouterOptions>) -> Self {
        let options = options.unwrap_or_default();
        let segmenter = PathSegmenter::new(
            options.segment_cache_capacity,
            options.segment_cache_evict_percent,
        )
        .with_debug(options.debug);
        let shared = Shared {
            segmenter: Arc::new(segmenter),
            constraints: Arc::new(ConstraintCache::new()),
            options,
        };
        Self::with_shared(String::new(), Arc::new(shared), Vec::new())
    }

    pub fn try_new(options: RouterOptions) -> RouterResult<Self> {
        options.validate()?;
        Ok(Self::new(Some(options)))
    }

    fn with_shared(base_path: String, shared: Arc<Shared>, middlewares: Vec<BoxedHandler>) -> Self {
        let state = RouterState {
            middlewares,
            ..Default::default()
        };
        Self {
            inner: Arc::new(RouterNode {
                base_path,
                shared,
                state: RwLock::new(state),
            }),
        }
    }

    /// Registers `pattern` (relative to this group) for `method`, running this
    /// router's current middlewares before `handlers`.
    #[tracing::instrument(level = "trace", skip(self, method, handlers), fields(method=%method, base=%self.inner.base_path))]
    pub fn handle(
        &self,
        method: HttpMethod,
        pattern: &str,
        handlers: Vec<BoxedHandler>,
    ) -> RouterResult<()> {
        let shared = &self.inner.shared;
        let full_path = join_paths(&self.inner.base_path, pattern);
        let mut compiled = CompiledPattern::parse(&full_path)?;
        compiled.hydrate(&shared.constraints, shared.options.validate_regex_syntax)?;

        let mut state = self.inner.state.write();
        let mut chain = Vec::with_capacity(state.middlewares.len() + handlers.len());
        chain.extend(state.middlewares.iter().cloned());
        chain.extend(handlers);

        let route = Arc::new(Route::new(method, compiled, HandlerChain::new(chain)));
        let id = state.routes.len();
        state.trie.insert(method, route.pattern(), id);
        Arc::make_mut(&mut state.routes).push(route);

        tracing::event!(tracing::Level::TRACE, operation="handle", method=%method, path=%full_path, route_id=id as u64);
        Ok(())
    }

    pub fn get(&self, pattern: &str, handlers: Vec<BoxedHandler>) -> RouterResult<()> {
        self.handle(HttpMethod::Get, pattern, handlers)
    }

    pub fn post(&self, pattern: &str, handlers: Vec<BoxedHandler>) -> RouterResult<()> {
        self.handle(HttpMethod::Post, pattern, handlers)
    }

    pub fn put(&self, pattern: &str, handlers: Vec<BoxedHandler>) -> RouterResult<()> {
        self.handle(HttpMethod::Put, pattern, handlers)
    }

    pub fn delete(&self, pattern: &str, handlers: Vec<BoxedHandler>) -> RouterResult<()> {
        self.handle(HttpMethod::Delete, pattern, handlers)
    }

    pub fn patch(&self, pattern: &str, handlers: Vec<BoxedHandler>) -> RouterResult<()> {
        self.handle(HttpMethod::Patch, pattern, handlers)
    }

    pub fn head(&self, pattern: &str, handlers: Vec<BoxedHandler>) -> RouterResult<()> {
        self.handle(HttpMethod::Head, pattern, handlers)
    }

    pub fn options(&self, pattern: &str, handlers: Vec<BoxedHandler>) -> RouterResult<()> {
        self.handle(HttpMethod::Options, pattern, handlers)
    }

    pub fn any(&self, pattern: &str, handlers: Vec<BoxedHandler>) -> RouterResult<()> {
        for method in HttpMethod::ALL {
            self.handle(method, pattern, handlers.clone())?;
        }
        Ok(())
    }

    /// Creates a child group under `prefix`. The child starts with a copy of
    /// this router's middlewares; later `use_middleware` calls here do not
    /// reach it.
    pub fn group(&self, prefix: &str) -> Router {
        let mut state = self.inner.state.write();
        let child = Router::with_shared(
            join_paths(&self.inner.base_path, prefix),
            self.inner.shared.clone(),
            state.middlewares.clone(),
        );
        state.children.push(child.clone());
        tracing::event!(tracing::Level::TRACE, operation="group", base=%child.inner.base_path);
        child
    }

    pub fn use_middleware(&self, middlewares: Vec<BoxedHandler>) {
        self.inner.state.write().middlewares.extend(middlewares);
    }

    /// Serves files under `root` at `prefix/*filepath` through `server`.
    pub fn static_files(
        &self,
        prefix: &str,
        root: impl Into<PathBuf>,
        server: Arc<dyn FileServer>,
    ) -> RouterResult<()> {
        let root = root.into();
        let serve = handler(move |ctx| {
            let captured = ctx.param(STATIC_FILE_PARAM).unwrap_or_default().to_string();
            let resolved = resolve_static_path(&root, &captured).map_err(|err| {
                tracing::event!(tracing::Level::WARN, error=%err, "static file request rejected");
                HandlerError::Forbidden {
                    path: captured.clone(),
                }
            })?;
            server.serve_file(ctx, &resolved)
        });

        let pattern = join_paths(prefix, &format!("*{STATIC_FILE_PARAM}"));
        self.handle(HttpMethod::Get, &pattern, vec![serve])
    }

    pub fn routes(&self) -> Vec<Arc<Route>> {
        let (mut out, children) = {
            let state = self.inner.state.read();
            (Vec::clone(&state.routes), state.children.clone())
        };
        for child in children.iter() {
            out.extend(child.routes());
        }
        out
    }

    #[tracing::instrument(level = "trace", skip(self, method, path), fields(method=%method, path=%path))]
    pub fn find(&self, method: HttpMethod, path: &str) -> Option<RouteMatch> {
        let segments = self.inner.shared.segmenter.split(path);
        let found = self.find_segments(method, &segments);
        tracing::event!(tracing::Level::TRACE, operation="find", matched=found.is_some());
        found
    }

    fn find_segments(&self, method: HttpMethod, segments: &[Box<str>]) -> Option<RouteMatch> {
        let (routes, trie) = {
            let state = self.inner.state.read();
            (state.routes.clone(), state.trie.snapshot())
        };

        if let Some((route, captures)) = reconcile(&routes, &trie, method, segments) {
            return Some(RouteMatch {
                route,
                params: captures_to_params(captures),
            });
        }

        let children = self.inner.state.read().children.clone();
        children
            .iter()
            .find_map(|child| child.find_segments(method, segments))
    }

    /// Finds the route and publishes its parameters into `ctx` under
    /// `param:<name>`.
    pub fn resolve(
        &self,
        method: HttpMethod,
        path: &str,
        ctx: &mut dyn RequestContext,
    ) -> Option<HandlerChain> {
        let found = self.find(method, path)?;
        for (name, value) in found.params {
            ctx.set_value(param_key(&name), value);
        }
        Some(found.route.handlers().clone())
    }

    pub fn serve(
        &self,
        method: HttpMethod,
        path: &str,
        ctx: &mut dyn RequestContext,
    ) -> RouterResult<()> {
        let chain = self
            .resolve(method, path, ctx)
            .ok_or_else(|| RouterError::RouteNotFound {
                method,
                path: path.to_string(),
            })?;
        chain.run(ctx)?;
        Ok(())
    }

    /// Removes and clears the group at this router's base joined with `prefix`.
    pub fn remove_group(&self, prefix: &str) -> bool {
        let target = join_paths(&self.inner.base_path, prefix);
        let removed = {
            let mut state = self.inner.state.write();
            state
                .children
                .iter()
                .position(|child| same_prefix(&child.inner.base_path, &target))
                .map(|pos| state.children.remove(pos))
        };

        match removed {
            Some(child) => {
                child.clear();
                true
            }
            None => false,
        }
    }

    pub fn clear(&self) {
        let children = {
            let mut state = self.inner.state.write();
            state.routes = Arc::new(Vec::new());
            state.trie.clear();
            state.middlewares.clear();
            std::mem::take(&mut state.children)
        };
        for child in children {
            child.clear();
        }
    }

    pub fn base_path(&self) -> &str {
        &self.inner.base_path
    }

    pub fn middleware_count(&self) -> usize {
        self.inner.state.read().middlewares.len()
    }

    pub fn children(&self) -> Vec<Router> {
        self.inner.state.read().children.clone()
    }

    pub fn config(&self) -> &RouterOptions {
        &self.inner.shared.options
    }

    pub fn segment_cache_stats(&self) -> SegmentCacheStats {
        self.inner.shared.segmenter.stats()
    }

    pub fn matcher(&self) -> PatternMatcher {
        PatternMatcher::new(
            self.inner.shared.segmenter.clone(),
            self.inner.shared.constraints.clone(),
        )
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(None)
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("Router")
            .field("base_path", &self.inner.base_path)
            .field("routes", &state.routes.len())
            .field("middlewares", &state.middlewares.len())
            .field("children", &state.children)
            .finish()
    }
}

fn same_prefix(left: &str, right: &str) -> bool {
    left.trim_end_matches('/') == right.trim_end_matches('/')
}

fn first_match(
    routes: &[Arc<Route>],
    method: HttpMethod,
    segments: &[Box<str>],
) -> Option<(RouteId, CaptureList)> {
    routes.iter().enumerate().find_map(|(id, route)| {
        if route.method() != method {
            return None;
        }
        route.pattern().match_path(segments).map(|captures| (id, captures))
    })
}

/// Picks the first route in registration order that matches, using the trie
/// result to bound the scan. The outcome equals a full linear scan.
fn reconcile(
    routes: &[Arc<Route>],
    trie: &TrieNode,
    method: HttpMethod,
    segments: &[Box<str>],
) -> Option<(Arc<Route>, CaptureList)> {
    let hint = search(trie, method, segments, 0).filter(|id| *id < routes.len());

    let Some(hint) = hint else {
        return first_match(routes, method, segments)
            .map(|(id, captures)| (routes[id].clone(), captures));
    };

    if let Some((id, captures)) = first_match(&routes[..hint], method, segments) {
        tracing::event!(
            tracing::Level::DEBUG,
            trie_route = hint as u64,
            linear_route = id as u64,
            "trie and linear scan disagree; earlier registration wins"
        );
        return Some((routes[id].clone(), captures));
    }

    let hinted = &routes[hint];
    if hinted.method() == method
        && let Some(captures) = hinted.pattern().match_path(segments)
    {
        return Some((hinted.clone(), captures));
    }

    tracing::event!(
        tracing::Level::DEBUG,
        trie_route = hint as u64,
        "trie candidate rejected by pattern matcher"
    );
    first_match(&routes[hint + 1..], method, segments)
        .map(|(id, captures)| (routes[hint + 1 + id].clone(), captures))
}
