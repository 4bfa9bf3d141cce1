use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use segment_router::{
    ContextStore, FileServer, HandlerError, HandlerResult, HttpMethod, RequestContext, Router,
    RouterError, handler,
};

fn noop() -> segment_router::BoxedHandler {
    handler(|_| Ok(()))
}

#[derive(Default)]
struct RecordingServer {
    served: Mutex<Vec<PathBuf>>,
}

impl FileServer for RecordingServer {
    fn serve_file(&self, ctx: &mut dyn RequestContext, path: &Path) -> HandlerResult {
        if path.ends_with("missing.txt") {
            return Err(HandlerError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        self.served.lock().push(path.to_path_buf());
        ctx.set_value("served".into(), path.display().to_string());
        Ok(())
    }
}

#[test]
fn router_when_static_route_registered_then_exact_path_matches() {
    let router = Router::new(None);
    router
        .get("/health", vec![noop()])
        .expect("static route should register");

    let found = router
        .find(HttpMethod::Get, "/health")
        .expect("static route should match");
    assert_eq!(found.route.path(), "/health");
    assert!(found.params.is_empty());

    assert!(router.find(HttpMethod::Get, "/healthz").is_none());
    assert!(router.find(HttpMethod::Get, "/health/deep").is_none());
}

#[test]
fn router_when_slashes_are_redundant_then_paths_still_match() {
    let router = Router::new(None);
    router
        .get("/api/users", vec![noop()])
        .expect("static route should register");

    for path in ["/api/users/", "api/users", "//api//users//"] {
        assert!(
            router.find(HttpMethod::Get, path).is_some(),
            "expected {path} to match"
        );
    }
}

#[test]
fn router_when_root_registered_then_only_root_matches() {
    let router = Router::new(None);
    router.get("/", vec![noop()]).expect("root should register");

    assert!(router.find(HttpMethod::Get, "/").is_some());
    assert!(router.find(HttpMethod::Get, "").is_some());
    assert!(router.find(HttpMethod::Get, "/index").is_none());
}

#[test]
fn router_when_method_differs_then_route_is_not_found() {
    let router = Router::new(None);
    router
        .post("/login", vec![noop()])
        .expect("post route should register");

    assert!(router.find(HttpMethod::Get, "/login").is_none());
    assert!(router.find(HttpMethod::Post, "/login").is_some());
}

#[test]
fn router_when_any_registered_then_every_method_matches() {
    let router = Router::new(None);
    router.any("/ping", vec![noop()]).expect("any should register");

    for method in HttpMethod::ALL {
        let found = router
            .find(method, "/ping")
            .unwrap_or_else(|| panic!("{method} should match"));
        assert_eq!(found.route.method(), method);
    }
    assert_eq!(router.routes().len(), HttpMethod::ALL.len());
}

#[test]
fn router_when_static_files_requested_then_file_server_receives_resolved_path() {
    let router = Router::new(None);
    let server = Arc::new(RecordingServer::default());
    router
        .static_files("/static", "/srv/www", server.clone())
        .expect("static files should register");

    let mut ctx = ContextStore::new();
    router
        .serve(HttpMethod::Get, "/static/css/site.css", &mut ctx)
        .expect("file should be served");

    assert_eq!(ctx.param("filepath"), Some("css/site.css"));
    assert_eq!(
        server.served.lock().as_slice(),
        &[PathBuf::from("/srv/www/css/site.css")]
    );
}

#[test]
fn router_when_static_path_traverses_upward_then_request_is_forbidden() {
    let router = Router::new(None);
    let server = Arc::new(RecordingServer::default());
    router
        .static_files("/static", "/srv/www", server.clone())
        .expect("static files should register");

    let mut ctx = ContextStore::new();
    let err = router
        .serve(HttpMethod::Get, "/static/../etc/passwd", &mut ctx)
        .expect_err("traversal should be rejected");

    assert!(matches!(
        err,
        RouterError::Handler(HandlerError::Forbidden { .. })
    ));
    assert!(server.served.lock().is_empty());
}

#[test]
fn router_when_file_server_fails_then_error_is_propagated() {
    let router = Router::new(None);
    let server = Arc::new(RecordingServer::default());
    router
        .static_files("/static", "/srv/www", server)
        .expect("static files should register");

    let mut ctx = ContextStore::new();
    let err = router
        .serve(HttpMethod::Get, "/static/missing.txt", &mut ctx)
        .expect_err("missing file should fail");

    assert!(matches!(
        err,
        RouterError::Handler(HandlerError::FileNotFound { .. })
    ));
}
