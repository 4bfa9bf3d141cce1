use segment_router::{HttpMethod, Router, handler};

fn noop() -> segment_router::BoxedHandler {
    handler(|_| Ok(()))
}

const PATTERNS: &[&str] = &[
    "/",
    "/users",
    "/users/new",
    "/users/:id",
    "/users/:slug",
    r"/users/:id<\d+>/posts",
    "/users/:id/posts/:post?",
    "/users/:id/posts/:slug/*rest",
    "/api/:version?/status",
    "/api/v1/*",
    "/assets/*path",
    "/assets/logo.png",
    "/files/static/raw",
    "/files/:name/meta",
    r"/orders/:id<[a-z]{3}-\d+>",
    "/orders/:id",
];

const PATHS: &[&str] = &[
    "/",
    "/users",
    "/users/new",
    "/users/42",
    "/users/42/posts",
    "/users/alice/posts",
    "/users/42/posts/7",
    "/users/42/posts/hello/comments/1",
    "/api/status",
    "/api/v2/status",
    "/api/v1/status",
    "/api/v1/deep/path",
    "/assets/logo.png",
    "/assets/css/app.css",
    "/files/static/raw",
    "/files/static/meta",
    "/orders/abc-12",
    "/orders/xyz",
    "/unknown/path",
];

/// First route in registration order whose pattern accepts `path`.
fn linear_first(router: &Router, method: HttpMethod, path: &str) -> Option<String> {
    let matcher = router.matcher();
    router
        .routes()
        .iter()
        .find(|route| route.method() == method && matcher.path_match(route.path(), path))
        .map(|route| route.path().to_string())
}

#[test]
fn router_when_many_overlapping_routes_then_result_equals_linear_scan() {
    let router = Router::new(None);
    for pattern in PATTERNS {
        router.get(pattern, vec![noop()]).expect("route should register");
    }

    for path in PATHS {
        let found = router
            .find(HttpMethod::Get, path)
            .map(|found| found.route.path().to_string());
        assert_eq!(
            found,
            linear_first(&router, HttpMethod::Get, path),
            "path {path}"
        );
    }
}

#[test]
fn router_when_registration_order_reversed_then_result_still_equals_linear_scan() {
    let router = Router::new(None);
    for pattern in PATTERNS.iter().rev() {
        router.get(pattern, vec![noop()]).expect("route should register");
    }

    for path in PATHS {
        let found = router
            .find(HttpMethod::Get, path)
            .map(|found| found.route.path().to_string());
        assert_eq!(
            found,
            linear_first(&router, HttpMethod::Get, path),
            "path {path}"
        );
    }
}

#[test]
fn router_when_thousand_static_routes_registered_then_each_is_found() {
    let router = Router::new(None);
    for i in 0..1_000 {
        router
            .get(&format!("/bulk/{i}/item"), vec![noop()])
            .expect("route should register");
    }

    assert_eq!(router.routes().len(), 1_000);
    for i in (0..1_000).step_by(37) {
        let path = format!("/bulk/{i}/item");
        let found = router
            .find(HttpMethod::Get, &path)
            .expect("bulk route should match");
        assert_eq!(found.route.path(), path);
    }
    assert!(router.find(HttpMethod::Get, "/bulk/1000/item").is_none());
}

#[test]
fn router_when_methods_interleave_then_each_method_resolves_independently() {
    let router = Router::new(None);
    router.get("/res/:id", vec![noop()]).expect("route should register");
    router.delete("/res/:key", vec![noop()]).expect("route should register");
    router.patch("/res/*tail", vec![noop()]).expect("route should register");

    let get = router.find(HttpMethod::Get, "/res/1").expect("get should match");
    assert_eq!(get.param("id"), Some("1"));

    let delete = router
        .find(HttpMethod::Delete, "/res/1")
        .expect("delete should match");
    assert_eq!(delete.param("key"), Some("1"));

    let patch = router
        .find(HttpMethod::Patch, "/res/1/2")
        .expect("patch should match");
    assert_eq!(patch.param("tail"), Some("1/2"));

    assert!(router.find(HttpMethod::Head, "/res/1").is_none());
}
