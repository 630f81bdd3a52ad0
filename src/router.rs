//! Exact-match request router.
//!
//! One radix tree per HTTP method, all paths literal. Lookup is exact:
//! case-sensitive, trailing slash significant — `/hello/` does not match
//! `/hello`. A miss falls through to the registered fallback handler,
//! which plays the role of a terminal catch-all in a middleware chain.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each registration returns `self` so routes chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    fallback: Option<BoxedHandler>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), fallback: None }
    }

    /// Register a GET handler for an exact path.
    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::GET, path, handler)
    }

    /// Register a handler for a method + exact path pair.
    ///
    /// # Panics
    ///
    /// Panics at startup if `path` is not a valid route, or is registered
    /// twice for the same method. Route tables are static wiring; a bad one
    /// should never reach serving.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Register the handler invoked when no route matches.
    ///
    /// Without one, unmatched requests get an empty 404.
    pub fn fallback(mut self, handler: impl Handler) -> Self {
        self.fallback = Some(handler.into_boxed_handler());
        self
    }

    pub(crate) fn lookup(&self, method: &Method, path: &str) -> Option<BoxedHandler> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        Some(Arc::clone(matched.value))
    }

    pub(crate) fn fallback_handler(&self) -> Option<BoxedHandler> {
        self.fallback.as_ref().map(Arc::clone)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Request;
    use crate::response::Response;

    async fn ok(_req: Request) -> Response {
        Response::text("ok")
    }

    fn table() -> Router {
        Router::new()
            .get("/", ok)
            .get("/hello", ok)
            .get("/evening", ok)
    }

    #[test]
    fn registered_pairs_are_found() {
        let router = table();
        assert!(router.lookup(&Method::GET, "/").is_some());
        assert!(router.lookup(&Method::GET, "/hello").is_some());
        assert!(router.lookup(&Method::GET, "/evening").is_some());
    }

    #[test]
    fn method_match_is_exact() {
        let router = table();
        assert!(router.lookup(&Method::POST, "/hello").is_none());
        assert!(router.lookup(&Method::PUT, "/evening").is_none());
        assert!(router.lookup(&Method::DELETE, "/hello").is_none());
    }

    #[test]
    fn path_match_is_exact() {
        let router = table();
        // Trailing slash and case variants are distinct paths.
        assert!(router.lookup(&Method::GET, "/hello/").is_none());
        assert!(router.lookup(&Method::GET, "/HELLO").is_none());
        assert!(router.lookup(&Method::GET, "/missing").is_none());
    }

    #[test]
    fn fallback_is_absent_until_registered() {
        assert!(table().fallback_handler().is_none());
        assert!(table().fallback(ok).fallback_handler().is_some());
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn duplicate_registration_panics_at_startup() {
        let _ = Router::new().get("/hello", ok).get("/hello", ok);
    }
}
