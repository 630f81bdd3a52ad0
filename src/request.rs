//! Incoming HTTP request type.

use http::{HeaderMap, Method, Uri};

/// The per-request view handed to handlers.
///
/// Carries exactly what a handler may look at: method, path, query string
/// and headers. Every handler in this application ignores the query string
/// and headers; they are kept so the 404 fallback can echo the method and
/// path, and so handlers stay signature-compatible with richer ones.
pub struct Request {
    method: Method,
    path: String,
    query: Option<String>,
    headers: HeaderMap,
}

impl Request {
    pub(crate) fn new(method: Method, uri: &Uri, headers: HeaderMap) -> Self {
        Self {
            method,
            path: uri.path().to_owned(),
            query: uri.query().map(str::to_owned),
            headers,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The request path, without the query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The raw query string, if any. Never consulted by routing.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_string_is_split_off_the_path() {
        let uri: Uri = "/hello?x=1&y=2".parse().unwrap();
        let req = Request::new(Method::GET, &uri, HeaderMap::new());
        assert_eq!(req.path(), "/hello");
        assert_eq!(req.query(), Some("x=1&y=2"));
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", "application/json".parse().unwrap());
        let uri: Uri = "/".parse().unwrap();
        let req = Request::new(Method::GET, &uri, headers);
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert_eq!(req.header("x-missing"), None);
    }
}
