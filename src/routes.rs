//! The application handlers.
//!
//! Every endpoint returns a fixed value; none reads the query string, the
//! headers or a body. The route table is wired in `main`:
//!
//! | Method | Path       | Handler       |
//! |--------|------------|---------------|
//! | GET    | `/`        | [`root`]      |
//! | GET    | `/hello`   | [`hello`]     |
//! | GET    | `/evening` | [`evening`]   |
//! | miss   | —          | [`not_found`] |

use http::StatusCode;
use serde::Serialize;

use crate::request::Request;
use crate::response::Response;

/// The three registered routes, as advertised in 404 payloads.
pub const AVAILABLE_ENDPOINTS: [&str; 3] = ["GET /", "GET /hello", "GET /evening"];

#[derive(Serialize)]
struct ApiDescription {
    message: &'static str,
    endpoints: Endpoints,
}

#[derive(Serialize)]
struct Endpoints {
    hello: Endpoint,
    evening: Endpoint,
}

#[derive(Serialize)]
struct Endpoint {
    method: &'static str,
    path: &'static str,
    description: &'static str,
}

#[derive(Serialize)]
struct NotFoundBody {
    error: &'static str,
    message: String,
    #[serde(rename = "availableEndpoints")]
    available_endpoints: [&'static str; 3],
}

#[derive(Serialize)]
struct ServerErrorBody {
    error: &'static str,
    message: String,
}

/// `GET /` — JSON description of the API.
pub async fn root(_req: Request) -> Response {
    Response::json(&ApiDescription {
        message: "Node.js Express Server Tutorial",
        endpoints: Endpoints {
            hello: Endpoint {
                method: "GET",
                path: "/hello",
                description: r#"Returns "Hello world""#,
            },
            evening: Endpoint {
                method: "GET",
                path: "/evening",
                description: r#"Returns "Good evening""#,
            },
        },
    })
}

/// `GET /hello` — plain-text greeting.
pub async fn hello(_req: Request) -> Response {
    Response::text("Hello world")
}

/// `GET /evening` — plain-text greeting.
pub async fn evening(_req: Request) -> Response {
    Response::text("Good evening")
}

/// Fallback for every unmatched (method, path) pair.
///
/// Echoes the request line in the Express idiom (`Cannot GET /missing`)
/// and lists the routes that do exist.
pub async fn not_found(req: Request) -> Response {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .json(&NotFoundBody {
            error: "Not Found",
            message: format!("Cannot {} {}", req.method(), req.path()),
            available_endpoints: AVAILABLE_ENDPOINTS,
        })
}

/// The 500 sent when a handler panics. `message` has already been gated on
/// the environment by the dispatch path.
pub(crate) fn internal_error(message: String) -> Response {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .json(&ServerErrorBody { error: "Internal Server Error", message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderMap, Method, Uri};
    use serde_json::Value;

    fn request(method: Method, uri: &str) -> Request {
        let uri: Uri = uri.parse().unwrap();
        Request::new(method, &uri, HeaderMap::new())
    }

    fn json_body(resp: &Response) -> Value {
        serde_json::from_slice(resp.body()).unwrap()
    }

    #[tokio::test]
    async fn hello_returns_the_literal_greeting() {
        let resp = hello(request(Method::GET, "/hello")).await;
        assert_eq!(resp.status_code(), StatusCode::OK);
        assert_eq!(resp.content_type(), Some("text/plain; charset=utf-8"));
        assert_eq!(resp.body(), b"Hello world");
    }

    #[tokio::test]
    async fn evening_returns_the_literal_greeting() {
        let resp = evening(request(Method::GET, "/evening")).await;
        assert_eq!(resp.status_code(), StatusCode::OK);
        assert_eq!(resp.body(), b"Good evening");
    }

    #[tokio::test]
    async fn root_describes_both_endpoints() {
        let resp = root(request(Method::GET, "/")).await;
        assert_eq!(resp.status_code(), StatusCode::OK);
        assert_eq!(resp.content_type(), Some("application/json"));

        let body = json_body(&resp);
        assert_eq!(body["message"], "Node.js Express Server Tutorial");
        assert_eq!(body["endpoints"]["hello"]["method"], "GET");
        assert_eq!(body["endpoints"]["hello"]["path"], "/hello");
        assert_eq!(
            body["endpoints"]["hello"]["description"],
            r#"Returns "Hello world""#
        );
        assert_eq!(body["endpoints"]["evening"]["method"], "GET");
        assert_eq!(body["endpoints"]["evening"]["path"], "/evening");
        assert_eq!(
            body["endpoints"]["evening"]["description"],
            r#"Returns "Good evening""#
        );
    }

    #[tokio::test]
    async fn not_found_echoes_method_and_path() {
        let resp = not_found(request(Method::POST, "/missing")).await;
        assert_eq!(resp.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(resp.content_type(), Some("application/json"));

        let body = json_body(&resp);
        assert_eq!(body["error"], "Not Found");
        assert_eq!(body["message"], "Cannot POST /missing");
        assert_eq!(
            body["availableEndpoints"],
            serde_json::json!(["GET /", "GET /hello", "GET /evening"])
        );
    }

    #[tokio::test]
    async fn internal_error_carries_the_given_message() {
        let resp = internal_error("boom".to_owned());
        assert_eq!(resp.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = json_body(&resp);
        assert_eq!(body["error"], "Internal Server Error");
        assert_eq!(body["message"], "boom");
    }
}
