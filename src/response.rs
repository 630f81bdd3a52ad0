//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Build a [`Response`] in your handler and return it. That is the entire
//! job description.

use bytes::Bytes;
use http::StatusCode;
use http_body_util::Full;
use serde::Serialize;
use tracing::error;

/// An outgoing HTTP response.
///
/// # Shortcuts (200 OK)
///
/// ```rust
/// use vesper::Response;
///
/// Response::text("hello");
/// Response::json(&serde_json::json!({"id": 1}));
/// ```
///
/// # Builder (custom status)
///
/// ```rust
/// use http::StatusCode;
/// use vesper::Response;
///
/// Response::builder()
///     .status(StatusCode::NOT_FOUND)
///     .json(&serde_json::json!({"error": "Not Found"}));
/// ```
pub struct Response {
    status: StatusCode,
    content_type: Option<&'static str>,
    body: Bytes,
}

impl Response {
    /// `200 OK` — `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::builder().text(body)
    }

    /// `200 OK` — `application/json`, serialized with serde.
    pub fn json<T: Serialize>(value: &T) -> Self {
        Self::builder().json(value)
    }

    /// Response with no body.
    pub fn status(status: StatusCode) -> Self {
        Self { status, content_type: None, body: Bytes::new() }
    }

    /// Builder for responses that need a non-200 status.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { status: StatusCode::OK }
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    #[cfg(test)]
    pub(crate) fn body(&self) -> &[u8] {
        &self.body
    }

    #[cfg(test)]
    pub(crate) fn content_type(&self) -> Option<&'static str> {
        self.content_type
    }

    /// Converts into the hyper-facing representation.
    pub(crate) fn into_http(self) -> http::Response<Full<Bytes>> {
        let mut builder = http::Response::builder().status(self.status);
        if let Some(ct) = self.content_type {
            builder = builder.header(http::header::CONTENT_TYPE, ct);
        }
        // The only inputs are a valid StatusCode and a static header value,
        // so the builder cannot fail.
        builder
            .body(Full::new(self.body))
            .unwrap_or_else(|_| http::Response::new(Full::new(Bytes::new())))
    }
}

/// Fluent builder for [`Response`]. Defaults to 200. Terminated by a typed
/// body method, so the content type always matches what you send.
pub struct ResponseBuilder {
    status: StatusCode,
}

impl ResponseBuilder {
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Terminate with a plain-text body (`text/plain; charset=utf-8`).
    pub fn text(self, body: impl Into<String>) -> Response {
        Response {
            status: self.status,
            content_type: Some("text/plain; charset=utf-8"),
            body: Bytes::from(body.into()),
        }
    }

    /// Terminate with a JSON body (`application/json`).
    ///
    /// Serialization of the fixed payload types in this crate cannot fail;
    /// if a future payload ever does, the response degrades to a bare 500.
    pub fn json<T: Serialize>(self, value: &T) -> Response {
        match serde_json::to_vec(value) {
            Ok(body) => Response {
                status: self.status,
                content_type: Some("application/json"),
                body: Bytes::from(body),
            },
            Err(e) => {
                error!("response serialization failed: {e}");
                Response::status(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

/// Conversion into an HTTP [`Response`].
///
/// Lets handlers return `Response`, a string, or a bare `StatusCode`.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response {
        Response::text(self)
    }
}

impl IntoResponse for String {
    fn into_response(self) -> Response {
        Response::text(self)
    }
}

impl IntoResponse for StatusCode {
    fn into_response(self) -> Response {
        Response::status(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_sets_status_and_content_type() {
        let resp = Response::text("Hello world");
        assert_eq!(resp.status_code(), StatusCode::OK);
        assert_eq!(resp.content_type(), Some("text/plain; charset=utf-8"));
        assert_eq!(resp.body(), b"Hello world");
    }

    #[test]
    fn json_serializes_the_value() {
        let resp = Response::json(&serde_json::json!({"id": 1}));
        assert_eq!(resp.status_code(), StatusCode::OK);
        assert_eq!(resp.content_type(), Some("application/json"));
        assert_eq!(resp.body(), br#"{"id":1}"#);
    }

    #[test]
    fn builder_carries_a_custom_status() {
        let resp = Response::builder()
            .status(StatusCode::NOT_FOUND)
            .json(&serde_json::json!({"error": "Not Found"}));
        assert_eq!(resp.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn into_http_keeps_status_and_header() {
        let http = Response::text("ok").into_http();
        assert_eq!(http.status(), StatusCode::OK);
        assert_eq!(
            http.headers().get(http::header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
    }
}
