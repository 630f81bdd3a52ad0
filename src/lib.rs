//! # vesper
//!
//! A tiny greeting API server. Three fixed endpoints, a structured 404,
//! a panic-proof 500. Nothing more. Nothing less.
//!
//! ## The surface
//!
//! | Method | Path       | Response                                    |
//! |--------|------------|---------------------------------------------|
//! | GET    | `/`        | 200, JSON description of the API            |
//! | GET    | `/hello`   | 200, `Hello world`                          |
//! | GET    | `/evening` | 200, `Good evening`                         |
//! | any    | other      | 404, JSON with the list of valid endpoints  |
//!
//! Routing is exact: method and path must match a registered entry
//! byte-for-byte. `/hello/` and `/HELLO` are 404s, not aliases.
//!
//! A handler that panics is caught at the dispatch boundary and answered
//! with a 500 JSON payload; the process never dies on a request.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use vesper::{routes, Config, Router, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load().expect("config");
//!
//!     let app = Router::new()
//!         .get("/", routes::root)
//!         .get("/hello", routes::hello)
//!         .get("/evening", routes::evening)
//!         .fallback(routes::not_found);
//!
//!     Server::bind(config.socket_addr().expect("address"))
//!         .expose_errors(config.expose_errors())
//!         .serve(app)
//!         .await
//!         .expect("server error");
//! }
//! ```

mod config;
mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod routes;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use request::Request;
pub use response::{IntoResponse, Response};
pub use router::Router;
pub use server::Server;
