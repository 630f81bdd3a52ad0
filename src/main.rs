//! Binary entry point: logging, config, route table, serve.

use tracing::info;
use vesper::{routes, Config, Error, Router, Server};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let config = Config::load()?;
    let addr = config.socket_addr()?;

    let app = Router::new()
        .get("/", routes::root)
        .get("/hello", routes::hello)
        .get("/evening", routes::evening)
        .fallback(routes::not_found);

    info!("starting on http://{addr}");
    for endpoint in routes::AVAILABLE_ENDPOINTS {
        info!("  {endpoint}");
    }

    Server::bind(addr)
        .expose_errors(config.expose_errors())
        .serve(app)
        .await
}
