#![allow(dead_code, missing_docs)]

use rstest::fixture;
use tracing::info;

mod mock_server;
pub use self::mock_server::*;

pub fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    info!("Tracing initialized");
}

/// A mock API answering `200 {}` to everything.
#[fixture]
pub async fn server() -> MockServer {
    init_tracing();
    match MockServer::start(MockResponse::ok("{}")).await {
        Ok(server) => server,
        Err(error) => {
            panic!("fail to start mock server: {error:?}");
        }
    }
}
