//! HTTP fundamentals: example client calls against a remote JSON API and a
//! minimal sequential HTTP/1.1 server for an in-memory users resource.

pub mod client;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;
pub mod users;

pub use crate::client::ExampleClient;
pub use crate::config::AppConfig;
pub use crate::http::HttpServer;
pub use crate::lifecycle::{Shutdown, ShutdownSignal};

/// Width of the `=` banner lines in console output.
pub const BANNER_WIDTH: usize = 60;

/// A line of `=` characters.
pub fn banner() -> String {
    "=".repeat(BANNER_WIDTH)
}
