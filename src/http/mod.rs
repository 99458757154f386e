//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (sequential accept loop, per-connection isolation)
//!     → request.rs (request line, headers, Content-Length body)
//!     → [routing layer picks a users handler]
//!     → response.rs (status line, fixed headers, pretty JSON)
//!     → write, close
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{ParseError, ParsedRequest, RequestParser};
pub use response::JsonResponse;
pub use server::{ConnectionError, ConnectionOutcome, HttpServer, SHUTDOWN_MESSAGE};
