//! HTTP client examples.
//!
//! Each example builds one request against the configured remote users
//! API, sends it, and prints status, headers and body. Examples are
//! independent: a failure in one is printed and the next one still runs.

pub mod examples;

pub use examples::{ClientError, Example, ExampleClient, Exchange, UserPayload};
