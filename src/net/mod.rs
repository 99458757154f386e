//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (bind, accept)
//!     → connection.rs (id for log correlation)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - Plaintext only
//! - One connection in flight; no accept queue management

pub mod connection;
pub mod listener;

pub use connection::ConnectionId;
pub use listener::{Listener, ListenerError};
