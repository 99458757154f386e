//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     trigger → ShutdownSignal::wait resolves
//!             → in-flight connection dropped, accept loop stops → exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownSignal};
