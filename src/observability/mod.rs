//! Observability subsystem.
//!
//! Everything logs through `tracing` with structured fields
//! (connection id, method, path, status). Console output meant for the
//! reader of the demo (banners, response dumps) is plain stdout.

pub mod logging;

pub use logging::init_logging;
