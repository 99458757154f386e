//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Parsed request (method, path, body)
//!     → router.rs (walk route table in order)
//!     → matcher.rs (match path, capture id)
//!     → Route variant → users handler → JsonResponse
//! ```
//!
//! # Design Decisions
//! - Declarative table, typed parameters
//! - Deterministic: same input always matches same route
//! - First match wins

pub mod matcher;
pub mod router;

pub use matcher::{PathParams, PathPattern, Segment};
pub use router::{Route, Router};
