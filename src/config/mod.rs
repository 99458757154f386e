//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → CLI overrides applied in main
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so the binary runs without a file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::AppConfig;
pub use schema::ClientConfig;
pub use schema::LimitsConfig;
pub use schema::ObservabilityConfig;
pub use schema::ServerConfig;
