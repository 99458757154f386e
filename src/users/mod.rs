//! The in-memory `users` resource served by the toy server.
//!
//! ```text
//! Route → handlers.rs → store.rs (BTreeMap + next-id counter) → JsonResponse
//! ```

pub mod handlers;
pub mod model;
pub mod store;

pub use model::{NewUser, User, DEFAULT_ROLE};
pub use store::UserStore;
