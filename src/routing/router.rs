//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Hold the route table in precedence order
//! - Resolve (method, path) to a typed `Route`
//! - Hand the route to its handler with the user store
//!
//! # Design Decisions
//! - Table is fixed at construction
//! - First match wins
//! - Explicit `NotFound` rather than a silent default

use crate::http::response::JsonResponse;
use crate::routing::matcher::PathPattern;
use crate::users::{handlers, UserStore};

/// A resolved route with its typed parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    GetUser(u64),
    DeleteUser(u64),
    ListUsers,
    CreateUser,
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RouteKind {
    GetUser,
    DeleteUser,
    ListUsers,
    CreateUser,
}

/// One row of the route table.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    method: &'static str,
    pattern: PathPattern,
    kind: RouteKind,
}

impl RouteEntry {
    fn new(method: &'static str, pattern: &str, kind: RouteKind) -> Self {
        Self {
            method,
            pattern: PathPattern::new(pattern),
            kind,
        }
    }

    fn resolve(&self, method: &str, path: &str) -> Option<Route> {
        if method != self.method {
            return None;
        }
        let params = self.pattern.matches(path)?;
        let route = match self.kind {
            RouteKind::GetUser => Route::GetUser(params.id?),
            RouteKind::DeleteUser => Route::DeleteUser(params.id?),
            RouteKind::ListUsers => Route::ListUsers,
            RouteKind::CreateUser => Route::CreateUser,
        };
        Some(route)
    }
}

/// The users API route table.
#[derive(Debug, Clone)]
pub struct Router {
    entries: Vec<RouteEntry>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            entries: vec![
                RouteEntry::new("GET", "/api/users/{id}", RouteKind::GetUser),
                RouteEntry::new("DELETE", "/api/users/{id}", RouteKind::DeleteUser),
                RouteEntry::new("GET", "/api/users", RouteKind::ListUsers),
                RouteEntry::new("POST", "/api/users", RouteKind::CreateUser),
            ],
        }
    }

    /// Resolve a request to a route. Unmatched requests resolve to `NotFound`.
    pub fn resolve(&self, method: &str, path: &str) -> Route {
        self.entries
            .iter()
            .find_map(|entry| entry.resolve(method, path))
            .unwrap_or(Route::NotFound)
    }

    /// Resolve and run the handler.
    pub fn dispatch(
        &self,
        method: &str,
        path: &str,
        body: Option<&[u8]>,
        store: &mut UserStore,
    ) -> JsonResponse {
        let route = self.resolve(method, path);
        tracing::trace!(?route, method = %method, path = %path, "Route resolved");

        match route {
            Route::GetUser(id) => handlers::get_user(store, id),
            Route::DeleteUser(id) => handlers::delete_user(store, id),
            Route::ListUsers => handlers::list_users(store),
            Route::CreateUser => handlers::create_user(store, body),
            Route::NotFound => handlers::not_found(),
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
