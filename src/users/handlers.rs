//! Handlers for the `/api/users` routes.

use http::StatusCode;
use serde_json::Value;

use crate::http::response::JsonResponse;
use crate::users::model::NewUser;
use crate::users::store::UserStore;

pub const USER_NOT_FOUND: &str = "User not found";
pub const NO_BODY: &str = "No body provided";
pub const INVALID_JSON: &str = "Invalid JSON";
pub const ENDPOINT_NOT_FOUND: &str = "Endpoint not found";

/// `GET /api/users`
pub fn list_users(store: &UserStore) -> JsonResponse {
    JsonResponse::json(StatusCode::OK, &store.list())
}

/// `GET /api/users/{id}`
pub fn get_user(store: &UserStore, id: u64) -> JsonResponse {
    match store.get(id) {
        Some(user) => JsonResponse::json(StatusCode::OK, user),
        None => JsonResponse::error(StatusCode::NOT_FOUND, USER_NOT_FOUND),
    }
}

/// `POST /api/users`
///
/// The body must be a JSON object; string fields of the wrong type
/// are reported as invalid JSON too.
pub fn create_user(store: &mut UserStore, body: Option<&[u8]>) -> JsonResponse {
    let Some(body) = body else {
        return JsonResponse::error(StatusCode::BAD_REQUEST, NO_BODY);
    };

    let new_user = match parse_new_user(body) {
        Ok(new_user) => new_user,
        Err(e) => {
            tracing::debug!(error = %e, "Rejecting create body");
            return JsonResponse::error(StatusCode::BAD_REQUEST, INVALID_JSON);
        }
    };

    let user = store.create(new_user);
    JsonResponse::json(StatusCode::CREATED, user)
}

/// `DELETE /api/users/{id}`
pub fn delete_user(store: &mut UserStore, id: u64) -> JsonResponse {
    match store.delete(id) {
        Some(_) => JsonResponse::empty(StatusCode::NO_CONTENT),
        None => JsonResponse::error(StatusCode::NOT_FOUND, USER_NOT_FOUND),
    }
}

/// Fallback for every unmatched request.
pub fn not_found() -> JsonResponse {
    JsonResponse::error(StatusCode::NOT_FOUND, ENDPOINT_NOT_FOUND)
}

fn parse_new_user(body: &[u8]) -> Result<NewUser, serde_json::Error> {
    let value: Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(serde::de::Error::custom("expected a JSON object"));
    }
    serde_json::from_value(value)
}
