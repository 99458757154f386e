//! User records and the creation payload.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Role assigned when a create request does not name one.
pub const DEFAULT_ROLE: &str = "user";

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: u64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: String,
    /// Set only for users created at runtime; seed records have none.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_iso8601"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// A seed record without a creation timestamp.
    pub fn seed(id: u64, name: &str, email: &str, role: &str) -> Self {
        Self {
            id,
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            role: role.to_string(),
            created_at: None,
        }
    }
}

/// Body of `POST /api/users`. Every field is optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

fn serialize_iso8601<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(ts) => serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Secs, true)),
        None => serializer.serialize_none(),
    }
}
