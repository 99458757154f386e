//! In-memory user store.
//!
//! Ids come from a counter that only ever grows, so a deleted id is
//! never handed out again. A `BTreeMap` keyed by id iterates in
//! insertion order for the same reason.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::users::model::{NewUser, User, DEFAULT_ROLE};

/// First id handed out after the seed records.
pub const FIRST_FREE_ID: u64 = 3;

/// Users keyed by id plus the next-id counter.
#[derive(Debug, Clone)]
pub struct UserStore {
    users: BTreeMap<u64, User>,
    next_id: u64,
}

impl UserStore {
    /// An empty store whose first id will be 1.
    pub fn empty() -> Self {
        Self {
            users: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// The store the server starts with: two seed users, next id 3.
    pub fn seeded() -> Self {
        let mut users = BTreeMap::new();
        users.insert(1, User::seed(1, "Kat Perreira", "kat@example.com", "engineer"));
        users.insert(2, User::seed(2, "Jane Doe", "jane@example.com", "designer"));
        Self {
            users,
            next_id: FIRST_FREE_ID,
        }
    }

    /// All users in insertion order.
    pub fn list(&self) -> Vec<&User> {
        self.users.values().collect()
    }

    pub fn get(&self, id: u64) -> Option<&User> {
        self.users.get(&id)
    }

    /// Insert a new user under the current counter value, then advance the counter.
    pub fn create(&mut self, new: NewUser) -> &User {
        let id = self.next_id;
        self.next_id += 1;

        let user = User {
            id,
            name: new.name,
            email: new.email,
            role: new.role.unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            created_at: Some(Utc::now()),
        };
        tracing::debug!(user_id = id, "User created");
        self.users.entry(id).or_insert(user)
    }

    /// Remove a user. Returns the removed record, if any.
    pub fn delete(&mut self, id: u64) -> Option<User> {
        let removed = self.users.remove(&id);
        if removed.is_some() {
            tracing::debug!(user_id = id, "User deleted");
        }
        removed
    }

    /// The id the next `create` will assign.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::seeded()
    }
}
