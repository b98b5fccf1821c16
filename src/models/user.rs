//! User model
//!
//! Registered users and the lightweight session record kept in the local
//! store while someone is logged in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::governorate::Governorate;
use super::ids::UserId;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,

    /// Stored trimmed and lowercased
    pub email: String,

    /// Argon2 PHC string
    pub password_hash: String,

    #[serde(default)]
    pub role: Role,

    pub governorate: Governorate,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user from an already-hashed password
    pub fn new(
        name: &str,
        email: &str,
        password_hash: String,
        role: Role,
        governorate: Governorate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            name: name.trim().to_string(),
            email: Self::normalize_email(email),
            password_hash,
            role,
            governorate,
            created_at: now,
            updated_at: now,
        }
    }

    /// Normalize an email address for storage and lookup
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// The "current user" record held in the local store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}
