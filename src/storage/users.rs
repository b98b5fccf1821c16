//! User repository for JSON storage
//!
//! Manages loading and saving users to users.json, indexed by email.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::EventsxError;
use crate::models::{Role, User, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct UserData {
    users: Vec<User>,
}

/// Repository for user persistence
pub struct UserRepository {
    path: PathBuf,
    data: RwLock<HashMap<UserId, User>>,
    /// Index: normalized email -> user_id
    by_email: RwLock<HashMap<String, UserId>>,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_email: RwLock::new(HashMap::new()),
        }
    }

    /// Load users from disk
    pub fn load(&self) -> Result<(), EventsxError> {
        let file_data: UserData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| EventsxError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_email = self
            .by_email
            .write()
            .map_err(|e| EventsxError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_email.clear();

        for user in file_data.users {
            by_email.insert(User::normalize_email(&user.email), user.id);
            data.insert(user.id, user);
        }

        Ok(())
    }

    /// Save users to disk
    pub fn save(&self) -> Result<(), EventsxError> {
        let data = self
            .data
            .read()
            .map_err(|e| EventsxError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut users: Vec<_> = data.values().cloned().collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));

        write_json_atomic(&self.path, &UserData { users })
    }

    /// Get a user by ID
    pub fn get(&self, id: UserId) -> Result<Option<User>, EventsxError> {
        let data = self
            .data
            .read()
            .map_err(|e| EventsxError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get a user by email (case-insensitive, surrounding whitespace ignored)
    pub fn get_by_email(&self, email: &str) -> Result<Option<User>, EventsxError> {
        let data = self
            .data
            .read()
            .map_err(|e| EventsxError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_email = self
            .by_email
            .read()
            .map_err(|e| EventsxError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(by_email
            .get(&User::normalize_email(email))
            .and_then(|id| data.get(id))
            .cloned())
    }

    /// Whether any admin account exists
    pub fn has_admin(&self) -> Result<bool, EventsxError> {
        let data = self
            .data
            .read()
            .map_err(|e| EventsxError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.values().any(|u| u.role == Role::Admin))
    }

    /// Insert or update a user
    pub fn upsert(&self, user: User) -> Result<(), EventsxError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| EventsxError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_email = self
            .by_email
            .write()
            .map_err(|e| EventsxError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(old) = data.get(&user.id) {
            by_email.remove(&User::normalize_email(&old.email));
        }

        by_email.insert(User::normalize_email(&user.email), user.id);
        data.insert(user.id, user);
        Ok(())
    }

    /// Count users
    pub fn count(&self) -> Result<usize, EventsxError> {
        let data = self
            .data
            .read()
            .map_err(|e| EventsxError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }
}
