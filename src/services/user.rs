//! User service
//!
//! Registration, login and the "current user" session record kept in the
//! key-value store.

use tracing::{info, warn};

use crate::audit::EntityType;
use crate::error::{EventsxError, EventsxResult};
use crate::models::{Role, SessionUser, User};
use crate::storage::{KeyValueStore, Storage};
use crate::validation::RegistrationForm;

use super::budget_cache::discard_legacy_cache;
use super::password::{hash_password, verify_password};

/// Store key holding the logged-in user
pub const SESSION_KEY: &str = "currentUser";

const BAD_CREDENTIALS: &str = "Invalid email or password";

/// Read the session record
///
/// A missing or unparseable record means nobody is logged in.
pub fn current_session(store: &dyn KeyValueStore) -> EventsxResult<Option<SessionUser>> {
    let Some(raw) = store.get(SESSION_KEY)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(session) => Ok(Some(session)),
        Err(e) => {
            warn!(error = %e, "ignoring malformed session record");
            Ok(None)
        }
    }
}

/// The session, or an error if nobody is logged in
pub fn require_session(store: &dyn KeyValueStore) -> EventsxResult<SessionUser> {
    current_session(store)?
        .ok_or_else(|| EventsxError::Auth("You must be logged in. Run `eventsx user login` first".into()))
}

/// The session, or an error unless an admin is logged in
pub fn require_admin(store: &dyn KeyValueStore) -> EventsxResult<SessionUser> {
    let session = require_session(store)?;
    if !session.is_admin() {
        return Err(EventsxError::Forbidden("Only admins can manage events".into()));
    }
    Ok(session)
}

/// Service for users and sessions
pub struct UserService<'a> {
    storage: &'a Storage,
    store: &'a dyn KeyValueStore,
}

impl<'a> UserService<'a> {
    /// Create a new user service
    pub fn new(storage: &'a Storage, store: &'a dyn KeyValueStore) -> Self {
        Self { storage, store }
    }

    /// Register a new account
    ///
    /// The form is validated first and its first failure returned as a
    /// validation error. Admin accounts can only be created while no admin
    /// exists or by a logged-in admin.
    pub fn register(&self, form: &RegistrationForm, role: Role) -> EventsxResult<User> {
        form.validate()
            .map_err(|message| EventsxError::Validation(message.to_string()))?;

        let governorate = form.selected_governorate().ok_or_else(|| {
            EventsxError::Validation(format!("Unknown governorate: {}", form.governorate.trim()))
        })?;

        if role == Role::Admin && self.storage.users.has_admin()? {
            let is_admin = current_session(self.store)?.is_some_and(|s| s.is_admin());
            if !is_admin {
                return Err(EventsxError::Forbidden(
                    "Only an admin can create another admin account".into(),
                ));
            }
        }

        if self.storage.users.get_by_email(&form.email)?.is_some() {
            return Err(EventsxError::Duplicate {
                entity_type: "User",
                identifier: User::normalize_email(&form.email),
            });
        }

        let password_hash = hash_password(&form.password)?;
        let user = User::new(&form.name, &form.email, password_hash, role, governorate);

        self.storage.users.upsert(user.clone())?;
        self.storage.users.save()?;

        // The audit log never sees the password hash
        self.storage.log_create(
            EntityType::User,
            user.id.to_string(),
            Some(user.email.clone()),
            &SessionUser::from(&user),
        )?;

        info!(user = %user.id, role = %user.role, "registered user");
        Ok(user)
    }

    /// Log in, replacing any existing session
    pub fn login(&self, email: &str, password: &str) -> EventsxResult<SessionUser> {
        let user = self
            .storage
            .users
            .get_by_email(email)?
            .ok_or_else(|| EventsxError::Auth(BAD_CREDENTIALS.into()))?;

        if !verify_password(password, &user.password_hash) {
            warn!(user = %user.id, "failed login");
            return Err(EventsxError::Auth(BAD_CREDENTIALS.into()));
        }

        let session = SessionUser::from(&user);
        self.store
            .set(SESSION_KEY, &serde_json::to_string(&session)?)?;
        discard_legacy_cache(self.store, Some(session.id))?;

        info!(user = %session.id, "logged in");
        Ok(session)
    }

    /// Log out, returning who was logged in
    pub fn logout(&self) -> EventsxResult<Option<SessionUser>> {
        let session = current_session(self.store)?;
        self.store.remove(SESSION_KEY)?;
        Ok(session)
    }

    /// The logged-in user, if any
    pub fn current(&self) -> EventsxResult<Option<SessionUser>> {
        current_session(self.store)
    }

    /// Count registered users
    pub fn count(&self) -> EventsxResult<usize> {
        self.storage.users.count()
    }
}
