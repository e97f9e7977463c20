//! Mock user repository.

use std::future::Future;
use std::sync::{Arc, Mutex};

use armarinho_core::{Role, UserId};

use crate::db::{RepositoryError, UserRecord, UserRepository};
use crate::models::user::User;
use crate::services::auth::hash_password;

/// User repository over a shared vector.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUsers {
    users: Arc<Mutex<Vec<UserRecord>>>,
}

impl InMemoryUsers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user whose password is hashed with the production hasher.
    ///
    /// # Panics
    ///
    /// Panics if hashing fails or the lock is poisoned.
    #[must_use]
    #[allow(clippy::unwrap_used, clippy::expect_used)]
    pub fn with_user(
        self,
        login_name: &str,
        display_name: &str,
        role: Role,
        password: &str,
        active: bool,
    ) -> Self {
        {
            let mut users = self.users.lock().unwrap();
            let id = i32::try_from(users.len()).expect("few test users") + 1;
            users.push(UserRecord {
                user: User {
                    id: UserId::new(id),
                    login_name: login_name.to_owned(),
                    display_name: display_name.to_owned(),
                    role,
                    active,
                },
                password_hash: hash_password(password).unwrap(),
            });
        }
        self
    }

    /// Id assigned to `login_name`, if present.
    #[must_use]
    pub fn id_of(&self, login_name: &str) -> Option<UserId> {
        self.users
            .lock()
            .ok()?
            .iter()
            .find(|r| r.user.login_name == login_name)
            .map(|r| r.user.id)
    }

    fn snapshot(&self) -> Result<Vec<UserRecord>, RepositoryError> {
        self.users
            .lock()
            .map(|users| users.clone())
            .map_err(|_| RepositoryError::DataCorruption("mutex poisoned".to_owned()))
    }
}

impl UserRepository for InMemoryUsers {
    fn find_active_by_login(
        &self,
        login_name: &str,
    ) -> impl Future<Output = Result<Option<UserRecord>, RepositoryError>> + Send {
        let users = self.snapshot();
        let login_name = login_name.to_owned();

        async move {
            Ok(users?
                .into_iter()
                .find(|r| r.user.active && r.user.login_name == login_name))
        }
    }

    fn active_admins(&self) -> impl Future<Output = Result<Vec<UserRecord>, RepositoryError>> + Send {
        let users = self.snapshot();

        async move {
            Ok(users?
                .into_iter()
                .filter(|r| r.user.active && r.user.role == Role::Admin)
                .collect())
        }
    }
}
