use async_trait::async_trait;
use uuid::Uuid;

use super::domain::CurrentUser;
use super::errors::AuthError;

/// Lookup of users referenced by tokens.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_user(&self, id: Uuid) -> Result<Option<CurrentUser>, AuthError>;
}

/// Simple in-memory mock directory for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockUserDirectory {
        users: Mutex<HashMap<Uuid, CurrentUser>>, // key: user id
    }

    impl MockUserDirectory {
        pub fn insert(&self, user: CurrentUser) {
            self.users.lock().unwrap_or_else(|e| e.into_inner()).insert(user.id, user);
        }

        /// Register a fresh active user and return it.
        pub fn add_user(&self, email: &str, is_superuser: bool) -> CurrentUser {
            let user = CurrentUser {
                id: Uuid::new_v4(),
                email: email.to_string(),
                full_name: None,
                is_active: true,
                is_superuser,
            };
            self.insert(user.clone());
            user
        }
    }

    #[async_trait]
    impl UserDirectory for MockUserDirectory {
        async fn find_user(&self, id: Uuid) -> Result<Option<CurrentUser>, AuthError> {
            let users = self.users.lock().unwrap_or_else(|e| e.into_inner());
            Ok(users.get(&id).cloned())
        }
    }
}
