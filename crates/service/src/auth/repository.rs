use async_trait::async_trait;

use super::domain::{AdminRecord, AdminUser};
use super::errors::AuthError;

/// Repository abstraction for admin accounts.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_admin(&self, username: &str) -> Result<Option<AdminRecord>, AuthError>;

    /// Create the admin or replace its password hash.
    async fn upsert_admin(&self, username: &str, password_hash: String) -> Result<AdminUser, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    pub struct MockAuthRepository {
        admins: Mutex<HashMap<String, AdminRecord>>, // key: username
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_admin(&self, username: &str) -> Result<Option<AdminRecord>, AuthError> {
            let admins = self.admins.lock().unwrap();
            Ok(admins.get(username).cloned())
        }

        async fn upsert_admin(&self, username: &str, password_hash: String) -> Result<AdminUser, AuthError> {
            let mut admins = self.admins.lock().unwrap();
            let rec = admins.entry(username.to_string()).or_insert_with(|| AdminRecord {
                user: AdminUser { id: Uuid::new_v4(), username: username.to_string() },
                password_hash: String::new(),
            });
            rec.password_hash = password_hash;
            Ok(rec.user.clone())
        }
    }
}
