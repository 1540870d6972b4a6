use sea_orm::DatabaseConnection;

use models::admin_user;

use crate::auth::domain::{AdminRecord, AdminUser};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

fn to_user(m: &admin_user::Model) -> AdminUser {
    AdminUser { id: m.id, username: m.username.clone() }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_admin(&self, username: &str) -> Result<Option<AdminRecord>, AuthError> {
        let res = admin_user::find_by_username(&self.db, username)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|m| AdminRecord { user: to_user(&m), password_hash: m.password_hash }))
    }

    async fn upsert_admin(&self, username: &str, password_hash: String) -> Result<AdminUser, AuthError> {
        let m = admin_user::upsert_password(&self.db, username, password_hash)
            .await
            .map_err(|e| match e {
                models::errors::ModelError::Validation(msg) => AuthError::Validation(msg),
                other => AuthError::Repository(other.to_string()),
            })?;
        Ok(to_user(&m))
    }
}
