use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Admin user (business view, never carries the hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: Uuid,
    pub username: String,
}

/// Stored admin with its password hash
#[derive(Debug, Clone)]
pub struct AdminRecord {
    pub user: AdminUser,
    pub password_hash: String,
}

/// Token claims carried by the session cookie or bearer header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// username
    pub sub: String,
    pub uid: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Login result (session)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: AdminUser,
    pub token: String,
    /// unix seconds
    pub expires_at: i64,
}
