use std::sync::Arc;

use sea_orm::DatabaseConnection;

use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::{AuthConfig, AuthService};

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
    pub cookie_name: String,
    pub session_ttl_hours: i64,
    pub secure_cookie: bool,
}

impl From<&configs::AuthConfig> for ServerAuthConfig {
    fn from(c: &configs::AuthConfig) -> Self {
        Self {
            jwt_secret: c.session_secret.clone(),
            cookie_name: c.cookie_name.clone(),
            session_ttl_hours: c.session_ttl_hours,
            secure_cookie: c.secure_cookie,
        }
    }
}

/// Shared handler state: the connection pool plus explicit settings.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: ServerAuthConfig,
    pub search: configs::SearchConfig,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, cfg: &configs::AppConfig) -> Self {
        Self { db, auth: ServerAuthConfig::from(&cfg.auth), search: cfg.search.clone() }
    }

    pub fn auth_service(&self) -> AuthService<SeaOrmAuthRepository> {
        let repo = Arc::new(SeaOrmAuthRepository { db: self.db.clone() });
        AuthService::new(repo, AuthConfig {
            jwt_secret: self.auth.jwt_secret.clone(),
            session_ttl_hours: self.auth.session_ttl_hours,
        })
    }
}
