use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand::rngs::OsRng;
use tracing::{info, debug, instrument};

use super::domain::{AdminUser, AuthSession, Claims, LoginInput};
use super::errors::AuthError;
use super::repository::AuthRepository;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub session_ttl_hours: i64,
}

impl From<&configs::AuthConfig> for AuthConfig {
    fn from(c: &configs::AuthConfig) -> Self {
        Self { jwt_secret: c.session_secret.clone(), session_ttl_hours: c.session_ttl_hours }
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Hash `password` and store it for `username`, creating the admin if needed.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthConfig, AuthService, repository::mock::MockAuthRepository};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: "0123456789abcdef0123456789abcdef".into(), session_ttl_hours: 24 });
    /// let user = tokio_test::block_on(svc.set_password("admin", "changeme123")).unwrap();
    /// assert_eq!(user.username, "admin");
    /// ```
    #[instrument(skip(self, password))]
    pub async fn set_password(&self, username: &str, password: &str) -> Result<AdminUser, AuthError> {
        if password.chars().count() < 8 {
            return Err(AuthError::Validation("password too short (>=8)".into()));
        }
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();

        let user = self.repo.upsert_admin(username, hash).await?;
        info!(event = "admin_password_set", user_id = %user.id, username = %user.username);
        Ok(user)
    }

    /// Authenticate an admin and issue a session token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthConfig, AuthService, repository::mock::MockAuthRepository};
    /// use service::auth::domain::LoginInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: "0123456789abcdef0123456789abcdef".into(), session_ttl_hours: 24 });
    /// tokio_test::block_on(svc.set_password("admin", "Passw0rd!")).unwrap();
    /// let session = tokio_test::block_on(svc.login(LoginInput { username: "admin".into(), password: "Passw0rd!".into() })).unwrap();
    /// assert_eq!(session.user.username, "admin");
    /// assert!(svc.verify_token(&session.token).is_ok());
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        validate_login(&input)?;
        let record = self.repo
            .find_admin(&input.username)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&record.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            debug!("password mismatch");
            return Err(AuthError::Unauthorized);
        }

        let now = chrono::Utc::now();
        let exp = (now + chrono::Duration::hours(self.cfg.session_ttl_hours)).timestamp();
        let claims = Claims { sub: record.user.username.clone(), uid: record.user.id, iat: now.timestamp(), exp };
        let token = encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))?;

        info!(event = "admin_login", user_id = %record.user.id);
        Ok(AuthSession { user: record.user, token, expires_at: exp })
    }

    /// Check signature and expiry of a session token.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        verify_token(&self.cfg.jwt_secret, token)
    }
}

/// Decode an HS256 token signed with `secret`.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| AuthError::TokenError(e.to_string()))
}

fn validate_login(input: &LoginInput) -> Result<(), AuthError> {
    let user_len = input.username.chars().count();
    if user_len == 0 {
        return Err(AuthError::Validation("Username is required".into()));
    }
    if user_len > 50 {
        return Err(AuthError::Validation("Username must be less than 50 characters".into()));
    }
    let pass_len = input.password.chars().count();
    if pass_len == 0 {
        return Err(AuthError::Validation("Password is required".into()));
    }
    if pass_len > 100 {
        return Err(AuthError::Validation("Password must be less than 100 characters".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAuthRepository;

    const SECRET: &str = "test-secret-test-secret-test-secret!";

    fn svc() -> AuthService<MockAuthRepository> {
        AuthService::new(Arc::new(MockAuthRepository::default()), AuthConfig { jwt_secret: SECRET.into(), session_ttl_hours: 1 })
    }

    fn login(u: &str, p: &str) -> LoginInput { LoginInput { username: u.into(), password: p.into() } }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_are_unauthorized() {
        let svc = svc();
        svc.set_password("admin", "changeme123").await.unwrap();
        assert!(matches!(svc.login(login("admin", "nope")).await, Err(AuthError::Unauthorized)));
        assert!(matches!(svc.login(login("ghost", "changeme123")).await, Err(AuthError::Unauthorized)));
    }

    #[tokio::test]
    async fn reset_password_replaces_old_one() {
        let svc = svc();
        let first = svc.set_password("admin", "changeme123").await.unwrap();
        let second = svc.set_password("admin", "another-pass").await.unwrap();
        assert_eq!(first.id, second.id);
        assert!(svc.login(login("admin", "changeme123")).await.is_err());
        assert!(svc.login(login("admin", "another-pass")).await.is_ok());
    }

    #[tokio::test]
    async fn input_bounds() {
        let svc = svc();
        assert!(matches!(svc.set_password("admin", "short").await, Err(AuthError::Validation(_))));
        assert!(matches!(svc.login(login("", "x")).await, Err(AuthError::Validation(_))));
        assert!(matches!(svc.login(login("admin", "")).await, Err(AuthError::Validation(_))));
        assert!(matches!(svc.login(login(&"a".repeat(51), "x")).await, Err(AuthError::Validation(_))));
    }

    #[tokio::test]
    async fn token_round_trip_and_tamper() {
        let svc = svc();
        let user = svc.set_password("admin", "changeme123").await.unwrap();
        let session = svc.login(login("admin", "changeme123")).await.unwrap();
        let claims = svc.verify_token(&session.token).unwrap();
        assert_eq!(claims.uid, user.id);
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.exp, session.expires_at);

        assert!(verify_token("a-different-secret-a-different-secret", &session.token).is_err());
        assert!(svc.verify_token("not.a.token").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let past = chrono::Utc::now().timestamp() - 10;
        let claims = Claims { sub: "admin".into(), uid: uuid::Uuid::new_v4(), iat: past - 100, exp: past };
        let token = encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap();
        assert!(matches!(verify_token(SECRET, &token), Err(AuthError::TokenError(_))));
    }
}
