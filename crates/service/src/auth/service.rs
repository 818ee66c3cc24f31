use std::sync::Arc;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::domain::{CurrentUser, TokenClaims};
use super::errors::AuthError;
use super::repository::UserDirectory;

/// HS256 token issuing/verification
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    ttl: chrono::Duration,
}

impl TokenService {
    /// Out-of-range TTLs saturate; `issue` then reports the overflow.
    pub fn new(secret: impl Into<String>, ttl_minutes: i64) -> Self {
        let ttl = chrono::Duration::try_minutes(ttl_minutes).unwrap_or(chrono::Duration::MAX);
        Self { secret: secret.into(), ttl }
    }

    /// Issue a token whose subject is `user_id`.
    pub fn issue(&self, user_id: Uuid) -> Result<String, AuthError> {
        let exp = chrono::Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AuthError::TokenError("token ttl out of range".into()))?
            .timestamp()
            .max(0) as usize;
        let claims = TokenClaims { sub: user_id.to_string(), exp };
        encode(&JwtHeader::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(self.secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Validate signature and expiry and return the subject user id.
    pub fn verify(&self, token: &str) -> Result<Uuid, AuthError> {
        let key = DecodingKey::from_secret(self.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let data = decode::<TokenClaims>(token, &key, &validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        Uuid::parse_str(&data.claims.sub).map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

/// Resolves the current user from a bearer token, independent of web framework
pub struct AuthService {
    tokens: TokenService,
    users: Arc<dyn UserDirectory>,
}

impl AuthService {
    pub fn new(tokens: TokenService, users: Arc<dyn UserDirectory>) -> Self { Self { tokens, users } }

    pub fn tokens(&self) -> &TokenService { &self.tokens }

    /// Token → user, rejecting unknown and inactive users.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, TokenService, repository::mock::MockUserDirectory};
    /// use std::sync::Arc;
    /// let users = Arc::new(MockUserDirectory::default());
    /// let alice = users.add_user("alice@example.com", false);
    /// let svc = AuthService::new(TokenService::new("secret", 60), users);
    /// let token = svc.tokens().issue(alice.id).unwrap();
    /// let me = tokio_test::block_on(svc.current_user(Some(&token))).unwrap();
    /// assert_eq!(me.id, alice.id);
    /// ```
    #[instrument(skip_all)]
    pub async fn current_user(&self, token: Option<&str>) -> Result<CurrentUser, AuthError> {
        let token = token.filter(|t| !t.is_empty()).ok_or(AuthError::MissingToken)?;
        let user_id = self.tokens.verify(token)?;
        let user = self.users.find_user(user_id).await?.ok_or_else(|| {
            warn!(%user_id, "token subject does not exist");
            AuthError::UserNotFound
        })?;
        if !user.is_active {
            return Err(AuthError::InactiveUser);
        }
        debug!(%user_id, superuser = user.is_superuser, "current user resolved");
        Ok(user)
    }
}
