use std::sync::Arc;

use chrono::{Duration, Utc};
use regex::Regex;
use tracing::instrument;

use crate::core::error::{ConfigError, Error};
use crate::store::IdentityStore;
use crate::types::user::{NewUser, User};
use crate::utils::jwt::TokenCodec;
use crate::utils::password::PasswordHasher;

const MIN_PASSWORD_LENGTH: usize = 8;
// users.email is VARCHAR(320)
const MAX_EMAIL_LENGTH: usize = 320;

#[derive(Clone)]
pub(crate) struct UserController {
    store: Arc<dyn IdentityStore>,
    hasher: PasswordHasher,
    codec: TokenCodec,
    token_ttl: Duration,
    email_pattern: Regex,
}

impl std::fmt::Debug for UserController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserController")
            .field("codec", &self.codec)
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

impl UserController {
    pub(crate) fn new(
        store: Arc<dyn IdentityStore>,
        hasher: PasswordHasher,
        codec: TokenCodec,
        token_ttl_minutes: i64,
    ) -> Result<Self, ConfigError> {
        let token_ttl = Duration::try_minutes(token_ttl_minutes)
            .filter(|ttl| *ttl > Duration::zero())
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
            .ok_or(ConfigError::InvalidTokenLifetime(token_ttl_minutes))?;

        Ok(Self {
            store,
            hasher,
            codec,
            token_ttl,
            email_pattern: Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")?,
        })
    }

    #[instrument(skip_all)]
    pub(crate) async fn register(&self, email: &str, password: &str) -> Result<User, Error> {
        let email = normalize_email(email);

        if email.chars().count() > MAX_EMAIL_LENGTH || !self.email_pattern.is_match(&email) {
            return Err(Error::InvalidEmail);
        }

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(Error::InvalidPassword(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        if self.store.find_by_email(&email).await?.is_some() {
            return Err(Error::UserAlreadyExists);
        }

        let user = self
            .store
            .insert(NewUser {
                email,
                password_hash: self.hasher.hash(password)?,
            })
            .await?;

        tracing::info!(user_id = user.id, "Registered user");

        Ok(user)
    }

    /// Unknown email and wrong password fail identically; a disabled account
    /// is only reported once the password has been proven.
    #[instrument(skip_all)]
    pub(crate) async fn login(&self, email: &str, password: &str) -> Result<String, Error> {
        let user = self
            .store
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(Error::InvalidCredentials)?;

        if !self.hasher.verify(password, &user.password_hash) {
            return Err(Error::InvalidCredentials);
        }

        if !user.is_active {
            return Err(Error::AccountDisabled);
        }

        let token = self.codec.issue(user.id, &user.email, self.token_ttl)?;

        tracing::debug!(user_id = user.id, "Issued access token");

        Ok(token)
    }

    pub(crate) async fn get_user(&self, id: i32) -> Result<User, Error> {
        self.store.find_by_id(id).await?.ok_or(Error::UserNotFound)
    }

    /// Resolves the caller behind a bearer token.
    ///
    /// Every token failure, including a missing token, is reported as
    /// `Unauthenticated` without saying why.
    #[instrument(skip_all)]
    pub(crate) async fn authenticate(&self, token: Option<&str>) -> Result<User, Error> {
        let claims = token
            .and_then(|token| self.codec.verify(token))
            .ok_or(Error::INVALID_TOKEN)?;

        let user_id = claims.user_id.ok_or(Error::MISSING_SUBJECT)?;

        self.store
            .find_by_id(user_id)
            .await?
            .ok_or(Error::UNKNOWN_SUBJECT)
    }

    /// Guard chain used by every protected operation: authenticate, then
    /// refuse inactive accounts.
    pub(crate) async fn authenticate_and_authorize(
        &self,
        token: Option<&str>,
    ) -> Result<User, Error> {
        let user = self.authenticate(token).await?;
        require_active(user)
    }
}

/// Trims surrounding whitespace and lower-cases the domain. The local part
/// keeps its case.
fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => email.to_owned(),
    }
}

pub(crate) fn require_active(user: User) -> Result<User, Error> {
    if !user.is_active {
        tracing::debug!(user_id = user.id, "Rejected inactive account");
        return Err(Error::Forbidden);
    }

    Ok(user)
}
