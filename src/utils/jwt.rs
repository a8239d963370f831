use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::core::error::{ConfigError, Error};

/// Payload carried by an access token.
///
/// `user_id` and `email` are optional on the way in so that a validly signed
/// token with a missing subject can be told apart from a bad one.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) user_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) email: Option<String>,
    pub(crate) iat: i64,
    pub(crate) exp: i64,
}

/// Signs and verifies access tokens with a process-wide HMAC secret.
#[derive(Clone)]
pub(crate) struct TokenCodec {
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.header.alg)
            .finish()
    }
}

impl TokenCodec {
    pub(crate) fn new(secret: &str, algorithm: &str) -> Result<Self, ConfigError> {
        let algorithm = match Algorithm::from_str(algorithm) {
            Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => alg,
            _ => return Err(ConfigError::UnsupportedAlgorithm(algorithm.to_owned())),
        };

        // Expiry is checked by hand against an explicit clock in `verify_at`.
        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            header: Header::new(algorithm),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    pub(crate) fn issue(&self, user_id: i32, email: &str, ttl: Duration) -> Result<String, Error> {
        self.issue_at(user_id, email, ttl, Utc::now())
    }

    pub(crate) fn issue_at(
        &self,
        user_id: i32,
        email: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, Error> {
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or(Error::TokenExpiryOutOfRange)?;

        let claims = Claims {
            user_id: Some(user_id),
            email: Some(email.to_owned()),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        self.sign(&claims)
    }

    pub(crate) fn sign(&self, claims: &Claims) -> Result<String, Error> {
        Ok(jsonwebtoken::encode(&self.header, claims, &self.encoding_key)?)
    }

    /// Returns the claims of a genuine, unexpired token and `None` otherwise.
    pub(crate) fn verify(&self, token: &str) -> Option<Claims> {
        self.verify_at(token, Utc::now())
    }

    pub(crate) fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Option<Claims> {
        let claims = match jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
        {
            Ok(token_data) => token_data.claims,
            Err(e) => {
                match e.kind() {
                    ErrorKind::InvalidSignature => tracing::debug!("Rejected token: bad signature"),
                    ErrorKind::InvalidAlgorithm => {
                        tracing::debug!("Rejected token: unexpected algorithm")
                    }
                    kind => tracing::debug!("Rejected token: malformed ({:?})", kind),
                }
                return None;
            }
        };

        if now.timestamp() >= claims.exp {
            tracing::debug!("Rejected token: expired at {}", claims.exp);
            return None;
        }

        Some(claims)
    }
}
