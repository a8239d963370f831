use bcrypt::BcryptError;

use crate::core::error::Error;

/// bcrypt reads at most 72 bytes including the trailing NUL.
pub(crate) const MAX_PASSWORD_BYTES: usize = 71;

/// Salted one-way password hashing backed by bcrypt.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub(crate) fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Refuses passwords bcrypt would silently cut short.
    pub(crate) fn hash(&self, plaintext: &str) -> Result<String, Error> {
        match bcrypt::non_truncating_hash(plaintext, self.cost) {
            Ok(hash) => Ok(hash),
            Err(BcryptError::Truncation(_)) => Err(Error::InvalidPassword(format!(
                "Password must be at most {MAX_PASSWORD_BYTES} bytes"
            ))),
            Err(e) => Err(Error::Bcrypt(e)),
        }
    }

    /// Malformed hashes and over-long passwords verify as false instead of
    /// erroring.
    pub(crate) fn verify(&self, plaintext: &str, hash: &str) -> bool {
        match bcrypt::non_truncating_verify(plaintext, hash) {
            Ok(matches) => matches,
            Err(BcryptError::Truncation(len)) => {
                tracing::debug!("Rejected password of {} bytes", len - 1);
                false
            }
            Err(e) => {
                tracing::warn!("Stored password hash could not be parsed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4)
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let hash = hasher.hash("pw123456").unwrap();

        assert_ne!(hash, "pw123456");
        assert!(hasher.verify("pw123456", &hash));
        assert!(!hasher.verify("pw123456x", &hash));
    }

    #[test]
    fn test_long_password_is_not_truncated() {
        let hasher = hasher();
        let prefix = "a".repeat(72);

        assert!(matches!(
            hasher.hash(&format!("{prefix}REAL-SECRET")),
            Err(Error::InvalidPassword(_))
        ));

        // A hash produced elsewhere from the 72-byte prefix must not accept
        // anything that merely starts with it.
        let truncated = bcrypt::hash(&prefix, 4).unwrap();
        assert!(!hasher.verify(&format!("{prefix}totally-different"), &truncated));
        assert!(!hasher.verify(&prefix, &truncated));
    }

    #[test]
    fn test_longest_accepted_password() {
        let hasher = hasher();
        let longest = "b".repeat(MAX_PASSWORD_BYTES);
        let hash = hasher.hash(&longest).unwrap();

        assert!(hasher.verify(&longest, &hash));
        assert!(!hasher.verify(&longest[1..], &hash));
        assert!(!hasher.verify(&format!("{longest}b"), &hash));
    }

    #[test]
    fn test_same_password_different_hashes() {
        let hasher = hasher();
        let first = hasher.hash("correct horse").unwrap();
        let second = hasher.hash("correct horse").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("correct horse", &first));
        assert!(hasher.verify("correct horse", &second));
    }

    #[test]
    fn test_malformed_hash_is_rejected() {
        let hasher = hasher();

        assert!(!hasher.verify("anything", "not-a-bcrypt-hash"));
        assert!(!hasher.verify("anything", ""));
    }

    #[test]
    fn test_empty_password() {
        let hasher = hasher();
        let hash = hasher.hash("").unwrap();

        assert!(hasher.verify("", &hash));
        assert!(!hasher.verify(" ", &hash));
    }
}
