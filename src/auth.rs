//! Single shared edit password.
//!
//! Only a salted Argon2 hash of the configured password is kept. The empty
//! password is hashed as well, so [`AuthGate::verify`] always runs the same
//! code path. Note that `verify("")` succeeds when no password was configured:
//! callers must check [`AuthGate::is_editable`] first.

use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::errors::WikiError;

#[derive(Clone)]
pub struct AuthGate {
    hash: String,
    editable: bool,
}

impl AuthGate {
    /// Hash `password` with a fresh salt.
    pub fn new(password: &str) -> Result<Self, WikiError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| WikiError::Hash(e.to_string()))?
            .to_string();
        Ok(Self { hash, editable: !password.is_empty() })
    }

    /// Whether a non-empty password was configured.
    pub fn is_editable(&self) -> bool {
        self.editable
    }

    /// Check `candidate` against the stored hash.
    pub fn verify(&self, candidate: &str) -> bool {
        let Ok(hash) = PasswordHash::new(&self.hash) else {
            log::error!("Stored password hash is not a valid PHC string");
            return false;
        };
        Argon2::default().verify_password(candidate.as_bytes(), &hash).is_ok()
    }
}

impl fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthGate")
            .field("hash", &"<redacted>")
            .field("editable", &self.editable)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_configured_password() {
        let gate = AuthGate::new("secret").unwrap();
        assert!(gate.is_editable());
        assert!(gate.verify("secret"));
        assert!(!gate.verify("Secret"));
        assert!(!gate.verify(""));
    }

    #[test]
    fn empty_password_disables_editing_but_still_hashes() {
        let gate = AuthGate::new("").unwrap();
        assert!(!gate.is_editable());
        // The second layer on its own would let this through.
        assert!(gate.verify(""));
        assert!(!gate.verify("anything"));
    }

    #[test]
    fn hash_is_salted_and_never_plaintext() {
        let a = AuthGate::new("secret").unwrap();
        let b = AuthGate::new("secret").unwrap();
        assert_ne!(a.hash, b.hash);
        assert!(!a.hash.contains("secret"));
        assert!(!format!("{a:?}").contains(&a.hash));
    }
}
