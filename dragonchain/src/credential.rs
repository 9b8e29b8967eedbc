use dragonchain_core::utils::Redact;
use dragonchain_core::SigningCredential;
use std::fmt::{Debug, Formatter};

/// Credential that holds the auth key and its identifier.
///
/// Both fields are required together: a pair with only one populated is
/// treated as not found rather than partially applied.
#[derive(Default, Clone)]
pub struct Credential {
    /// Secret HMAC key. Never logged in plaintext.
    pub auth_key: String,
    /// Non-secret identifier for the auth key, transmitted in the
    /// authorization header.
    pub auth_key_id: String,
}

impl Credential {
    /// Create a new credential from an auth key id and auth key.
    pub fn new(auth_key_id: impl Into<String>, auth_key: impl Into<String>) -> Self {
        Self {
            auth_key: auth_key.into(),
            auth_key_id: auth_key_id.into(),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("auth_key", &Redact::from(&self.auth_key))
            .field("auth_key_id", &Redact::from(&self.auth_key_id))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.auth_key.is_empty() && !self.auth_key_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_requires_both_fields() {
        assert!(Credential::new("keyId", "key").is_valid());
        assert!(!Credential::new("", "key").is_valid());
        assert!(!Credential::new("keyId", "").is_valid());
        assert!(!Credential::default().is_valid());
    }

    #[test]
    fn test_debug_never_prints_secret() {
        let cred = Credential::new("SDKAUTHKEYID1234", "do-not-print-this-key");
        let printed = format!("{cred:?}");
        assert!(!printed.contains("do-not-print-this-key"));
        assert!(!printed.contains("SDKAUTHKEYID1234"));
    }
}
