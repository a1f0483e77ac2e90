use std::fmt::{Debug, Formatter};

use crate::utils::Redact;

/// Credential pair identifying and authenticating an API caller.
///
/// The token travels in cleartext on every request, the secret is only
/// ever used as the HMAC key. Rotation is done by building a new client
/// with a new credential.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Credential {
    /// API token.
    pub token: String,
    /// API secret.
    pub secret: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret: secret.into(),
        }
    }

    /// Check if both halves of the credential are present.
    pub fn is_valid(&self) -> bool {
        !self.token.is_empty() && !self.secret.is_empty()
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("token", &Redact::from(&self.token))
            .field("secret", &Redact::from(&self.secret))
            .finish()
    }
}
