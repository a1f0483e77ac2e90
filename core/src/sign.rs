//! Pritunl API request signing.
//!
//! Every authenticated request carries four headers:
//!
//! ```text
//! Auth-Token:     <token>
//! Auth-Timestamp: <unix seconds>
//! Auth-Nonce:     <32 hex chars>
//! Auth-Signature: base64(HMAC-SHA256(secret, token&timestamp&nonce&METHOD&path))
//! ```
//!
//! The path is the request path only: no scheme, host or query string.

use http::header::HeaderName;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;
use log::debug;
use uuid::Uuid;

use crate::hash::base64_hmac_sha256;
use crate::time::format_unix_timestamp;
use crate::time::now;
use crate::time::DateTime;
use crate::utils::Redact;
use crate::Credential;
use crate::Result;

/// Header carrying the API token.
pub const AUTH_TOKEN: HeaderName = HeaderName::from_static("auth-token");
/// Header carrying the signing timestamp.
pub const AUTH_TIMESTAMP: HeaderName = HeaderName::from_static("auth-timestamp");
/// Header carrying the single-use nonce.
pub const AUTH_NONCE: HeaderName = HeaderName::from_static("auth-nonce");
/// Header carrying the request signature.
pub const AUTH_SIGNATURE: HeaderName = HeaderName::from_static("auth-signature");

/// Maximum nonce length accepted by the server.
pub const MAX_NONCE_LEN: usize = 32;

/// Signer produces the authentication headers for one request.
///
/// A fresh timestamp and nonce are drawn for every call to [`Signer::sign`],
/// including retries of the same request.
#[derive(Debug, Default, Clone)]
pub struct Signer {
    time: Option<DateTime>,
    nonce: Option<String>,
}

impl Signer {
    /// Create a new signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Specify the nonce.
    ///
    /// # Note
    ///
    /// Only use this function for testing, a reused nonce is rejected by
    /// the server as a replay.
    #[cfg(test)]
    pub fn with_nonce(mut self, nonce: &str) -> Self {
        self.nonce = Some(nonce.to_string());
        self
    }

    /// Sign a request made with `method` against `path`.
    pub fn sign(&self, path: &str, method: &Method, cred: &Credential) -> Result<SignedHeaders> {
        let timestamp = format_unix_timestamp(self.time.unwrap_or_else(now));
        let nonce = self.nonce.clone().unwrap_or_else(generate_nonce);

        let method = method.as_str().to_ascii_uppercase();
        let string_to_sign = string_to_sign(&cred.token, &timestamp, &nonce, &method, path);
        debug!(
            "string to sign: {:?}&{}&{}&{}&{}",
            Redact::from(&cred.token),
            timestamp,
            nonce,
            method,
            path
        );

        let signature = base64_hmac_sha256(cred.secret.as_bytes(), string_to_sign.as_bytes())?;

        Ok(SignedHeaders {
            token: cred.token.clone(),
            timestamp,
            nonce,
            signature,
        })
    }
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// token + "&" + timestamp + "&" + nonce + "&" + METHOD + "&" + path
/// ```
pub fn string_to_sign(token: &str, timestamp: &str, nonce: &str, method: &str, path: &str) -> String {
    [token, timestamp, nonce, &method.to_ascii_uppercase(), path].join("&")
}

/// Generate a nonce from a random v4 uuid with the hyphens stripped.
///
/// The uuid is drawn from the OS random source.
pub fn generate_nonce() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Authentication values for a single request.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// API token, sent in cleartext.
    pub token: String,
    /// Unix seconds at signing time.
    pub timestamp: String,
    /// Single-use random value.
    pub nonce: String,
    /// Base64 HMAC-SHA256 signature.
    pub signature: String,
}

impl std::fmt::Debug for SignedHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedHeaders")
            .field("token", &Redact::from(&self.token))
            .field("timestamp", &self.timestamp)
            .field("nonce", &self.nonce)
            .field("signature", &Redact::from(&self.signature))
            .finish()
    }
}

impl SignedHeaders {
    /// Insert the authentication headers, replacing any existing values.
    pub fn apply(&self, headers: &mut HeaderMap) -> Result<()> {
        headers.insert(AUTH_TOKEN, {
            let mut value = HeaderValue::from_str(&self.token)?;
            value.set_sensitive(true);
            value
        });
        headers.insert(AUTH_TIMESTAMP, HeaderValue::from_str(&self.timestamp)?);
        headers.insert(AUTH_NONCE, HeaderValue::from_str(&self.nonce)?);
        headers.insert(AUTH_SIGNATURE, {
            let mut value = HeaderValue::from_str(&self.signature)?;
            value.set_sensitive(true);
            value
        });

        Ok(())
    }
}
