// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt::{Debug, Formatter};
use std::time::Duration;

use pritunl_core::{Credential, Env, Error, Result};

use crate::constants::*;

/// Config for a pritunl [`Client`](crate::Client).
///
/// The config is immutable once the client is built. Use
/// [`Client::with_credential`](crate::Client::with_credential) to switch to
/// a rotated credential.
#[derive(Clone)]
pub struct Config {
    /// Scheme used to reach the server, `https` by default.
    pub scheme: String,
    /// Host (and optional port) of the pritunl web console.
    pub host: String,
    /// API credential.
    pub credential: Credential,
    /// Skip TLS certificate verification.
    ///
    /// A fresh pritunl install serves a self-signed certificate, so this
    /// defaults to `true`.
    pub accept_invalid_certs: bool,
    /// Client wide request timeout. Per call deadlines are set on
    /// [`CallScope`](crate::CallScope) instead.
    pub timeout: Option<Duration>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("credential", &self.credential)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Create a config for `host` using `credential`.
    pub fn new(host: impl Into<String>, credential: Credential) -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            host: host.into(),
            credential,
            accept_invalid_certs: true,
            timeout: None,
        }
    }

    /// Set the scheme, `http` or `https`.
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Set whether invalid TLS certificates are accepted.
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Set the client wide request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Replace the credential.
    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = credential;
        self
    }

    /// Load config from environment variables.
    ///
    /// `PRITUNL_HOST`, `PRITUNL_API_TOKEN` and `PRITUNL_API_SECRET` are
    /// required. `PRITUNL_SCHEME`, `PRITUNL_ACCEPT_INVALID_CERTS` and
    /// `PRITUNL_TIMEOUT_SECS` are optional.
    pub fn from_env(env: &impl Env) -> Result<Self> {
        let required = |key: &str| {
            env.var(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::config_invalid(format!("env {key} must be set")))
        };

        let mut cfg = Self::new(
            required(PRITUNL_HOST)?,
            Credential::new(required(PRITUNL_API_TOKEN)?, required(PRITUNL_API_SECRET)?),
        );

        if let Some(scheme) = env.var(PRITUNL_SCHEME) {
            cfg.scheme = scheme;
        }
        if let Some(v) = env.var(PRITUNL_ACCEPT_INVALID_CERTS) {
            cfg.accept_invalid_certs = v.parse().map_err(|e| {
                Error::config_invalid(format!("{PRITUNL_ACCEPT_INVALID_CERTS} must be true or false"))
                    .with_source(e)
            })?;
        }
        if let Some(v) = env.var(PRITUNL_TIMEOUT_SECS) {
            let secs: u64 = v.parse().map_err(|e| {
                Error::config_invalid(format!("{PRITUNL_TIMEOUT_SECS} must be a number of seconds"))
                    .with_source(e)
            })?;
            cfg.timeout = Some(Duration::from_secs(secs));
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Check the config can be used to build a client.
    pub fn validate(&self) -> Result<()> {
        if self.scheme != "http" && self.scheme != "https" {
            return Err(Error::config_invalid(format!(
                "scheme must be http or https, got {}",
                self.scheme
            )));
        }
        if self.host.is_empty() || self.host.contains('/') {
            return Err(Error::config_invalid(format!(
                "host must be a bare host[:port], got {:?}",
                self.host
            )));
        }
        if self.credential.token.is_empty() {
            return Err(Error::credential_invalid("api token must not be empty"));
        }
        if self.credential.secret.is_empty() {
            return Err(Error::credential_invalid("api secret must not be empty"));
        }
        Ok(())
    }

    /// Base url of the api, `scheme://host`.
    pub fn endpoint(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }
}
