use http::Method;
use pritunl_core::Result;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::net::parse_cidr;
use crate::{path, CallScope, Client, RequestOptions};

/// VPN server.
///
/// Unset fields are left out of requests. [`VpnServer::with_defaults`]
/// fills in everything a new server needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VpnServer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Private network handed out to clients, such as `10.12.12.0/24`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cipher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restrict_routes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_mode: Option<String>,
    /// `online` or `offline`, set by the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl VpnServer {
    /// Fill every unset creation field with its default.
    ///
    /// The name defaults to `server_` followed by five random alphanumeric
    /// characters.
    pub fn with_defaults(mut self) -> Self {
        fn fill(field: &mut Option<String>, default: impl FnOnce() -> String) {
            if field.as_deref().map_or(true, str::is_empty) {
                *field = Some(default());
            }
        }

        fill(&mut self.name, generate_server_name);
        fill(&mut self.network, || DEFAULT_SERVER_NETWORK.to_string());
        fill(&mut self.protocol, || DEFAULT_SERVER_PROTOCOL.to_string());
        fill(&mut self.cipher, || DEFAULT_SERVER_CIPHER.to_string());
        fill(&mut self.hash, || DEFAULT_SERVER_HASH.to_string());
        fill(&mut self.network_mode, || DEFAULT_SERVER_NETWORK_MODE.to_string());
        self
    }
}

/// Generate a display name for a new server.
///
/// Names only need to be distinct, not unpredictable.
pub(crate) fn generate_server_name() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SERVER_NAME_SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("{SERVER_NAME_PREFIX}{suffix}")
}

impl Client {
    /// Create a VPN server, filling unset fields with defaults first.
    pub async fn create_server(&self, scope: &CallScope, server: VpnServer) -> Result<VpnServer> {
        let server = server.with_defaults();
        if let Some(network) = &server.network {
            parse_cidr(network)?;
        }

        let mut created = server.clone();
        self.execute_into(
            scope,
            Method::POST,
            &path::servers(),
            RequestOptions::new().with_json_body(&server),
            &mut created,
        )
        .await?;
        Ok(created)
    }

    /// Start or stop a VPN server and return its new state.
    pub async fn start_stop_server(
        &self,
        scope: &CallScope,
        server_id: &str,
        start: bool,
    ) -> Result<VpnServer> {
        let operation = if start { "start" } else { "stop" };

        let mut server = VpnServer::default();
        self.execute_into(
            scope,
            Method::PUT,
            &path::server_operation(server_id, operation),
            RequestOptions::new(),
            &mut server,
        )
        .await?;
        Ok(server)
    }

    /// Start a VPN server.
    pub async fn start_server(&self, scope: &CallScope, server_id: &str) -> Result<VpnServer> {
        self.start_stop_server(scope, server_id, true).await
    }

    /// Stop a VPN server.
    pub async fn stop_server(&self, scope: &CallScope, server_id: &str) -> Result<VpnServer> {
        self.start_stop_server(scope, server_id, false).await
    }
}
