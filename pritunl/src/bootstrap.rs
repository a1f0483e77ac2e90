//! One-shot setup of a fresh pritunl install.

use std::fmt::{Debug, Formatter};

use log::{debug, info, warn};
use pritunl_core::utils::Redact;
use pritunl_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ADMIN_USER, DEFAULT_ORGANIZATION, DEFAULT_ROUTE};
use crate::net::{parse_cidr, parse_ip};
use crate::{AttachOrganization, CallScope, Client, Config, RouteAdd, VpnServer};

/// Input of [`bootstrap`].
#[derive(Debug, Clone)]
pub struct BootstrapRequest {
    /// Config carrying the initial credential of the default admin.
    pub config: Config,
    /// Address clients use to reach the server, written into profiles.
    pub public_address: String,
    /// Internal network reachable through the VPN, in CIDR notation.
    pub network: String,
    /// Masquerade client traffic into `network`.
    pub use_nat: bool,
    /// Template of the server to create. Unset fields take defaults.
    pub server: Option<VpnServer>,
}

impl BootstrapRequest {
    /// Create a request with the default server template.
    pub fn new(
        config: Config,
        public_address: impl Into<String>,
        network: impl Into<String>,
        use_nat: bool,
    ) -> Self {
        Self {
            config,
            public_address: public_address.into(),
            network: network.into(),
            use_nat,
            server: None,
        }
    }

    /// Use `server` as template for the created server.
    pub fn with_server(mut self, server: VpnServer) -> Self {
        self.server = Some(server);
        self
    }

    fn validate(&self) -> Result<()> {
        parse_ip(&self.public_address)?;
        parse_cidr(&self.network)?;
        if let Some(network) = self.server.as_ref().and_then(|s| s.network.as_deref()) {
            parse_cidr(network)?;
        }
        self.config.validate()
    }
}

/// Everything needed to operate the VPN after [`bootstrap`] succeeded.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Deployment {
    pub public_address: String,
    pub admin_user_id: String,
    /// Token generated by the rotation. The initial token no longer works.
    pub api_token: String,
    pub api_secret: String,
    pub vpn_server_name: String,
    pub vpn_server_id: String,
    /// `online` or `offline`.
    pub vpn_server_state: String,
    pub vpn_network: String,
    pub vpn_port: u16,
    pub organization_id: String,
    /// Internal network routed through the VPN.
    pub route: String,
    pub route_id: String,
    pub route_use_nat: bool,
}

impl Debug for Deployment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deployment")
            .field("public_address", &self.public_address)
            .field("admin_user_id", &self.admin_user_id)
            .field("api_token", &Redact::from(&self.api_token))
            .field("api_secret", &Redact::from(&self.api_secret))
            .field("vpn_server_name", &self.vpn_server_name)
            .field("vpn_server_id", &self.vpn_server_id)
            .field("vpn_server_state", &self.vpn_server_state)
            .field("vpn_network", &self.vpn_network)
            .field("vpn_port", &self.vpn_port)
            .field("organization_id", &self.organization_id)
            .field("route", &self.route)
            .field("route_id", &self.route_id)
            .field("route_use_nat", &self.route_use_nat)
            .finish()
    }
}

/// Turn a fresh pritunl install into a running VPN server.
///
/// The steps run strictly in order and the first failure aborts the rest:
///
/// 1. rotate the API credential of the `pritunl` admin
/// 2. create a server from the template
/// 3. attach the `default` organization to it
/// 4. replace the `0.0.0.0/0` route with a route to `network`
/// 5. start the server
/// 6. set the public address, which restarts the pritunl service
///
/// The credential rotation cannot be undone. If a later step fails the
/// initial credential is already gone and the returned error does not
/// carry the new one.
pub async fn bootstrap(scope: &CallScope, req: BootstrapRequest) -> Result<Deployment> {
    req.validate()?;

    let client = Client::new(req.config)?;
    let mut deployment = Deployment::default();

    let admins = client.list_admins(scope).await?;
    let admin = admins
        .into_iter()
        .find(|a| a.username == DEFAULT_ADMIN_USER)
        .ok_or_else(|| Error::not_found(format!("admin user {DEFAULT_ADMIN_USER} not found")))?;
    deployment.admin_user_id = admin.id.clone();

    let rotated = client.rotate_admin_credential(scope, &admin).await?;
    warn!(
        "rotated api credential of admin {}, the previous credential is no longer valid, new token: {:?}",
        admin.id,
        Redact::from(&rotated.token)
    );
    let client = client.with_credential(rotated.credential())?;
    deployment.api_token = rotated.token;
    deployment.api_secret = rotated.secret;

    let server = client
        .create_server(scope, req.server.unwrap_or_default())
        .await?;
    let server_id = server
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::unexpected_content("created server has no id"))?;
    debug!("created server {server_id}");
    deployment.vpn_server_name = server.name.unwrap_or_default();
    deployment.vpn_server_id = server_id.clone();
    deployment.vpn_network = server.network.unwrap_or_default();
    deployment.vpn_port = server.port.unwrap_or_default();

    let orgs = client.list_organizations(scope).await?;
    let org = orgs
        .into_iter()
        .find(|o| o.name == DEFAULT_ORGANIZATION)
        .ok_or_else(|| {
            Error::not_found(format!("organization {DEFAULT_ORGANIZATION} not found"))
        })?;
    client
        .attach_organization(
            scope,
            &AttachOrganization {
                id: org.id.clone(),
                server: server_id.clone(),
                name: None,
            },
        )
        .await?;
    deployment.organization_id = org.id;

    let routes = client.list_routes(scope, &server_id).await?;
    let default_route = routes
        .into_iter()
        .find(|r| r.network == DEFAULT_ROUTE)
        .ok_or_else(|| {
            Error::not_found(format!("route {DEFAULT_ROUTE} of server {server_id} not found"))
        })?;
    client
        .delete_route(scope, &server_id, &default_route.id)
        .await?;

    let route = client
        .add_route(
            scope,
            &RouteAdd {
                server: server_id.clone(),
                network: req.network.clone(),
                nat: req.use_nat,
            },
        )
        .await?;
    deployment.route = req.network;
    deployment.route_id = route.id;
    deployment.route_use_nat = req.use_nat;

    let started = client.start_server(scope, &server_id).await?;
    deployment.vpn_server_state = started.status.unwrap_or_default();

    client
        .update_public_address(scope, &req.public_address)
        .await?;
    deployment.public_address = req.public_address;

    info!(
        "vpn server {} is {} on {}",
        deployment.vpn_server_name, deployment.vpn_server_state, deployment.public_address
    );
    Ok(deployment)
}
