use http::Method;
use pritunl_core::Result;
use serde::{Deserialize, Serialize};

use crate::net::parse_cidr;
use crate::{path, CallScope, Client, RequestOptions};

/// Network reachable through a server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Route {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: String,
    /// Server id.
    #[serde(deserialize_with = "super::null_as_default")]
    pub server: String,
    /// Network in CIDR notation.
    #[serde(deserialize_with = "super::null_as_default")]
    pub network: String,
    /// Masquerade client traffic behind the server when true, route it
    /// with the client address otherwise.
    #[serde(deserialize_with = "super::null_as_default")]
    pub nat: bool,
}

/// Route to add to a server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteAdd {
    pub server: String,
    pub network: String,
    pub nat: bool,
}

/// Change to an existing route. Unset fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteUpdate {
    pub id: String,
    pub server: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nat: Option<bool>,
}

impl Client {
    /// List the routes of a server.
    pub async fn list_routes(&self, scope: &CallScope, server_id: &str) -> Result<Vec<Route>> {
        let mut routes = Vec::new();
        self.execute_into(
            scope,
            Method::GET,
            &path::server_routes(server_id),
            RequestOptions::new(),
            &mut routes,
        )
        .await?;
        Ok(routes)
    }

    /// Add a route to a server.
    pub async fn add_route(&self, scope: &CallScope, route: &RouteAdd) -> Result<Route> {
        parse_cidr(&route.network)?;

        let mut added = Route::default();
        self.execute_into(
            scope,
            Method::POST,
            &path::server_routes(&route.server),
            RequestOptions::new().with_json_body(route),
            &mut added,
        )
        .await?;
        Ok(added)
    }

    /// Update a route of a server.
    pub async fn update_route(&self, scope: &CallScope, route: &RouteUpdate) -> Result<Route> {
        if let Some(network) = &route.network {
            parse_cidr(network)?;
        }

        let mut updated = Route::default();
        self.execute_into(
            scope,
            Method::PUT,
            &path::server_route(&route.server, &route.id),
            RequestOptions::new().with_json_body(route),
            &mut updated,
        )
        .await?;
        Ok(updated)
    }

    /// Delete a route of a server.
    pub async fn delete_route(&self, scope: &CallScope, server_id: &str, route_id: &str) -> Result<()> {
        self.execute(
            scope,
            Method::DELETE,
            &path::server_route(server_id, route_id),
            RequestOptions::new(),
        )
        .await?;
        Ok(())
    }
}
