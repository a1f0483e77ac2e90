use std::fmt::{Debug, Formatter};

use http::Method;
use pritunl_core::utils::Redact;
use pritunl_core::Result;
use serde::{Deserialize, Serialize};

use crate::{path, CallScope, Client, RequestOptions};

/// Organization grouping users.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Organization {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub auth_api: bool,
    pub auth_token: Option<String>,
    pub auth_secret: Option<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub user_count: u64,
}

impl Debug for Organization {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Organization")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("auth_api", &self.auth_api)
            .field("auth_token", &Redact::from(&self.auth_token))
            .field("auth_secret", &Redact::from(&self.auth_secret))
            .field("user_count", &self.user_count)
            .finish()
    }
}

/// Attachment of an organization to a server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachOrganization {
    /// Organization id.
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: String,
    /// Server id.
    #[serde(deserialize_with = "super::null_as_default")]
    pub server: String,
    /// Organization name, filled in by the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Client {
    /// List organizations.
    pub async fn list_organizations(&self, scope: &CallScope) -> Result<Vec<Organization>> {
        let mut orgs = Vec::new();
        self.execute_into(
            scope,
            Method::GET,
            &path::organizations(),
            RequestOptions::new(),
            &mut orgs,
        )
        .await?;
        Ok(orgs)
    }

    /// Attach an organization to a server. A server only accepts users of
    /// the organizations attached to it.
    pub async fn attach_organization(
        &self,
        scope: &CallScope,
        attach: &AttachOrganization,
    ) -> Result<AttachOrganization> {
        let mut attached = attach.clone();
        self.execute_into(
            scope,
            Method::PUT,
            &path::server_organization(&attach.server, &attach.id),
            RequestOptions::new().with_json_body(attach),
            &mut attached,
        )
        .await?;
        Ok(attached)
    }
}
