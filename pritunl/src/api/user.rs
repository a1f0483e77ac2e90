use http::Method;
use pritunl_core::Result;
use serde::{Deserialize, Serialize};

use crate::{path, CallScope, Client, RequestOptions};

/// VPN user of an organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: String,
    /// Organization id.
    #[serde(deserialize_with = "super::null_as_default")]
    pub organization: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub organization_name: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub name: String,
    pub email: Option<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub disabled: bool,
}

/// User to add to an organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserAdd {
    /// Organization id, part of the path rather than the body.
    #[serde(skip)]
    pub organization_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Serialize)]
struct UserState {
    disabled: bool,
}

impl Client {
    /// Add a user to an organization.
    ///
    /// The server answers with the list of users it created.
    pub async fn add_user(&self, scope: &CallScope, user: &UserAdd) -> Result<Vec<User>> {
        let mut users = Vec::new();
        self.execute_into(
            scope,
            Method::POST,
            &path::users(&user.organization_id),
            RequestOptions::new().with_json_body(user),
            &mut users,
        )
        .await?;
        Ok(users)
    }

    /// Enable or disable a user.
    pub async fn set_user_disabled(
        &self,
        scope: &CallScope,
        org_id: &str,
        user_id: &str,
        disabled: bool,
    ) -> Result<User> {
        let mut user = User::default();
        self.execute_into(
            scope,
            Method::PUT,
            &path::user(org_id, user_id),
            RequestOptions::new().with_json_body(&UserState { disabled }),
            &mut user,
        )
        .await?;
        Ok(user)
    }
}
