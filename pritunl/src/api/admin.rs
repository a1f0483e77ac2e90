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

use http::Method;
use pritunl_core::utils::Redact;
use pritunl_core::{Credential, Result};
use serde::{Deserialize, Serialize};

use crate::constants::ROTATE_PLACEHOLDER;
use crate::{path, CallScope, Client, RequestOptions};

/// Administrator account.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminUser {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub username: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub auth_api: bool,
    #[serde(deserialize_with = "super::null_as_default")]
    pub token: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub secret: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub super_user: bool,
}

impl Debug for AdminUser {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminUser")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("auth_api", &self.auth_api)
            .field("token", &Redact::from(&self.token))
            .field("secret", &Redact::from(&self.secret))
            .field("super_user", &self.super_user)
            .finish()
    }
}

impl AdminUser {
    /// API credential of this admin as returned by the server.
    pub fn credential(&self) -> Credential {
        Credential::new(&self.token, &self.secret)
    }
}

impl Client {
    /// List administrator accounts.
    pub async fn list_admins(&self, scope: &CallScope) -> Result<Vec<AdminUser>> {
        let mut admins = Vec::new();
        self.execute_into(
            scope,
            Method::GET,
            &path::admins(),
            RequestOptions::new(),
            &mut admins,
        )
        .await?;
        Ok(admins)
    }

    /// Enable API access for `admin` and have the server generate a new
    /// token and secret for it.
    ///
    /// The returned admin carries the new credential. The old credential
    /// stops working as soon as the server applies the change, and there is
    /// no way back to it.
    pub async fn rotate_admin_credential(
        &self,
        scope: &CallScope,
        admin: &AdminUser,
    ) -> Result<AdminUser> {
        // Any value in token and secret makes the server generate new ones.
        let body = AdminUser {
            id: admin.id.clone(),
            username: admin.username.clone(),
            auth_api: true,
            token: ROTATE_PLACEHOLDER.to_string(),
            secret: ROTATE_PLACEHOLDER.to_string(),
            super_user: true,
        };

        let mut updated = body.clone();
        self.execute_into(
            scope,
            Method::PUT,
            &path::admin(&admin.id),
            RequestOptions::new().with_json_body(&body),
            &mut updated,
        )
        .await?;
        Ok(updated)
    }
}
