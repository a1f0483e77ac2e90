use std::fmt::{Debug, Formatter};

use bytes::Bytes;
use http::Method;
use log::debug;
use pritunl_core::{Error, Result};

use crate::archive::extract_profiles;
use crate::{path, CallScope, Client, RequestOptions};

/// Client connection profile of one user.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionProfile {
    /// File name, ending with `.ovpn`.
    pub name: String,
    /// File content, importable into an OpenVPN client.
    pub content: Bytes,
}

impl Debug for ConnectionProfile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Profiles embed the user's private key.
        f.debug_struct("ConnectionProfile")
            .field("name", &self.name)
            .field("content", &format_args!("{} bytes", self.content.len()))
            .finish()
    }
}

impl Client {
    /// Export the connection profile of a user.
    ///
    /// The server sends a tar archive that must hold exactly one file.
    pub async fn export_profile(
        &self,
        scope: &CallScope,
        org_id: &str,
        user_id: &str,
    ) -> Result<ConnectionProfile> {
        let resp = self
            .execute(
                scope,
                Method::GET,
                &path::key_archive(org_id, user_id),
                RequestOptions::new().with_keep_body(true),
            )
            .await?;
        let body = resp
            .into_body()
            .ok_or_else(|| Error::unexpected("response body was not kept"))?;

        let bs = scope
            .run(async {
                body.bytes()
                    .await
                    .map_err(|e| Error::decode("read resp body failed").with_source(e))
            })
            .await?;
        debug!("got profile archive of {} bytes", bs.len());

        let mut profiles = extract_profiles(bs.as_ref())?;
        if profiles.len() != 1 {
            return Err(Error::unexpected_content(format!(
                "export connection config file failed: expected 1 file in archive, got {}",
                profiles.len()
            )));
        }
        Ok(profiles.remove(0))
    }
}
