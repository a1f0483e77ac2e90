//! Typed calls against the pritunl resources.
//!
//! Each submodule adds methods to [`Client`](crate::Client) and defines the
//! request and response bodies it needs.

use serde::{Deserialize, Deserializer};

mod admin;
pub use admin::AdminUser;

mod key;
pub use key::ConnectionProfile;

mod organization;
pub use organization::{AttachOrganization, Organization};

mod route;
pub use route::{Route, RouteAdd, RouteUpdate};

mod server;
pub use server::VpnServer;

mod settings;

mod user;
pub use user::{User, UserAdd};

/// Decode a JSON `null` the same way as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
