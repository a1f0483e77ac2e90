//! Endpoint paths of the pritunl API.
//!
//! Paths never contain the scheme, host or query string: they are signed
//! exactly as returned here.

/// Server wide settings.
pub fn settings() -> String {
    "/settings".to_string()
}

/// Administrator accounts.
pub fn admins() -> String {
    "/admin".to_string()
}

/// One administrator account.
pub fn admin(admin_id: &str) -> String {
    format!("/admin/{admin_id}")
}

/// VPN servers.
pub fn servers() -> String {
    "/server".to_string()
}

/// Start or stop a server; `operation` is `start` or `stop`.
pub fn server_operation(server_id: &str, operation: &str) -> String {
    format!("/server/{server_id}/operation/{operation}")
}

/// Organizations.
pub fn organizations() -> String {
    "/organization".to_string()
}

/// Attachment of an organization to a server.
pub fn server_organization(server_id: &str, org_id: &str) -> String {
    format!("/server/{server_id}/organization/{org_id}")
}

/// Routes of a server.
pub fn server_routes(server_id: &str) -> String {
    format!("/server/{server_id}/route")
}

/// One route of a server.
pub fn server_route(server_id: &str, route_id: &str) -> String {
    format!("/server/{server_id}/route/{route_id}")
}

/// Users of an organization.
pub fn users(org_id: &str) -> String {
    format!("/user/{org_id}")
}

/// One user of an organization.
pub fn user(org_id: &str, user_id: &str) -> String {
    format!("/user/{org_id}/{user_id}")
}

/// Connection profile archive of a user.
pub fn key_archive(org_id: &str, user_id: &str) -> String {
    format!("/key/{org_id}/{user_id}.tar")
}
