//! Address validation done before anything is sent.

use std::net::IpAddr;

use pritunl_core::{Error, Result};

/// Parse an IPv4 or IPv6 address.
pub fn parse_ip(s: &str) -> Result<IpAddr> {
    s.parse()
        .map_err(|e| Error::config_invalid(format!("invalid ip address: {s:?}")).with_source(e))
}

/// Parse a network in CIDR notation such as `10.10.0.0/16`.
///
/// Host bits are not required to be zero.
pub fn parse_cidr(s: &str) -> Result<(IpAddr, u8)> {
    let invalid = || Error::config_invalid(format!("invalid network: {s:?}"));

    let (addr, prefix) = s.split_once('/').ok_or_else(invalid)?;
    let addr: IpAddr = addr.parse().map_err(|e| invalid().with_source(e))?;
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let prefix: u8 = prefix.parse().map_err(|e| invalid().with_source(e))?;

    let max = if addr.is_ipv4() { 32 } else { 128 };
    if prefix > max {
        return Err(invalid());
    }
    Ok((addr, prefix))
}
