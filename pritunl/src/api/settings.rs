use http::Method;
use pritunl_core::Result;
use serde::Serialize;

use crate::net::parse_ip;
use crate::{path, CallScope, Client, RequestOptions, Response};

#[derive(Serialize)]
struct PublicAddress<'a> {
    public_address: &'a str,
}

impl Client {
    /// Update the public address written into exported connection profiles.
    ///
    /// The server restarts itself after this call, so it should be the last
    /// call of a setup sequence.
    pub async fn update_public_address(&self, scope: &CallScope, address: &str) -> Result<Response> {
        parse_ip(address)?;

        let opts = RequestOptions::new().with_json_body(&PublicAddress {
            public_address: address,
        });
        self.execute(scope, Method::PUT, &path::settings(), opts).await
    }
}
