use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};

use bytes::Bytes;
use http::header::{HeaderName, ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use pritunl_core::{Error, Result};
use serde::Serialize;

use crate::constants::APPLICATION_JSON;

/// Options for a single [`Client::execute`](crate::Client::execute) call.
///
/// At most one of json body and raw body may be set. The conflict is
/// reported when the request is executed, before anything is sent.
#[derive(Default)]
pub struct RequestOptions {
    query: BTreeMap<String, String>,
    json_body: Option<serde_json::Result<Vec<u8>>>,
    raw_body: Option<Bytes>,
    ok_codes: Option<Vec<StatusCode>>,
    headers: Vec<(String, String)>,
    omit_headers: Vec<String>,
    keep_body: bool,
}

impl Debug for RequestOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestOptions")
            .field("query", &self.query)
            .field("json_body", &self.json_body.as_ref().map(|b| b.as_ref().map(Vec::len)))
            .field("raw_body", &self.raw_body.as_ref().map(Bytes::len))
            .field("ok_codes", &self.ok_codes)
            .field("headers", &self.headers)
            .field("omit_headers", &self.omit_headers)
            .field("keep_body", &self.keep_body)
            .finish()
    }
}

impl RequestOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Send `body` serialized as JSON with `Content-Type: application/json`.
    pub fn with_json_body(mut self, body: &impl Serialize) -> Self {
        self.json_body = Some(serde_json::to_vec(body));
        self
    }

    /// Send `body` verbatim.
    pub fn with_raw_body(mut self, body: impl Into<Bytes>) -> Self {
        self.raw_body = Some(body.into());
        self
    }

    /// Append a query parameter. Parameters are encoded in key order.
    ///
    /// Setting a key again replaces its earlier value.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Override the accepted status codes.
    pub fn with_ok_codes(mut self, codes: impl IntoIterator<Item = StatusCode>) -> Self {
        self.ok_codes = Some(codes.into_iter().collect());
        self
    }

    /// Add an extra header.
    ///
    /// The `Auth-*` headers always replace a caller header of the same name.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Remove a header from the outgoing request, including the defaults.
    pub fn without_header(mut self, name: impl Into<String>) -> Self {
        self.omit_headers.push(name.into());
        self
    }

    /// Hand the open response body to the caller instead of draining it.
    pub fn with_keep_body(mut self, keep: bool) -> Self {
        self.keep_body = keep;
        self
    }

    /// Whether the caller takes over the response body.
    pub fn keep_body(&self) -> bool {
        self.keep_body
    }

    /// Check the options for conflicts.
    pub fn validate(&self) -> Result<()> {
        if self.json_body.is_some() && self.raw_body.is_some() {
            return Err(Error::config_invalid(
                "please provide only one of json body or raw body",
            ));
        }
        Ok(())
    }

    /// Whether `status` is accepted for a `method` request.
    pub fn accepts(&self, method: &Method, status: StatusCode) -> bool {
        match &self.ok_codes {
            Some(codes) => codes.contains(&status),
            None => default_ok_codes(method).contains(&status.as_u16()),
        }
    }

    /// Render the query string, empty when no parameters are set.
    pub(crate) fn query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish()
    }

    /// Take the request body out of the options.
    ///
    /// Returns the body and whether it is JSON.
    pub(crate) fn take_body(&mut self) -> Result<Option<(Bytes, bool)>> {
        self.validate()?;

        if let Some(json) = self.json_body.take() {
            let bs = json
                .map_err(|e| Error::config_invalid("failed to serialize json body").with_source(e))?;
            return Ok(Some((Bytes::from(bs), true)));
        }
        Ok(self.raw_body.take().map(|bs| (bs, false)))
    }

    /// Apply caller headers and omissions on top of `headers`.
    pub(crate) fn apply_headers(&self, headers: &mut HeaderMap) -> Result<()> {
        for (name, value) in &self.headers {
            headers.insert(
                HeaderName::from_bytes(name.as_bytes())?,
                HeaderValue::from_str(value)?,
            );
        }
        Ok(())
    }

    /// Remove omitted headers from `headers`.
    pub(crate) fn omit_headers(&self, headers: &mut HeaderMap) -> Result<()> {
        for name in &self.omit_headers {
            headers.remove(HeaderName::from_bytes(name.as_bytes())?);
        }
        Ok(())
    }
}

/// Status codes accepted for `method` when no override is given.
pub fn default_ok_codes(method: &Method) -> &'static [u16] {
    match method.as_str().to_ascii_uppercase().as_str() {
        "GET" | "HEAD" => &[200],
        "POST" => &[200, 201, 202],
        "PUT" => &[200, 201, 202],
        "PATCH" => &[200, 202, 204],
        "DELETE" => &[200, 202, 204],
        _ => &[],
    }
}

/// Default headers sent with every request before caller overrides.
pub(crate) fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
    headers
}
