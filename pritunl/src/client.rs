use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use log::debug;
use pritunl_core::{Credential, Error, Result, Signer};
use serde::de::DeserializeOwned;

use crate::constants::APPLICATION_JSON;
use crate::request::default_headers;
use crate::{CallScope, Config, RequestOptions};

/// Client executes signed requests against a pritunl server.
///
/// The client is immutable after construction and cheap to clone; clones
/// share one connection pool. Concurrent calls through the same client are
/// independent: each one signs with its own timestamp and nonce.
#[derive(Clone)]
pub struct Client {
    config: Arc<Config>,
    endpoint: Arc<str>,
    http: reqwest::Client,
    signer: Signer,
}

impl Debug for Client {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new client from config.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let mut builder =
            reqwest::Client::builder().danger_accept_invalid_certs(config.accept_invalid_certs);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| Error::config_invalid("failed to build http client").with_source(e))?;

        Self::with_http_client(config, http)
    }

    /// Create a new client from config using a prepared reqwest client.
    ///
    /// TLS and timeout settings of `config` are not applied to `http`.
    pub fn with_http_client(config: Config, http: reqwest::Client) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            endpoint: config.endpoint().into(),
            config: Arc::new(config),
            http,
            signer: Signer::new(),
        })
    }

    /// Create a client for the same server authenticating with `credential`.
    ///
    /// The new client shares the connection pool of `self`.
    pub fn with_credential(&self, credential: Credential) -> Result<Self> {
        let config = self.config.as_ref().clone().with_credential(credential);
        Self::with_http_client(config, self.http.clone())
    }

    /// Config of this client.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Base url of this client.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute a request and return its status and headers.
    ///
    /// The response body is read to the end and dropped so the connection
    /// can be reused, unless [`RequestOptions::with_keep_body`] was set: in
    /// that case the open body is handed over in [`Response::into_body`].
    pub async fn execute(
        &self,
        scope: &CallScope,
        method: Method,
        path: &str,
        mut opts: RequestOptions,
    ) -> Result<Response> {
        let keep_body = opts.keep_body();
        let resp = self.send(scope, method, path, &mut opts).await?;

        let status = resp.status();
        let headers = resp.headers().clone();
        if keep_body {
            return Ok(Response {
                status,
                headers,
                body: Some(resp),
            });
        }

        drain(scope, resp).await?;
        Ok(Response {
            status,
            headers,
            body: None,
        })
    }

    /// Execute a request and decode the JSON response into `target`.
    ///
    /// A `204 No Content` response leaves `target` untouched.
    pub async fn execute_into<T: DeserializeOwned>(
        &self,
        scope: &CallScope,
        method: Method,
        path: &str,
        mut opts: RequestOptions,
        target: &mut T,
    ) -> Result<Response> {
        if opts.keep_body() {
            return Err(Error::config_invalid(
                "cannot keep the response body when decoding json",
            ));
        }

        let resp = self.send(scope, method, path, &mut opts).await?;
        let status = resp.status();
        let headers = resp.headers().clone();

        let bs = drain(scope, resp).await?;
        if status != StatusCode::NO_CONTENT {
            *target = serde_json::from_slice(&bs).map_err(|e| {
                Error::decode(format!("failed to decode response of {path}")).with_source(e)
            })?;
        }

        Ok(Response {
            status,
            headers,
            body: None,
        })
    }

    /// Sign, send and validate a request.
    ///
    /// Everything that can be checked locally is checked before the
    /// request is sent.
    async fn send(
        &self,
        scope: &CallScope,
        method: Method,
        path: &str,
        opts: &mut RequestOptions,
    ) -> Result<reqwest::Response> {
        scope.check()?;
        check_path(path)?;

        let method = normalize_method(method)?;
        let body = opts.take_body()?;

        let mut headers = default_headers();
        opts.apply_headers(&mut headers)?;
        if let Some((_, true)) = &body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        }
        // Sign before the query string is appended.
        self.signer
            .sign(path, &method, &self.config.credential)?
            .apply(&mut headers)?;
        opts.omit_headers(&mut headers)?;

        let url = {
            let query = opts.query_string();
            if query.is_empty() {
                format!("{}{}", self.endpoint, path)
            } else {
                format!("{}{}?{}", self.endpoint, path, query)
            }
        };

        debug!("sending request: {method} {url}");
        let mut req = self.http.request(method.clone(), &url).headers(headers);
        if let Some((bs, _)) = body {
            req = req.body(bs);
        }

        let resp = scope
            .run(async { req.send().await.map_err(transport_error) })
            .await?;
        let status = resp.status();
        debug!("got response: {method} {url} => {status}");

        if !opts.accepts(&method, status) {
            let body = scope
                .run(async {
                    resp.text().await.map_err(|e| {
                        Error::decode("read resp body failed").with_source(e)
                    })
                })
                .await?;
            return Err(Error::unexpected_status(status, body));
        }

        Ok(resp)
    }
}

/// Status and headers of an executed request.
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<reqwest::Response>,
}

impl Response {
    /// HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Take the open response body.
    ///
    /// Only set when the request was executed with
    /// [`RequestOptions::with_keep_body`]; the caller owns it from here on.
    pub fn into_body(self) -> Option<reqwest::Response> {
        self.body
    }
}

/// Read the body to the end so the connection goes back to the pool.
async fn drain(scope: &CallScope, resp: reqwest::Response) -> Result<Bytes> {
    scope
        .run(async {
            resp.bytes()
                .await
                .map_err(|e| Error::decode("read resp body failed").with_source(e))
        })
        .await
}

fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::timeout("request timed out").with_source(err)
    } else {
        Error::transport(format!("failed to send request: {err}")).with_source(err)
    }
}

fn check_path(path: &str) -> Result<()> {
    if !path.starts_with('/') || path.contains('?') || path.contains('#') {
        return Err(Error::config_invalid(format!(
            "request path must be an absolute path without query, got {path:?}"
        )));
    }
    Ok(())
}

fn normalize_method(method: Method) -> Result<Method> {
    let upper = method.as_str().to_ascii_uppercase();
    if upper == method.as_str() {
        return Ok(method);
    }
    Method::from_bytes(upper.as_bytes())
        .map_err(|e| Error::config_invalid("invalid http method").with_source(e))
}
