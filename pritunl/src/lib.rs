//! Client for the Pritunl VPN management API.
//!
//! Every request is signed with the `Auth-*` HMAC-SHA256 headers pritunl
//! expects for API tokens. On top of the generic [`Client::execute`] this
//! crate offers typed calls for servers, organizations, routes, users and
//! connection profiles, plus [`bootstrap`] which turns a fresh install into
//! a running VPN server.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pritunl::{CallScope, Client, Config, Credential};
//!
//! #[tokio::main]
//! async fn main() -> pritunl::Result<()> {
//!     let config = Config::new(
//!         "192.170.1.193",
//!         Credential::new("your-api-token", "your-api-secret"),
//!     );
//!     let client = Client::new(config)?;
//!
//!     let scope = CallScope::new();
//!     for org in client.list_organizations(&scope).await? {
//!         println!("{} has {} users", org.name, org.user_count);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! [`Config::from_env`] reads:
//!
//! ```bash
//! export PRITUNL_HOST=192.170.1.193
//! export PRITUNL_API_TOKEN=your-api-token
//! export PRITUNL_API_SECRET=your-api-secret
//! # Optional
//! export PRITUNL_SCHEME=https
//! export PRITUNL_ACCEPT_INVALID_CERTS=true
//! export PRITUNL_TIMEOUT_SECS=30
//! ```
//!
//! ## Cancellation
//!
//! Each call takes a [`CallScope`] carrying an optional deadline and
//! [`CancellationToken`]. When either fires the in-flight request is
//! dropped and the call returns [`ErrorKind::Timeout`] or
//! [`ErrorKind::Cancelled`].

mod api;
pub use api::*;

mod archive;
pub use archive::extract_profiles;

mod bootstrap;
pub use bootstrap::{bootstrap, BootstrapRequest, Deployment};

mod client;
pub use client::{Client, Response};

mod config;
pub use config::Config;

mod constants;
pub use constants::{DEFAULT_ADMIN_USER, DEFAULT_ORGANIZATION, DEFAULT_ROUTE};

mod net;
pub use net::{parse_cidr, parse_ip};

pub mod path;

mod request;
pub use request::{default_ok_codes, RequestOptions};

mod scope;
pub use scope::CallScope;

pub use pritunl_core::{Credential, Env, Error, ErrorKind, OsEnv, Result, StaticEnv};
pub use tokio_util::sync::CancellationToken;
