//! Core components for talking to the Pritunl API.
//!
//! This crate provides the foundational types shared by the pritunl client:
//!
//! - [`Credential`]: the API token and secret pair
//! - [`Signer`]: builds the per-request `Auth-*` headers
//! - [`Env`]: abstract environment access used to load configuration
//! - [`Error`]: the error type returned by every operation
//!
//! ## Example
//!
//! ```
//! use http::HeaderMap;
//! use http::Method;
//! use pritunl_core::{Credential, Signer};
//!
//! # fn main() -> pritunl_core::Result<()> {
//! let cred = Credential::new("my-token", "my-secret");
//! let signed = Signer::new().sign("/server", &Method::GET, &cred)?;
//!
//! let mut headers = HeaderMap::new();
//! signed.apply(&mut headers)?;
//! assert!(headers.contains_key("Auth-Signature"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time manipulation utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod sign;
pub mod time;
pub mod utils;

mod credential;
pub use credential::Credential;
mod env;
pub use env::{Env, OsEnv, StaticEnv};
mod error;
pub use error::{Error, ErrorKind, Result};

pub use sign::{SignedHeaders, Signer};
