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

/// Default scheme of the pritunl web console.
pub const DEFAULT_SCHEME: &str = "https";

/// Environment variables for the pritunl client.
pub const PRITUNL_HOST: &str = "PRITUNL_HOST";
pub const PRITUNL_API_TOKEN: &str = "PRITUNL_API_TOKEN";
pub const PRITUNL_API_SECRET: &str = "PRITUNL_API_SECRET";
pub const PRITUNL_SCHEME: &str = "PRITUNL_SCHEME";
pub const PRITUNL_ACCEPT_INVALID_CERTS: &str = "PRITUNL_ACCEPT_INVALID_CERTS";
pub const PRITUNL_TIMEOUT_SECS: &str = "PRITUNL_TIMEOUT_SECS";

/// Admin account shipped with a fresh pritunl install.
pub const DEFAULT_ADMIN_USER: &str = "pritunl";
/// Organization shipped with a fresh pritunl install.
pub const DEFAULT_ORGANIZATION: &str = "default";
/// Catch-all route added to every new server.
pub const DEFAULT_ROUTE: &str = "0.0.0.0/0";

/// Server defaults applied by [`VpnServer::with_defaults`](crate::VpnServer::with_defaults).
pub const DEFAULT_SERVER_NETWORK: &str = "10.12.12.0/24";
pub const DEFAULT_SERVER_PROTOCOL: &str = "udp";
pub const DEFAULT_SERVER_CIPHER: &str = "aes128";
pub const DEFAULT_SERVER_HASH: &str = "sha1";
pub const DEFAULT_SERVER_NETWORK_MODE: &str = "tunnel";
pub const SERVER_NAME_PREFIX: &str = "server_";
pub const SERVER_NAME_SUFFIX_LEN: usize = 5;

/// Placeholder sent to ask the server to generate a fresh token and secret.
pub const ROTATE_PLACEHOLDER: &str = "rotate";

pub const APPLICATION_JSON: &str = "application/json";
