//! Bootstrap a fresh pritunl install.
//!
//! ```bash
//! export PRITUNL_HOST=192.170.1.193
//! export PRITUNL_API_TOKEN=...
//! export PRITUNL_API_SECRET=...
//! cargo run --example bootstrap -- 192.170.1.163 10.10.0.0/16
//! ```

use std::env;
use std::time::Duration;

use pritunl::{bootstrap, BootstrapRequest, CallScope, Config, OsEnv};

#[tokio::main]
async fn main() -> pritunl::Result<()> {
    let _ = env_logger::builder().try_init();

    let mut args = env::args().skip(1);
    let public_address = args.next().unwrap_or_else(|| "192.170.1.163".to_string());
    let network = args.next().unwrap_or_else(|| "10.10.0.0/16".to_string());
    let use_nat = args.next().is_some_and(|v| v == "nat");

    let config = Config::from_env(&OsEnv)?;
    let scope = CallScope::new().with_timeout(Duration::from_secs(120));

    let req = BootstrapRequest::new(config, public_address, network, use_nat);
    let deployment = bootstrap(&scope, req).await?;

    // Print the full deployment: the rotated credential is not shown anywhere else.
    println!(
        "{}",
        serde_json::to_string_pretty(&deployment).map_err(|e| {
            pritunl::Error::unexpected("failed to encode deployment").with_source(e)
        })?
    );
    Ok(())
}
