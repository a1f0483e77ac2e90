//! Add a user to the default organization and export its profile.
//!
//! ```bash
//! export PRITUNL_HOST=192.170.1.193
//! export PRITUNL_API_TOKEN=...
//! export PRITUNL_API_SECRET=...
//! cargo run --example manage_users -- alice alice@example.com
//! ```

use std::env;

use log::info;
use pritunl::{CallScope, Client, Config, Error, OsEnv, UserAdd, DEFAULT_ORGANIZATION};

#[tokio::main]
async fn main() -> pritunl::Result<()> {
    let _ = env_logger::builder().try_init();

    let mut args = env::args().skip(1);
    let name = args.next().unwrap_or_else(|| "alice".to_string());
    let email = args.next();

    let client = Client::new(Config::from_env(&OsEnv)?)?;
    let scope = CallScope::new();

    let org = client
        .list_organizations(&scope)
        .await?
        .into_iter()
        .find(|o| o.name == DEFAULT_ORGANIZATION)
        .ok_or_else(|| Error::not_found("default organization not found"))?;

    let users = client
        .add_user(
            &scope,
            &UserAdd {
                organization_id: org.id.clone(),
                name,
                email,
            },
        )
        .await?;
    let user = users
        .into_iter()
        .next()
        .ok_or_else(|| Error::unexpected_content("server created no user"))?;
    info!("created user {} in {}", user.name, org.name);

    let profile = client.export_profile(&scope, &org.id, &user.id).await?;
    tokio::fs::write(&profile.name, &profile.content)
        .await
        .map_err(|e| Error::unexpected(format!("failed to write {}", profile.name)).with_source(e))?;
    println!("wrote {}", profile.name);

    // Disabling keeps the user and its profile, it only refuses new connections.
    client
        .set_user_disabled(&scope, &org.id, &user.id, true)
        .await?;
    client
        .set_user_disabled(&scope, &org.id, &user.id, false)
        .await?;
    Ok(())
}
