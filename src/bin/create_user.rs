//! Provision a staff account.
//!
//! Accounts are never created through the HTTP API; run this once per staff
//! member against the same database as the server.

use anyhow::Context;
use clap::Parser;
use sqlx::postgres::PgPoolOptions;

use bookstore_server::{
    config::AppConfig,
    models::{NewUserCredential, StoreSpot},
    repository::{Repository, UserStore},
    services::auth::hash_password,
};

#[derive(Parser, Debug)]
#[command(name = "create-user", about = "Create a staff account for one store location")]
struct Args {
    /// Login name (unique, case-insensitive)
    #[arg(long)]
    login: String,

    /// Plain-text password, hashed with Argon2 before storage
    #[arg(long, env = "BOOKSTORE_NEW_USER_PASSWORD")]
    password: String,

    /// Store location the account belongs to (sch, sunmoon, nasaret, kongju, mokwon)
    #[arg(long)]
    store_spot: StoreSpot,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "create_user=info,bookstore_server=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = AppConfig::load().context("loading configuration")?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await
        .context("connecting to database")?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let repository = Repository::new(pool.clone());
    let password_hash = hash_password(&args.password)?;
    let user = repository
        .users
        .create(&NewUserCredential {
            login: args.login,
            password_hash,
            store_spot: args.store_spot,
        })
        .await?;

    tracing::info!(id = %user.id, login = %user.login, store_spot = %user.store_spot, "Account created");
    pool.close().await;
    Ok(())
}
