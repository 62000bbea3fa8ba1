//! HTTP entry point: axum server exposing the RPC procedure surface under
//! `/rpc/<group>.<procedure>`.

mod auth;
mod error;
mod routes;
mod state;

use std::env;

use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

pub use state::AppState;

#[tokio::main]
async fn start() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .init();

    let db_url = env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL is not set in .env file"))?;
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
    let port = env::var("PORT").unwrap_or_else(|_| "8000".to_owned());

    let conn = Database::connect(&db_url).await?;
    Migrator::up(&conn, None).await?;

    let state = AppState { conn };
    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}")).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn main() {
    if let Err(err) = start() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
