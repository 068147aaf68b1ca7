//! Order service binary: reads config, opens the database, ensures the orders table and serves the API.

use order_service::{app, connect, ensure_orders_table, AppState, ServiceConfig, SqliteOrderStore};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("order_service=info")),
        )
        .init();

    let config = ServiceConfig::from_env()?;
    let pool = connect(&config.database_url, config.max_connections).await?;
    ensure_orders_table(&pool).await?;
    let state = AppState::new(SqliteOrderStore::new(pool));

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
