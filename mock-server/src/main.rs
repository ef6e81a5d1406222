use std::env;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".to_string());
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let port = env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let seeded = env::var("MOCK_SEED").is_ok_and(|v| v == "1");
    let addr = format!("127.0.0.1:{port}");

    let listener = TcpListener::bind(&addr).await?;
    let todos = if seeded { mock_server::seed_todos() } else { Vec::new() };
    mock_server::serve(listener, mock_server::app_with(todos)).await?;
    Ok(())
}
