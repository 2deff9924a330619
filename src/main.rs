use std::sync::Arc;

use moviegraph::{AppState, config::Config, create_app, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,moviegraph=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let http = reqwest::Client::builder()
        .user_agent("moviegraph/0.1")
        .timeout(config.http_timeout)
        .build()?;

    let db = db::connect_and_migrate(&config.database_url).await?;
    let state = Arc::new(AppState::new(config.clone(), db, http));

    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(
        addr = %config.addr,
        graphql = config.graphql_url.as_deref().unwrap_or("in-process"),
        "listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
