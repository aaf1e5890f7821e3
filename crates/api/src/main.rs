use anyhow::Context;

use candystock_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    candystock_observability::init();

    let config = AppConfig::from_env();
    tracing::info!(
        db_path = %config.db_path.display(),
        feed_interval_secs = config.feed_interval.as_secs(),
        max_connections = config.max_connections,
        "starting candystock"
    );

    let app = candystock_api::app::build_app(&config)
        .await
        .with_context(|| format!("failed to open database at {}", config.db_path.display()))?;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
