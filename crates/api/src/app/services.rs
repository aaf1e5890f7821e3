use std::{convert::Infallible, sync::Arc, time::Duration};

use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use candystock_infra::{
    CatalogRepository, CsvExporter, Database, DatabaseOptions, InventoryAnalytics, InventoryFeed,
    PricingResolver, RepositoryResult,
};
use tokio_stream::StreamExt;

use crate::config::AppConfig;

/// Everything a handler needs; shared behind an `Arc` as a request extension.
#[derive(Debug, Clone)]
pub struct AppServices {
    pub db: Database,
    pub catalog: CatalogRepository,
    pub analytics: InventoryAnalytics,
    pub pricing: PricingResolver,
    pub exporter: CsvExporter,
    pub feed: InventoryFeed,
}

impl AppServices {
    /// Wire every service onto one database handle.
    pub fn new(db: Database, feed_interval: Duration) -> Self {
        Self {
            catalog: CatalogRepository::new(db.clone()),
            analytics: InventoryAnalytics::new(db.clone()),
            pricing: PricingResolver::new(db.clone()),
            exporter: CsvExporter::new(db.clone()),
            feed: InventoryFeed::new(db.clone(), feed_interval),
            db,
        }
    }
}

/// Open the configured database and wire services on top of it.
pub async fn build_services(config: &AppConfig) -> RepositoryResult<AppServices> {
    let options = DatabaseOptions {
        max_connections: config.max_connections,
        ..DatabaseOptions::default()
    };
    let db = Database::open(&config.db_path, options).await?;
    Ok(AppServices::new(db, config.feed_interval))
}

/// Build the inventory SSE stream (used by `/stream/inventory`).
///
/// Frames are unnamed `data:` events; the feed task stops when the client disconnects.
pub fn inventory_sse_stream(
    services: Arc<AppServices>,
) -> Sse<impl tokio_stream::Stream<Item = Result<SseEvent, Infallible>>> {
    let stream = services
        .feed
        .subscribe()
        .map(|frame| Ok::<_, Infallible>(SseEvent::default().data(frame)));

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}
