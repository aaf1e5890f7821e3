//! Infrastructure layer: SQLite storage, query services, export and feed.

pub mod analytics;
pub mod db;
pub mod error;
pub mod export;
pub mod feed;
pub mod pricing;
pub mod repository;
pub mod table;

pub use analytics::InventoryAnalytics;
pub use db::{Database, DatabaseOptions};
pub use error::{RepositoryError, RepositoryResult};
pub use export::CsvExporter;
pub use feed::{FeedSubscription, InventoryFeed};
pub use pricing::PricingResolver;
pub use repository::{CatalogRepository, MutationStatus};
pub use table::{Cell, Record, ResultTable};
