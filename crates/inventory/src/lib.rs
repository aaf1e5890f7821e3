//! Candy inventory business rules.
//!
//! This crate contains the rules the service applies to stored data,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage):
//! input validation, stock classification, cheapest-offer selection and the
//! closed set of exportable tables.

pub mod catalog;
pub mod export;
pub mod pricing;
pub mod stock;

pub use catalog::{Distributor, EntityName, Item};
pub use export::ExportTable;
pub use pricing::{cheapest_offer, CheapestOffer, Cost, PriceCandidate, RestockQuote};
pub use stock::{InventoryView, StockLevels, StockStatus, LOW_STOCK_RATIO};
