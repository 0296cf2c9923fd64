// storage/mod.rs
// Persistence of schema reports, keyed by a caller-supplied site identifier

pub mod insert;
pub mod migrations;
pub mod pool;
mod store;

// Re-export commonly used items
pub use insert::{fetch_report, upsert_logo, upsert_report, StoredReport};
pub use migrations::run_migrations;
pub use pool::init_db_pool_with_path;
pub use store::SchemaStore;
