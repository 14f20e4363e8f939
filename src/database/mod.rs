pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

use std::sync::Arc;

use tracing::info;

use crate::config::{DatabaseConfig, StoreBackend};

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryContactStore;
pub use postgres::PgContactStore;
pub use store::ContactStore;

/// Build the configured contact store. Postgres stores are migrated on open.
pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn ContactStore>, DatabaseError> {
    match config.backend {
        StoreBackend::Memory => {
            info!("Using in-memory contact store");
            Ok(Arc::new(MemoryContactStore::new()))
        }
        StoreBackend::Postgres => {
            let pool = DatabaseManager::connect(config).await?;
            DatabaseManager::migrate(&pool).await?;
            Ok(Arc::new(PgContactStore::new(pool)))
        }
    }
}
