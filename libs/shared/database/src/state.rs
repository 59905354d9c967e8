use std::sync::Arc;

use tracing::info;

use shared_config::{AppConfig, StoreBackend};

use crate::memory::InMemoryStore;
use crate::store::{ClinicStore, StoreError};
use crate::supabase::{SupabaseClient, SupabaseStore};

/// Shared state handed to every cell router.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn ClinicStore>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn ClinicStore>) -> Self {
        Self { config, store }
    }

    /// Builds the store selected by `config.store_backend`.
    pub fn from_config(config: AppConfig) -> Result<Self, StoreError> {
        let store: Arc<dyn ClinicStore> = match config.store_backend {
            StoreBackend::Memory => {
                info!("Using in-memory clinic store");
                Arc::new(InMemoryStore::new())
            }
            StoreBackend::Supabase => {
                if config.supabase_url.is_empty() {
                    return Err(StoreError::Backend(
                        "SUPABASE_URL is required for the supabase store backend".to_string(),
                    ));
                }
                info!(
                    "Using Supabase clinic store at {}",
                    SupabaseClient::new(&config).get_base_url()
                );
                Arc::new(SupabaseStore::new(&config))
            }
        };

        Ok(Self::new(config, store))
    }

    pub fn in_memory() -> Self {
        Self::new(AppConfig::in_memory(), Arc::new(InMemoryStore::new()))
    }
}
