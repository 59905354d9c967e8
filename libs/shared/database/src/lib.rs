pub mod memory;
pub mod state;
pub mod store;
pub mod supabase;

pub use memory::InMemoryStore;
pub use state::AppState;
pub use store::{ClinicStore, StoreError, StoreResult};
pub use supabase::{SupabaseClient, SupabaseStore};

#[cfg(feature = "mocks")]
pub use store::MockClinicStore;
