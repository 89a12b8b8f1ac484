//! src/store/mod.rs
use crate::configuration::{Credentials, Settings, StoreBackend};
use crate::waitlist::WaitlistStore;
use std::sync::Arc;

mod postgres;
pub use postgres::PostgresStore;

mod supabase;
pub use supabase::SupabaseStore;

#[derive(thiserror::Error, Debug)]
pub enum StoreSetupError {
    #[error("`{0}` must be set for the `{1}` store backend")]
    MissingCredential(&'static str, &'static str),
    #[error("`database` settings are required for the postgres store backend")]
    MissingDatabaseSettings,
    #[error("Failed to build the store client")]
    Client(#[from] reqwest::Error),
    #[error("Invalid database connection string")]
    Database(#[from] sqlx::Error),
}

/// Builds the configured waitlist store backend.
pub fn from_settings(
    settings: &Settings,
    credentials: &Credentials,
) -> Result<Arc<dyn WaitlistStore>, StoreSetupError> {
    match settings.store.backend {
        StoreBackend::Supabase => {
            let url = credentials
                .supabase_url
                .clone()
                .ok_or(StoreSetupError::MissingCredential("SUPABASE_URL", "supabase"))?;
            let service_role = credentials.supabase_service_role.clone().ok_or(
                StoreSetupError::MissingCredential("SUPABASE_SERVICE_ROLE", "supabase"),
            )?;
            let store = SupabaseStore::new(&settings.store, url, service_role)?;
            Ok(Arc::new(store))
        }
        StoreBackend::Postgres => {
            let database = settings
                .database
                .as_ref()
                .ok_or(StoreSetupError::MissingDatabaseSettings)?;
            let store = PostgresStore::connect_lazy(&settings.store, database)?;
            Ok(Arc::new(store))
        }
    }
}
