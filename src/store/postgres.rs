//! src/store/postgres.rs
use crate::configuration::{DatabaseSettings, StoreSettings};
use crate::domain::WaitlistEntry;
use crate::waitlist::{StoreError, WaitlistStore};
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Inserts rows over a direct Postgres connection.
#[derive(Debug)]
pub struct PostgresStore {
    pool: PgPool,
    insert_query: String,
}

impl PostgresStore {
    pub fn connect_lazy(
        settings: &StoreSettings,
        database: &DatabaseSettings,
    ) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .acquire_timeout(settings.timeout())
            .connect_lazy(database.connection_string().expose_secret())?;

        Ok(Self::with_pool(pool, &settings.table))
    }

    pub fn with_pool(pool: PgPool, table: &str) -> Self {
        Self {
            pool,
            insert_query: format!(r#"INSERT INTO "{}" (name, email) VALUES ($1, $2)"#, table),
        }
    }
}

#[async_trait::async_trait]
impl WaitlistStore for PostgresStore {
    #[tracing::instrument(name = "Saving waitlist entry in the database", skip(self, entry))]
    async fn insert(&self, entry: &WaitlistEntry) -> Result<(), StoreError> {
        sqlx::query(&self.insert_query)
            .bind(entry.name.as_ref().map(|name| name.as_ref()))
            .bind(entry.email.as_ref())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to execute query: {:#?}", e);
                e
            })?;

        Ok(())
    }
}
