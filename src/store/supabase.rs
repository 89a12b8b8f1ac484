//! src/store/supabase.rs
use crate::configuration::StoreSettings;
use crate::domain::WaitlistEntry;
use crate::waitlist::{StoreError, WaitlistStore};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

/// Inserts rows through the hosted database's REST interface.
#[derive(Debug)]
pub struct SupabaseStore {
    http_client: Client,
    table_url: String,
    service_role: Secret<String>,
}

#[derive(Serialize)]
struct NewRow<'a> {
    name: Option<&'a str>,
    email: &'a str,
}

impl SupabaseStore {
    pub fn new(
        settings: &StoreSettings,
        base_url: String,
        service_role: Secret<String>,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(settings.timeout()).build()?;
        let table_url = format!(
            "{}/rest/v1/{}",
            base_url.trim_end_matches('/'),
            settings.table
        );

        Ok(Self {
            http_client,
            table_url,
            service_role,
        })
    }
}

#[async_trait::async_trait]
impl WaitlistStore for SupabaseStore {
    #[tracing::instrument(
        name = "Saving waitlist entry through the REST API",
        skip(self, entry),
        fields(table_url = %self.table_url)
    )]
    async fn insert(&self, entry: &WaitlistEntry) -> Result<(), StoreError> {
        let row = NewRow {
            name: entry.name.as_ref().map(|name| name.as_ref()),
            email: entry.email.as_ref(),
        };

        self.http_client
            .post(&self.table_url)
            .header("apikey", self.service_role.expose_secret())
            .bearer_auth(self.service_role.expose_secret())
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| {
                tracing::error!("Waitlist insert was rejected: {:?}", e);
                e
            })?;

        Ok(())
    }
}
