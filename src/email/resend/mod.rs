//! src/email/resend/mod.rs
use crate::configuration::EmailSettings;
use reqwest::Client;
use secrecy::Secret;
use serde::Serialize;

mod email;
pub use email::EmailBuilder;
use email::EmailClient;

/// Client for the Resend transactional email API.
#[derive(Debug)]
pub struct Resend {
    sender: String,
    email_client: EmailClient,
}

impl Resend {
    pub fn from_settings(
        settings: &EmailSettings,
        api_key: Secret<String>,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(settings.timeout()).build()?;

        let email_client = EmailClient {
            http_client,
            url: settings.api_url.clone(),
            api_key,
        };

        Ok(Self::new(settings.sender.clone(), email_client))
    }

    fn new(sender: String, email_client: EmailClient) -> Self {
        Self {
            sender,
            email_client,
        }
    }

    pub fn email_builder(&self) -> EmailBuilder<'_> {
        EmailBuilder::new(&self.sender)
    }

    pub async fn send_email<T>(&self, email: &T) -> Result<(), reqwest::Error>
    where
        T: Serialize,
    {
        self.email_client.send_email(email).await?;
        Ok(())
    }
}
