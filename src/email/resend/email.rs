//! src/email/resend/email.rs
use crate::domain::EmailAddress;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Email<'a> {
    from: &'a str,
    pub to: Vec<&'a str>,
    pub subject: &'a str,
    pub text: &'a str,
}

pub struct EmailBuilder<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    text: &'a str,
}

impl<'a> EmailBuilder<'a> {
    pub fn new(from: &'a str) -> Self {
        Self {
            from,
            to: vec![],
            subject: "",
            text: "",
        }
    }

    pub fn to(mut self, recipient: &'a EmailAddress) -> Self {
        self.to.push(recipient.as_ref());
        self
    }

    pub fn subject(mut self, subject: &'a str) -> Self {
        self.subject = subject;
        self
    }

    pub fn text(mut self, text: &'a str) -> Self {
        self.text = text;
        self
    }

    pub fn build(self) -> Email<'a> {
        Email {
            from: self.from,
            to: self.to,
            subject: self.subject,
            text: self.text,
        }
    }
}

#[derive(Debug)]
pub struct EmailClient {
    pub http_client: Client,
    pub url: String,
    pub api_key: Secret<String>,
}

impl EmailClient {
    pub async fn send_email<T>(&self, email: &T) -> Result<reqwest::Response, reqwest::Error>
    where
        T: Serialize,
    {
        let res = self
            .http_client
            .post(&self.url)
            .bearer_auth(self.api_key.expose_secret())
            .header("accept", "application/json")
            .json(&email)
            .send()
            .await?
            .error_for_status()?;

        Ok(res)
    }
}
