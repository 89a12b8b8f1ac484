//! src/email/welcome.rs
use super::Resend;
use crate::domain::EmailAddress;
use crate::waitlist::{Notifier, NotifyError};

/// Sends the same welcome email, read once at startup, to every new signup.
#[derive(Debug)]
pub struct WelcomeNotifier {
    resend: Resend,
    subject: String,
    body: String,
}

impl WelcomeNotifier {
    pub fn new(resend: Resend, subject: String, body: String) -> Self {
        Self {
            resend,
            subject,
            body,
        }
    }
}

#[async_trait::async_trait]
impl Notifier for WelcomeNotifier {
    #[tracing::instrument(name = "Sending the welcome email", skip(self))]
    async fn notify(&self, recipient: &EmailAddress) -> Result<(), NotifyError> {
        let email = self
            .resend
            .email_builder()
            .to(recipient)
            .subject(&self.subject)
            .text(&self.body)
            .build();

        self.resend.send_email(&email).await?;
        Ok(())
    }
}
