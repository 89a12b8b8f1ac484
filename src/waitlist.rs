//! src/waitlist.rs
//!
//! The signup workflow: validate, persist, notify, report.
use crate::domain::{EmailAddress, EmailError, WaitlistEntry};
use crate::routes::error_chain_fmt;
use serde::Serialize;
use std::sync::Arc;
use tracing::Instrument;

pub const ADDED_MESSAGE: &str = "You have been added to the waitlist.";
pub const FAILURE_MESSAGE: &str = "There was an error, please try again later.";

/// Write side of the external waitlist table.
#[async_trait::async_trait]
pub trait WaitlistStore: Send + Sync {
    async fn insert(&self, entry: &WaitlistEntry) -> Result<(), StoreError>;
}

/// Sends the fixed welcome message to a new signup.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, recipient: &EmailAddress) -> Result<(), NotifyError>;
}

#[derive(thiserror::Error)]
pub enum StoreError {
    #[error("Failed to reach the waitlist store")]
    Request(#[from] reqwest::Error),
    #[error("Failed to insert into the waitlist table")]
    Database(#[from] sqlx::Error),
}

impl std::fmt::Debug for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(thiserror::Error)]
#[error("Failed to send the welcome email")]
pub struct NotifyError(#[from] pub reqwest::Error);

impl std::fmt::Debug for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Why a validated submission did not complete. Never shown to the caller.
#[derive(thiserror::Error)]
pub enum SubmitError {
    #[error("Failed to persist the waitlist entry")]
    Store(#[source] StoreError),
    #[error("The entry was persisted but the welcome email was not sent")]
    Notify(#[source] NotifyError),
    #[error("The submission task panicked")]
    Panicked(#[source] tokio::task::JoinError),
}

impl std::fmt::Debug for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(thiserror::Error, Debug)]
#[error("{0}")]
pub struct ValidationError(#[from] pub EmailError);

/// The JSON body returned for every validated submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReport {
    pub message: String,
    pub status: bool,
}

impl SubmissionReport {
    pub fn added() -> Self {
        Self {
            message: ADDED_MESSAGE.into(),
            status: true,
        }
    }

    pub fn failed() -> Self {
        Self {
            message: FAILURE_MESSAGE.into(),
            status: false,
        }
    }
}

#[derive(Clone)]
pub struct Waitlist {
    store: Arc<dyn WaitlistStore>,
    notifier: Arc<dyn Notifier>,
}

impl Waitlist {
    pub fn new(store: Arc<dyn WaitlistStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Validates the input and, if it is well formed, stores the entry and
    /// sends the welcome email.
    ///
    /// Only a malformed email is an `Err`. Every failure after validation,
    /// including a panic inside a collaborator, is reported as
    /// [`SubmissionReport::failed`]. A failed email still reports failure
    /// even though the entry has already been stored.
    #[tracing::instrument(name = "Submitting a waitlist entry", skip(self, name, email))]
    pub async fn submit(
        &self,
        name: Option<String>,
        email: String,
    ) -> Result<SubmissionReport, ValidationError> {
        let entry = WaitlistEntry::parse(name, email)?;

        let this = self.clone();
        let outcome = tokio::spawn(
            async move { this.add(&entry).await }.instrument(tracing::Span::current()),
        )
        .await
        .map_err(SubmitError::Panicked)
        .and_then(|result| result);

        match outcome {
            Ok(()) => Ok(SubmissionReport::added()),
            Err(e) => {
                tracing::error!(error = ?e, "Waitlist submission failed");
                Ok(SubmissionReport::failed())
            }
        }
    }

    async fn add(&self, entry: &WaitlistEntry) -> Result<(), SubmitError> {
        self.store.insert(entry).await.map_err(SubmitError::Store)?;
        self.notifier
            .notify(&entry.email)
            .await
            .map_err(SubmitError::Notify)?;
        Ok(())
    }
}
