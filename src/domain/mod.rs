//! src/domain/mod.rs
mod name;
pub use name::DisplayName;

mod email;
pub use email::{EmailAddress, EmailError};

/// A single waitlist signup. Lives only for the duration of one request.
#[derive(Debug, Clone)]
pub struct WaitlistEntry {
    pub name: Option<DisplayName>,
    pub email: EmailAddress,
}

impl WaitlistEntry {
    pub fn parse(name: Option<String>, email: String) -> Result<Self, EmailError> {
        Ok(Self {
            email: EmailAddress::parse(email)?,
            name: DisplayName::parse(name),
        })
    }
}
