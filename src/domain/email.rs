//! src/domain/email.rs
use serde::Serialize;
use validator::validate_email;

#[derive(thiserror::Error, Debug)]
pub enum EmailError {
    #[error("Empty email")]
    Empty,
    #[error("{0}")]
    Invalid(String),
}

/// A syntactically valid email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(s: String) -> Result<Self, EmailError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        if validate_email(s) && has_dotted_domain(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(EmailError::Invalid(format!("Invalid email: {}", s)))
        }
    }
}

// `validate_email` also accepts `user@localhost` and `user@[127.0.0.1]`,
// neither of which can take a welcome email.
fn has_dotted_domain(email: &str) -> bool {
    match email.rsplit_once('@') {
        Some((_, domain)) => {
            !domain.starts_with('[')
                && domain.contains('.')
                && domain.split('.').all(|label| !label.is_empty())
        }
        None => false,
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}
