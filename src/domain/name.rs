//! src/domain/name.rs
use serde::Serialize;

/// Free-form display name. Carries no format constraints; a blank value is
/// the same as no value at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn parse(s: Option<String>) -> Option<Self> {
        s.filter(|s| !s.trim().is_empty()).map(Self)
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
