//! src/email/mod.rs
mod resend;
pub use resend::{EmailBuilder, Resend};

mod welcome;
pub use welcome::WelcomeNotifier;
