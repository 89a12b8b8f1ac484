//! tests/api/startup.rs

use funnel::configuration::{get_configuration, Credentials, StoreBackend};
use funnel::startup::build;
use secrecy::Secret;

fn credentials() -> Credentials {
    Credentials {
        resend_api_key: Secret::new("re_test".into()),
        supabase_url: Some("http://127.0.0.1:1".into()),
        supabase_service_role: Some(Secret::new("service-role".into())),
    }
}

#[tokio::test]
async fn startup_fails_without_store_credentials() {
    let mut config = get_configuration().expect("Failed to read configuration.");
    config.application.port = 0;

    let mut missing_url = credentials();
    missing_url.supabase_url = None;
    assert!(build(config.clone(), missing_url).is_err());

    let mut missing_role = credentials();
    missing_role.supabase_service_role = None;
    assert!(build(config, missing_role).is_err());
}

#[tokio::test]
async fn startup_fails_when_a_template_is_missing() {
    let mut config = get_configuration().expect("Failed to read configuration.");
    config.application.port = 0;
    config.templates.waitlist_message = "templates/does-not-exist.txt".into();

    assert!(build(config, credentials()).is_err());
}

#[tokio::test]
async fn postgres_backend_needs_database_settings() {
    let mut config = get_configuration().expect("Failed to read configuration.");
    config.application.port = 0;
    config.store.backend = StoreBackend::Postgres;
    config.database = None;

    assert!(build(config, credentials()).is_err());
}

#[tokio::test]
async fn postgres_backend_builds_without_a_live_database() {
    let mut config = get_configuration().expect("Failed to read configuration.");
    config.application.port = 0;
    config.store.backend = StoreBackend::Postgres;

    assert!(build(config, credentials()).is_ok());
}
