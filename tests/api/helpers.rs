//! tests/api/helpers.rs

use funnel::configuration::{get_configuration, Credentials, Settings};
use funnel::startup::build;
use funnel::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use secrecy::Secret;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    // Set TEST_LOG=true to see logs during tests
    // Use bunyan to format the logs nicely:
    // $ TEST_LOG=true cargo test | bunyan
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    };
});

pub struct Test {
    pub address: String,
    pub email_server: MockServer,
    pub store_server: MockServer,
    api_client: reqwest::Client,
}

impl Test {
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(&format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_waitlist(&self, body: String) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/api/waitlist", self.address))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Makes the store accept the next `times` inserts.
    pub async fn store_accepts(&self, times: u64) {
        Mock::given(path("/rest/v1/users"))
            .and(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .named("Store insert")
            .expect(times)
            .mount(&self.store_server)
            .await;
    }

    pub async fn email_accepts(&self, times: u64) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .named("Send welcome email")
            .expect(times)
            .mount(&self.email_server)
            .await;
    }

    pub async fn received_email(&self) -> Email {
        let email_request = self.email_server.received_requests().await.unwrap();
        let email_request = if email_request.len() == 1 {
            &email_request[0]
        } else {
            panic!(
                "Expected 1 email to be sent but instead {} were sent.",
                email_request.len()
            );
        };

        serde_json::from_slice(&email_request.body).expect("Failed to parse email")
    }

    pub async fn stored_rows(&self) -> Vec<serde_json::Value> {
        self.store_server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|request| serde_json::from_slice(&request.body).expect("Failed to parse row"))
            .collect()
    }
}

pub async fn setup() -> Test {
    setup_with(|_| {}).await
}

/// Spawns the application on a random port with both external APIs mocked.
pub async fn setup_with(customise: impl FnOnce(&mut Settings)) -> Test {
    Lazy::force(&TRACING);

    let mut config = get_configuration().expect("Failed to read configuration.");
    config.application.port = 0;
    config.application.host = "127.0.0.1".into();
    customise(&mut config);

    let email_server = MockServer::start().await;
    config.set_email_url(email_server.uri());

    let store_server = MockServer::start().await;
    let credentials = Credentials {
        resend_api_key: Secret::new("re_test".into()),
        supabase_url: Some(store_server.uri()),
        supabase_service_role: Some(Secret::new("service-role".into())),
    };

    // Launch the server
    let app = build(config.clone(), credentials).expect("Failed to build server.");
    let address = format!("http://127.0.0.1:{}", app.port());
    config.application.port = app.port();

    tracing::info!("Test running with the following Settings:\n{:#?}", config);

    // Launch the server as a background task
    let _ = tokio::spawn(app.run());

    let api_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    Test {
        address,
        email_server,
        store_server,
        api_client,
    }
}

pub fn assert_is_redirect_to(response: &reqwest::Response, location: &str) {
    assert_eq!(response.status().as_u16(), 307);
    assert_eq!(response.headers().get("Location").unwrap(), location);
}

pub async fn assert_too_many_requests(response: reqwest::Response) {
    assert_eq!(429, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("Body is not JSON");
    assert_eq!(body, serde_json::json!({ "detail": "Too many requests" }));
}

#[derive(serde::Deserialize)]
pub struct Email {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
}
