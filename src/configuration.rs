//! src/configuration.rs
use crate::rate_limit::RateLimitPolicy;
use config::{Config, File};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum ConfigurationError {
    #[error("Failed to determine the current directory")]
    CurrentDir(#[source] std::io::Error),
    #[error("{0}")]
    Environment(String),
    #[error("Failed to load settings")]
    Settings(#[from] config::ConfigError),
    #[error("Missing or malformed credentials in the environment: {0}")]
    Credentials(#[from] envy::Error),
}

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub rate_limit: RateLimitSettings,
    pub email: EmailSettings,
    pub store: StoreSettings,
    pub database: Option<DatabaseSettings>,
    pub templates: TemplateSettings,
}

impl Settings {
    pub fn set_email_url(&mut self, email_url: String) {
        self.email.api_url = email_url;
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub port: u16,
    pub host: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct RateLimitSettings {
    pub page: RateLimitPolicy,
    pub waitlist: RateLimitPolicy,
    /// Key clients by the last `X-Forwarded-For` hop instead of the peer address.
    #[serde(default)]
    pub trust_proxy_headers: bool,
    pub cleanup_interval_seconds: u64,
}

impl RateLimitSettings {
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_seconds.max(1))
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct EmailSettings {
    pub api_url: String,
    pub sender: String,
    pub subject: String,
    pub timeout_milliseconds: u64,
}

impl EmailSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Supabase,
    Postgres,
}

#[derive(Deserialize, Clone, Debug)]
pub struct StoreSettings {
    pub backend: StoreBackend,
    pub table: String,
    pub timeout_milliseconds: u64,
}

impl StoreSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: Secret<String>,
    pub port: u16,
    pub host: String,
    pub database_name: String,
}

impl DatabaseSettings {
    pub fn connection_string(&self) -> Secret<String> {
        Secret::new(format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username,
            self.password.expose_secret(),
            self.host,
            self.port,
            self.database_name
        ))
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct TemplateSettings {
    pub index: PathBuf,
    pub waitlist_message: PathBuf,
    pub static_dir: PathBuf,
}

/// Secrets for the external services, read from the process environment.
#[derive(Deserialize, Clone, Debug)]
pub struct Credentials {
    pub resend_api_key: Secret<String>,
    pub supabase_url: Option<String>,
    pub supabase_service_role: Option<Secret<String>>,
}

#[derive(Debug, PartialEq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_ref() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            _ => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                s
            )),
        }
    }
}

fn current_environment() -> Result<Environment, ConfigurationError> {
    // Default to `local` if not specified.
    std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigurationError::Environment)
}

pub fn get_configuration() -> Result<Settings, ConfigurationError> {
    let base_path = std::env::current_dir().map_err(ConfigurationError::CurrentDir)?;
    let configuration_directory = base_path.join("configuration");
    let environment = current_environment()?;

    let settings = Config::builder()
        .add_source(File::from(configuration_directory.join("base")).required(true))
        .add_source(File::from(configuration_directory.join(environment.as_str())).required(true))
        // E.g. `APP_APPLICATION__PORT=5001` sets `Settings.application.port`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Reads the API credentials. A `.env` file is honoured when running locally.
pub fn get_credentials() -> Result<Credentials, ConfigurationError> {
    if current_environment()? == Environment::Local {
        dotenvy::dotenv().ok();
    }

    credentials_from(std::env::vars())
}

/// Reads the API credentials from `vars`, keyed by upper-case variable name.
pub fn credentials_from<I>(vars: I) -> Result<Credentials, ConfigurationError>
where
    I: IntoIterator<Item = (String, String)>,
{
    Ok(envy::from_iter::<_, Credentials>(vars)?)
}
