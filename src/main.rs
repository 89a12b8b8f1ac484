use funnel::configuration::{get_configuration, get_credentials};
use funnel::startup::build;
use funnel::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_subscriber("funnel".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = get_configuration()?;
    let credentials = get_credentials()?;
    let app = build(config, credentials)?;
    tracing::info!(port = app.port(), "Listening");
    app.run().await?;

    Ok(())
}
