//! src/startup.rs
use crate::configuration::{Credentials, Settings};
use crate::email::{Resend, WelcomeNotifier};
use crate::rate_limit::{RateLimit, RateLimiter};
use crate::routes::{
    form_error_handler, health_check, home, join_waitlist, redirect_home, LandingPage,
};
use crate::store;
use crate::waitlist::Waitlist;
use actix_files::Files;
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run(self) -> std::io::Result<()> {
        self.server.await
    }
}

/// Per-route request limits, shared by every worker.
#[derive(Clone)]
pub struct Limits {
    pub page: Arc<RateLimiter>,
    pub waitlist: Arc<RateLimiter>,
    pub trust_proxy_headers: bool,
}

pub fn build(config: Settings, credentials: Credentials) -> Result<Application, anyhow::Error> {
    let address = format!("{}:{}", config.application.host, config.application.port);
    let tcp_listener =
        TcpListener::bind(&address).with_context(|| format!("Failed to bind {}", address))?;
    let port = tcp_listener.local_addr()?.port();

    let landing_page = LandingPage(read_template(&config.templates.index)?);
    let waitlist_message = read_template(&config.templates.waitlist_message)?;

    let store = store::from_settings(&config, &credentials)?;
    let resend = Resend::from_settings(&config.email, credentials.resend_api_key)
        .context("Failed to build the email client")?;
    let notifier = WelcomeNotifier::new(resend, config.email.subject.clone(), waitlist_message);
    let waitlist = Waitlist::new(store, Arc::new(notifier));

    let limits = Limits {
        page: Arc::new(RateLimiter::new(config.rate_limit.page)),
        waitlist: Arc::new(RateLimiter::new(config.rate_limit.waitlist)),
        trust_proxy_headers: config.rate_limit.trust_proxy_headers,
    };
    spawn_limiter_cleanup(&limits, config.rate_limit.cleanup_interval());

    let server = run(
        tcp_listener,
        landing_page,
        waitlist,
        limits,
        config.templates.static_dir,
    )?;

    Ok(Application { port, server })
}

pub fn run(
    listener: TcpListener,
    landing_page: LandingPage,
    waitlist: Waitlist,
    limits: Limits,
    static_dir: PathBuf,
) -> Result<Server, std::io::Error> {
    let landing_page = web::Data::new(landing_page);
    let waitlist = web::Data::new(waitlist);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .service(
                web::resource("/")
                    .wrap(RateLimit::new(
                        limits.page.clone(),
                        limits.trust_proxy_headers,
                    ))
                    .route(web::get().to(home)),
            )
            .service(
                web::resource("/api/waitlist")
                    .app_data(web::FormConfig::default().error_handler(form_error_handler))
                    // Only submissions count; a 405 on other methods costs nothing.
                    .route(web::post().to(join_waitlist).wrap(RateLimit::new(
                        limits.waitlist.clone(),
                        limits.trust_proxy_headers,
                    ))),
            )
            .service(Files::new("/static", &static_dir))
            .default_service(web::to(redirect_home))
            .app_data(landing_page.clone())
            .app_data(waitlist.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

fn read_template(path: &Path) -> Result<String, anyhow::Error> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read template {}", path.display()))
}

fn spawn_limiter_cleanup(limits: &Limits, every: Duration) {
    let limits = limits.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            limits.page.purge_expired();
            limits.waitlist.purge_expired();
        }
    });
}
