//! src/routes/home.rs
use actix_web::{http::header::ContentType, web, HttpResponse};

/// The landing page markup, read once at startup.
#[derive(Debug, Clone)]
pub struct LandingPage(pub String);

pub async fn home(page: web::Data<LandingPage>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(page.0.clone())
}
