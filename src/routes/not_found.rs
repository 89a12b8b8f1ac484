//! src/routes/not_found.rs
use actix_web::http::header::LOCATION;
use actix_web::HttpResponse;

/// Any path without a route is sent back to the landing page.
pub async fn redirect_home() -> HttpResponse {
    HttpResponse::TemporaryRedirect()
        .insert_header((LOCATION, "/"))
        .finish()
}
