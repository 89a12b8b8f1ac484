//! src/routes/health_check.rs
use actix_web::HttpResponse;

/// Liveness check. Not rate limited.
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}
