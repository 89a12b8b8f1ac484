//! src/routes/waitlist.rs
use crate::routes::error_chain_fmt;
use crate::waitlist::{ValidationError, Waitlist};
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use uuid::Uuid;

#[derive(serde::Deserialize)]
pub struct WaitlistForm {
    pub email: String,
    pub name: Option<String>,
}

#[derive(thiserror::Error)]
pub enum WaitlistError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl std::fmt::Debug for WaitlistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for WaitlistError {
    fn status_code(&self) -> StatusCode {
        match self {
            WaitlistError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        unprocessable(self.to_string())
    }
}

fn unprocessable(detail: String) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(serde_json::json!({ "detail": detail }))
}

/// Malformed or incomplete form bodies get the same 422 shape as an invalid
/// email.
pub fn form_error_handler(
    err: actix_web::error::UrlencodedError,
    _req: &HttpRequest,
) -> actix_web::Error {
    let response = unprocessable(err.to_string());
    InternalError::from_response(err, response).into()
}

/// Both an added entry and a failed one answer `200 OK`; the outcome is in
/// the `status` field of the body.
#[tracing::instrument(
    name = "Adding a new waitlist entry",
    skip(form, waitlist),
    fields(
        request_id = %Uuid::new_v4(),
        entry_email = %form.email,
    )
)]
pub async fn join_waitlist(
    form: web::Form<WaitlistForm>,
    waitlist: web::Data<Waitlist>,
) -> Result<HttpResponse, WaitlistError> {
    let WaitlistForm { email, name } = form.into_inner();
    let report = waitlist.submit(name, email).await?;

    Ok(HttpResponse::Ok().json(report))
}
