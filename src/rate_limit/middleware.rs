//! src/rate_limit/middleware.rs
use super::{Decision, RateLimiter};
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{RETRY_AFTER, X_FORWARDED_FOR};
use actix_web::{Error, HttpResponse};
use std::future::{ready, Future, Ready};
use std::net::IpAddr;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;

/// Rejects a client with `429 Too Many Requests` once it exceeds the
/// limiter's policy. Wrap a single resource with it.
#[derive(Clone)]
pub struct RateLimit {
    limiter: Arc<RateLimiter>,
    trust_proxy_headers: bool,
}

impl RateLimit {
    pub fn new(limiter: Arc<RateLimiter>, trust_proxy_headers: bool) -> Self {
        Self {
            limiter,
            trust_proxy_headers,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimitMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
            trust_proxy_headers: self.trust_proxy_headers,
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limiter: Arc<RateLimiter>,
    trust_proxy_headers: bool,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let client = client_key(&req, self.trust_proxy_headers);

        if let Decision::Rejected { retry_after } = self.limiter.check(&client) {
            tracing::warn!(%client, path = %req.path(), "Rate limit exceeded");
            let response = too_many_requests(retry_after.as_secs().max(1));
            return Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) });
        }

        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn client_key(req: &ServiceRequest, trust_proxy_headers: bool) -> String {
    if trust_proxy_headers {
        if let Some(ip) = proxied_ip(req) {
            return ip.to_string();
        }
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}

// Only the last `X-Forwarded-For` hop is written by our own proxy; every
// entry before it comes from the client.
fn proxied_ip(req: &ServiceRequest) -> Option<IpAddr> {
    let forwarded = req.headers().get(X_FORWARDED_FOR)?.to_str().ok()?;
    forwarded.rsplit(',').next()?.trim().parse().ok()
}

fn too_many_requests(retry_after_secs: u64) -> HttpResponse {
    HttpResponse::TooManyRequests()
        .insert_header((RETRY_AFTER, retry_after_secs.to_string()))
        .json(serde_json::json!({ "detail": "Too many requests" }))
}
