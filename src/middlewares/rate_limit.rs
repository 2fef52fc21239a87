/*!
 * Fixed-window request limiter keyed by client IP.
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .wrap(RateLimit::login())
 *     .route(web::post().to(login))
 * ```
 *
 * Requests beyond the limit get 429 with `Retry-After` set to the seconds left
 * in the current window.
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ConnectionInfo, ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode};

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    started: Instant,
}

/// `prefix:ip` -> current window. Entries outlive any configured window.
static RATE_LIMIT_CACHE: Lazy<Cache<String, Window>> = Lazy::new(|| {
    Cache::builder()
        .time_to_idle(Duration::from_secs(3600))
        .max_capacity(100_000)
        .build()
});

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window: Duration,
    key_prefix: String,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs.max(1)),
            key_prefix: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.key_prefix = prefix.to_string();
        self
    }

    /// Login attempts, per `rate_limit.login_*` (5 per minute by default).
    pub fn login() -> Self {
        let config = &AppConfig::get().rate_limit;
        Self::new(config.login_max_requests, config.login_window_secs).with_prefix("login")
    }
}

/// Peer address from the connection info, without a port.
pub(crate) fn remote_ip(info: &ConnectionInfo) -> Option<String> {
    info.realip_remote_addr().and_then(|addr| {
        // realip may carry a port
        addr.parse::<std::net::SocketAddr>()
            .map(|s| s.ip().to_string())
            .ok()
            .or_else(|| addr.parse::<std::net::IpAddr>().map(|ip| ip.to_string()).ok())
    })
}

fn client_ip(req: &ServiceRequest) -> String {
    remote_ip(&req.connection_info()).unwrap_or_else(|| "unknown".to_string())
}

fn create_rate_limit_response(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let RateLimit {
            max_requests,
            window,
            key_prefix,
        } = self.limit.clone();

        Box::pin(async move {
            let cache_key = format!("{}:{}", key_prefix, client_ip(&req));
            let now = Instant::now();

            let current = RATE_LIMIT_CACHE
                .entry(cache_key.clone())
                .and_upsert_with(|existing| {
                    let next = match existing.map(|e| e.into_value()) {
                        Some(w) if now.duration_since(w.started) < window => Window {
                            count: w.count.saturating_add(1),
                            started: w.started,
                        },
                        _ => Window {
                            count: 1,
                            started: now,
                        },
                    };
                    ready(next)
                })
                .await
                .into_value();

            if current.count > max_requests {
                let retry_after = window
                    .saturating_sub(now.duration_since(current.started))
                    .as_secs()
                    .max(1);
                warn!(
                    "Rate limit exceeded for {} ({}/{})",
                    cache_key, current.count, max_requests
                );
                return Ok(req.into_response(
                    create_rate_limit_response(retry_after).map_into_right_body(),
                ));
            }

            Ok(srv.call(req).await?.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, web};
    use actix_web::test as actix_test;

    #[test]
    fn test_login_preset_follows_config() {
        let login = RateLimit::login();
        assert_eq!(login.max_requests, AppConfig::get().rate_limit.login_max_requests);
        assert_eq!(login.key_prefix, "login");
    }

    #[actix_web::test]
    async fn test_requests_over_limit_are_rejected() {
        let app = actix_test::init_service(
            App::new().service(
                web::resource("/limited")
                    .wrap(RateLimit::new(2, 60).with_prefix("test-limited"))
                    .route(web::post().to(HttpResponse::Ok)),
            ),
        )
        .await;

        let call = || {
            actix_test::TestRequest::post()
                .uri("/limited")
                .peer_addr("10.1.2.3:4000".parse().unwrap())
                .to_request()
        };

        assert_eq!(actix_test::call_service(&app, call()).await.status(), StatusCode::OK);
        assert_eq!(actix_test::call_service(&app, call()).await.status(), StatusCode::OK);

        let resp = actix_test::call_service(&app, call()).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(resp.headers().contains_key("Retry-After"));

        // another client has its own window
        let req = actix_test::TestRequest::post()
            .uri("/limited")
            .peer_addr("10.9.9.9:4000".parse().unwrap())
            .to_request();
        assert_eq!(actix_test::call_service(&app, req).await.status(), StatusCode::OK);
    }
}
