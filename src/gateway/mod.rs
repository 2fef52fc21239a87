//! Reverse proxy in front of the service processes.
//!
//! Each request is matched against the `gateway.routes` table and forwarded
//! to the owning upstream with hop-by-hop headers removed.

mod proxy;
mod table;

pub use proxy::forward;
pub use table::RouteTable;

use actix_web::{HttpResponse, web};
use serde::Serialize;
use std::time::Duration;

use crate::config::GatewayConfig;
use crate::errors::{Result, SpadaError};

pub struct GatewayState {
    pub table: RouteTable,
    pub client: reqwest::Client,
}

impl GatewayState {
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.upstream_timeout))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| SpadaError::upstream(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            table: RouteTable::new(&config.routes),
            client,
        })
    }
}

#[derive(Serialize)]
struct GatewayHealth {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    routes: usize,
}

async fn health(state: web::Data<GatewayState>) -> HttpResponse {
    HttpResponse::Ok().json(GatewayHealth {
        status: "ok",
        service: "gateway",
        version: env!("CARGO_PKG_VERSION"),
        routes: state.table.len(),
    })
}

/// `/health` plus a catch-all that forwards everything else.
pub fn configure_gateway(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .default_service(web::to(forward));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayRoute;
    use actix_web::{App, HttpRequest, HttpServer, http::StatusCode, test};
    use serde_json::{Value, json};

    async fn echo(req: HttpRequest, body: web::Bytes) -> HttpResponse {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        HttpResponse::Created()
            .insert_header(("x-upstream", "grading"))
            .json(json!({
                "method": req.method().as_str(),
                "path": req.path(),
                "query": req.query_string(),
                "body": String::from_utf8_lossy(&body),
                "forwarded_for": header("x-forwarded-for"),
                "custom": header("x-custom"),
                "proxy_auth": header("proxy-authorization"),
            }))
    }

    fn state(routes: Vec<(&str, String)>) -> web::Data<GatewayState> {
        let config = GatewayConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            upstream_timeout: 2_000,
            routes: routes
                .into_iter()
                .map(|(prefix, upstream)| GatewayRoute {
                    prefix: prefix.to_string(),
                    upstream,
                })
                .collect(),
        };
        web::Data::new(GatewayState::from_config(&config).unwrap())
    }

    #[actix_web::test]
    async fn test_health_and_unknown_prefix() {
        let app = test::init_service(
            App::new()
                .app_data(state(vec![("/api/v1/users", "http://127.0.0.1:9".to_string())]))
                .configure(configure_gateway),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["routes"], 1);

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/usersx").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["message"].is_string());
    }

    #[actix_web::test]
    async fn test_unreachable_upstream_is_bad_gateway() {
        // port 9 (discard) is not listening in the test environment
        let app = test::init_service(
            App::new()
                .app_data(state(vec![("/api/v1/users", "http://127.0.0.1:9".to_string())]))
                .configure(configure_gateway),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/users/1").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[actix_web::test]
    async fn test_forwards_request_and_response() {
        let upstream = HttpServer::new(|| App::new().default_service(web::to(echo)))
            .workers(1)
            .bind(("127.0.0.1", 0))
            .unwrap();
        let addr = upstream.addrs()[0];
        let server = upstream.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        let app = test::init_service(
            App::new()
                .app_data(state(vec![("/api/v1/submissions", format!("http://{addr}"))]))
                .configure(configure_gateway),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/submissions/4/grade?notify=1")
            .peer_addr("10.0.0.7:52100".parse().unwrap())
            .insert_header(("x-custom", "kept"))
            .insert_header(("proxy-authorization", "Basic c2VjcmV0"))
            .set_payload("{\"score\":90}")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(
            resp.headers().get("x-upstream").and_then(|v| v.to_str().ok()),
            Some("grading")
        );

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["method"], "POST");
        assert_eq!(body["path"], "/api/v1/submissions/4/grade");
        assert_eq!(body["query"], "notify=1");
        assert_eq!(body["body"], "{\"score\":90}");
        assert_eq!(body["forwarded_for"], "10.0.0.7");
        assert_eq!(body["custom"], "kept");
        assert_eq!(body["proxy_auth"], Value::Null);

        handle.stop(false).await;
    }
}
