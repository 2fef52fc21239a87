use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;

use crate::config::AppConfig;
use crate::models::AppStartTime;

#[derive(Debug, Serialize)]
struct HealthStatus<'a> {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    services: &'a [String],
    uptime_seconds: i64,
}

pub async fn health(req: HttpRequest) -> HttpResponse {
    let uptime_seconds = req
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| {
            chrono::Utc::now()
                .signed_duration_since(start.start_datetime)
                .num_seconds()
        })
        .unwrap_or_default();

    HttpResponse::Ok().json(HealthStatus {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        services: &AppConfig::get().app.services,
        uptime_seconds,
    })
}

pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
