use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{debug, warn};

use super::GatewayState;
use crate::middlewares::create_error_response;
use crate::models::ErrorCode;

/// Headers that describe a single connection and are never forwarded.
const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

pub(crate) fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP.iter().any(|h| name.eq_ignore_ascii_case(h))
}

fn forwarded_for(req: &HttpRequest) -> Option<String> {
    let client = req.peer_addr().map(|addr| addr.ip().to_string());
    let previous = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    match (previous, client) {
        (Some(previous), Some(client)) => Some(format!("{previous}, {client}")),
        (previous, client) => previous.or(client),
    }
}

pub async fn forward(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<GatewayState>,
) -> HttpResponse {
    let Some(route) = state.table.resolve(req.path()) else {
        debug!("No upstream for {}", req.path());
        return create_error_response(
            StatusCode::NOT_FOUND,
            ErrorCode::NotFound,
            "No service handles this path",
        );
    };

    let path_and_query = match req.uri().query() {
        Some(query) => format!("{}?{}", req.path(), query),
        None => req.path().to_string(),
    };
    let url = format!("{}{}", route.upstream, path_and_query);

    let Ok(method) = reqwest::Method::from_bytes(req.method().as_str().as_bytes()) else {
        return create_error_response(
            StatusCode::METHOD_NOT_ALLOWED,
            ErrorCode::BadRequest,
            "Unsupported method",
        );
    };

    let mut upstream_req = state.client.request(method, &url);
    for (name, value) in req.headers() {
        let name = name.as_str();
        if is_hop_by_hop(name)
            || name.eq_ignore_ascii_case("host")
            || name.eq_ignore_ascii_case("content-length")
            || name.eq_ignore_ascii_case("x-forwarded-for")
        {
            continue;
        }
        upstream_req = upstream_req.header(name, value.as_bytes());
    }
    if let Some(xff) = forwarded_for(&req) {
        upstream_req = upstream_req.header("x-forwarded-for", xff);
    }

    let upstream_resp = match upstream_req.body(body).send().await {
        Ok(resp) => resp,
        Err(e) => {
            warn!("Upstream {} unreachable: {}", route.upstream, e);
            return create_error_response(
                StatusCode::BAD_GATEWAY,
                ErrorCode::BadGateway,
                "Upstream service unavailable",
            );
        }
    };

    let status =
        StatusCode::from_u16(upstream_resp.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let mut response = HttpResponse::build(status);
    for (name, value) in upstream_resp.headers() {
        if is_hop_by_hop(name.as_str()) || name.as_str().eq_ignore_ascii_case("content-length") {
            continue;
        }
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_str().as_bytes()),
            HeaderValue::from_bytes(value.as_bytes()),
        ) {
            response.append_header((name, value));
        }
    }

    match upstream_resp.bytes().await {
        Ok(bytes) => response.body(bytes),
        Err(e) => {
            warn!("Failed to read upstream body from {}: {}", route.upstream, e);
            create_error_response(
                StatusCode::BAD_GATEWAY,
                ErrorCode::BadGateway,
                "Upstream response was interrupted",
            )
        }
    }
}
