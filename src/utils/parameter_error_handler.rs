use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, PathError, QueryPayloadError},
};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

fn bad_request(message: String) -> actix_web::Error {
    InternalError::from_response(
        message.clone(),
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Rejected JSON body for {}: {}", req.path(), err);
    match err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            let message = "Request body is too large".to_string();
            InternalError::from_response(
                message.clone(),
                HttpResponse::PayloadTooLarge()
                    .json(ApiResponse::error_empty(ErrorCode::PayloadTooLarge, message)),
            )
            .into()
        }
        JsonPayloadError::ContentType => {
            bad_request("Content-Type must be application/json".to_string())
        }
        other => bad_request(format!("Invalid JSON body: {other}")),
    }
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Rejected query string for {}: {}", req.path(), err);
    bad_request(format!("Invalid query parameters: {err}"))
}

pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    debug!("Rejected path for {}: {}", req.path(), err);
    bad_request(format!("Invalid path parameters: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test, web};
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Body {
        #[allow(dead_code)]
        name: String,
    }

    #[derive(Deserialize)]
    struct Params {
        #[allow(dead_code)]
        page: i64,
    }

    #[actix_web::test]
    async fn test_malformed_json_is_400_with_message() {
        let app = test::init_service(
            App::new()
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .route(
                    "/",
                    web::post().to(|_: web::Json<Body>| async { HttpResponse::Ok().finish() }),
                ),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::BadRequest as i32);
        assert!(body["message"].as_str().unwrap().starts_with("Invalid JSON body"));
    }

    #[actix_web::test]
    async fn test_bad_query_is_400() {
        let app = test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .route(
                    "/",
                    web::get().to(|_: web::Query<Params>| async { HttpResponse::Ok().finish() }),
                ),
        )
        .await;

        let req = test::TestRequest::get().uri("/?page=abc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
