//! Path parameter extractors that answer 400 with the standard error body
//! instead of actix's plain-text 404 when a segment is malformed.

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn bad_path(message: String) -> actix_web::Error {
    InternalError::from_response(
        message.clone(),
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}

fn positive_i64(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    let raw = req
        .match_info()
        .get(name)
        .ok_or_else(|| bad_path(format!("Missing path parameter '{name}'")))?;
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(bad_path(format!("Invalid {name}: '{raw}'"))),
    }
}

macro_rules! define_safe_id {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(positive_i64(req, $param).map($name))
                }
            }
        )*
    };
}

define_safe_id! {
    SafeIDI64 => "id",
    SafeSubjectIdI64 => "subject_id",
    SafeTopicIdI64 => "topic_id",
    SafeClassIdI64 => "class_id",
}

/// `{token}` segment of a download URL: a hyphenated UUID.
#[derive(Debug, Clone)]
pub struct SafeFileToken(pub String);

impl FromRequest for SafeFileToken {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match req.match_info().get("token") {
            Some(raw) if uuid::Uuid::parse_str(raw).is_ok() => Ok(SafeFileToken(raw.to_string())),
            Some(raw) => Err(bad_path(format!("Invalid file token: '{raw}'"))),
            None => Err(bad_path("Missing path parameter 'token'".to_string())),
        };
        ready(result)
    }
}

/// `{key}` segment of a settings URL, e.g. `app.school_name`.
#[derive(Debug, Clone)]
pub struct SafeSettingKey(pub String);

impl FromRequest for SafeSettingKey {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match req.match_info().get("key") {
            Some(raw)
                if !raw.is_empty()
                    && raw.len() <= 64
                    && raw
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c == '.' || c == '_') =>
            {
                Ok(SafeSettingKey(raw.to_string()))
            }
            Some(raw) => Err(bad_path(format!("Invalid setting key: '{raw}'"))),
            None => Err(bad_path("Missing path parameter 'key'".to_string())),
        };
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, http::StatusCode, test, web};

    async fn echo_id(id: SafeIDI64) -> HttpResponse {
        HttpResponse::Ok().body(id.0.to_string())
    }

    async fn echo_key(key: SafeSettingKey) -> HttpResponse {
        HttpResponse::Ok().body(key.0)
    }

    #[actix_web::test]
    async fn test_safe_id_accepts_positive_integers() {
        let app =
            test::init_service(App::new().route("/items/{id}", web::get().to(echo_id))).await;

        let req = test::TestRequest::get().uri("/items/17").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "17");
    }

    #[actix_web::test]
    async fn test_safe_id_rejects_garbage_with_400() {
        let app =
            test::init_service(App::new().route("/items/{id}", web::get().to(echo_id))).await;

        for uri in ["/items/abc", "/items/0", "/items/-3"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[actix_web::test]
    async fn test_setting_key_charset() {
        let app =
            test::init_service(App::new().route("/settings/{key}", web::put().to(echo_key)))
                .await;

        let ok = test::TestRequest::put()
            .uri("/settings/app.school_name")
            .to_request();
        assert_eq!(test::call_service(&app, ok).await.status(), StatusCode::OK);

        let bad = test::TestRequest::put()
            .uri("/settings/App;drop")
            .to_request();
        assert_eq!(
            test::call_service(&app, bad).await.status(),
            StatusCode::BAD_REQUEST
        );
    }
}
