/*!
 * Bearer token authentication.
 *
 * ```rust,ignore
 * web::scope("/api/v1/classes")
 *     .wrap(RequireJWT::new())
 *     .route("", web::get().to(list_classes))
 * ```
 *
 * - no `Authorization: Bearer <token>` header: 401
 * - bad signature, expired token, non-numeric `sub` or unknown role: 403
 * - otherwise an [`AuthClaims`] is stored in the request extensions
 *
 * Verification is stateless; the user row is not consulted.
 */

use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::users::entities::UserRole;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, StatusCode, header::AUTHORIZATION},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity of the caller, taken from a verified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthClaims {
    pub user_id: i64,
    pub role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    /// Header absent or not a bearer credential.
    Missing,
    Invalid(String),
}

impl AuthFailure {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthFailure::Missing => StatusCode::UNAUTHORIZED,
            AuthFailure::Invalid(_) => StatusCode::FORBIDDEN,
        }
    }

    fn error_code(&self) -> ErrorCode {
        match self {
            AuthFailure::Missing => ErrorCode::Unauthorized,
            AuthFailure::Invalid(_) => ErrorCode::Forbidden,
        }
    }

    fn message(&self) -> &str {
        match self {
            AuthFailure::Missing => "Authentication token is missing",
            AuthFailure::Invalid(_) => "Authentication token is invalid or expired",
        }
    }
}

/// Checks an `Authorization` header value against `secret`.
pub fn authenticate(header: Option<&str>, secret: &str) -> Result<AuthClaims, AuthFailure> {
    let token = header
        .and_then(|h| h.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthFailure::Missing)?;

    let claims = JwtUtils::verify_token_with_secret(token, secret)
        .map_err(|e| AuthFailure::Invalid(e.to_string()))?;

    let user_id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| AuthFailure::Invalid(format!("non-numeric subject '{}'", claims.sub)))?;
    let role = claims
        .role
        .parse::<UserRole>()
        .map_err(AuthFailure::Invalid)?;

    Ok(AuthClaims { user_id, role })
}

#[derive(Clone, Default)]
pub struct RequireJWT {
    /// `None` reads `jwt.secret` from the global configuration.
    secret: Option<Arc<str>>,
}

impl RequireJWT {
    pub fn new() -> Self {
        Self { secret: None }
    }

    pub fn with_secret(secret: &str) -> Self {
        Self {
            secret: Some(Arc::from(secret)),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
            secret: self.secret.clone(),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
    secret: Option<Arc<str>>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
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
        let secret = self.secret.clone();

        Box::pin(async move {
            // CORS preflight carries no credentials
            if req.method() == Method::OPTIONS {
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            let header = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|h| h.to_str().ok());
            let secret: &str = match secret.as_deref() {
                Some(secret) => secret,
                None => &AppConfig::get().jwt.secret,
            };

            match authenticate(header, secret) {
                Ok(claims) => {
                    debug!(
                        "Authenticated user {} ({}) for {}",
                        claims.user_id,
                        claims.role,
                        req.path()
                    );
                    req.extensions_mut().insert(claims);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Err(failure) => {
                    info!("Authentication failed for {}: {:?}", req.path(), failure);
                    Ok(req.into_response(
                        create_error_response(
                            failure.status(),
                            failure.error_code(),
                            failure.message(),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// Claims stored by the middleware; `None` outside protected scopes.
    pub fn extract_claims(req: &actix_web::HttpRequest) -> Option<AuthClaims> {
        req.extensions().get::<AuthClaims>().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::Claims;
    use actix_web::{App, HttpRequest, HttpResponse, web};
    use actix_web::test as actix_test;

    const SECRET: &str = "middleware-test-secret";

    fn token(user_id: i64, role: &str, minutes: i64) -> String {
        JwtUtils::generate_token_with_secret(
            SECRET,
            user_id,
            role,
            chrono::Duration::minutes(minutes),
        )
        .unwrap()
    }

    async fn whoami(req: HttpRequest) -> HttpResponse {
        match RequireJWT::extract_claims(&req) {
            Some(claims) => HttpResponse::Ok().body(format!("{}:{}", claims.user_id, claims.role)),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    #[test]
    fn test_authenticate_classification() {
        assert_eq!(authenticate(None, SECRET), Err(AuthFailure::Missing));
        assert_eq!(
            authenticate(Some("Basic dXNlcjpwYXNz"), SECRET),
            Err(AuthFailure::Missing)
        );
        assert_eq!(authenticate(Some("Bearer "), SECRET), Err(AuthFailure::Missing));
        assert!(matches!(
            authenticate(Some("Bearer not-a-jwt"), SECRET),
            Err(AuthFailure::Invalid(_))
        ));

        let header = format!("Bearer {}", token(7, "student", 5));
        assert_eq!(
            authenticate(Some(&header), SECRET),
            Ok(AuthClaims {
                user_id: 7,
                role: UserRole::Student
            })
        );
        assert!(matches!(
            authenticate(Some(&header), "another-secret"),
            Err(AuthFailure::Invalid(_))
        ));
    }

    #[test]
    fn test_authenticate_rejects_bad_claims() {
        let expired = format!("Bearer {}", token(7, "student", -10));
        assert!(matches!(
            authenticate(Some(&expired), SECRET),
            Err(AuthFailure::Invalid(_))
        ));

        let unknown_role = format!("Bearer {}", token(7, "janitor", 5));
        assert!(matches!(
            authenticate(Some(&unknown_role), SECRET),
            Err(AuthFailure::Invalid(_))
        ));

        let now = chrono::Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "not-a-number".to_string(),
            role: "admin".to_string(),
            exp: now + 300,
            iat: now,
        };
        let raw = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(matches!(
            authenticate(Some(&format!("Bearer {raw}")), SECRET),
            Err(AuthFailure::Invalid(_))
        ));
    }

    #[actix_web::test]
    async fn test_middleware_statuses() {
        let app = actix_test::init_service(
            App::new().service(
                web::scope("/api")
                    .wrap(RequireJWT::with_secret(SECRET))
                    .route("/me", web::route().to(whoami)),
            ),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/api/me").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::Unauthorized as i32);
        assert!(body["message"].is_string());

        let req = actix_test::TestRequest::get()
            .uri("/api/me")
            .insert_header(("Authorization", "Bearer garbage"))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = actix_test::TestRequest::get()
            .uri("/api/me")
            .insert_header(("Authorization", format!("Bearer {}", token(3, "teacher", -10))))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = actix_test::TestRequest::get()
            .uri("/api/me")
            .insert_header(("Authorization", format!("Bearer {}", token(3, "teacher", 5))))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(actix_test::read_body(resp).await, "3:teacher");

        let req = actix_test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/api/me")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(actix_test::read_body(resp).await, "anonymous");
    }
}
