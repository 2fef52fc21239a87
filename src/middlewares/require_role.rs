/*!
 * Role allowlist guard. Must run inside [`RequireJWT`](super::RequireJWT).
 *
 * ```rust,ignore
 * web::scope("/api/v1/admin")
 *     .wrap(RequireRole::new_any(UserRole::admin_roles()))
 *     .wrap(RequireJWT::new())
 * ```
 *
 * Actix runs the last `wrap` first, so the JWT layer is registered after the role layer.
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, StatusCode},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{ErrorCode, users::entities::UserRole};

use super::{AuthClaims, create_error_response};

#[derive(Clone)]
pub struct RequireRole {
    allowed: Rc<[UserRole]>,
}

impl RequireRole {
    pub fn new(role: UserRole) -> Self {
        Self {
            allowed: Rc::from([role]),
        }
    }

    /// Passes when the caller holds any of `roles`.
    pub fn new_any(roles: &[UserRole]) -> Self {
        Self {
            allowed: Rc::from(roles),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            allowed: self.allowed.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    allowed: Rc<[UserRole]>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let allowed = self.allowed.clone();

        Box::pin(async move {
            if req.method() == Method::OPTIONS {
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            let claims = req.extensions().get::<AuthClaims>().copied();

            match claims {
                Some(claims) if allowed.contains(&claims.role) => {
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Some(claims) => {
                    info!(
                        "Access denied for user {} (role: {}). Allowed roles: {:?}",
                        claims.user_id, claims.role, allowed
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::Forbidden,
                            "You do not have permission to access this resource",
                        )
                        .map_into_right_body(),
                    ))
                }
                None => {
                    info!(
                        "Role check on {} without claims; RequireJWT is not applied",
                        req.path()
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middlewares::RequireJWT;
    use crate::utils::jwt::JwtUtils;
    use actix_web::{App, HttpResponse, test, web};

    const SECRET: &str = "role-test-secret";

    fn bearer(role: &str) -> String {
        let token =
            JwtUtils::generate_token_with_secret(SECRET, 1, role, chrono::Duration::minutes(5))
                .unwrap();
        format!("Bearer {token}")
    }

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_role_allowlist() {
        let app = test::init_service(
            App::new().service(
                web::scope("/staff")
                    .wrap(RequireRole::new_any(UserRole::staff_roles()))
                    .wrap(RequireJWT::with_secret(SECRET))
                    .route("", web::get().to(ok)),
            ),
        )
        .await;

        for (role, expected) in [
            ("admin", StatusCode::OK),
            ("teacher", StatusCode::OK),
            ("student", StatusCode::FORBIDDEN),
        ] {
            let req = test::TestRequest::get()
                .uri("/staff")
                .insert_header(("Authorization", bearer(role)))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), expected, "role {role}");
        }

        let req = test::TestRequest::get().uri("/staff").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_guard_without_jwt_layer_is_unauthorized() {
        let app = test::init_service(
            App::new().service(
                web::scope("/admin")
                    .wrap(RequireRole::new(UserRole::Admin))
                    .route("", web::get().to(ok)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header(("Authorization", bearer("admin")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
