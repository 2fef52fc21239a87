use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::materials::requests::{CreateMaterialRequest, UpdateMaterialRequest};
use crate::models::users::entities::UserRole;
use crate::services::MaterialService;
use crate::utils::SafeIDI64;

static MATERIAL_SERVICE: Lazy<MaterialService> = Lazy::new(MaterialService::new_lazy);

pub async fn create_material(
    req: HttpRequest,
    material: web::Json<CreateMaterialRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.create_material(&req, material.into_inner()).await
}

pub async fn get_material(req: HttpRequest, material_id: SafeIDI64) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.get_material(&req, material_id.0).await
}

pub async fn update_material(
    req: HttpRequest,
    material_id: SafeIDI64,
    update: web::Json<UpdateMaterialRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .update_material(&req, material_id.0, update.into_inner())
        .await
}

pub async fn delete_material(
    req: HttpRequest,
    material_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.delete_material(&req, material_id.0).await
}

pub fn configure_materials_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/materials")
            .wrap(RequireJWT::new())
            .service(
                web::resource("").route(
                    web::post()
                        .to(create_material)
                        .wrap(RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_material))
                    .route(
                        web::put()
                            .to(update_material)
                            .wrap(RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_material)
                            .wrap(RequireRole::new_any(UserRole::staff_roles())),
                    ),
            ),
    );
}
