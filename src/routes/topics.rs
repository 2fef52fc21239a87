use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::topics::requests::{CreateTopicRequest, UpdateTopicRequest};
use crate::models::users::entities::UserRole;
use crate::services::{MaterialService, TopicService};
use crate::utils::SafeIDI64;

static TOPIC_SERVICE: Lazy<TopicService> = Lazy::new(TopicService::new_lazy);
static MATERIAL_SERVICE: Lazy<MaterialService> = Lazy::new(MaterialService::new_lazy);

pub async fn create_topic(
    req: HttpRequest,
    topic: web::Json<CreateTopicRequest>,
) -> ActixResult<HttpResponse> {
    TOPIC_SERVICE.create_topic(&req, topic.into_inner()).await
}

pub async fn get_topic(req: HttpRequest, topic_id: SafeIDI64) -> ActixResult<HttpResponse> {
    TOPIC_SERVICE.get_topic(&req, topic_id.0).await
}

pub async fn update_topic(
    req: HttpRequest,
    topic_id: SafeIDI64,
    update: web::Json<UpdateTopicRequest>,
) -> ActixResult<HttpResponse> {
    TOPIC_SERVICE
        .update_topic(&req, topic_id.0, update.into_inner())
        .await
}

pub async fn delete_topic(req: HttpRequest, topic_id: SafeIDI64) -> ActixResult<HttpResponse> {
    TOPIC_SERVICE.delete_topic(&req, topic_id.0).await
}

pub async fn list_topic_materials(
    req: HttpRequest,
    topic_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.list_materials(&req, topic_id.0).await
}

// writes additionally require owning the subject, checked in the service
pub fn configure_topics_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/topics")
            .wrap(RequireJWT::new())
            .service(
                web::resource("").route(
                    web::post()
                        .to(create_topic)
                        .wrap(RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .service(web::resource("/{id}/materials").route(web::get().to(list_topic_materials)))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_topic))
                    .route(
                        web::put()
                            .to(update_topic)
                            .wrap(RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_topic)
                            .wrap(RequireRole::new_any(UserRole::staff_roles())),
                    ),
            ),
    );
}
