//! HTTP route groups.
//!
//! Every group is mounted under `/api/v1` and can be switched on or off per
//! process through `app.services`, so one binary can run as any single service
//! behind the gateway or as all of them at once.

pub mod admin;
pub mod announcements;
pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod files;
pub mod health;
pub mod homeroom;
pub mod materials;
pub mod schedules;
pub mod subjects;
pub mod submissions;
pub mod system;
pub mod topics;
pub mod users;

#[cfg(test)]
mod tests;

use actix_web::web;

use crate::config::AppConfig;

pub use admin::configure_admin_routes;
pub use announcements::configure_announcements_routes;
pub use assignments::configure_assignments_routes;
pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use files::configure_file_routes;
pub use health::configure_health_routes;
pub use homeroom::configure_homeroom_routes;
pub use materials::configure_materials_routes;
pub use schedules::configure_schedules_routes;
pub use subjects::configure_subjects_routes;
pub use submissions::{configure_grades_routes, configure_submissions_routes};
pub use system::configure_system_routes;
pub use topics::configure_topics_routes;
pub use users::configure_user_routes;

/// Mounts `/health` plus every route group enabled in `config.app.services`.
pub fn configure_services(cfg: &mut web::ServiceConfig, config: &AppConfig) {
    configure_health_routes(cfg);

    if config.service_enabled("users") {
        configure_auth_routes(cfg);
        configure_user_routes(cfg);
    }
    if config.service_enabled("courses") {
        configure_classes_routes(cfg);
        configure_subjects_routes(cfg);
        configure_topics_routes(cfg);
        configure_materials_routes(cfg);
    }
    if config.service_enabled("grading") {
        configure_assignments_routes(cfg);
        configure_submissions_routes(cfg);
        configure_grades_routes(cfg);
    }
    if config.service_enabled("attendance") {
        configure_attendance_routes(cfg);
    }
    if config.service_enabled("admin") {
        configure_admin_routes(cfg);
        configure_system_routes(cfg);
    }
    if config.service_enabled("announcements") {
        configure_announcements_routes(cfg);
    }
    if config.service_enabled("homeroom") {
        configure_homeroom_routes(cfg);
    }
    if config.service_enabled("scheduling") {
        configure_schedules_routes(cfg);
    }
    if config.service_enabled("files") {
        configure_file_routes(cfg);
    }
}
