//! Request handling for every route group.
//!
//! Each service is a zero-sized front over the shared [`Storage`]; operations
//! live in one file per use case and return `ActixResult<HttpResponse>`, with
//! rejections expressed as [`ApiError`](crate::errors::ApiError).

pub mod access;
pub mod admin;
pub mod announcements;
pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod files;
pub mod homeroom;
pub mod materials;
pub mod schedules;
pub mod subjects;
pub mod submissions;
pub mod system;
pub mod topics;
pub mod users;

pub use admin::AdminService;
pub use announcements::AnnouncementService;
pub use assignments::AssignmentService;
pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use classes::ClassService;
pub use files::FileService;
pub use homeroom::HomeroomService;
pub use materials::MaterialService;
pub use schedules::ScheduleService;
pub use subjects::SubjectService;
pub use submissions::SubmissionService;
pub use system::{DynamicConfig, SystemService};
pub use topics::TopicService;
pub use users::UserService;

/// Declares a service that resolves its [`Storage`](crate::storage::Storage)
/// from app data unless one was injected.
macro_rules! storage_service {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name {
            storage: Option<std::sync::Arc<dyn $crate::storage::Storage>>,
        }

        impl $name {
            pub fn new_lazy() -> Self {
                Self { storage: None }
            }

            pub fn with_storage(storage: std::sync::Arc<dyn $crate::storage::Storage>) -> Self {
                Self {
                    storage: Some(storage),
                }
            }

            pub(crate) fn get_storage(
                &self,
                request: &actix_web::HttpRequest,
            ) -> actix_web::Result<std::sync::Arc<dyn $crate::storage::Storage>> {
                if let Some(storage) = &self.storage {
                    return Ok(storage.clone());
                }
                request
                    .app_data::<actix_web::web::Data<std::sync::Arc<dyn $crate::storage::Storage>>>()
                    .map(|data| data.get_ref().clone())
                    .ok_or_else(|| {
                        $crate::errors::SpadaError::database_config(
                            "Storage is not registered in app data",
                        )
                        .into()
                    })
            }
        }
    };
}

pub(crate) use storage_service;
