use super::entities::Class;
use crate::models::PaginatedResponse;

pub type ClassListResponse = PaginatedResponse<Class>;
