use super::entities::User;
use crate::models::PaginatedResponse;

pub type UserListResponse = PaginatedResponse<User>;
