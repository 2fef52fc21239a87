use super::entities::Subject;
use crate::models::PaginatedResponse;

pub type SubjectListResponse = PaginatedResponse<Subject>;
