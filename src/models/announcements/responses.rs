use super::entities::Announcement;
use crate::models::PaginatedResponse;

pub type AnnouncementListResponse = PaginatedResponse<Announcement>;
