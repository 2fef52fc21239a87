use serde::Serialize;
use ts_rs::TS;

use super::entities::{SettingAudit, SystemSetting};
use crate::models::PaginatedResponse;

/// Settings any signed-in user may read.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/system.ts")]
pub struct PublicSettingsResponse {
    pub school_name: String,
    pub academic_year: String,
    pub semester: u8,
    pub max_file_size: u64,
    pub allowed_file_types: Vec<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/system.ts")]
pub struct AdminSettingsListResponse {
    pub settings: Vec<SystemSetting>,
}

pub type SettingAuditListResponse = PaginatedResponse<SettingAudit>;

#[derive(Debug, Default, Serialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/system.ts")]
pub struct DashboardStats {
    pub admins: i64,
    pub teachers: i64,
    pub students: i64,
    pub classes: i64,
    pub subjects: i64,
    pub assignments: i64,
    pub submissions_pending: i64,
}
