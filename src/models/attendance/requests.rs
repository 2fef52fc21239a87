use serde::Deserialize;
use ts_rs::TS;

use super::entities::AttendanceStatus;
use crate::models::common::{PaginationQuery, de};

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/attendance.ts")]
pub struct AttendanceEntry {
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub note: Option<String>,
}

/// One subject meeting: every listed student gets a mark for `date`.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/attendance.ts")]
pub struct RecordAttendanceRequest {
    pub subject_id: i64,
    pub date: String,
    pub entries: Vec<AttendanceEntry>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/attendance.ts")]
pub struct UpdateAttendanceRequest {
    pub status: Option<AttendanceStatus>,
    #[serde(default, deserialize_with = "de::double_option")]
    #[ts(optional)]
    pub note: Option<Option<String>>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/attendance.ts")]
pub struct AttendanceListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "de::option_from_str")]
    pub subject_id: Option<i64>,
    #[serde(default, deserialize_with = "de::option_from_str")]
    pub student_id: Option<i64>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/attendance.ts")]
pub struct AttendanceSummaryParams {
    #[serde(default, deserialize_with = "de::option_from_str")]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "de::option_from_str")]
    pub subject_id: Option<i64>,
}

/// Storage-level filter shared by listing and aggregation.
#[derive(Debug, Clone, Default)]
pub struct AttendanceFilter {
    pub subject_id: Option<i64>,
    pub subject_ids: Option<Vec<i64>>,
    pub student_id: Option<i64>,
    pub student_ids: Option<Vec<i64>>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}
