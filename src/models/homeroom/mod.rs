//! Views for a class's homeroom teacher (wali kelas).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::attendance::responses::AttendanceSummary;
use crate::models::classes::entities::Class;
use crate::models::common::de;
use crate::models::users::entities::User;

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/homeroom.ts")]
pub struct HomeroomParams {
    /// Admins only; teachers always get the class they lead.
    #[serde(default, deserialize_with = "de::option_from_str")]
    pub class_id: Option<i64>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/homeroom.ts")]
pub struct HomeroomStudentsResponse {
    pub class: Class,
    pub students: Vec<User>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/homeroom.ts")]
pub struct StudentAttendanceRow {
    pub student_id: i64,
    pub username: String,
    pub display_name: Option<String>,
    pub summary: AttendanceSummary,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/homeroom.ts")]
pub struct HomeroomAttendanceResponse {
    pub class_id: i64,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub students: Vec<StudentAttendanceRow>,
}
