use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_string_enum;

define_string_enum! {
    /// Daily attendance mark. `permit` is an excused absence.
    AttendanceStatus, "attendance status", "../web/src/types/generated/attendance.ts" {
        Present => "present",
        Sick => "sick",
        Permit => "permit",
        Absent => "absent",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/attendance.ts")]
pub struct Attendance {
    pub id: i64,
    pub subject_id: i64,
    pub student_id: i64,
    /// `YYYY-MM-DD`
    pub date: String,
    pub status: AttendanceStatus,
    pub note: Option<String>,
    pub recorded_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        assert_eq!("permit".parse(), Ok(AttendanceStatus::Permit));
        assert!("izin".parse::<AttendanceStatus>().is_err());
        assert!(serde_json::from_str::<AttendanceStatus>("\"Present\"").is_err());
        assert_eq!(AttendanceStatus::ALL.len(), 4);
    }
}
