use serde::Serialize;
use ts_rs::TS;

use super::entities::{Attendance, AttendanceStatus};
use crate::models::PaginatedResponse;

pub type AttendanceListResponse = PaginatedResponse<Attendance>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/attendance.ts")]
pub struct AttendanceSummary {
    pub present: i64,
    pub sick: i64,
    pub permit: i64,
    pub absent: i64,
    pub total: i64,
}

impl AttendanceSummary {
    pub fn add(&mut self, status: AttendanceStatus) {
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Sick => self.sick += 1,
            AttendanceStatus::Permit => self.permit += 1,
            AttendanceStatus::Absent => self.absent += 1,
        }
        self.total += 1;
    }
}

impl FromIterator<AttendanceStatus> for AttendanceSummary {
    fn from_iter<I: IntoIterator<Item = AttendanceStatus>>(iter: I) -> Self {
        let mut summary = AttendanceSummary::default();
        for status in iter {
            summary.add(status);
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let summary: AttendanceSummary = [
            AttendanceStatus::Present,
            AttendanceStatus::Present,
            AttendanceStatus::Sick,
            AttendanceStatus::Absent,
        ]
        .into_iter()
        .collect();
        assert_eq!(summary.present, 2);
        assert_eq!(summary.sick, 1);
        assert_eq!(summary.permit, 0);
        assert_eq!(summary.absent, 1);
        assert_eq!(summary.total, 4);
    }
}
