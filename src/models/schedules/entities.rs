use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::utils::validate::parse_time;

/// A weekly timetable entry.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/schedule.ts")]
pub struct Schedule {
    pub id: i64,
    pub class_id: i64,
    pub subject_id: i64,
    /// 1 = Monday ... 7 = Sunday
    pub day_of_week: i32,
    /// `HH:MM`
    pub start_time: String,
    pub end_time: String,
    pub room: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// A validated `[start, end)` interval on one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub day_of_week: i32,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeSlot {
    pub fn parse(day_of_week: i32, start: &str, end: &str) -> Result<Self, String> {
        if !(1..=7).contains(&day_of_week) {
            return Err(format!(
                "day_of_week must be between 1 (Monday) and 7 (Sunday), got {day_of_week}"
            ));
        }
        let start_time = parse_time(start).map_err(|e| format!("start_time: {e}"))?;
        let end_time = parse_time(end).map_err(|e| format!("end_time: {e}"))?;
        if start_time >= end_time {
            return Err("start_time must be earlier than end_time".to_string());
        }
        Ok(Self {
            day_of_week,
            start: start_time,
            end: end_time,
        })
    }

    /// Back-to-back slots (one ends when the next starts) do not overlap.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.day_of_week == other.day_of_week && self.start < other.end && other.start < self.end
    }
}

impl Schedule {
    pub fn slot(&self) -> Result<TimeSlot, String> {
        TimeSlot::parse(self.day_of_week, &self.start_time, &self.end_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_validation() {
        assert!(TimeSlot::parse(1, "07:00", "08:30").is_ok());
        assert!(TimeSlot::parse(0, "07:00", "08:30").is_err());
        assert!(TimeSlot::parse(8, "07:00", "08:30").is_err());
        assert!(TimeSlot::parse(2, "08:30", "07:00").is_err());
        assert!(TimeSlot::parse(2, "08:30", "08:30").is_err());
        assert!(TimeSlot::parse(3, "7:00", "08:00").is_err());
        assert!(TimeSlot::parse(3, "07:00", "25:00").is_err());
    }

    #[test]
    fn test_overlap() {
        let first = TimeSlot::parse(1, "07:00", "08:30").unwrap();
        let inside = TimeSlot::parse(1, "07:30", "08:00").unwrap();
        let adjacent = TimeSlot::parse(1, "08:30", "10:00").unwrap();
        let straddling = TimeSlot::parse(1, "08:00", "09:00").unwrap();
        let other_day = TimeSlot::parse(2, "07:00", "08:30").unwrap();

        assert!(first.overlaps(&inside));
        assert!(inside.overlaps(&first));
        assert!(first.overlaps(&straddling));
        assert!(!first.overlaps(&adjacent));
        assert!(!first.overlaps(&other_day));
    }
}
