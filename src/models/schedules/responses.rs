use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Schedule;

/// Ordered by day, then start time.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/schedule.ts")]
pub struct ScheduleListResponse {
    pub items: Vec<Schedule>,
}
