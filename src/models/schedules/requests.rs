use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::de;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/schedule.ts")]
pub struct CreateScheduleRequest {
    pub class_id: i64,
    pub subject_id: i64,
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub room: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/schedule.ts")]
pub struct UpdateScheduleRequest {
    pub subject_id: Option<i64>,
    pub day_of_week: Option<i32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "de::double_option")]
    #[ts(optional)]
    pub room: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/schedule.ts")]
pub struct ScheduleListParams {
    #[serde(default, deserialize_with = "de::option_from_str")]
    pub class_id: Option<i64>,
    #[serde(default, deserialize_with = "de::option_from_str")]
    pub day_of_week: Option<i32>,
}

/// Storage-level filter.
#[derive(Debug, Clone, Default)]
pub struct ScheduleFilter {
    pub class_id: Option<i64>,
    pub subject_ids: Option<Vec<i64>>,
    pub day_of_week: Option<i32>,
}
