use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::{PaginationQuery, de};

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/class.ts")]
pub struct ClassListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "de::option_from_str")]
    pub grade_level: Option<i32>,
    pub academic_year: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/class.ts")]
pub struct CreateClassRequest {
    pub name: String,
    pub grade_level: i32,
    pub academic_year: String,
    pub homeroom_teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/class.ts")]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub grade_level: Option<i32>,
    pub academic_year: Option<String>,
    /// `null` clears the homeroom teacher.
    #[serde(default, deserialize_with = "de::double_option")]
    #[ts(optional)]
    pub homeroom_teacher_id: Option<Option<i64>>,
}
