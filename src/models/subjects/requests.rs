use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::{PaginationQuery, de};

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/subject.ts")]
pub struct SubjectListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "de::option_from_str")]
    pub class_id: Option<i64>,
    #[serde(default, deserialize_with = "de::option_from_str")]
    pub teacher_id: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/subject.ts")]
pub struct CreateSubjectRequest {
    pub class_id: i64,
    pub teacher_id: i64,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/subject.ts")]
pub struct UpdateSubjectRequest {
    pub teacher_id: Option<i64>,
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
}
