use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::{PaginationQuery, de};

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/assignment.ts")]
pub struct AssignmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "de::option_from_str")]
    pub subject_id: Option<i64>,
    #[serde(default, deserialize_with = "de::option_from_str")]
    pub topic_id: Option<i64>,
}

/// Storage-level filter; `subject_ids` restricts results to the subjects a
/// caller can see.
#[derive(Debug, Clone, Default)]
pub struct AssignmentListQuery {
    pub page: u64,
    pub size: u64,
    pub subject_id: Option<i64>,
    pub topic_id: Option<i64>,
    pub subject_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub subject_id: i64,
    pub topic_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub attachment: Option<String>,
    pub max_score: Option<f64>,
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
    pub allow_late: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/assignment.ts")]
pub struct UpdateAssignmentRequest {
    #[serde(default, deserialize_with = "de::double_option")]
    #[ts(optional)]
    pub topic_id: Option<Option<i64>>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::double_option")]
    #[ts(optional)]
    pub attachment: Option<Option<String>>,
    pub max_score: Option<f64>,
    #[serde(default, deserialize_with = "de::double_option")]
    #[ts(optional)]
    pub deadline: Option<Option<chrono::DateTime<chrono::Utc>>>,
    pub allow_late: Option<bool>,
}
