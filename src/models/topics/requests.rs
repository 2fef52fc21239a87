use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/topic.ts")]
pub struct CreateTopicRequest {
    pub subject_id: i64,
    pub title: String,
    pub description: Option<String>,
    /// Appended after the last topic when omitted.
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/topic.ts")]
pub struct UpdateTopicRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub position: Option<i32>,
}
