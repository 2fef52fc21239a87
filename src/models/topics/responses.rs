use serde::Serialize;
use ts_rs::TS;

use super::entities::Topic;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/topic.ts")]
pub struct TopicListResponse {
    pub items: Vec<Topic>,
}
