use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub subject_id: i64,
    pub topic_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub attachment: Option<String>,
    pub max_score: f64,
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
    /// Accept submissions after the deadline, marked `late`.
    pub allow_late: bool,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Assignment {
    pub fn is_past_deadline(&self, at: chrono::DateTime<chrono::Utc>) -> bool {
        self.deadline.is_some_and(|deadline| at > deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn assignment(deadline: Option<chrono::DateTime<Utc>>) -> Assignment {
        let now = Utc::now();
        Assignment {
            id: 1,
            subject_id: 1,
            topic_id: None,
            title: "Essay".into(),
            description: None,
            attachment: None,
            max_score: 100.0,
            deadline,
            allow_late: false,
            created_by: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_deadline() {
        let now = Utc::now();
        assert!(!assignment(None).is_past_deadline(now));
        assert!(assignment(Some(now - Duration::hours(1))).is_past_deadline(now));
        assert!(!assignment(Some(now + Duration::hours(1))).is_past_deadline(now));
    }
}
