//! Assignments (tugas) given within a subject.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub subject_id: i64,
    pub topic_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub attachment: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub max_score: f64,
    pub deadline: Option<i64>,
    pub allow_late: bool,
    pub created_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_assignment(self) -> crate::models::assignments::entities::Assignment {
        use crate::models::assignments::entities::Assignment;

        Assignment {
            id: self.id,
            subject_id: self.subject_id,
            topic_id: self.topic_id,
            title: self.title,
            description: self.description,
            attachment: self.attachment,
            max_score: self.max_score,
            deadline: self.deadline.map(super::to_datetime),
            allow_late: self.allow_late,
            created_by: self.created_by,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
