use crate::models::{Project, ProjectInput, ProjectStatus};
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

/// Sea-ORM entity for the `project` table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "project")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub due_date: Date,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Project {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            status: model.status,
            due_date: model.due_date,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            is_deleted: model.is_deleted,
        }
    }
}

/// New row: id left to the sequence, not deleted, both timestamps now.
impl From<ProjectInput> for ActiveModel {
    fn from(input: ProjectInput) -> Self {
        let now = Utc::now();

        ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            status: Set(input.status),
            due_date: Set(input.due_date),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            is_deleted: Set(false),
            ..Default::default()
        }
    }
}
