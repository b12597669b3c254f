use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, Select,
};

use crate::{
    entity,
    error::{ProjectError, ProjectResult},
    models::{Project, ProjectFilter, ProjectInput, SortOrder},
    repository::ProjectRepository,
};

const LIKE_ESCAPE: char = '\\';

pub struct PgProjectRepository {
    db: DatabaseConnection,
}

impl PgProjectRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// `%term%` with LIKE metacharacters escaped. Case folding is left to `ILIKE`.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn list_query(filter: &ProjectFilter) -> Select<entity::Entity> {
    let mut query = entity::Entity::find().filter(entity::Column::IsDeleted.eq(false));

    if let Some(status) = filter.status {
        query = query.filter(entity::Column::Status.eq(status));
    }

    if let Some(ref term) = filter.name_contains {
        let name = Expr::col((entity::Entity, entity::Column::Name));
        query = query.filter(name.ilike(LikeExpr::new(contains_pattern(term)).escape(LIKE_ESCAPE)));
    }

    let order = match filter.sort {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    };

    query
        .order_by(entity::Column::DueDate, order)
        .order_by_asc(entity::Column::Id)
}

#[async_trait]
impl ProjectRepository for PgProjectRepository {
    async fn create(&self, input: ProjectInput) -> ProjectResult<Project> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(project_id = model.id, "Created project");
        Ok(model.into())
    }

    async fn find_active(&self, id: i32) -> ProjectResult<Option<Project>> {
        let model = entity::Entity::find_by_id(id)
            .filter(entity::Column::IsDeleted.eq(false))
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_by_id(&self, id: i32) -> ProjectResult<Option<Project>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, filter: ProjectFilter) -> ProjectResult<Vec<Project>> {
        let models = list_query(&filter).all(&self.db).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn save(&self, project: Project) -> ProjectResult<Project> {
        let id = project.id;

        // created_at is never rewritten
        let active_model = entity::ActiveModel {
            id: Unchanged(id),
            name: Set(project.name),
            description: Set(project.description),
            status: Set(project.status),
            due_date: Set(project.due_date),
            created_at: NotSet,
            updated_at: Set(project.updated_at.into()),
            is_deleted: Set(project.is_deleted),
        };

        let model = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => ProjectError::NotFound(id),
            other => other.into(),
        })?;

        tracing::info!(project_id = id, is_deleted = model.is_deleted, "Saved project");
        Ok(model.into())
    }

    async fn exists(&self, id: i32) -> ProjectResult<bool> {
        let count = entity::Entity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }
}
