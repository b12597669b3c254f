use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(ProjectStatus::Enum)
                    .values([
                        ProjectStatus::NotStarted,
                        ProjectStatus::InProgress,
                        ProjectStatus::Completed,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Project::Table)
                    .if_not_exists()
                    .col(pk_auto(Project::Id))
                    .col(string_len(Project::Name, 255))
                    .col(string_len_null(Project::Description, 500))
                    .col(
                        ColumnDef::new(Project::Status)
                            .enumeration(
                                ProjectStatus::Enum,
                                [
                                    ProjectStatus::NotStarted,
                                    ProjectStatus::InProgress,
                                    ProjectStatus::Completed,
                                ],
                            )
                            .not_null(),
                    )
                    .col(date(Project::DueDate))
                    .col(
                        timestamp_with_time_zone(Project::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Project::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(boolean(Project::IsDeleted).default(false))
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "ALTER TABLE project ADD CONSTRAINT project_updated_after_created \
                 CHECK (updated_at >= created_at)",
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_project_status")
                    .table(Project::Table)
                    .col(Project::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_project_due_date")
                    .table(Project::Table)
                    .col(Project::DueDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Project::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(ProjectStatus::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Project {
    Table,
    Id,
    Name,
    Description,
    Status,
    DueDate,
    CreatedAt,
    UpdatedAt,
    IsDeleted,
}

#[derive(DeriveIden)]
enum ProjectStatus {
    #[sea_orm(iden = "project_status")]
    Enum,
    #[sea_orm(iden = "NotStarted")]
    NotStarted,
    #[sea_orm(iden = "InProgress")]
    InProgress,
    #[sea_orm(iden = "Completed")]
    Completed,
}
