use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `saved_designs` table and its columns.
#[derive(DeriveIden)]
enum SavedDesigns {
    Table,
    Id,
    UserId,
    Filename,
    ProductType,
    Color,
    Size,
    ViewAngle,
    CreatedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SavedDesigns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SavedDesigns::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SavedDesigns::UserId).uuid().not_null())
                    .col(ColumnDef::new(SavedDesigns::Filename).string().not_null())
                    .col(
                        ColumnDef::new(SavedDesigns::ProductType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SavedDesigns::Color).string().not_null())
                    .col(ColumnDef::new(SavedDesigns::Size).string().null())
                    .col(ColumnDef::new(SavedDesigns::ViewAngle).string().not_null())
                    .col(
                        ColumnDef::new(SavedDesigns::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_saved_designs_user_id")
                            .from(SavedDesigns::Table, SavedDesigns::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SavedDesigns::Table).to_owned())
            .await
    }
}
