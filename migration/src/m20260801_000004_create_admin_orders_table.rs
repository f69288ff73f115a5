use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `admin_orders` table and its columns.
///
/// Rows are denormalized snapshots: product and client fields are copied from
/// `orders` and `users` at submission time and never re-synced.
#[derive(DeriveIden)]
enum AdminOrders {
    Table,
    Id,
    OrderId,
    ClientName,
    ClientEmail,
    Phone,
    Country,
    City,
    Address,
    Postal,
    Cin,
    ProductType,
    Color,
    Size,
    ViewAngle,
    Quantity,
    FrontDesign,
    BackDesign,
    LeftDesign,
    RightDesign,
    BasePrice,
    DesignPrice,
    TotalPrice,
    Currency,
    Status,
    CreatedAt,
    ConfirmedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminOrders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminOrders::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AdminOrders::OrderId).uuid().not_null())
                    .col(ColumnDef::new(AdminOrders::ClientName).string().not_null())
                    .col(ColumnDef::new(AdminOrders::ClientEmail).string().not_null())
                    .col(ColumnDef::new(AdminOrders::Phone).string().null())
                    .col(ColumnDef::new(AdminOrders::Country).string().null())
                    .col(ColumnDef::new(AdminOrders::City).string().null())
                    .col(ColumnDef::new(AdminOrders::Address).string().null())
                    .col(ColumnDef::new(AdminOrders::Postal).string().null())
                    .col(ColumnDef::new(AdminOrders::Cin).string().null())
                    .col(ColumnDef::new(AdminOrders::ProductType).string().not_null())
                    .col(ColumnDef::new(AdminOrders::Color).string().not_null())
                    .col(ColumnDef::new(AdminOrders::Size).string().null())
                    .col(ColumnDef::new(AdminOrders::ViewAngle).string().not_null())
                    .col(ColumnDef::new(AdminOrders::Quantity).integer().not_null())
                    .col(ColumnDef::new(AdminOrders::FrontDesign).string().null())
                    .col(ColumnDef::new(AdminOrders::BackDesign).string().null())
                    .col(ColumnDef::new(AdminOrders::LeftDesign).string().null())
                    .col(ColumnDef::new(AdminOrders::RightDesign).string().null())
                    .col(ColumnDef::new(AdminOrders::BasePrice).decimal().not_null())
                    .col(
                        ColumnDef::new(AdminOrders::DesignPrice)
                            .decimal()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AdminOrders::TotalPrice).decimal().not_null())
                    .col(
                        ColumnDef::new(AdminOrders::Currency)
                            .string()
                            .not_null()
                            .default("EUR"),
                    )
                    .col(ColumnDef::new(AdminOrders::Status).string().not_null())
                    .col(
                        ColumnDef::new(AdminOrders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdminOrders::ConfirmedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_admin_orders_order_id")
                            .from(AdminOrders::Table, AdminOrders::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminOrders::Table).to_owned())
            .await
    }
}
