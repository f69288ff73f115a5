use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum AdminOrders {
    Table,
    OrderId,
}

/// At most one review snapshot per order. The handler still pre-checks for a
/// friendlier error, but this index is what actually closes the race between
/// concurrent submissions.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_admin_orders_order_id_unique")
                    .table(AdminOrders::Table)
                    .col(AdminOrders::OrderId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_admin_orders_order_id_unique")
                    .table(AdminOrders::Table)
                    .to_owned(),
            )
            .await
    }
}
