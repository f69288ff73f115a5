pub use sea_orm_migration::prelude::*;

mod m20260801_000001_create_users_table;
mod m20260801_000002_create_user_tokens_table;
mod m20260801_000003_create_orders_table;
mod m20260801_000004_create_admin_orders_table;
mod m20260801_000005_create_saved_designs_table;
mod m20260801_000006_create_conversations_table;
mod m20260801_000007_create_messages_table;
mod m20260801_000008_create_notifications_table;
mod m20260805_000001_add_unique_order_to_admin_orders;
mod m20260805_000002_add_workflow_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_users_table::Migration),
            Box::new(m20260801_000002_create_user_tokens_table::Migration),
            Box::new(m20260801_000003_create_orders_table::Migration),
            Box::new(m20260801_000004_create_admin_orders_table::Migration),
            Box::new(m20260801_000005_create_saved_designs_table::Migration),
            Box::new(m20260801_000006_create_conversations_table::Migration),
            Box::new(m20260801_000007_create_messages_table::Migration),
            Box::new(m20260801_000008_create_notifications_table::Migration),
            Box::new(m20260805_000001_add_unique_order_to_admin_orders::Migration),
            Box::new(m20260805_000002_add_workflow_indexes::Migration),
        ]
    }
}
