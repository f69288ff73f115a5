use sea_orm::*;
use uuid::Uuid;

use crate::models::admin_orders::{self, AdminOrderStatus, NewAdminOrder};

/// Whether an order already has a review snapshot. The unique index on
/// `order_id` is the real guard; this pre-check exists for the friendlier
/// conflict message.
pub async fn exists_for_order(db: &DatabaseConnection, order_id: Uuid) -> Result<bool, DbErr> {
    let count = admin_orders::Entity::find()
        .filter(admin_orders::Column::OrderId.eq(order_id))
        .count(db)
        .await?;

    Ok(count > 0)
}

/// Insert a review snapshot (starts under review). Generic over the
/// connection so submission can pair it with the order-status flip in one
/// transaction.
pub async fn insert_admin_order<C: ConnectionTrait>(
    conn: &C,
    input: NewAdminOrder,
) -> Result<admin_orders::Model, DbErr> {
    let snapshot = admin_orders::ActiveModel {
        id: Set(Uuid::new_v4()),
        order_id: Set(input.order_id),
        client_name: Set(input.client_name),
        client_email: Set(input.client_email),
        phone: Set(input.phone),
        country: Set(input.country),
        city: Set(input.city),
        address: Set(input.address),
        postal: Set(input.postal),
        cin: Set(input.cin),
        product_type: Set(input.product_type),
        color: Set(input.color),
        size: Set(input.size),
        view_angle: Set(input.view_angle),
        quantity: Set(input.quantity),
        front_design: Set(input.front_design),
        back_design: Set(input.back_design),
        left_design: Set(input.left_design),
        right_design: Set(input.right_design),
        base_price: Set(input.base_price),
        design_price: Set(input.design_price),
        total_price: Set(input.total_price),
        currency: Set(input.currency),
        status: Set(AdminOrderStatus::UnderReview),
        created_at: Set(chrono::Utc::now()),
        confirmed_at: Set(None),
    };

    snapshot.insert(conn).await
}

/// All review snapshots, newest first.
pub async fn get_all_admin_orders(
    db: &DatabaseConnection,
) -> Result<Vec<admin_orders::Model>, DbErr> {
    admin_orders::Entity::find()
        .order_by_desc(admin_orders::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch a single review snapshot by ID.
pub async fn get_admin_order_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<admin_orders::Model>, DbErr> {
    admin_orders::Entity::find_by_id(id).one(db).await
}

/// Set a snapshot's review status, stamping `confirmed_at` on confirmation.
/// Generic over the connection: runs inside the same transaction as the
/// linked order's status flip.
pub async fn set_status<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
    status: AdminOrderStatus,
    confirmed_at: Option<chrono::DateTime<chrono::Utc>>,
) -> Result<admin_orders::Model, DbErr> {
    let snapshot = admin_orders::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(DbErr::RecordNotFound("Admin order not found".to_string()))?;

    let mut active: admin_orders::ActiveModel = snapshot.into();
    active.status = Set(status);
    if confirmed_at.is_some() {
        active.confirmed_at = Set(confirmed_at);
    }

    active.update(conn).await
}

/// Delete a review snapshot by ID.
pub async fn delete_admin_order(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<DeleteResult, DbErr> {
    admin_orders::Entity::delete_by_id(id).exec(db).await
}
