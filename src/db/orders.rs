use sea_orm::*;
use uuid::Uuid;

use crate::models::orders::{self, DesignSlots, NewOrder, OrderStatus};
use crate::pricing;

/// Insert a fully-resolved order.
pub async fn insert_order(
    db: &DatabaseConnection,
    user_id: Uuid,
    input: NewOrder,
) -> Result<orders::Model, DbErr> {
    let new_order = orders::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        status: Set(input.status),
        quantity: Set(input.quantity),
        front_design: Set(input.design.front),
        back_design: Set(input.design.back),
        left_design: Set(input.design.left),
        right_design: Set(input.design.right),
        base_price: Set(input.base_price),
        design_price: Set(input.design_price),
        total_price: Set(input.total_price),
        product_type: Set(input.product_type),
        color: Set(input.color),
        size: Set(input.size),
        view_angle: Set(input.view_angle),
        source_designs: Set(input.source_designs),
        is_hidden: Set(input.is_hidden),
        is_cart_order: Set(input.is_cart_order),
        approval_timestamp: Set(None),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_order.insert(db).await
}

/// Fetch a single order by ID.
pub async fn get_order_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<orders::Model>, DbErr> {
    orders::Entity::find_by_id(id).one(db).await
}

/// A user's non-hidden orders, newest first.
pub async fn get_visible_orders_by_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<orders::Model>, DbErr> {
    orders::Entity::find()
        .filter(orders::Column::UserId.eq(user_id))
        .filter(orders::Column::IsHidden.eq(false))
        .order_by_desc(orders::Column::CreatedAt)
        .all(db)
        .await
}

/// Null-safe side match for the cart fingerprint: an absent side matches
/// both NULL and the empty string.
fn side_filter(column: orders::Column, value: Option<&str>) -> Condition {
    match value {
        Some(v) if !v.is_empty() => Condition::all().add(column.eq(v)),
        _ => Condition::any().add(column.is_null()).add(column.eq("")),
    }
}

/// Find the caller's pending draft with the same content fingerprint
/// (all four side references plus the hidden/cart flags).
pub async fn find_matching_draft(
    db: &DatabaseConnection,
    user_id: Uuid,
    design: &DesignSlots,
    is_hidden: bool,
    is_cart_order: bool,
) -> Result<Option<orders::Model>, DbErr> {
    orders::Entity::find()
        .filter(orders::Column::UserId.eq(user_id))
        .filter(orders::Column::Status.eq(OrderStatus::Pending))
        .filter(orders::Column::IsHidden.eq(is_hidden))
        .filter(orders::Column::IsCartOrder.eq(is_cart_order))
        .filter(side_filter(orders::Column::FrontDesign, design.front.as_deref()))
        .filter(side_filter(orders::Column::BackDesign, design.back.as_deref()))
        .filter(side_filter(orders::Column::LeftDesign, design.left.as_deref()))
        .filter(side_filter(orders::Column::RightDesign, design.right.as_deref()))
        .one(db)
        .await
}

/// Merge a new cart line into an existing draft: bump the quantity and
/// recompute the total from the per-unit price.
pub async fn merge_draft_quantity(
    db: &DatabaseConnection,
    order: orders::Model,
    additional: i32,
) -> Result<orders::Model, DbErr> {
    let new_quantity = order.quantity + additional;
    let unit = order.base_price + order.design_price;
    let total = pricing::line_total(unit, new_quantity);

    let mut active: orders::ActiveModel = order.into();
    active.quantity = Set(new_quantity);
    active.total_price = Set(total);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Set an order's status, optionally stamping the approval timestamp.
/// Generic over the connection so the admin review flow can run it inside
/// the same transaction as the snapshot update.
pub async fn set_status<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
    status: OrderStatus,
    approval_timestamp: Option<chrono::DateTime<chrono::Utc>>,
) -> Result<orders::Model, DbErr> {
    let order = orders::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(DbErr::RecordNotFound("Order not found".to_string()))?;

    let mut active: orders::ActiveModel = order.into();
    active.status = Set(status);
    if approval_timestamp.is_some() {
        active.approval_timestamp = Set(approval_timestamp);
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(conn).await
}

/// Owner-scoped delete. Returns the store's delete result so callers can
/// distinguish "gone" from "was never yours".
pub async fn delete_order_owned(
    db: &DatabaseConnection,
    id: Uuid,
    user_id: Uuid,
) -> Result<DeleteResult, DbErr> {
    orders::Entity::delete_many()
        .filter(orders::Column::Id.eq(id))
        .filter(orders::Column::UserId.eq(user_id))
        .exec(db)
        .await
}

/// Delete the user's orders that reference a saved design, by side filename
/// or by design id in the source-designs map. Returns how many went away.
pub async fn delete_orders_referencing_design(
    db: &DatabaseConnection,
    user_id: Uuid,
    design_id: Uuid,
    filename: &str,
) -> Result<u64, DbErr> {
    let candidates = orders::Entity::find()
        .filter(orders::Column::UserId.eq(user_id))
        .all(db)
        .await?;

    let doomed: Vec<Uuid> = candidates
        .into_iter()
        .filter(|o| o.references_design(design_id, filename))
        .map(|o| o.id)
        .collect();

    if doomed.is_empty() {
        return Ok(0);
    }

    let result = orders::Entity::delete_many()
        .filter(orders::Column::Id.is_in(doomed))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}
