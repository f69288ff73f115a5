use actix_web::{HttpResponse, web};
use sea_orm::{DatabaseConnection, DbErr, SqlErr, TransactionTrait};
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{CacheConfig, CacheData, keys};
use crate::db::admin_orders as admin_db;
use crate::db::orders as order_db;
use crate::error::{ApiError, require};
use crate::models::admin_orders::NewAdminOrder;
use crate::models::orders::{self, CreateOrderRequest, NewOrder, OrderStatus, SubmitOrderRequest};
use crate::pricing;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// POST /api/orders — create a draft order and put it straight under review.
///
/// Every required field is validated by name; the caller gets back the order
/// id and the echoed total price.
pub async fn create_order(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.0.id;
    let req = body.into_inner();

    // 1. Validate the required fields, naming the first missing one.
    let design = require(req.design, "design")?;
    let product_type = require(req.product_type, "product_type")?;
    let color = require(req.color, "color")?;
    let view_angle = require(req.view_angle, "view_angle")?;
    let quantity = require(req.quantity, "quantity")?;
    let base_price = require(req.base_price, "base_price")?;
    let design_price = require(req.design_price, "design_price")?;
    let total_price = require(req.total_price, "total_price")?;

    if quantity < 1 {
        return Err(ApiError::validation("Quantity must be at least 1"));
    }

    // 2. Direct orders always carry at least one printed side.
    if design.is_empty() {
        return Err(ApiError::validation("At least one design side is required"));
    }

    // 3. Insert the draft.
    let order = order_db::insert_order(
        db.get_ref(),
        user_id,
        NewOrder {
            status: OrderStatus::UnderReview,
            quantity,
            design,
            base_price,
            design_price,
            total_price,
            product_type,
            color,
            size: req.size,
            view_angle,
            source_designs: None,
            is_hidden: req.is_hidden.unwrap_or(false),
            is_cart_order: req.is_cart_order.unwrap_or(true),
        },
    )
    .await?;

    cache.invalidate(&keys::orders(user_id)).await;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "data": {
            "order_id": order.id,
            "user_id": order.user_id,
            "status": order.status,
            "total_price": order.total_price,
        },
    })))
}

/// POST /api/orders/cart — the design-canvas path.
///
/// If the caller already has a pending draft with the same content
/// fingerprint (side references + hidden/cart flags), its quantity is bumped
/// and the total recomputed instead of inserting a duplicate cart line.
pub async fn add_to_cart(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.0.id;
    let req = body.into_inner();

    // 1. Validate the required fields, naming the first missing one.
    let design = require(req.design, "design")?;
    let product_type = require(req.product_type, "product_type")?;
    let color = require(req.color, "color")?;
    let view_angle = require(req.view_angle, "view_angle")?;
    let quantity = require(req.quantity, "quantity")?;
    let base_price = require(req.base_price, "base_price")?;
    let design_price = require(req.design_price, "design_price")?;
    let total_price = require(req.total_price, "total_price")?;

    if quantity < 1 {
        return Err(ApiError::validation("Quantity must be at least 1"));
    }

    let is_hidden = req.is_hidden.unwrap_or(false);
    let is_cart_order = req.is_cart_order.unwrap_or(true);

    // Plain drafts need a printed side; only cart placeholders may be bare.
    if design.is_empty() && !is_cart_order {
        return Err(ApiError::validation("At least one design side is required"));
    }

    // 2. Merge into an existing draft with the same fingerprint, if any.
    if let Some(existing) =
        order_db::find_matching_draft(db.get_ref(), user_id, &design, is_hidden, is_cart_order)
            .await?
    {
        let merged = order_db::merge_draft_quantity(db.get_ref(), existing, quantity).await?;
        cache.invalidate(&keys::orders(user_id)).await;

        return Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "merged": true,
            "data": {
                "order_id": merged.id,
                "quantity": merged.quantity,
                "status": merged.status,
                "total_price": merged.total_price,
            },
        })));
    }

    // 3. No match: insert a fresh pending draft.
    let order = order_db::insert_order(
        db.get_ref(),
        user_id,
        NewOrder {
            status: OrderStatus::Pending,
            quantity,
            design,
            base_price,
            design_price,
            total_price,
            product_type,
            color,
            size: req.size,
            view_angle,
            source_designs: None,
            is_hidden,
            is_cart_order,
        },
    )
    .await?;

    cache.invalidate(&keys::orders(user_id)).await;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "merged": false,
        "data": {
            "order_id": order.id,
            "quantity": order.quantity,
            "status": order.status,
            "total_price": order.total_price,
        },
    })))
}

/// POST /api/orders/{id}/submit — hand an order to the admin review queue.
///
/// Takes an optional quantity override (the total is re-derived from the
/// per-unit price) and an optional currency override. Copies the caller's
/// identity/shipping data into the snapshot; the copy is never re-synced.
pub async fn submit_for_review(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<Uuid>,
    body: web::Json<SubmitOrderRequest>,
) -> Result<HttpResponse, ApiError> {
    let order_id = path.into_inner();
    let client = user.0;

    // 1. The order must exist and belong to the caller. Foreign orders read
    //    as missing so ids are not probeable.
    let order = order_db::get_order_by_id(db.get_ref(), order_id)
        .await?
        .filter(|o| o.user_id == client.id)
        .ok_or_else(|| ApiError::not_found(format!("Order {order_id} not found")))?;

    // 2. At most one review snapshot per order.
    if admin_db::exists_for_order(db.get_ref(), order_id).await? {
        return Err(ApiError::conflict(
            "Order has already been submitted for review",
        ));
    }

    // 3. Re-derive the total from the per-unit price and requested quantity.
    let quantity = body.quantity.unwrap_or(order.quantity);
    if quantity < 1 {
        return Err(ApiError::validation("Quantity must be at least 1"));
    }
    let unit = pricing::unit_price(order.total_price, order.quantity);
    let total = pricing::line_total(unit, quantity);

    // 4. Currency: an explicit override wins; Tunisian clients convert to TND.
    let (total_price, currency) =
        pricing::localize(total, client.country.as_deref(), body.currency.as_deref());

    let snapshot = NewAdminOrder {
        order_id,
        client_name: client.display_name(),
        client_email: client.email.clone(),
        phone: client.phone.clone(),
        country: client.country.clone(),
        city: client.city.clone(),
        address: client.address.clone(),
        postal: client.postal.clone(),
        cin: client.cin.clone(),
        product_type: order.product_type.clone(),
        color: order.color.clone(),
        size: order.size.clone(),
        view_angle: order.view_angle.clone(),
        quantity,
        front_design: order.front_design.clone(),
        back_design: order.back_design.clone(),
        left_design: order.left_design.clone(),
        right_design: order.right_design.clone(),
        base_price: order.base_price,
        design_price: order.design_price,
        total_price,
        currency,
    };

    // 5+6. Snapshot insert and status flip move together or not at all. The
    //      unique index on order_id turns a concurrent double-submit into a
    //      conflict instead of a duplicate snapshot.
    let txn = db.begin().await?;
    let admin_order = match admin_db::insert_admin_order(&txn, snapshot).await {
        Ok(row) => row,
        Err(e) if is_unique_violation(&e) => {
            txn.rollback().await.ok();
            return Err(ApiError::conflict(
                "Order has already been submitted for review",
            ));
        }
        Err(e) => {
            txn.rollback().await.ok();
            return Err(e.into());
        }
    };
    order_db::set_status(&txn, order_id, OrderStatus::SubmittedForReview, None).await?;
    txn.commit().await?;

    cache.invalidate(&keys::orders(client.id)).await;
    cache.invalidate(&keys::admin_orders()).await;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "admin_order_id": admin_order.id,
    })))
}

/// GET /api/orders — the caller's non-hidden orders, newest first.
pub async fn list_my_orders(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    config: web::Data<CacheConfig>,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.0.id;
    let key = keys::orders(user_id);

    if let Ok(Some(cached)) = cache.get::<Vec<orders::Model>>(&key).await {
        return Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "orders": cached,
        })));
    }

    let orders = order_db::get_visible_orders_by_user(db.get_ref(), user_id).await?;

    if let Err(e) = cache
        .set(&key, &orders, Some(config.order_list_ttl.as_secs()))
        .await
    {
        tracing::warn!(error = %e, "failed to cache order list");
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "orders": orders,
    })))
}

/// GET /api/orders/{id} — a single order, owner-scoped.
pub async fn get_order(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let order_id = path.into_inner();

    let order = order_db::get_order_by_id(db.get_ref(), order_id)
        .await?
        .filter(|o| o.user_id == user.0.id)
        .ok_or_else(|| ApiError::not_found(format!("Order {order_id} not found")))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": order,
    })))
}

/// DELETE /api/orders/{id} — owner-scoped draft delete. The review snapshot,
/// if any, goes with it via the store's cascade.
pub async fn delete_order(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let order_id = path.into_inner();
    let user_id = user.0.id;

    let result = order_db::delete_order_owned(db.get_ref(), order_id, user_id).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found(format!("Order {order_id} not found")));
    }

    cache.invalidate(&keys::orders(user_id)).await;
    cache.invalidate(&keys::admin_orders()).await;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": format!("Order {order_id} deleted"),
    })))
}
